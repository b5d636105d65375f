use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ErrorBody, RemoteError};
use crate::models::{ResultRow, SaveResult, SearchResponse};
use crate::remote::traits::{SaveService, SearchService};
use crate::search::SearchRequest;

const USER_AGENT: &str = concat!("property-scout/", env!("CARGO_PKG_VERSION"));

/// Where the remote procedures live.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL; procedures are addressed as `{endpoint}/search` and
    /// `{endpoint}/saveResults`.
    pub endpoint: String,
    /// Client-side request timeout. `None` waits as long as the server does.
    pub timeout: Option<Duration>,
}

/// Calls the search and save procedures over HTTP with JSON bodies.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct SearchCall<'a> {
    req: &'a SearchRequest,
}

#[derive(Serialize)]
struct SaveCall<'a> {
    req: &'a SearchRequest,
    rows: &'a [ResultRow],
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, procedure: &str) -> String {
        format!("{}/{}", self.endpoint, procedure)
    }

    async fn call<B, T>(&self, procedure: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(procedure);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::flat(format!("Failed to reach {procedure}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("{} returned status: {}", procedure, status);
            return Err(error_from_response(procedure, status, &text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::flat(format!("Invalid {procedure} response: {e}")))
    }
}

/// Map a non-2xx response to a [`RemoteError`].
///
/// The body's `message` (either `{"message": ..}` or a list of such objects)
/// becomes the structured message; the status line is the flat message.
pub fn error_from_response(procedure: &str, status: StatusCode, body: &str) -> RemoteError {
    let structured = serde_json::from_str::<ErrorBody>(body).ok().or_else(|| {
        serde_json::from_str::<Vec<ErrorBody>>(body)
            .ok()
            .and_then(|bodies| bodies.into_iter().next())
    });

    RemoteError {
        body: structured,
        message: Some(format!("{procedure} returned {status}")),
    }
}

#[async_trait]
impl SearchService for HttpBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, RemoteError> {
        let response: SearchResponse = self.call("search", &SearchCall { req: request }).await?;
        info!(
            "Search returned {} rows",
            response.rows.as_ref().map_or(0, Vec::len)
        );
        Ok(response)
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

#[async_trait]
impl SaveService for HttpBackend {
    async fn save_results(
        &self,
        request: &SearchRequest,
        rows: &[ResultRow],
    ) -> Result<SaveResult, RemoteError> {
        self.call("saveResults", &SaveCall { req: request, rows })
            .await
    }
}
