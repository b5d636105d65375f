use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::error::RemoteError;
use crate::models::{ResultRow, SaveResult, SearchResponse};
use crate::remote::traits::{SaveService, SearchService};
use crate::search::SearchRequest;

/// A scripted backend for tests. Replies are handed out in order and every
/// call is recorded.
#[derive(Default)]
pub struct MockBackend {
    search_replies: Mutex<VecDeque<Result<SearchResponse, RemoteError>>>,
    save_replies: Mutex<VecDeque<Result<SaveResult, RemoteError>>>,
    search_calls: Mutex<Vec<SearchRequest>>,
    save_calls: Mutex<Vec<(SearchRequest, Vec<ResultRow>)>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_search(&self, reply: Result<SearchResponse, RemoteError>) -> &Self {
        self.search_replies.lock().push_back(reply);
        self
    }

    pub fn push_save(&self, reply: Result<SaveResult, RemoteError>) -> &Self {
        self.save_replies.lock().push_back(reply);
        self
    }

    /// Make the next call wait until the returned handle is notified.
    pub fn hold_next_call(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    pub fn search_calls(&self) -> Vec<SearchRequest> {
        self.search_calls.lock().clone()
    }

    pub fn save_calls(&self) -> Vec<(SearchRequest, Vec<ResultRow>)> {
        self.save_calls.lock().clone()
    }

    async fn wait_at_gate(&self) {
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl SearchService for MockBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, RemoteError> {
        let calls = {
            let mut calls = self.search_calls.lock();
            calls.push(request.clone());
            calls.len()
        };
        self.wait_at_gate().await;
        self.search_replies.lock().pop_front().unwrap_or_else(|| {
            Err(RemoteError::flat(format!(
                "MockBackend: no more search replies (called {calls} times)"
            )))
        })
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

#[async_trait]
impl SaveService for MockBackend {
    async fn save_results(
        &self,
        request: &SearchRequest,
        rows: &[ResultRow],
    ) -> Result<SaveResult, RemoteError> {
        let calls = {
            let mut calls = self.save_calls.lock();
            calls.push((request.clone(), rows.to_vec()));
            calls.len()
        };
        self.wait_at_gate().await;
        self.save_replies.lock().pop_front().unwrap_or_else(|| {
            Err(RemoteError::flat(format!(
                "MockBackend: no more save replies (called {calls} times)"
            )))
        })
    }
}
