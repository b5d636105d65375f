use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::{ResultRow, SaveResult, SearchResponse};
use crate::search::SearchRequest;

/// Remote procedure that looks up properties matching a request.
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, RemoteError>;

    /// Name of the backend, for logs.
    fn backend_name(&self) -> &'static str;
}

/// Remote procedure that persists a result set together with the request
/// that is current at save time.
#[async_trait]
pub trait SaveService: Send + Sync {
    async fn save_results(
        &self,
        request: &SearchRequest,
        rows: &[ResultRow],
    ) -> Result<SaveResult, RemoteError>;
}
