//! Embeddings service: semantic search, cluster coordinates, processing.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

use super::ApiExecutor;
use crate::errors::ChatExplorerResult;
use crate::transport::HttpRequest;
use crate::types::{ChatId, SearchRequest};

const EMBEDDINGS: &str = "embeddings";

/// Service for the `/embeddings` endpoints.
pub struct EmbeddingsService {
    executor: Arc<ApiExecutor>,
}

impl EmbeddingsService {
    /// Creates a new embeddings service.
    pub fn new(executor: Arc<ApiExecutor>) -> Self {
        Self { executor }
    }

    /// Searches a chat for messages similar to the query.
    #[instrument(skip(self, request), fields(chat_id = %request.chat_id, limit = request.limit))]
    pub async fn search<T: DeserializeOwned>(
        &self,
        request: &SearchRequest,
    ) -> ChatExplorerResult<T> {
        let http_request = HttpRequest::post([EMBEDDINGS, "search"]).with_json(request)?;
        self.executor.execute("search_messages", http_request).await
    }

    /// Fetches 2-D cluster coordinates for visualization.
    #[instrument(skip(self), fields(chat_id = %chat_id))]
    pub async fn clusters<T: DeserializeOwned>(&self, chat_id: &ChatId) -> ChatExplorerResult<T> {
        let request = HttpRequest::get([EMBEDDINGS, chat_id.as_str(), "clusters"]);
        self.executor.execute("get_clusters", request).await
    }

    /// Asks the server to embed and cluster a chat. Long-running on the
    /// server side; still bounded by the shared wait.
    #[instrument(skip(self), fields(chat_id = %chat_id))]
    pub async fn process<T: DeserializeOwned>(&self, chat_id: &ChatId) -> ChatExplorerResult<T> {
        let request = HttpRequest::post([EMBEDDINGS, chat_id.as_str(), "process"]);
        self.executor.execute("process_chat", request).await
    }
}

impl std::fmt::Debug for EmbeddingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingsService").finish()
    }
}
