//! Semantic search request.

use serde::Serialize;

use super::ChatId;

/// Result count used when the caller does not pick one.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Body of `POST /embeddings/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Chat to search in.
    pub chat_id: ChatId,
    /// Free-text query.
    pub query: String,
    /// Maximum number of ranked matches.
    pub limit: u32,
}

impl SearchRequest {
    /// Creates a search request with the default limit.
    pub fn new(chat_id: impl Into<ChatId>, query: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            query: query.into(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Sets the result limit.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}
