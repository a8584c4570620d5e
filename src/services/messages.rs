//! Messages service: chat upload, listing, messages and statistics.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

use super::ApiExecutor;
use crate::errors::ChatExplorerResult;
use crate::transport::{HttpRequest, MultipartPart, MultipartRequest};
use crate::types::{ChatFile, ChatId};

const MESSAGES: &str = "messages";

/// Service for the `/messages` endpoints.
pub struct MessagesService {
    executor: Arc<ApiExecutor>,
}

impl MessagesService {
    /// Creates a new messages service.
    pub fn new(executor: Arc<ApiExecutor>) -> Self {
        Self { executor }
    }

    /// Uploads a chat export as the single multipart field `file`.
    #[instrument(skip(self, file), fields(filename = %file.filename(), bytes = file.len()))]
    pub async fn upload<T: DeserializeOwned>(&self, file: ChatFile) -> ChatExplorerResult<T> {
        let request = build_upload_request(file);
        self.executor.execute_multipart("upload_chat", request).await
    }

    /// Lists all chats.
    #[instrument(skip(self))]
    pub async fn list_chats<T: DeserializeOwned>(&self) -> ChatExplorerResult<T> {
        let request = HttpRequest::get([MESSAGES, "chats"]);
        self.executor.execute("get_chats", request).await
    }

    /// Lists the messages of a chat. `limit` is sent only when given.
    #[instrument(skip(self), fields(chat_id = %chat_id))]
    pub async fn list<T: DeserializeOwned>(
        &self,
        chat_id: &ChatId,
        limit: Option<u32>,
    ) -> ChatExplorerResult<T> {
        let request = build_messages_request(chat_id, limit);
        self.executor.execute("get_messages", request).await
    }

    /// Fetches aggregated statistics for a chat.
    #[instrument(skip(self), fields(chat_id = %chat_id))]
    pub async fn stats<T: DeserializeOwned>(&self, chat_id: &ChatId) -> ChatExplorerResult<T> {
        let request = HttpRequest::get([MESSAGES, chat_id.as_str(), "stats"]);
        self.executor.execute("get_chat_stats", request).await
    }
}

fn build_upload_request(file: ChatFile) -> MultipartRequest {
    let (filename, content_type, data) = file.into_parts();

    MultipartRequest::new([MESSAGES]).with_part(MultipartPart {
        name: "file".to_string(),
        filename,
        content_type: content_type.to_string(),
        data,
    })
}

fn build_messages_request(chat_id: &ChatId, limit: Option<u32>) -> HttpRequest {
    let request = HttpRequest::get([MESSAGES, chat_id.as_str()]);

    // Zero means "no limit" to the server, same as leaving it out.
    match limit {
        Some(limit) if limit > 0 => request.with_query("limit", limit),
        _ => request,
    }
}

impl std::fmt::Debug for MessagesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagesService").finish()
    }
}
