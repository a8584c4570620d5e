//! Type definitions for the chat explorer API.
//!
//! Responses are deliberately untyped: the server owns their schema, so
//! they surface as [`ApiPayload`]. Only request-side shapes live here.

pub mod chat;
pub mod search;

pub use chat::{ChatFile, ChatId};
pub use search::{SearchRequest, DEFAULT_SEARCH_LIMIT};

/// Any JSON payload returned by the server.
pub type ApiPayload = serde_json::Value;
