//! HTTP transport layer for the chat explorer client.
//!
//! Services shape requests; the transport only moves bytes. Keeping the
//! seam as a trait lets tests swap in a recording transport.

mod http;

pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};

use std::collections::HashMap;
use std::time::Duration;

/// Multipart request for file uploads.
#[derive(Debug, Clone)]
pub struct MultipartRequest {
    /// Endpoint path segments, relative to the base path.
    pub path: Vec<String>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Multipart form parts.
    pub parts: Vec<MultipartPart>,
}

impl MultipartRequest {
    /// Creates a multipart POST to the given path.
    pub fn new<S: Into<String>>(path: impl IntoIterator<Item = S>) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            headers: HashMap::new(),
            parts: Vec::new(),
        }
    }

    /// Appends a part.
    pub fn with_part(mut self, part: MultipartPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Returns the path as `/a/b/c`, for logging and assertions.
    pub fn path_string(&self) -> String {
        format!("/{}", self.path.join("/"))
    }
}

/// A file field of a multipart form.
#[derive(Debug, Clone)]
pub struct MultipartPart {
    /// Field name.
    pub name: String,
    /// File name.
    pub filename: String,
    /// Content type.
    pub content_type: String,
    /// File data.
    pub data: bytes::Bytes,
}

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// The request could not be assembled (bad URL, bad MIME type).
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}
