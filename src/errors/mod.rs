//! Error types for the chat explorer client.
//!
//! Every failure surfaces unmodified to the caller: timeouts, network
//! failures, and non-2xx responses each keep the information the transport
//! reported. Nothing here retries or substitutes a fallback value.

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for chat explorer operations.
pub type ChatExplorerResult<T> = Result<T, ChatExplorerError>;

/// Error type for chat explorer client operations.
#[derive(Debug, Error)]
pub enum ChatExplorerError {
    /// Configuration error (invalid origin, base path, timeout).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The request could not be built, so nothing was sent.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
        /// The parameter that caused the error.
        param: Option<String>,
    },

    /// No response arrived within the configured wait.
    #[error("Request timeout after {}ms: {message}", .timeout.as_millis())]
    Timeout {
        /// Error message.
        message: String,
        /// The wait that elapsed.
        timeout: Duration,
    },

    /// Connection refused, DNS failure, or the host is unreachable.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code, unchanged from the response.
        status: u16,
        /// Server-provided error text, or a generic description.
        message: String,
        /// Raw response body.
        body: Option<String>,
        /// Response headers.
        headers: HashMap<String, String>,
    },

    /// A 2xx response whose body was not valid JSON, or a request body
    /// that could not be encoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
        /// HTTP status of the response, when one was received.
        status: Option<u16>,
    },

    /// The transport failed in a way that is neither a timeout nor a
    /// connection failure (e.g. the body stream broke mid-read).
    #[error("Transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },
}

impl ChatExplorerError {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatExplorerError::Api { status, .. } => Some(*status),
            ChatExplorerError::Serialization { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the raw response body carried by this error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            ChatExplorerError::Api { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Returns true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChatExplorerError::Timeout { .. })
    }

    /// Returns true if the server could not be reached.
    pub fn is_network(&self) -> bool {
        matches!(self, ChatExplorerError::Network { .. })
    }

    /// Short, stable name of the error kind, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatExplorerError::Configuration { .. } => "configuration",
            ChatExplorerError::Validation { .. } => "validation",
            ChatExplorerError::Timeout { .. } => "timeout",
            ChatExplorerError::Network { .. } => "network",
            ChatExplorerError::Api { .. } => "api",
            ChatExplorerError::Serialization { .. } => "serialization",
            ChatExplorerError::Transport { .. } => "transport",
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ChatExplorerError::Validation {
            message: message.into(),
            param: None,
        }
    }

    /// Creates a validation error naming the offending parameter.
    pub fn validation_param(message: impl Into<String>, param: impl Into<String>) -> Self {
        ChatExplorerError::Validation {
            message: message.into(),
            param: Some(param.into()),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        ChatExplorerError::Configuration {
            message: message.into(),
        }
    }

    /// Creates an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ChatExplorerError::Api {
            status,
            message: message.into(),
            body: None,
            headers: HashMap::new(),
        }
    }
}

/// Error body returned by the backend: `{"error": "..."}`.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// The error text.
    pub error: String,
}

impl From<TransportError> for ChatExplorerError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { timeout } => ChatExplorerError::Timeout {
                message: "no response from server".to_string(),
                timeout,
            },
            TransportError::Connection { message } => ChatExplorerError::Network { message },
            TransportError::InvalidRequest { message } => ChatExplorerError::Validation {
                message,
                param: None,
            },
            TransportError::InvalidResponse { message } => {
                ChatExplorerError::Transport { message }
            }
        }
    }
}

impl From<serde_json::Error> for ChatExplorerError {
    fn from(err: serde_json::Error) -> Self {
        ChatExplorerError::Serialization {
            message: err.to_string(),
            status: None,
        }
    }
}

impl From<url::ParseError> for ChatExplorerError {
    fn from(err: url::ParseError) -> Self {
        ChatExplorerError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_exposed_unchanged() {
        let error = ChatExplorerError::api(404, "Chat not found");
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.kind(), "api");
    }

    #[test]
    fn test_timeout_has_no_status() {
        let error = ChatExplorerError::Timeout {
            message: "slow".to_string(),
            timeout: Duration::from_millis(30_000),
        };

        assert!(error.is_timeout());
        assert!(!error.is_network());
        assert_eq!(error.status(), None);
        assert!(error.to_string().contains("30000ms"));
    }

    #[test]
    fn test_transport_error_mapping() {
        let error: ChatExplorerError = TransportError::Connection {
            message: "connection refused".to_string(),
        }
        .into();
        assert!(error.is_network());

        let error: ChatExplorerError = TransportError::Timeout {
            timeout: Duration::from_secs(30),
        }
        .into();
        assert!(error.is_timeout());

        let error: ChatExplorerError = TransportError::InvalidRequest {
            message: "bad mime".to_string(),
        }
        .into();
        assert!(matches!(error, ChatExplorerError::Validation { .. }));
    }

    #[test]
    fn test_api_error_body_accessor() {
        let error = ChatExplorerError::Api {
            status: 500,
            message: "boom".to_string(),
            body: Some(r#"{"error":"boom"}"#.to_string()),
            headers: HashMap::new(),
        };

        assert_eq!(error.body(), Some(r#"{"error":"boom"}"#));
    }

    #[test]
    fn test_error_body_deserializes() {
        let body: ApiErrorResponse =
            serde_json::from_str(r#"{"error": "Query and chat_id are required"}"#).unwrap();
        assert_eq!(body.error, "Query and chat_id are required");
    }
}
