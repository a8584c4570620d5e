//! Service implementations for the chat explorer API.
//!
//! Each service maps typed calls onto one HTTP request. All of them share
//! an [`ApiExecutor`], which bounds every exchange by the configured wait
//! and turns non-2xx responses into errors.

mod embeddings;
mod health;
mod messages;

pub use embeddings::EmbeddingsService;
pub use health::HealthService;
pub use messages::MessagesService;

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::{ApiErrorResponse, ChatExplorerError, ChatExplorerResult};
use crate::observability::{Observability, RequestTimer};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, MultipartRequest};

/// Sends requests through a transport and decodes the outcome.
pub struct ApiExecutor {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
    observability: Observability,
}

impl ApiExecutor {
    /// Creates an executor.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        timeout: Duration,
        observability: Observability,
    ) -> Self {
        Self {
            transport,
            timeout,
            observability,
        }
    }

    /// Sends a request and decodes a JSON payload.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: HttpRequest,
    ) -> ChatExplorerResult<T> {
        tracing::debug!(
            method = %request.method,
            path = %request.path_string(),
            query = ?request.query,
            "Dispatching request"
        );

        let timer = RequestTimer::new(operation);
        let outcome = self
            .bounded(self.transport.send(request))
            .await
            .and_then(|response| parse_payload(&response));
        self.record(&timer, &outcome);
        outcome
    }

    /// Sends a multipart request and decodes a JSON payload.
    pub async fn execute_multipart<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: MultipartRequest,
    ) -> ChatExplorerResult<T> {
        tracing::debug!(
            path = %request.path_string(),
            parts = request.parts.len(),
            "Dispatching multipart request"
        );

        let timer = RequestTimer::new(operation);
        let outcome = self
            .bounded(self.transport.send_multipart(request))
            .await
            .and_then(|response| parse_payload(&response));
        self.record(&timer, &outcome);
        outcome
    }

    /// Races the exchange against the configured wait. The transport
    /// usually enforces it too; this covers transports that do not.
    async fn bounded<F>(&self, exchange: F) -> ChatExplorerResult<HttpResponse>
    where
        F: std::future::Future<Output = Result<HttpResponse, crate::transport::TransportError>>,
    {
        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result.map_err(ChatExplorerError::from),
            Err(_elapsed) => Err(ChatExplorerError::Timeout {
                message: "no response from server".to_string(),
                timeout: self.timeout,
            }),
        }
    }

    fn record<T>(&self, timer: &RequestTimer, outcome: &ChatExplorerResult<T>) {
        let elapsed = timer.elapsed();
        match outcome {
            Ok(_) => {
                tracing::debug!(
                    operation = timer.operation(),
                    elapsed_ms = elapsed.as_millis(),
                    "Request completed"
                );
                self.observability
                    .record_success(timer.operation(), elapsed);
            }
            Err(err) => {
                tracing::warn!(
                    operation = timer.operation(),
                    elapsed_ms = elapsed.as_millis(),
                    error = %err,
                    "Request failed"
                );
                self.observability
                    .record_failure(timer.operation(), elapsed, err.kind());
            }
        }
    }
}

impl std::fmt::Debug for ApiExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiExecutor")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Decodes a 2xx body, or builds the error for anything else.
fn parse_payload<T: DeserializeOwned>(response: &HttpResponse) -> ChatExplorerResult<T> {
    if !response.is_success() {
        return Err(parse_error_response(response));
    }

    // An empty 2xx body decodes as JSON null.
    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };

    serde_json::from_slice(body).map_err(|e| ChatExplorerError::Serialization {
        message: format!("Failed to parse response: {}", e),
        status: Some(response.status),
    })
}

/// Builds an API error carrying the status, body and headers unchanged.
fn parse_error_response(response: &HttpResponse) -> ChatExplorerError {
    let message = serde_json::from_slice::<ApiErrorResponse>(&response.body)
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("HTTP error: {}", response.status));

    let body = if response.body.is_empty() {
        None
    } else {
        Some(response.text())
    };

    ChatExplorerError::Api {
        status: response.status,
        message,
        body,
        headers: response.headers.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_parse_payload_success() {
        let value: serde_json::Value = parse_payload(&response(200, r#"[{"id": 1}]"#)).unwrap();
        assert_eq!(value, serde_json::json!([{"id": 1}]));
    }

    #[test]
    fn test_parse_payload_empty_body_is_null() {
        let value: serde_json::Value = parse_payload(&response(204, "")).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_parse_payload_invalid_json() {
        let result: ChatExplorerResult<serde_json::Value> =
            parse_payload(&response(200, "<html>"));

        match result {
            Err(ChatExplorerError::Serialization { status, .. }) => assert_eq!(status, Some(200)),
            other => panic!("Expected serialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_uses_server_message() {
        let error = parse_error_response(&response(
            400,
            r#"{"error": "Query and chat_id are required"}"#,
        ));

        match error {
            ChatExplorerError::Api {
                status,
                message,
                body,
                ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Query and chat_id are required");
                assert!(body.unwrap().contains("chat_id"));
            }
            other => panic!("Expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_without_json_body() {
        let error = parse_error_response(&response(502, "Bad Gateway"));

        assert_eq!(error.status(), Some(502));
        assert_eq!(error.body(), Some("Bad Gateway"));
    }
}
