//! Shared helpers for integration tests.

use chat_explorer_client::ChatExplorerClient;
use std::time::Duration;
use wiremock::MockServer;

/// Starts a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Builds a client pointed at the mock server with the default `/api`
/// base path.
pub fn client_for(server: &MockServer) -> ChatExplorerClient {
    ChatExplorerClient::builder()
        .origin(server.uri())
        .build()
        .expect("Failed to build client")
}

/// Builds a client with a short wait, for timeout tests.
pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> ChatExplorerClient {
    ChatExplorerClient::builder()
        .origin(server.uri())
        .timeout(timeout)
        .build()
        .expect("Failed to build client")
}
