//! Chat explorer API client.
//!
//! Provides the main client interface: seven operations against the chat
//! explorer server plus a health check.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ChatExplorerConfig, ChatExplorerConfigBuilder};
use crate::errors::{ChatExplorerError, ChatExplorerResult};
use crate::observability::{DefaultMetricsCollector, MetricsCollector, Observability, RequestMetrics};
use crate::services::{ApiExecutor, EmbeddingsService, HealthService, MessagesService};
use crate::transport::{HttpTransport, HttpTransportImpl};
use crate::types::{ApiPayload, ChatFile, ChatId, SearchRequest};

/// The main chat explorer client.
///
/// Immutable after construction, so one instance can serve any number of
/// concurrent calls. Each call is a single request with no retry; failures
/// come back exactly as the transport or server reported them.
///
/// # Example
///
/// ```rust,no_run
/// use chat_explorer_client::ChatExplorerClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ChatExplorerClient::builder()
///         .origin("http://localhost:5002")
///         .build()?;
///
///     let messages = client.get_messages("abc123", Some(50)).await?;
///     println!("{}", serde_json::to_string_pretty(&messages)?);
///     Ok(())
/// }
/// ```
pub struct ChatExplorerClient {
    config: ChatExplorerConfig,
    messages_service: MessagesService,
    embeddings_service: EmbeddingsService,
    health_service: HealthService,
    observability: Observability,
}

impl ChatExplorerClient {
    /// Creates a new client builder.
    pub fn builder() -> ChatExplorerClientBuilder {
        ChatExplorerClientBuilder::new()
    }

    /// Creates a client with the default configuration (`/api` on the
    /// development server, 30 second wait).
    pub fn new() -> ChatExplorerResult<Self> {
        ChatExplorerClientBuilder::new().build()
    }

    /// Creates a client from environment variables.
    ///
    /// See [`ChatExplorerConfig::from_env`].
    pub fn from_env() -> ChatExplorerResult<Self> {
        let config = ChatExplorerConfig::from_env()?;
        ChatExplorerClientBuilder::from_config(config).build()
    }

    /// Uploads a chat export. `POST /messages`, multipart field `file`.
    pub async fn upload_chat(&self, file: ChatFile) -> ChatExplorerResult<ApiPayload> {
        self.messages_service.upload(file).await
    }

    /// Lists all chats. `GET /messages/chats`.
    pub async fn get_chats(&self) -> ChatExplorerResult<ApiPayload> {
        self.messages_service.list_chats().await
    }

    /// Lists messages of a chat. `GET /messages/{chat_id}`, with
    /// `?limit=N` only when `limit` is given.
    pub async fn get_messages(
        &self,
        chat_id: impl Into<ChatId>,
        limit: Option<u32>,
    ) -> ChatExplorerResult<ApiPayload> {
        self.messages_service.list(&chat_id.into(), limit).await
    }

    /// Fetches chat statistics. `GET /messages/{chat_id}/stats`.
    pub async fn get_chat_stats(&self, chat_id: impl Into<ChatId>) -> ChatExplorerResult<ApiPayload> {
        self.messages_service.stats(&chat_id.into()).await
    }

    /// Searches for similar messages. `POST /embeddings/search` with body
    /// `{chat_id, query, limit}`; `limit` defaults to 10.
    pub async fn search_messages(
        &self,
        chat_id: impl Into<ChatId>,
        query: impl Into<String>,
        limit: Option<u32>,
    ) -> ChatExplorerResult<ApiPayload> {
        let mut request = SearchRequest::new(chat_id, query);
        if let Some(limit) = limit {
            request = request.limit(limit);
        }
        self.embeddings_service.search(&request).await
    }

    /// Fetches cluster coordinates. `GET /embeddings/{chat_id}/clusters`.
    pub async fn get_clusters(&self, chat_id: impl Into<ChatId>) -> ChatExplorerResult<ApiPayload> {
        self.embeddings_service.clusters(&chat_id.into()).await
    }

    /// Generates embeddings and clusters. `POST /embeddings/{chat_id}/process`.
    pub async fn process_chat(&self, chat_id: impl Into<ChatId>) -> ChatExplorerResult<ApiPayload> {
        self.embeddings_service.process(&chat_id.into()).await
    }

    /// Checks server liveness. `GET /health`.
    pub async fn health(&self) -> ChatExplorerResult<ApiPayload> {
        self.health_service.check().await
    }

    /// Returns the messages service, for typed responses.
    pub fn messages(&self) -> &MessagesService {
        &self.messages_service
    }

    /// Returns the embeddings service, for typed responses.
    pub fn embeddings(&self) -> &EmbeddingsService {
        &self.embeddings_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChatExplorerConfig {
        &self.config
    }

    /// Returns a snapshot of request metrics.
    pub fn metrics(&self) -> RequestMetrics {
        self.observability.metrics().get_metrics()
    }
}

impl std::fmt::Debug for ChatExplorerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatExplorerClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the chat explorer client.
pub struct ChatExplorerClientBuilder {
    config_builder: ChatExplorerConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    metrics: Option<Arc<dyn MetricsCollector>>,
}

impl ChatExplorerClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: ChatExplorerConfigBuilder::new(),
            transport: None,
            metrics: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: ChatExplorerConfig) -> Self {
        let mut config_builder = ChatExplorerConfigBuilder::new()
            .origin(config.origin)
            .base_path(config.base_path)
            .timeout(config.timeout);
        for (name, value) in config.custom_headers {
            config_builder = config_builder.header(name, value);
        }

        Self {
            config_builder,
            transport: None,
            metrics: None,
        }
    }

    /// Sets the server origin.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.origin(origin);
        self
    }

    /// Sets the base path.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_path(base_path);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in milliseconds.
    pub fn timeout_ms(mut self, millis: u64) -> Self {
        self.config_builder = self.config_builder.timeout_ms(millis);
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom metrics collector.
    pub fn metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Builds the client.
    pub fn build(self) -> ChatExplorerResult<ChatExplorerClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransportImpl::new(&config).map_err(|e| {
                ChatExplorerError::Configuration {
                    message: e.to_string(),
                }
            })?),
        };

        let metrics: Arc<dyn MetricsCollector> = self
            .metrics
            .unwrap_or_else(|| Arc::new(DefaultMetricsCollector::new()));
        let observability = Observability::new(metrics);

        let executor = Arc::new(ApiExecutor::new(
            transport,
            config.timeout,
            observability.clone(),
        ));

        tracing::debug!(base_url = %config.base_url(), timeout_ms = config.timeout.as_millis(), "Client configured");

        Ok(ChatExplorerClient {
            config,
            messages_service: MessagesService::new(Arc::clone(&executor)),
            embeddings_service: EmbeddingsService::new(Arc::clone(&executor)),
            health_service: HealthService::new(executor),
            observability,
        })
    }
}

impl Default for ChatExplorerClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
