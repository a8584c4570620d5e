//! Server liveness check.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

use super::ApiExecutor;
use crate::errors::ChatExplorerResult;
use crate::transport::HttpRequest;

/// Service for `GET /health`.
pub struct HealthService {
    executor: Arc<ApiExecutor>,
}

impl HealthService {
    /// Creates a new health service.
    pub fn new(executor: Arc<ApiExecutor>) -> Self {
        Self { executor }
    }

    /// Returns the server's `{status, message}` payload.
    #[instrument(skip(self))]
    pub async fn check<T: DeserializeOwned>(&self) -> ChatExplorerResult<T> {
        self.executor
            .execute("health", HttpRequest::get(["health"]))
            .await
    }
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService").finish()
    }
}
