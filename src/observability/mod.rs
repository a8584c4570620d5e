//! Observability module for the chat explorer client.
//!
//! Structured logging goes through `tracing`; request counts and latencies
//! go through a [`MetricsCollector`].

pub mod logging;
mod metrics;

pub use logging::{init_tracing, LogConfig, LogLevel};
pub use metrics::{DefaultMetricsCollector, MetricsCollector, RequestMetrics};

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Observability facade shared by all services.
#[derive(Clone)]
pub struct Observability {
    metrics: Arc<dyn MetricsCollector>,
}

impl Observability {
    /// Creates a facade backed by the given collector.
    pub fn new(metrics: Arc<dyn MetricsCollector>) -> Self {
        Self { metrics }
    }

    /// Returns the metrics collector.
    pub fn metrics(&self) -> &Arc<dyn MetricsCollector> {
        &self.metrics
    }

    /// Records a successful request.
    pub fn record_success(&self, operation: &str, duration: Duration) {
        self.metrics.record_request(operation, true, duration);
    }

    /// Records a failed request.
    pub fn record_failure(&self, operation: &str, duration: Duration, kind: &str) {
        self.metrics.record_request(operation, false, duration);
        self.metrics.record_error(kind);
    }
}

impl Default for Observability {
    fn default() -> Self {
        Self::new(Arc::new(DefaultMetricsCollector::new()))
    }
}

impl std::fmt::Debug for Observability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observability")
            .field("metrics", &self.metrics.get_metrics())
            .finish()
    }
}

/// Request timer for measuring operation duration.
pub struct RequestTimer {
    start: Instant,
    operation: &'static str,
}

impl RequestTimer {
    /// Starts timing an operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Returns the elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the operation name.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}
