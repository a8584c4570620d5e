//! Configuration module for the chat explorer client.
//!
//! The client talks to one server, addressed as an origin plus a base path
//! (`/api` by default). The configuration is built once and is read-only
//! afterwards; every request shares it.

use std::time::Duration;
use url::Url;

use crate::errors::{ChatExplorerError, ChatExplorerResult};

/// Default server origin (the development backend).
pub const DEFAULT_ORIGIN: &str = "http://localhost:5002";

/// Default base path all API endpoints live under.
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Default maximum wait per request (30 seconds). Generous because the
/// server processes uploaded files inline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Configuration for the chat explorer client.
#[derive(Debug, Clone)]
pub struct ChatExplorerConfig {
    /// Scheme, host and port of the server, without a trailing slash.
    pub origin: String,
    /// Path prefix for all endpoints, normalized to `/segment` form (or empty).
    pub base_path: String,
    /// Maximum wait per request.
    pub timeout: Duration,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl ChatExplorerConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ChatExplorerConfigBuilder {
        ChatExplorerConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CHAT_EXPLORER_ORIGIN` (optional): server origin
    /// - `CHAT_EXPLORER_BASE_PATH` (optional): endpoint prefix
    /// - `CHAT_EXPLORER_TIMEOUT_MS` (optional): request timeout in milliseconds
    pub fn from_env() -> ChatExplorerResult<Self> {
        let mut builder = ChatExplorerConfigBuilder::new();

        if let Ok(origin) = std::env::var("CHAT_EXPLORER_ORIGIN") {
            builder = builder.origin(origin);
        }

        if let Ok(base_path) = std::env::var("CHAT_EXPLORER_BASE_PATH") {
            builder = builder.base_path(base_path);
        }

        if let Ok(timeout_str) = std::env::var("CHAT_EXPLORER_TIMEOUT_MS") {
            if let Ok(timeout_ms) = timeout_str.parse::<u64>() {
                builder = builder.timeout_ms(timeout_ms);
            }
        }

        builder.build()
    }

    /// Returns the base URL (origin joined with the base path).
    pub fn base_url(&self) -> String {
        format!("{}{}", self.origin, self.base_path)
    }

    /// Returns the full URL for an endpoint given as path segments.
    ///
    /// Each segment is percent-encoded, so a segment containing `/` stays
    /// a single segment.
    pub fn endpoint_url<S: AsRef<str>>(&self, segments: &[S]) -> ChatExplorerResult<Url> {
        let mut url = Url::parse(&self.origin)?;
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ChatExplorerError::configuration("Origin cannot be used as a base URL")
            })?;
            path.pop_if_empty();
            path.extend(self.base_path.split('/').filter(|s| !s.is_empty()));
            path.extend(segments.iter().map(AsRef::as_ref));
        }
        Ok(url)
    }
}

impl Default for ChatExplorerConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
            custom_headers: Vec::new(),
        }
    }
}

/// Builder for `ChatExplorerConfig`.
#[derive(Debug, Default)]
pub struct ChatExplorerConfigBuilder {
    origin: Option<String>,
    base_path: Option<String>,
    timeout: Option<Duration>,
    custom_headers: Vec<(String, String)>,
}

impl ChatExplorerConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server origin, e.g. `http://localhost:5002`.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the base path, e.g. `/api`.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in milliseconds.
    pub fn timeout_ms(mut self, millis: u64) -> Self {
        self.timeout = Some(Duration::from_millis(millis));
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ChatExplorerResult<ChatExplorerConfig> {
        let raw_origin = self.origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let origin = Url::parse(raw_origin.trim())?;

        if !matches!(origin.scheme(), "http" | "https") {
            return Err(ChatExplorerError::configuration(format!(
                "Origin must use http or https, got '{}'",
                origin.scheme()
            )));
        }

        if origin.cannot_be_a_base() {
            return Err(ChatExplorerError::configuration(
                "Origin cannot be used as a base URL",
            ));
        }

        let base_path = normalize_base_path(
            self.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH),
        );

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ChatExplorerError::configuration(
                "Timeout must be greater than zero",
            ));
        }

        Ok(ChatExplorerConfig {
            origin: origin.as_str().trim_end_matches('/').to_string(),
            base_path,
            timeout,
            custom_headers: self.custom_headers,
        })
    }
}

/// Normalizes `api`, `/api/` and `//api` to `/api`; an empty or `/` path
/// becomes empty.
fn normalize_base_path(raw: &str) -> String {
    let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}
