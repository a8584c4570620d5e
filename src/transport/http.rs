//! HTTP transport implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use super::{MultipartPart, MultipartRequest, TransportError};
use crate::config::ChatExplorerConfig;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// HTTP request representation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Endpoint path segments, relative to the base path.
    pub path: Vec<String>,
    /// Query string pairs, in order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    fn new<S: Into<String>>(method: HttpMethod, path: impl IntoIterator<Item = S>) -> Self {
        Self {
            method,
            path: path.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Creates a new GET request.
    pub fn get<S: Into<String>>(path: impl IntoIterator<Item = S>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a new POST request.
    pub fn post<S: Into<String>>(path: impl IntoIterator<Item = S>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Sets a JSON body and the matching content type.
    pub fn with_json<T: serde::Serialize>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(body)?);
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// Sets a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the path as `/a/b/c`, for logging and assertions.
    pub fn path_string(&self) -> String {
        format!("/{}", self.path.join("/"))
    }

    /// Returns the value of a query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body as lossy UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP transport trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Send a multipart form request.
    async fn send_multipart(
        &self,
        request: MultipartRequest,
    ) -> Result<HttpResponse, TransportError>;
}

/// HTTP transport implementation using reqwest.
pub struct HttpTransportImpl {
    client: Client,
    config: ChatExplorerConfig,
}

impl HttpTransportImpl {
    /// Creates a new HTTP transport.
    pub fn new(config: &ChatExplorerConfig) -> Result<Self, TransportError> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.custom_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::InvalidRequest {
                    message: format!("invalid header name '{}': {}", name, e),
                }
            })?;
            let value =
                HeaderValue::from_str(value).map_err(|e| TransportError::InvalidRequest {
                    message: format!("invalid header value for '{}': {}", name, e),
                })?;
            default_headers.insert(name, value);
        }

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .pool_max_idle_per_host(10)
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| TransportError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Builds the full URL for a path and query.
    fn build_url(&self, path: &[String], query: &[(String, String)]) -> Result<Url, TransportError> {
        let mut url =
            self.config
                .endpoint_url(path)
                .map_err(|e| TransportError::InvalidRequest {
                    message: e.to_string(),
                })?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    fn apply_common(
        &self,
        mut req_builder: RequestBuilder,
        headers: &HashMap<String, String>,
    ) -> RequestBuilder {
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }
        req_builder
    }

    async fn execute(&self, req_builder: RequestBuilder) -> Result<HttpResponse, TransportError> {
        // No status has arrived yet, so a refused, reset or dropped
        // connection all count as the server being unreachable.
        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    timeout: self.config.timeout,
                }
            } else if e.is_connect() || e.is_request() {
                TransportError::Connection {
                    message: e.to_string(),
                }
            } else {
                TransportError::InvalidResponse {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        timeout: self.config.timeout,
                    }
                } else {
                    TransportError::InvalidResponse {
                        message: e.to_string(),
                    }
                }
            })?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for HttpTransportImpl {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path_string()))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(&request.path, &request.query)?;

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        req_builder = self.apply_common(req_builder, &request.headers);

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        self.execute(req_builder).await
    }

    #[instrument(skip(self, request), fields(path = %request.path_string()))]
    async fn send_multipart(
        &self,
        request: MultipartRequest,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(&request.path, &[])?;

        // The whole form is assembled before anything goes on the wire.
        let mut form = reqwest::multipart::Form::new();

        for MultipartPart {
            name,
            filename,
            content_type,
            data,
        } in request.parts
        {
            let part = reqwest::multipart::Part::stream(data)
                .file_name(filename)
                .mime_str(&content_type)
                .map_err(|e| TransportError::InvalidRequest {
                    message: e.to_string(),
                })?;
            form = form.part(name, part);
        }

        let req_builder = self.client.post(url).multipart(form);
        let req_builder = self.apply_common(req_builder, &request.headers);

        self.execute(req_builder).await
    }
}

impl fmt::Debug for HttpTransportImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransportImpl")
            .field("base_url", &self.config.base_url())
            .field("timeout", &self.config.timeout)
            .finish()
    }
}
