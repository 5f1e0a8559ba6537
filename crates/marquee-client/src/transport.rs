//! Transport seam between request descriptions and the network.
//!
//! # Design
//! - Requests are plain data so controllers stay testable without a server.
//! - Transports only move bytes; status interpretation lives in `fetch`.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::error::FetchError;

/// Header carrying the per-invocation trace identifier.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// Description of one outbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute path on the backend, e.g. `/v1/movies`.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Bearer token for authenticated endpoints.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// `GET path` without body or credentials.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            bearer: None,
        }
    }

    /// `POST path` with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
            bearer: None,
        }
    }

    /// `DELETE path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
            bearer: None,
        }
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }
}

/// Status and body of a completed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Response with a JSON body.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    /// Response with an empty body.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

/// Executes request descriptions.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the call. Only failures to complete it are errors; any HTTP
    /// status is returned as a [`RawResponse`].
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, FetchError>;
}

/// `reqwest`-backed transport bound to one backend.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Wrap an existing client.
    #[must_use]
    pub const fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Build a client honouring the configured timeout, tagging every
    /// request with `request_id` when given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the header value is invalid or the client
    /// cannot be built.
    pub fn from_config(config: &ClientConfig, request_id: Option<&str>) -> Result<Self, ConfigError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(request_id) = request_id {
            let value =
                HeaderValue::from_str(request_id).map_err(|_| ConfigError::InvalidRequestId)?;
            default_headers.insert(HEADER_REQUEST_ID, value);
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|err| ConfigError::HttpClient {
                detail: err.to_string(),
            })?;
        Ok(Self::new(client, config.api_url.clone()))
    }

    /// Backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, FetchError> {
        let ApiRequest {
            method,
            path,
            body,
            bearer,
        } = request;
        let url = self
            .base_url
            .join(&path)
            .map_err(|err| FetchError::Network(format!("invalid request path '{path}': {err}")))?;

        let mut builder = self.client.request(method.clone(), url);
        if let Some(body) = &body {
            builder = builder.json(body);
        }
        if let Some(token) = &bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|err| {
            FetchError::Network(format!("request to {path} failed: {err}"))
        })?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|err| {
            FetchError::Network(format!("failed to read response from {path}: {err}"))
        })?;
        tracing::debug!(%method, path = %path, status, bytes = bytes.len(), "request completed");

        Ok(RawResponse {
            status,
            body: bytes.to_vec(),
        })
    }
}
