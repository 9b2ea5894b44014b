//! Transport trait and request/response data
//!
//! Defines the generic Transport trait the REST client dispatches through,
//! so the client can run over the reqwest transport or a test double.

use crate::error::Result;
use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};

/// HTTP request specification
///
/// Headers arrive already merged; the transport sends them as-is.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,

    /// Fully-formed request URL
    pub url: String,

    /// Request headers
    pub headers: HeaderMap,

    /// Request body (optional)
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Replace the request headers
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP response as received from the server, any status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: StatusCode,

    /// Response headers
    pub headers: HeaderMap,

    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the body is empty or whitespace only
    pub fn is_body_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Body as text, lossily decoded
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Generic transport trait for sending requests
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send a request and receive the response.
    ///
    /// # Errors
    ///
    /// Returns an error only when the round trip could not be completed.
    /// Non-2xx statuses are successful sends.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Check if the transport currently holds a live connection pool
    async fn is_connected(&self) -> bool;

    /// Release the connection pool. Calling this twice is a no-op.
    ///
    /// # Errors
    ///
    /// Implementations may fail while tearing down connections.
    async fn close(&self) -> Result<()>;
}
