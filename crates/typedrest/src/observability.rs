//! Structured logging helpers for client calls
//!
//! Every verb call is logged through this layer so the field names stay the
//! same across the crate. The transport logs wire-level detail at `debug`;
//! this layer logs the call outcome.

use std::fmt::Display;
use std::time::{Duration, Instant};

use http::{Method, StatusCode};
use tracing::{debug, info, warn};
use typedrest_transport::HttpResponse;

/// What is known about a call before it goes out
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP verb
    pub method: Method,
    /// `base_url + path`
    pub url: String,
    /// Encoded JSON body length, if a body is sent
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Metadata for a call with no body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body_size: None,
        }
    }

    /// Record the size of the body about to be sent
    pub fn with_body(mut self, body: Option<&[u8]>) -> Self {
        self.body_size = body.map(<[u8]>::len);
        self
    }

    /// `debug`: the call is being handed to the transport
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            url = %self.url,
            body_size = self.body_size,
            "Dispatching REST call"
        );
    }

    /// `warn`: no response arrived
    pub fn log_network_failure(&self, elapsed: Duration, error: &dyn Display) {
        warn!(
            method = %self.method,
            url = %self.url,
            elapsed_ms = elapsed.as_millis(),
            error = %error,
            "REST call failed before a response arrived"
        );
    }
}

/// What came back
#[derive(Debug, Clone, Copy)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: StatusCode,
    /// Raw body length
    pub body_size: usize,
    /// Round trip time
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Summarize a transport response
    pub fn of(response: &HttpResponse, elapsed: Duration) -> Self {
        Self {
            status: response.status,
            body_size: response.body.len(),
            elapsed,
        }
    }

    /// `info`: the call completed and its status is handed back as data
    pub fn log_completed(&self, request: &RequestMetadata) {
        info!(
            method = %request.method,
            url = %request.url,
            status = self.status.as_u16(),
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            "REST call completed"
        );
    }

    /// `warn`: the status is being raised as an error
    pub fn log_error_status(&self, request: &RequestMetadata) {
        warn!(
            method = %request.method,
            url = %request.url,
            status = self.status.as_u16(),
            elapsed_ms = self.elapsed.as_millis(),
            "REST call returned an error status"
        );
    }
}

/// Wall-clock timer around one round trip
#[derive(Debug, Clone, Copy)]
pub struct RequestTimer(Instant);

impl RequestTimer {
    /// Start timing now
    pub fn start() -> Self {
        Self(Instant::now())
    }

    /// Time since [`start`](Self::start)
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Install a global `tracing` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `typedrest=info` when `RUST_LOG` is unset. Does nothing if a
/// subscriber is already installed.
#[cfg(feature = "trace")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("typedrest=info,typedrest_transport=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    #[test]
    fn test_request_body_size() {
        let bare = RequestMetadata::new(Method::GET, "https://reqres.in/api/users/2");
        assert_eq!(bare.body_size, None);

        let body = br#"{"name":"morpheus","job":"leader"}"#;
        let with_body = RequestMetadata::new(Method::POST, "https://reqres.in/api/users")
            .with_body(Some(body.as_slice()));
        assert_eq!(with_body.body_size, Some(body.len()));
    }

    #[test]
    fn test_response_summary() {
        let response = HttpResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), b"{}".to_vec());
        let meta = ResponseMetadata::of(&response, Duration::from_millis(120));

        assert_eq!(meta.status, StatusCode::NOT_FOUND);
        assert_eq!(meta.body_size, 2);
        assert_eq!(meta.elapsed, Duration::from_millis(120));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn test_init_tracing_is_repeatable() {
        init_tracing();
        init_tracing();
        tracing::info!("subscriber installed");
    }

    #[test]
    fn test_timer_advances() {
        let timer = RequestTimer::start();
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed() >= Duration::from_millis(5));
    }
}
