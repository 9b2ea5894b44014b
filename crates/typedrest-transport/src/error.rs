//! Transport error types

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while completing an HTTP round trip.
///
/// None of these carry a status code: a response that made it back over the
/// wire is never an error at this layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established (DNS, refused, TLS handshake)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request or body read timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Any other fault raised by the HTTP stack while sending or reading
    #[error("HTTP error: {0}")]
    Http(String),

    /// The connection pool could not be created
    #[error("Session error: {0}")]
    Session(String),

    /// A session handle was used after `close()`
    #[error("Session {0} is closed")]
    SessionClosed(uuid::Uuid),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
