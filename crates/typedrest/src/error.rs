//! Error types for the typed REST client
//!
//! Four kinds of failure reach callers: the round trip never completed
//! (network), the server answered with something the caller asked to treat
//! as an error (response), a received payload did not fit the bound model
//! (validation), or the client or request could not be built (construction).
//! [`Error::kind`] collapses the variants onto that closed set.

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;
use typedrest_transport::TransportError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the client.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not complete the round trip (DNS, connect, timeout, I/O).
    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    /// A status the caller chose to treat as a failure.
    ///
    /// Produced by `raise_on_error_status` or by [`Error::response`] in code
    /// built on top of the client. The transport itself never returns this.
    #[error("Response error (status {status})")]
    Response {
        /// HTTP status code
        status: StatusCode,
        /// Decoded body, or the raw text as a JSON string if it was not JSON
        payload: Option<Value>,
    },

    /// A body was expected but could not be decoded as JSON.
    #[error("Failed to decode response body (status {status}): {source}")]
    Decode {
        /// HTTP status code
        status: StatusCode,
        /// Raw body text
        body: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A received payload could not be turned into the bound model.
    #[error("Response validation failed (status {status}{}): {source}", element_suffix(.index))]
    Validation {
        /// HTTP status code
        status: StatusCode,
        /// Position of the failing element when the payload was a list
        index: Option<usize>,
        /// Underlying coercion error
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Invalid client configuration or request parameters.
    #[error("Invalid configuration: {0}")]
    Construction(String),
}

/// The closed set of failure kinds callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Round trip not completed
    Network,
    /// Non-success status promoted to an error, or an undecodable body
    Response,
    /// Bound model could not be constructed
    Validation,
    /// Client or request could not be built
    Construction,
}

impl Error {
    /// Promote a status and payload into a [`Error::Response`].
    pub fn response(status: StatusCode, payload: Option<Value>) -> Self {
        Error::Response { status, payload }
    }

    /// Which taxonomy kind this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network(_) => ErrorKind::Network,
            Error::Response { .. } | Error::Decode { .. } => ErrorKind::Response,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Serialization(_) | Error::Construction(_) => ErrorKind::Construction,
        }
    }

    /// Whether the round trip failed before any response arrived.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Response { status, .. }
            | Error::Decode { status, .. }
            | Error::Validation { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw payload carried by a response error.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::Response { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

fn element_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(", element {i}")).unwrap_or_default()
}
