//! # typedrest
//!
//! Typed REST client for JSON APIs:
//! - GET/POST/PUT/PATCH/DELETE against a base URL, returning `(payload, status)` pairs
//! - Default headers with per-call overrides
//! - A lazily opened, reusable, explicitly closed connection pool
//! - Response models: received payloads become typed values via `serde`
//! - One error type separating network, response, validation and construction failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde::{Deserialize, Serialize};
//! use typedrest::{ResponseModel, RestClient};
//!
//! #[derive(Serialize)]
//! struct NewUser<'a> {
//!     name: &'a str,
//!     job: &'a str,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct CreatedUser {
//!     id: String,
//!     name: String,
//!     job: String,
//!     created_at: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::new("https://reqres.in/api")?;
//!
//!     let body = NewUser { name: "morpheus", job: "leader" };
//!     let user = ResponseModel::<CreatedUser>::bind()
//!         .call(|| client.post("/users", &body))
//!         .await?;
//!
//!     println!("{:?}", user.into_one());
//!     client.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! Retries, backoff and timeouts are left to the caller; see
//! `examples/error_handling.rs`.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::RestClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_HEADERS, default_headers};
pub use error::{Error, ErrorKind, Result};
pub use headers::{header_map, header_map_from_json, merge_headers};
pub use self::http::{HeaderMap, Method, RequestBuilder, ResponsePair, StatusCode};
pub use validate::{RECEIVED, ReceivedStatuses, ResponseModel, Unbound, Validated};

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod observability;
pub mod validate;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use serde_json::Value as JsonValue;
pub use typedrest_transport::{
    HttpRequest, HttpResponse, HttpTransport, Session, SessionConfig, SessionManager, Transport,
    TransportError,
};
