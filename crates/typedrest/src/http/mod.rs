//! Request building and response decoding
//!
//! This module sits between the [`RestClient`](crate::RestClient) verbs and
//! the transport: it merges headers, encodes the JSON body, and decodes the
//! reply into a [`ResponsePair`].

pub use request::RequestBuilder;
pub use response::ResponsePair;

mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
