//! Session-managed HTTP transport for typedrest
//!
//! Provides the raw request/response layer underneath the typed REST client.
//! Nothing here knows about JSON models: a request goes out, a status and a
//! body come back, and every status reached over the wire is returned as data.
//!
//! # Architecture
//!
//! - **Transport trait**: generic interface the REST client dispatches through
//! - **HTTP transport**: reqwest-backed implementation
//! - **Session manager**: lazily created, reusable, explicitly closed connection pool
//! - **Error handling**: connection-level faults only, never HTTP statuses
//!
//! # Usage
//!
//! ```no_run
//! use typedrest_transport::{HttpRequest, HttpTransport, Transport};
//!
//! # async fn example() -> typedrest_transport::Result<()> {
//! let transport = HttpTransport::new();
//! let request = HttpRequest::new(http::Method::GET, "https://example.com/users/2");
//! let response = transport.send(request).await?;
//! println!("status: {}", response.status);
//! transport.close().await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use self::http::{HttpTransport, Session, SessionConfig, SessionManager};
pub use traits::{HttpRequest, HttpResponse, Transport};
