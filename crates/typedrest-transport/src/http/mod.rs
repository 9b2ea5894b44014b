//! HTTP transport implementation
//!
//! Provides the reqwest-backed [`Transport`](crate::Transport) and the session
//! manager that owns its connection pool.

pub mod client;
pub mod session;

pub use client::HttpTransport;
pub use session::{Session, SessionConfig, SessionManager};
