//! HTTP transport client implementation
//!
//! Implements the Transport trait over a managed reqwest session. There is
//! no retry loop and no request timeout: every fault surfaces on first
//! occurrence and callers decide what to do with it.

use super::session::{Session, SessionConfig, SessionManager};
use crate::error::Result;
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use std::sync::Arc;

/// HTTP transport implementation
///
/// Handles HTTP requests with:
/// - Lazy connection pool creation on first send
/// - Pool reuse across calls and across clones of the transport
/// - Explicit close, after which the next send opens a fresh pool
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    sessions: Arc<SessionManager>,
}

impl HttpTransport {
    /// Create a new HTTP transport with default pool settings
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a new HTTP transport with custom pool settings
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(config)),
        }
    }

    /// The live session, opened on demand
    ///
    /// # Errors
    ///
    /// Fails if the connection pool cannot be built.
    pub async fn session(&self) -> Result<Session> {
        self.sessions.get_session().await
    }

    /// The session manager backing this transport
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let session = self.sessions.get_session().await?;
        session.execute(request).await
    }

    async fn is_connected(&self) -> bool {
        self.sessions.is_open().await
    }

    async fn close(&self) -> Result<()> {
        self.sessions.close().await;
        Ok(())
    }
}
