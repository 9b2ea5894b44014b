//! Session lifecycle management
//!
//! A [`Session`] is a handle to one reqwest connection pool. The
//! [`SessionManager`] keeps at most one live session: it is created on the
//! first call, reused by every call after that, and dropped on `close()`.
//! A later call lazily opens a fresh one.

use crate::error::{Result, TransportError};
use crate::traits::{HttpRequest, HttpResponse};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Connection pool settings applied when a session is opened.
///
/// No request timeout lives here; callers layer their own.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// How long an idle pooled connection is kept
    pub pool_idle_timeout: Option<Duration>,

    /// `User-Agent` sent with every request
    pub user_agent: Option<String>,

    /// Honor proxy settings from the environment (`HTTP_PROXY` and friends)
    pub trust_env: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 10,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            user_agent: Some(concat!("typedrest/", env!("CARGO_PKG_VERSION")).to_string()),
            trust_env: true,
        }
    }
}

/// Handle to a pooled connection context.
///
/// Cloning is cheap and every clone refers to the same pool.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    id: Uuid,
    client: reqwest::Client,
    closed: AtomicBool,
}

impl Session {
    fn open(config: &SessionConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if !config.trust_env {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Session(e.to_string()))?;

        let id = Uuid::new_v4();
        debug!(session_id = %id, "Opened HTTP session");

        Ok(Self {
            inner: Arc::new(SessionInner {
                id,
                client,
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// Unique id of this session
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Whether `close()` has been called on the owning manager
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Whether both handles refer to the same pool
    pub fn same_as(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn mark_closed(&self) {
        self.inner.closed.store(true, Ordering::Release);
    }

    /// Execute a request on this session's pool.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::SessionClosed`] if the session was closed,
    /// otherwise a connection, timeout or HTTP fault if the round trip failed.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        if self.is_closed() {
            return Err(TransportError::SessionClosed(self.id()));
        }

        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        debug!(
            session_id = %self.id(),
            method = %method,
            url = %url,
            body_size = body.as_ref().map(Vec::len),
            "Sending HTTP request"
        );

        let start = Instant::now();
        let mut req = self.inner.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(|e| {
            warn!(method = %method, url = %url, error = %e, "HTTP request failed");
            TransportError::from(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            warn!(method = %method, url = %url, error = %e, "Failed to read response body");
            TransportError::from(e)
        })?;

        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            body_size = body.len(),
            "Received HTTP response"
        );

        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

/// Owner of the single live session of a transport.
#[derive(Debug, Default)]
pub struct SessionManager {
    config: SessionConfig,
    current: Mutex<Option<Session>>,
}

impl SessionManager {
    /// Create a manager. No session is opened until the first call.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
        }
    }

    /// Pool settings used for new sessions
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Return the live session, opening one if none exists.
    ///
    /// Concurrent first calls are serialized on the manager's lock, so only
    /// one session is ever created.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Session`] if the connection pool cannot be built.
    pub async fn get_session(&self) -> Result<Session> {
        let mut current = self.current.lock().await;
        if let Some(session) = current.as_ref() {
            return Ok(session.clone());
        }

        let session = Session::open(&self.config)?;
        *current = Some(session.clone());
        Ok(session)
    }

    /// Close the live session, if any, and forget it.
    ///
    /// Handles obtained earlier report `is_closed()` and refuse new requests.
    pub async fn close(&self) {
        if let Some(session) = self.current.lock().await.take() {
            session.mark_closed();
            debug!(session_id = %session.id(), "Closed HTTP session");
        }
    }

    /// Whether a live session is currently held
    pub async fn is_open(&self) -> bool {
        self.current.lock().await.is_some()
    }
}
