//! Main client implementation

use std::sync::Arc;

use serde::Serialize;
use typedrest_transport::{HttpTransport, Transport};

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    http::{HeaderMap, Method, RequestBuilder, ResponsePair},
};

/// Client for a JSON REST API rooted at one base URL.
///
/// Cloning is cheap; clones share the configuration and the connection pool.
/// The pool is opened on the first call and released by [`close`](Self::close)
/// or when the last clone is dropped.
///
/// # Example
///
/// ```rust,no_run
/// use typedrest::RestClient;
///
/// # async fn example() -> typedrest::Result<()> {
/// let client = RestClient::new("https://reqres.in/api")?;
///
/// let pair = client.get("/users/2").await?;
/// println!("{} -> {:?}", pair.status(), pair.payload());
///
/// client.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl RestClient {
    /// Create a client with the default headers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if the base URL is empty or does not
    /// parse as an absolute URL. A scheme-less host such as `api.example.com`
    /// is rejected here rather than at request time.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::from_config(ClientConfig::new(base_url)?))
    }

    /// Create a client whose default headers are exactly `headers`.
    ///
    /// The built-in `Content-Type: application/json` is replaced, not merged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if the base URL is empty or does not
    /// parse as an absolute URL.
    pub fn with_headers(base_url: impl Into<String>, headers: HeaderMap) -> Result<Self> {
        let config = ClientConfig::builder()
            .base_url(base_url)
            .header_map(headers)
            .build()?;
        Ok(Self::from_config(config))
    }

    /// Create a client over the HTTP transport from a configuration object.
    pub fn from_config(config: ClientConfig) -> Self {
        let transport = Arc::new(HttpTransport::with_config(config.session().clone()));
        Self::from_transport(config, transport)
    }

    /// Create a client over a custom transport.
    pub fn from_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner { config, transport }),
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Transport the verbs dispatch through.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.inner.transport
    }

    /// Start a request with per-call options (headers, body).
    pub fn request(&self, method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(self.clone(), method, path)
    }

    /// `GET base_url + path`.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn get(&self, path: &str) -> Result<ResponsePair> {
        self.request(Method::GET, path).send().await
    }

    /// `DELETE base_url + path`. The payload is decoded only on 200.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn delete(&self, path: &str) -> Result<ResponsePair> {
        self.request(Method::DELETE, path).send().await
    }

    /// `POST base_url + path` with a JSON body.
    ///
    /// Pass a value serializing to `null` (`&()`, `&None::<T>`) to send no body.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ResponsePair> {
        self.request(Method::POST, path).json(body).send().await
    }

    /// `PUT base_url + path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ResponsePair> {
        self.request(Method::PUT, path).json(body).send().await
    }

    /// `PATCH base_url + path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ResponsePair> {
        self.request(Method::PATCH, path).json(body).send().await
    }

    /// Whether the transport currently holds a live connection pool.
    pub async fn is_connected(&self) -> bool {
        self.inner.transport.is_connected().await
    }

    /// Release the connection pool. Safe to call when none is open.
    ///
    /// Call this only after in-flight requests on this client have finished.
    /// The next call opens a fresh pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the transport fails to shut down.
    pub async fn close(&self) -> Result<()> {
        self.inner.transport.close().await.map_err(Error::Network)
    }
}
