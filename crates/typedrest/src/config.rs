//! Configuration for the REST client

use crate::error::{Error, Result};
use crate::headers::{header_map, header_map_from_json};
use http::HeaderMap;
use serde_json::Value;
use typedrest_transport::SessionConfig;
use url::Url;

/// Headers every client starts with unless the caller replaces them.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[("content-type", "application/json")];

/// A fresh copy of [`DEFAULT_HEADERS`].
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    for &(name, value) in DEFAULT_HEADERS {
        headers.insert(
            http::HeaderName::from_static(name),
            http::HeaderValue::from_static(value),
        );
    }
    headers
}

/// Validated configuration for a [`RestClient`](crate::RestClient).
///
/// Each client owns its own copy; nothing here is shared between instances.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    default_headers: HeaderMap,
    raise_on_error_status: bool,
    session: SessionConfig,
}

impl ClientConfig {
    /// Configuration with the given base URL and defaults everywhere else.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if the base URL is empty or not an absolute URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Start building a configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `TYPEDREST_BASE_URL` for the base URL (required)
    /// - `TYPEDREST_HEADERS` for a JSON object replacing the default headers
    /// - `TYPEDREST_RAISE_ON_ERROR_STATUS` (`true`/`false`/`1`/`0`)
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if the base URL is missing or invalid,
    /// or if a variable cannot be parsed.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        use std::env;

        let _ = dotenvy::dotenv();

        let base_url = env::var("TYPEDREST_BASE_URL")
            .map_err(|_| Error::Construction("TYPEDREST_BASE_URL is not set".to_string()))?;
        let mut builder = Self::builder().base_url(base_url);

        if let Ok(raw) = env::var("TYPEDREST_HEADERS") {
            let value: Value = serde_json::from_str(&raw).map_err(|e| {
                Error::Construction(format!("TYPEDREST_HEADERS is not valid JSON: {}", e))
            })?;
            builder = builder.headers_json(value);
        }

        if let Ok(raw) = env::var("TYPEDREST_RAISE_ON_ERROR_STATUS") {
            let raise = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(Error::Construction(format!(
                        "TYPEDREST_RAISE_ON_ERROR_STATUS must be a boolean, got '{}'",
                        other
                    )));
                }
            };
            builder = builder.raise_on_error_status(raise);
        }

        builder.build()
    }

    /// Base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request before per-call overrides.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Whether non-2xx statuses are returned as [`Error::Response`].
    pub fn raise_on_error_status(&self) -> bool {
        self.raise_on_error_status
    }

    /// Connection pool settings.
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }
}

#[derive(Debug)]
enum HeaderSource {
    Map(HeaderMap),
    Pairs(Vec<(String, String)>),
    Json(Value),
}

/// Builder for [`ClientConfig`]. All validation happens in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    headers: Option<HeaderSource>,
    raise_on_error_status: bool,
    session: SessionConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Replace the default headers with an already-typed header map.
    pub fn header_map(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(HeaderSource::Map(headers));
        self
    }

    /// Replace the default headers with name/value pairs.
    ///
    /// The defaults are dropped, not merged: pass `content-type` yourself if
    /// you still want it.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = Some(HeaderSource::Pairs(
            headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ));
        self
    }

    /// Replace the default headers with a JSON object of string values.
    pub fn headers_json(mut self, headers: Value) -> Self {
        self.headers = Some(HeaderSource::Json(headers));
        self
    }

    /// Return non-2xx statuses as [`Error::Response`] instead of data.
    pub fn raise_on_error_status(mut self, raise: bool) -> Self {
        self.raise_on_error_status = raise;
        self
    }

    /// Set the connection pool configuration.
    pub fn session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Set the maximum idle connections kept per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.session.pool_max_idle_per_host = max;
        self
    }

    /// Set the `User-Agent` header sent by the session.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.session.user_agent = Some(user_agent.into());
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if:
    /// - the base URL is missing, empty, or not an absolute URL
    /// - the headers are not a mapping of valid header names to string values
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Construction("base URL is required".to_string()))?;
        if base_url.trim().is_empty() {
            return Err(Error::Construction("base URL must not be empty".to_string()));
        }
        Url::parse(&base_url)
            .map_err(|e| Error::Construction(format!("Invalid base URL '{}': {}", base_url, e)))?;

        let default_headers = match self.headers {
            None => default_headers(),
            Some(HeaderSource::Map(map)) => map,
            Some(HeaderSource::Pairs(pairs)) => header_map(pairs)?,
            Some(HeaderSource::Json(value)) => header_map_from_json(&value)?,
        };

        Ok(ClientConfig {
            base_url,
            default_headers,
            raise_on_error_status: self.raise_on_error_status,
            session: self.session,
        })
    }
}
