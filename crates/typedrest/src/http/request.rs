//! Per-call request builder

use super::response::{ResponsePair, lenient_payload};
use crate::client::RestClient;
use crate::error::{Error, Result};
use crate::headers::merge_headers;
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use typedrest_transport::HttpRequest;

/// Builder for a single REST call.
///
/// Obtained from [`RestClient::request`]. Errors from `json` or `header` are
/// held until [`send`](Self::send) so calls can be chained.
#[derive(Debug)]
#[must_use = "a RequestBuilder does nothing until `send` is awaited"]
pub struct RequestBuilder {
    client: RestClient,
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    error: Option<Error>,
}

impl RequestBuilder {
    pub(crate) fn new(client: RestClient, method: Method, path: impl Into<String>) -> Self {
        Self {
            client,
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
            error: None,
        }
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// A body that serializes to `null` (`&()`, `&None::<T>`) sends no body.
    /// GET and DELETE never carry a body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        if self.error.is_some() {
            return self;
        }
        match serde_json::to_value(body).and_then(|value| {
            if value.is_null() {
                Ok(None)
            } else {
                serde_json::to_vec(&value).map(Some)
            }
        }) {
            Ok(bytes) => self.body = bytes,
            Err(e) => self.error = Some(Error::Serialization(e)),
        }
        self
    }

    /// Set a per-call header, overriding the client default of the same name.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let (name, value) = (name.as_ref(), value.as_ref());
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            (Err(e), _) => {
                self.error = Some(Error::Construction(format!(
                    "Invalid header name '{}': {}",
                    name, e
                )));
            }
            (_, Err(e)) => {
                self.error = Some(Error::Construction(format!(
                    "Invalid value for header '{}': {}",
                    name, e
                )));
            }
        }
        self
    }

    /// Add per-call headers, each overriding the client default of the same name.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        for name in headers.keys() {
            self.headers.remove(name);
        }
        for (name, value) in &headers {
            self.headers.append(name.clone(), value.clone());
        }
        self
    }

    /// Send the request and decode the response pair.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the body could not be serialized ([`Error::Serialization`])
    /// - a per-call header is invalid ([`Error::Construction`])
    /// - the round trip failed ([`Error::Network`])
    /// - a body was expected and is not JSON ([`Error::Decode`])
    /// - the client raises on error statuses and the status is not 2xx ([`Error::Response`])
    #[tracing::instrument(skip(self), fields(method = %self.method, path = %self.path))]
    pub async fn send(self) -> Result<ResponsePair> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let config = self.client.config();
        let url = format!("{}{}", config.base_url(), self.path);
        let headers = merge_headers(config.default_headers(), Some(&self.headers));
        let body = if carries_body(&self.method) {
            self.body
        } else {
            None
        };

        let request_meta = RequestMetadata::new(self.method.clone(), url.as_str())
            .with_body(body.as_deref());
        request_meta.log_request();

        let mut request = HttpRequest::new(self.method.clone(), url).with_headers(headers);
        if let Some(body) = body {
            request = request.with_body(body);
        }

        let timer = RequestTimer::start();
        let response = match self.client.transport().send(request).await {
            Ok(response) => response,
            Err(e) => {
                request_meta.log_network_failure(timer.elapsed(), &e);
                return Err(Error::Network(e));
            }
        };

        let response_meta = ResponseMetadata::of(&response, timer.elapsed());

        if config.raise_on_error_status() && !response.is_success() {
            response_meta.log_error_status(&request_meta);
            return Err(Error::response(response.status, lenient_payload(&response)));
        }

        response_meta.log_completed(&request_meta);
        ResponsePair::from_http(&self.method, response)
    }
}

fn carries_body(method: &Method) -> bool {
    *method != Method::GET && *method != Method::DELETE && *method != Method::HEAD
}
