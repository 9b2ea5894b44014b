//! Response pair decoding

use crate::error::{Error, Result};
use http::{HeaderMap, Method, StatusCode};
use serde_json::Value;
use typedrest_transport::HttpResponse;

/// The `(payload, status)` unit every verb call returns.
///
/// `payload` is `None` when the server sent no body, when the status says no
/// body was intended (204, 205, 304), and for DELETE calls that did not
/// answer 200.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsePair {
    pub(crate) payload: Option<Value>,
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
}

impl ResponsePair {
    /// Create a response pair with no headers.
    pub fn new(payload: Option<Value>, status: StatusCode) -> Self {
        Self {
            payload,
            status,
            headers: HeaderMap::new(),
        }
    }

    /// Attach response headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Decode a raw transport response for the given method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if a body was expected and is not valid JSON.
    pub fn from_http(method: &Method, response: HttpResponse) -> Result<Self> {
        let HttpResponse {
            status,
            headers,
            body,
        } = response;

        if !body_expected(method, status) || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self {
                payload: None,
                status,
                headers,
            });
        }

        let payload: Value = serde_json::from_slice(&body).map_err(|source| Error::Decode {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
            source,
        })?;

        // A literal `null` body carries no payload, same as an empty one.
        Ok(Self {
            payload: (!payload.is_null()).then_some(payload),
            status,
            headers,
        })
    }

    /// The decoded JSON body, if any.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Take the decoded JSON body.
    pub fn into_payload(self) -> Option<Value> {
        self.payload
    }

    /// Split into `(payload, status)`.
    pub fn into_parts(self) -> (Option<Value>, StatusCode) {
        (self.payload, self.status)
    }

    /// Turn a non-2xx pair into [`Error::Response`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Response`] carrying the status and payload if the
    /// status is not in the 2xx range.
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::response(self.status, self.payload))
        }
    }
}

/// Whether a body is conventionally returned for this method and status.
fn body_expected(method: &Method, status: StatusCode) -> bool {
    if matches!(
        status,
        StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT | StatusCode::NOT_MODIFIED
    ) {
        return false;
    }
    if *method == Method::DELETE {
        status == StatusCode::OK
    } else {
        *method != Method::HEAD
    }
}

/// Best-effort payload for a status being promoted to an error.
///
/// Falls back to the raw text as a JSON string when the body is not JSON.
pub(crate) fn lenient_payload(response: &HttpResponse) -> Option<Value> {
    if response.is_body_empty() {
        return None;
    }
    match serde_json::from_slice(&response.body) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(response.text_lossy())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;
    use serde_json::json;

    fn raw(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body.as_bytes().to_vec(),
        )
    }

    #[rstest]
    #[case(Method::GET, 200, r#"{"id": 2}"#, Some(json!({"id": 2})))]
    #[case(
        Method::GET,
        404,
        r#"{"detail": "not found"}"#,
        Some(json!({"detail": "not found"}))
    )]
    #[case(Method::POST, 201, r#"[{"id": 1}]"#, Some(json!([{"id": 1}])))]
    #[case(Method::GET, 200, "null", None)]
    #[case(Method::GET, 404, " null\n", None)]
    #[case(Method::PUT, 200, "", None)]
    #[case(Method::PATCH, 204, "", None)]
    #[case(Method::DELETE, 200, r#"{"deleted": true}"#, Some(json!({"deleted": true})))]
    #[case(Method::DELETE, 204, "", None)]
    #[case(Method::DELETE, 404, r#"{"detail": "not found"}"#, None)]
    fn test_from_http_payload(
        #[case] method: Method,
        #[case] status: u16,
        #[case] body: &str,
        #[case] expected: Option<Value>,
    ) {
        let pair = ResponsePair::from_http(&method, raw(status, body)).unwrap();
        assert_eq!(pair.status().as_u16(), status);
        assert_eq!(pair.into_payload(), expected);
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err =
            ResponsePair::from_http(&Method::GET, raw(200, "<html>oops</html>")).unwrap_err();
        assert_matches!(
            err,
            Error::Decode { status: StatusCode::OK, ref body, .. } if body == "<html>oops</html>"
        );
    }

    #[test]
    fn test_malformed_body_ignored_when_no_body_intended() {
        let pair =
            ResponsePair::from_http(&Method::DELETE, raw(500, "Internal Server Error")).unwrap();
        assert_eq!(pair.payload(), None);
        assert_eq!(pair.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_for_status() {
        let ok = ResponsePair::new(Some(json!({"id": 1})), StatusCode::OK);
        assert!(ok.error_for_status().is_ok());

        let err = ResponsePair::new(Some(json!({"detail": "not found"})), StatusCode::NOT_FOUND)
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.payload(), Some(&json!({"detail": "not found"})));
    }

    #[test]
    fn test_lenient_payload() {
        assert_eq!(lenient_payload(&raw(500, "")), None);
        assert_eq!(lenient_payload(&raw(500, "null")), None);
        assert_eq!(lenient_payload(&raw(500, r#"{"a": 1}"#)), Some(json!({"a": 1})));
        assert_eq!(
            lenient_payload(&raw(502, "Bad Gateway")),
            Some(Value::String("Bad Gateway".to_string()))
        );
    }
}
