//! Response model validation
//!
//! [`ResponseModel`] wraps any call that yields a [`ResponsePair`] and, based
//! on the status and the shape of the payload, turns it into a typed value:
//!
//! | bound? | status received? | payload   | result                     |
//! |--------|------------------|-----------|----------------------------|
//! | no     | any              | any       | [`Validated::Status`]      |
//! | yes    | yes              | object    | [`Validated::One`]         |
//! | yes    | yes              | list      | [`Validated::Many`]        |
//! | yes    | no, or yes       | otherwise | [`Validated::Raw`]         |
//!
//! A received object or list that does not fit the model is an
//! [`Error::Validation`]; it is never downgraded to the raw payload.
//!
//! # Example
//!
//! ```rust,no_run
//! use serde::Deserialize;
//! use typedrest::{ResponseModel, RestClient, Validated};
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     id: u64,
//!     first_name: String,
//! }
//!
//! # async fn example() -> typedrest::Result<()> {
//! let client = RestClient::new("https://reqres.in/api")?;
//!
//! match ResponseModel::<User>::bind().call(|| client.get("/users/2")).await? {
//!     Validated::One { model, .. } => println!("hello {}", model.first_name),
//!     Validated::Raw(pair) => println!("error body: {:?}", pair.payload()),
//!     other => println!("status {}", other.status()),
//! }
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use http::StatusCode;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::http::ResponsePair;

/// Statuses that count as "received" and allow model construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedStatuses {
    statuses: Cow<'static, [StatusCode]>,
}

/// The default received set: 200 OK and 201 Created.
///
/// 204 No Content is deliberately absent.
pub const RECEIVED: ReceivedStatuses =
    ReceivedStatuses::from_static(&[StatusCode::OK, StatusCode::CREATED]);

impl ReceivedStatuses {
    /// A received set backed by a static list.
    pub const fn from_static(statuses: &'static [StatusCode]) -> Self {
        Self {
            statuses: Cow::Borrowed(statuses),
        }
    }

    /// This set plus `status`.
    pub fn with(self, status: StatusCode) -> Self {
        if self.contains(status) {
            return self;
        }
        let mut statuses = self.statuses.into_owned();
        statuses.push(status);
        Self {
            statuses: Cow::Owned(statuses),
        }
    }

    /// Whether `status` is received.
    pub fn contains(&self, status: StatusCode) -> bool {
        self.statuses.contains(&status)
    }

    /// The statuses in this set.
    pub fn iter(&self) -> impl Iterator<Item = StatusCode> + '_ {
        self.statuses.iter().copied()
    }
}

impl Default for ReceivedStatuses {
    fn default() -> Self {
        RECEIVED
    }
}

/// Model type of a [`ResponseModel`] with nothing bound.
///
/// Has no values; deserializing into it always fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unbound {}

impl<'de> Deserialize<'de> for Unbound {
    fn deserialize<D: Deserializer<'de>>(_: D) -> std::result::Result<Self, D::Error> {
        Err(de::Error::custom("no response model bound"))
    }
}

/// Outcome of validating a response pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<M> {
    /// No model was bound; only the status is reported.
    Status(StatusCode),
    /// A received object, constructed as the model.
    One {
        /// The constructed model
        model: M,
        /// HTTP status code
        status: StatusCode,
    },
    /// A received list, each element constructed as the model.
    Many {
        /// The constructed models, in payload order
        models: Vec<M>,
        /// HTTP status code
        status: StatusCode,
    },
    /// Not received, or not an object or list: the untouched pair.
    Raw(ResponsePair),
}

impl<M> Validated<M> {
    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        match self {
            Validated::Status(status)
            | Validated::One { status, .. }
            | Validated::Many { status, .. } => *status,
            Validated::Raw(pair) => pair.status(),
        }
    }

    /// The single model, if this is [`Validated::One`].
    pub fn into_one(self) -> Option<M> {
        match self {
            Validated::One { model, .. } => Some(model),
            _ => None,
        }
    }

    /// The models, if this is [`Validated::Many`].
    pub fn into_many(self) -> Option<Vec<M>> {
        match self {
            Validated::Many { models, .. } => Some(models),
            _ => None,
        }
    }

    /// The untouched pair, if this is [`Validated::Raw`].
    pub fn into_raw(self) -> Option<ResponsePair> {
        match self {
            Validated::Raw(pair) => Some(pair),
            _ => None,
        }
    }
}

/// Validator that binds an optional model type to REST calls.
pub struct ResponseModel<M = Unbound> {
    bound: bool,
    received: ReceivedStatuses,
    _model: PhantomData<fn() -> M>,
}

impl ResponseModel<Unbound> {
    /// A validator with no model: every call yields [`Validated::Status`].
    pub fn none() -> Self {
        Self {
            bound: false,
            received: RECEIVED,
            _model: PhantomData,
        }
    }
}

impl<M: DeserializeOwned> ResponseModel<M> {
    /// A validator that constructs `M` from received payloads.
    pub fn bind() -> Self {
        Self {
            bound: true,
            received: RECEIVED,
            _model: PhantomData,
        }
    }

    /// Replace the received status set.
    pub fn received(mut self, received: ReceivedStatuses) -> Self {
        self.received = received;
        self
    }

    /// Validate a response pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a received object or list element
    /// cannot be constructed as `M`.
    pub fn validate(&self, pair: ResponsePair) -> Result<Validated<M>> {
        let status = pair.status;

        if !self.bound {
            return Ok(Validated::Status(status));
        }
        if !self.received.contains(status) {
            debug!(status = status.as_u16(), "Status not received, passing payload through");
            return Ok(Validated::Raw(pair));
        }

        let ResponsePair {
            payload,
            status,
            headers,
        } = pair;

        match payload {
            Some(object @ Value::Object(_)) => {
                let model = serde_json::from_value(object).map_err(|source| Error::Validation {
                    status,
                    index: None,
                    source,
                })?;
                Ok(Validated::One { model, status })
            }
            Some(Value::Array(items)) => {
                let models = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        serde_json::from_value(item).map_err(|source| Error::Validation {
                            status,
                            index: Some(i),
                            source,
                        })
                    })
                    .collect::<Result<Vec<M>>>()?;
                debug!(count = models.len(), "Validated response list");
                Ok(Validated::Many { models, status })
            }
            payload => Ok(Validated::Raw(ResponsePair {
                payload,
                status,
                headers,
            })),
        }
    }

    /// Run `call` and validate the pair it yields.
    ///
    /// # Errors
    ///
    /// Propagates any error from `call`, then any validation error.
    pub async fn call<F, Fut>(&self, call: F) -> Result<Validated<M>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ResponsePair>>,
    {
        self.wrap(call()).await
    }

    /// Await `pending` and validate the pair it yields.
    ///
    /// # Errors
    ///
    /// Propagates any error from `pending`, then any validation error.
    pub async fn wrap<Fut>(&self, pending: Fut) -> Result<Validated<M>>
    where
        Fut: Future<Output = Result<ResponsePair>>,
    {
        self.validate(pending.await?)
    }
}

impl<M> Clone for ResponseModel<M> {
    fn clone(&self) -> Self {
        Self {
            bound: self.bound,
            received: self.received.clone(),
            _model: PhantomData,
        }
    }
}

impl<M> fmt::Debug for ResponseModel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseModel")
            .field("model", &std::any::type_name::<M>())
            .field("bound", &self.bound)
            .field("received", &self.received)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        id: u64,
        name: Option<String>,
    }

    fn pair(payload: Value, status: u16) -> ResponsePair {
        ResponsePair::new(Some(payload), StatusCode::from_u16(status).unwrap())
    }

    #[test]
    fn test_received_default_is_ok_and_created() {
        assert_eq!(
            RECEIVED.iter().collect::<Vec<_>>(),
            vec![StatusCode::OK, StatusCode::CREATED]
        );
        assert!(!RECEIVED.contains(StatusCode::NO_CONTENT));
        assert!(!RECEIVED.contains(StatusCode::ACCEPTED));
    }

    #[test]
    fn test_received_can_be_extended() {
        let received = RECEIVED.with(StatusCode::ACCEPTED).with(StatusCode::OK);
        assert!(received.contains(StatusCode::ACCEPTED));
        assert_eq!(received.iter().count(), 3);
    }

    #[test]
    fn test_single_object() {
        let validated = ResponseModel::<Item>::bind()
            .validate(pair(json!({"id": 1, "name": "a"}), 200))
            .unwrap();

        assert_eq!(
            validated,
            Validated::One {
                model: Item {
                    id: 1,
                    name: Some("a".into())
                },
                status: StatusCode::OK,
            }
        );
    }

    #[test]
    fn test_list_of_objects() {
        let validated = ResponseModel::<Item>::bind()
            .validate(pair(json!([{"id": 1}, {"id": 2}]), 201))
            .unwrap();

        assert_eq!(validated.status(), StatusCode::CREATED);
        assert_eq!(
            validated.into_many().unwrap(),
            vec![Item { id: 1, name: None }, Item { id: 2, name: None }]
        );
    }

    #[test]
    fn test_not_received_passes_raw_payload() {
        let raw = pair(json!({"detail": "not found"}), 404);
        let validated = ResponseModel::<Item>::bind().validate(raw.clone()).unwrap();

        assert_eq!(validated, Validated::Raw(raw));
    }

    #[test]
    fn test_no_content_is_not_received() {
        let raw = ResponsePair::new(None, StatusCode::NO_CONTENT);
        let validated = ResponseModel::<Item>::bind().validate(raw.clone()).unwrap();
        assert_eq!(validated.into_raw(), Some(raw));
    }

    #[test]
    fn test_unbound_reports_status_only() {
        for (payload, status) in [(json!({"id": 1}), 200), (json!({"detail": "x"}), 404)] {
            let validated = ResponseModel::none().validate(pair(payload, status)).unwrap();
            assert_eq!(validated, Validated::Status(StatusCode::from_u16(status).unwrap()));
        }
    }

    #[test]
    fn test_received_scalar_or_null_passes_through() {
        let raw = pair(json!("created"), 201);
        let validated = ResponseModel::<Item>::bind().validate(raw.clone()).unwrap();
        assert_eq!(validated, Validated::Raw(raw));

        let empty = ResponsePair::new(None, StatusCode::OK);
        let validated = ResponseModel::<Item>::bind().validate(empty.clone()).unwrap();
        assert_eq!(validated, Validated::Raw(empty));
    }

    #[test]
    fn test_mismatched_object_is_validation_error() {
        let err = ResponseModel::<Item>::bind()
            .validate(pair(json!({"id": "not-a-number"}), 200))
            .unwrap_err();

        assert_matches!(
            err,
            Error::Validation {
                status: StatusCode::OK,
                index: None,
                ..
            }
        );
    }

    #[test]
    fn test_missing_field_is_validation_error() {
        let err = ResponseModel::<Item>::bind()
            .validate(pair(json!({"name": "a"}), 201))
            .unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn test_bad_list_element_reports_index() {
        let err = ResponseModel::<Item>::bind()
            .validate(pair(json!([{"id": 1}, {"id": 2}, {"name": "x"}]), 200))
            .unwrap_err();

        assert_matches!(err, Error::Validation { index: Some(2), .. });
    }

    #[test]
    fn test_custom_received_set() {
        let model = ResponseModel::<Item>::bind().received(RECEIVED.with(StatusCode::ACCEPTED));
        let validated = model.validate(pair(json!({"id": 9}), 202)).unwrap();
        assert_eq!(validated.into_one(), Some(Item { id: 9, name: None }));
    }

    #[tokio::test]
    async fn test_call_wraps_thunk() {
        let model = ResponseModel::<Item>::bind();
        let validated = model
            .call(|| async { Ok(pair(json!({"id": 3}), 200)) })
            .await
            .unwrap();
        assert_eq!(validated.into_one(), Some(Item { id: 3, name: None }));
    }

    #[tokio::test]
    async fn test_call_propagates_inner_error() {
        let err = ResponseModel::<Item>::bind()
            .call(|| async { Err(Error::Construction("boom".into())) })
            .await
            .unwrap_err();
        assert_matches!(err, Error::Construction(_));
    }

    #[test]
    fn test_unbound_cannot_deserialize() {
        assert!(serde_json::from_value::<Unbound>(json!({})).is_err());
    }
}
