//! Header conversion and per-call merge

use crate::error::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

/// Compute the effective headers for one call.
///
/// Every name present in `overrides` replaces the default of the same name
/// (all of its values); every other default is kept. Names compare
/// case-insensitively, so `content-type` overrides `Content-Type`.
pub fn merge_headers(defaults: &HeaderMap, overrides: Option<&HeaderMap>) -> HeaderMap {
    let mut effective = defaults.clone();
    let Some(overrides) = overrides else {
        return effective;
    };

    for name in overrides.keys() {
        effective.remove(name);
    }
    for (name, value) in overrides {
        effective.append(name.clone(), value.clone());
    }
    effective
}

/// Build a header map from name/value pairs.
///
/// Later pairs replace earlier ones with the same name.
///
/// # Errors
///
/// Returns [`Error::Construction`] if a name or value is not a valid HTTP header.
pub fn header_map<I, K, V>(pairs: I) -> Result<HeaderMap>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let (name, value) = (name.as_ref(), value.as_ref());
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Construction(format!("Invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            Error::Construction(format!("Invalid value for header '{}': {}", name, e))
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Build a header map from a JSON object of string values.
///
/// # Errors
///
/// Returns [`Error::Construction`] if `value` is not an object, if any member
/// is not a string, or if a name or value is not a valid HTTP header.
pub fn header_map_from_json(value: &Value) -> Result<HeaderMap> {
    let Value::Object(members) = value else {
        return Err(Error::Construction(format!(
            "Headers must be a mapping of strings, got {}",
            json_type_name(value)
        )));
    };

    let pairs = members
        .iter()
        .map(|(name, value)| match value {
            Value::String(s) => Ok((name.as_str(), s.as_str())),
            other => Err(Error::Construction(format!(
                "Header '{}' must be a string, got {}",
                name,
                json_type_name(other)
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    header_map(pairs)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
