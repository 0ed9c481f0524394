//! # Parameter Parsing
//!
//! Turns the free-form parameter text typed on the screen into a flat
//! `Params` mapping. Only a JSON object with scalar values is accepted;
//! nested objects and arrays are rejected instead of being dropped.

use std::fmt;

use serde_json::Value;

use crate::network::{ParamValue, Params};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// The text is not valid JSON.
    Json(String),
    /// Valid JSON, but the top level is not an object.
    NotAnObject,
    /// A value is an object or an array.
    NestedValue { key: String },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Json(msg) => write!(f, "invalid parameter JSON: {msg}"),
            ParamsError::NotAnObject => write!(f, "parameters must be a JSON object"),
            ParamsError::NestedValue { key } => {
                write!(f, "parameter '{key}' must be a string, number, boolean or null")
            }
        }
    }
}

impl std::error::Error for ParamsError {}

impl TryFrom<Value> for ParamValue {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(ParamValue::String(s)),
            Value::Number(n) => Ok(ParamValue::Number(n)),
            Value::Bool(b) => Ok(ParamValue::Bool(b)),
            Value::Null => Ok(ParamValue::Null),
            Value::Array(_) | Value::Object(_) => Err(()),
        }
    }
}

/// Parse the parameter field. Blank text yields an empty mapping.
pub fn parse_params(text: &str) -> Result<Params, ParamsError> {
    if text.trim().is_empty() {
        return Ok(Params::new());
    }

    let value: Value = serde_json::from_str(text).map_err(|e| ParamsError::Json(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(ParamsError::NotAnObject);
    };

    map.into_iter()
        .map(|(key, value)| match ParamValue::try_from(value) {
            Ok(v) => Ok((key, v)),
            Err(()) => Err(ParamsError::NestedValue { key }),
        })
        .collect()
}
