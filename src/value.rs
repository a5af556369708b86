//! Parsed document fields
//!
//! The parser prints arbitrary JSON. It is decoded once into [`FieldValue`]
//! so the renderer matches on variants instead of guessing at types.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClerkError, Result};

/// Field name → value, as extracted from one document
pub type Fields = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<FieldValue>),
    Map(Fields),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for values that render on one line without nesting
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Map(_))
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Map(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Decode parser stdout into fields
///
/// Anything other than a single JSON object is `MalformedOutput`; the raw
/// text is kept for diagnostics.
pub fn decode_fields(output: &str) -> Result<Fields> {
    let malformed = |details: String| ClerkError::MalformedOutput {
        details,
        output: output.to_string(),
    };

    match serde_json::from_str::<Value>(output.trim()) {
        Ok(Value::Object(map)) => Ok(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        Ok(other) => Err(malformed(format!("expected an object, got {}", kind(&other)))),
        Err(e) => Err(malformed(e.to_string())),
    }
}

/// Two-space indented JSON, as shown in the raw view
pub fn pretty_json(fields: &Fields) -> String {
    // string keys and JSON leaves always serialize
    serde_json::to_string_pretty(fields).unwrap_or_default()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
