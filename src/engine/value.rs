//! Stored field values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field id → stored value, as emitted to save/submit sinks
pub type FieldValues = BTreeMap<String, FieldValue>;

/// Value of one field at rest.
///
/// Untagged so snapshots serialize as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Text content for editing (empty for non-text values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric coercion used by range rules.
    ///
    /// Surrounding whitespace is ignored and blank text counts as zero.
    /// Text that does not parse yields `None`, which never violates a range.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Null => Some(0.0),
            FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::Number(n) => Some(*n).filter(|n| !n.is_nan()),
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Some(0.0);
                }
                trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
        }
    }
}

impl fmt::Display for FieldValue {
    /// The stringified form pattern rules are matched against
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) if n.is_infinite() => {
                write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
            }
            FieldValue::Number(n) if n.is_nan() => write!(f, "NaN"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Emptiness shared by the required rule and progress: a missing key,
/// null, or the empty string
pub fn is_empty_value(value: Option<&FieldValue>) -> bool {
    match value {
        None | Some(FieldValue::Null) => true,
        Some(FieldValue::Text(s)) => s.is_empty(),
        Some(_) => false,
    }
}
