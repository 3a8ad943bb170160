//! Tolerant numeric decoding for provider payloads.
//!
//! Providers send numbers as JSON numbers, as strings (`"6.13"`), as
//! placeholder strings (`"None"`, `"-"`) or not at all. [`NumericField`]
//! decodes all of these without failing the surrounding document; a value
//! that cannot be read becomes unavailable and is never replaced by zero.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::SourceError;

/// One numeric field of a provider response.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NumericField {
    /// Key missing, `null`, or an explicit placeholder.
    #[default]
    Absent,
    /// Present but not a finite number; keeps the raw text for messages.
    Unparsable(String),
    Value(f64),
}

impl NumericField {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Number(number) => match number.as_f64() {
                Some(parsed) if parsed.is_finite() => Self::Value(parsed),
                _ => Self::Unparsable(number.to_string()),
            },
            Value::String(raw) => Self::from_text(raw),
            other => Self::Unparsable(other.to_string()),
        }
    }

    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_placeholder(trimmed) {
            return Self::Absent;
        }
        match trimmed.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Self::Value(parsed),
            _ => Self::Unparsable(trimmed.to_owned()),
        }
    }

    /// The number, if one was available.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            _ => None,
        }
    }

    /// The number, or a data error naming `label` and why it is unusable.
    pub fn require(&self, label: &str) -> Result<f64, SourceError> {
        match self {
            Self::Value(value) => Ok(*value),
            Self::Absent => Err(SourceError::data(format!("{label} is missing"))),
            Self::Unparsable(raw) => Err(SourceError::data(format!(
                "{label} is not numeric: '{raw}'"
            ))),
        }
    }
}

impl Display for NumericField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => f.write_str("unavailable"),
            Self::Unparsable(raw) => write!(f, "unparsable '{raw}'"),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

impl<'de> Deserialize<'de> for NumericField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

fn is_placeholder(text: &str) -> bool {
    text.is_empty()
        || text == "-"
        || text.eq_ignore_ascii_case("none")
        || text.eq_ignore_ascii_case("null")
        || text.eq_ignore_ascii_case("n/a")
}
