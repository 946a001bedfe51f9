//! Closed set of values a configuration provider can hand back.
//!
//! Every typed read on a parameter bag goes through one of the `to_*`
//! coercions below. Each coercion first accepts the variants that already
//! carry the requested type and otherwise falls back to rendering the value
//! with [`Display`](fmt::Display) and parsing that text again.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Literals (after trimming) that coerce to `false`.
///
/// `"[]"` is how an empty [`ConfigValue::StringList`] renders, so an empty
/// list reads as `false` while any populated list reads as `true`.
pub const FALSY_LITERALS: [&str; 4] = ["", "false", "0", "[]"];

/// A configuration value as stored by a provider.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit absence of a value (a JSON `null`).
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    StringList(Vec<String>),
    /// Serialized as integer nanoseconds.
    Duration(#[serde(serialize_with = "serialize_duration_nanos")] Duration),
}

impl ConfigValue {
    /// Returns the value as a string. Strings are returned verbatim, every
    /// other variant is rendered through `Display`.
    pub fn to_string_value(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            other => other.to_string(),
        }
    }

    /// Returns a string list when the value is already a list or a single string.
    pub fn to_string_list(&self) -> Option<Vec<String>> {
        match self {
            Self::StringList(values) => Some(values.clone()),
            Self::String(value) => Some(vec![value.clone()]),
            _ => None,
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::UInt(value) => i64::try_from(*value).ok(),
            other => reparse(other),
        }
    }

    pub fn to_u32(&self) -> Option<u32> {
        match self {
            Self::Int(value) => u32::try_from(*value).ok(),
            Self::UInt(value) => u32::try_from(*value).ok(),
            other => reparse_unsigned(other),
        }
    }

    /// Booleans are returned as-is. Anything else is rendered, trimmed and
    /// compared against [`FALSY_LITERALS`]; every other rendering is `true`.
    pub fn to_bool(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            other => {
                let rendered = other.to_string_value();
                !FALSY_LITERALS.contains(&rendered.trim())
            }
        }
    }

    /// Returns the stored duration without looking at any unit.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(value) => Some(*value),
            _ => None,
        }
    }
}

fn reparse<T: std::str::FromStr>(value: &ConfigValue) -> Option<T> {
    value.to_string_value().parse().ok()
}

/// Unsigned text must start with a digit; an explicit `+` sign is rejected.
fn reparse_unsigned<T: std::str::FromStr>(value: &ConfigValue) -> Option<T> {
    let text = value.to_string_value();
    if text.starts_with('+') {
        return None;
    }
    text.parse().ok()
}

fn serialize_duration_nanos<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    let nanos = u64::try_from(value.as_nanos()).unwrap_or(u64::MAX);
    serializer.serialize_u64(nanos)
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::StringList(values) => write!(f, "[{}]", values.join(" ")),
            Self::Duration(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ConfigValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for ConfigValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(values: Vec<String>) -> Self {
        Self::StringList(values)
    }
}

impl From<Vec<&str>> for ConfigValue {
    fn from(values: Vec<&str>) -> Self {
        Self::StringList(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Duration> for ConfigValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
