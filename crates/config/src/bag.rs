//! Typed, layered reads over a [`ValuesProvider`].
//!
//! Every typed read comes in two flavours:
//!
//! - lenient `read_*` methods return the caller's default when the name is
//!   missing *or* the stored value cannot be coerced;
//! - strict `read_required_*` methods return
//!   [`ConfigError::RequiredOptionEmpty`] for a missing name and
//!   [`ConfigError::Conversion`] for a value that cannot be coerced.
//!
//! Presence is always decided before coercion is attempted.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use toolbelt_types::ConfigValue;
use toolbelt_util::ErrorCollector;
use tracing::{debug, warn};

use crate::ConfigError;
use crate::provider::{CompositeValuesProvider, NullValuesProvider, ValuesProvider};

/// Separator between messages of the error returned by
/// [`ParameterBag::check_required_values`].
pub const REQUIRED_VALUES_SEPARATOR: &str = " ";

/// Configuration facade wrapping exactly one provider.
#[derive(Debug, Clone)]
pub struct ParameterBag {
    provider: Arc<dyn ValuesProvider>,
}

impl Default for ParameterBag {
    fn default() -> Self {
        Self::new(NullValuesProvider)
    }
}

impl ParameterBag {
    pub fn new(provider: impl ValuesProvider + 'static) -> Self {
        Self::from_shared(Arc::new(provider))
    }

    /// Wraps a provider that is also held elsewhere. Writes made through the
    /// other handle stay visible to the bag.
    pub fn from_shared(provider: Arc<dyn ValuesProvider>) -> Self {
        Self { provider }
    }

    /// Returns the stored value, if any provider knows `name`.
    pub fn lookup(&self, name: &str) -> Option<ConfigValue> {
        self.provider.read(name)
    }

    /// Returns `(value, true)` when `name` is found and `(default, false)` otherwise.
    pub fn read(&self, name: &str, default: impl Into<ConfigValue>) -> (ConfigValue, bool) {
        match self.lookup(name) {
            Some(value) => (value, true),
            None => (default.into(), false),
        }
    }

    /// Returns the raw value or [`ConfigError::RequiredOptionEmpty`].
    pub fn read_required(&self, name: &str) -> Result<ConfigValue, ConfigError> {
        self.lookup(name).ok_or_else(|| {
            debug!("required configuration option {} is not set", name);
            ConfigError::RequiredOptionEmpty { name: name.to_string() }
        })
    }

    /// Non-string values are rendered to text.
    pub fn read_string(&self, name: &str, default: &str) -> String {
        self.lookup(name)
            .map(|value| value.to_string_value())
            .unwrap_or_else(|| default.to_string())
    }

    /// Like [`read_string`](Self::read_string), but an empty string counts as missing.
    pub fn read_required_string(&self, name: &str) -> Result<String, ConfigError> {
        let value = self.read_required(name)?.to_string_value();
        if value.is_empty() {
            return Err(ConfigError::RequiredOptionEmpty { name: name.to_string() });
        }
        Ok(value)
    }

    /// A stored list is returned as-is and a single string is wrapped into a
    /// one-element list. Anything else yields `default`.
    pub fn read_strings<I, S>(&self, name: &str, default: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.read_lenient(name, ConfigValue::to_string_list)
            .unwrap_or_else(|| default.into_iter().map(Into::into).collect())
    }

    pub fn read_required_strings(&self, name: &str) -> Result<Vec<String>, ConfigError> {
        self.read_strict(name, "string list", ConfigValue::to_string_list)
    }

    /// `int` is 64 bits wide; it differs from `int64` only in error messages.
    pub fn read_int(&self, name: &str, default: i64) -> i64 {
        self.read_lenient(name, ConfigValue::to_i64).unwrap_or(default)
    }

    pub fn read_required_int(&self, name: &str) -> Result<i64, ConfigError> {
        self.read_strict(name, "int", ConfigValue::to_i64)
    }

    pub fn read_int64(&self, name: &str, default: i64) -> i64 {
        self.read_lenient(name, ConfigValue::to_i64).unwrap_or(default)
    }

    pub fn read_required_int64(&self, name: &str) -> Result<i64, ConfigError> {
        self.read_strict(name, "int64", ConfigValue::to_i64)
    }

    pub fn read_uint(&self, name: &str, default: u32) -> u32 {
        self.read_lenient(name, ConfigValue::to_u32).unwrap_or(default)
    }

    pub fn read_required_uint(&self, name: &str) -> Result<u32, ConfigError> {
        self.read_strict(name, "uint", ConfigValue::to_u32)
    }

    /// Only `""`, `"false"`, `"0"` and `"[]"` (after rendering and trimming)
    /// read as `false`; every other found value is `true`.
    pub fn read_bool(&self, name: &str, default: bool) -> bool {
        self.lookup(name).map_or(default, |value| value.to_bool())
    }

    /// Fails only when `name` is missing; found values always coerce.
    pub fn read_required_bool(&self, name: &str) -> Result<bool, ConfigError> {
        Ok(self.read_required(name)?.to_bool())
    }

    /// Reads a count of `unit`s. A stored duration is returned unchanged and
    /// ignores `unit`. Falls back to `default` units on any failure.
    pub fn read_duration(&self, name: &str, unit: Duration, default: u32) -> Duration {
        self.read_required_duration(name, unit)
            .unwrap_or_else(|_| unit.saturating_mul(default))
    }

    pub fn read_required_duration(&self, name: &str, unit: Duration) -> Result<Duration, ConfigError> {
        let value = self.read_required(name)?;
        if let Some(duration) = value.as_duration() {
            return Ok(duration);
        }
        let count = convert(value, "uint", ConfigValue::to_u32)?;
        Ok(unit.saturating_mul(count))
    }

    /// Tries every key and reports all missing ones at once, in key order.
    pub fn check_required_values<I>(&self, keys: I) -> Result<(), ConfigError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut collector = ErrorCollector::new();
        for key in keys {
            collector.record(self.read_required(key.as_ref()));
        }
        collector.into_result(REQUIRED_VALUES_SEPARATOR).map_err(|errors| {
            warn!("{} required configuration values are missing", errors.errors().len());
            ConfigError::Aggregate(errors)
        })
    }

    /// Chains `other` behind this bag's provider. Names known to both keep
    /// resolving to this bag's value.
    pub fn merge(&mut self, other: &ParameterBag) {
        let composite = CompositeValuesProvider::new(vec![Arc::clone(&self.provider), Arc::clone(&other.provider)]);
        self.provider = Arc::new(composite);
    }

    pub fn to_key_values(&self) -> BTreeMap<String, ConfigValue> {
        self.provider.to_key_values()
    }

    pub fn dump(&self, writer: &mut dyn Write) -> Result<(), ConfigError> {
        self.provider.dump(writer)
    }

    fn read_lenient<T>(&self, name: &str, coerce: impl FnOnce(&ConfigValue) -> Option<T>) -> Option<T> {
        self.lookup(name).and_then(|value| coerce(&value))
    }

    fn read_strict<T>(
        &self,
        name: &str,
        target: &'static str,
        coerce: impl FnOnce(&ConfigValue) -> Option<T>,
    ) -> Result<T, ConfigError> {
        let value = self.read_required(name)?;
        convert(value, target, coerce)
    }
}

fn convert<T>(
    value: ConfigValue,
    target: &'static str,
    coerce: impl FnOnce(&ConfigValue) -> Option<T>,
) -> Result<T, ConfigError> {
    match coerce(&value) {
        Some(converted) => Ok(converted),
        None => Err(ConfigError::Conversion { value, target }),
    }
}
