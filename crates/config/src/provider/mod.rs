//! Sources a [`ParameterBag`](crate::ParameterBag) resolves names against.
//!
//! A provider answers one question: is `name` set, and if so to what value.
//! Providers can also enumerate everything they hold, which backs
//! [`ValuesProvider::to_key_values`] and [`ValuesProvider::dump`].

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use toolbelt_types::ConfigValue;

use crate::ConfigError;

mod composite;
mod env;
mod json;
mod map;

pub use composite::CompositeValuesProvider;
pub use env::EnvValuesProvider;
pub use json::JsonFileValuesProvider;
pub use map::MapValuesProvider;

/// Capability to resolve configuration names to values.
pub trait ValuesProvider: fmt::Debug + Send + Sync {
    /// Returns the value stored under `name`, or `None` when the provider
    /// does not know the name. A stored [`ConfigValue::Null`] is a hit.
    fn read(&self, name: &str) -> Option<ConfigValue>;

    /// Every entry the provider can enumerate, sorted by key.
    fn to_key_values(&self) -> BTreeMap<String, ConfigValue>;

    /// Writes [`to_key_values`](Self::to_key_values) as one JSON object
    /// followed by a newline.
    fn dump(&self, writer: &mut dyn Write) -> Result<(), ConfigError> {
        serde_json::to_writer(&mut *writer, &self.to_key_values())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<P: ValuesProvider + ?Sized> ValuesProvider for Arc<P> {
    fn read(&self, name: &str) -> Option<ConfigValue> {
        (**self).read(name)
    }

    fn to_key_values(&self) -> BTreeMap<String, ConfigValue> {
        (**self).to_key_values()
    }

    fn dump(&self, writer: &mut dyn Write) -> Result<(), ConfigError> {
        (**self).dump(writer)
    }
}

/// Provider that never finds anything. Used when a bag has no source.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullValuesProvider;

impl ValuesProvider for NullValuesProvider {
    fn read(&self, _name: &str) -> Option<ConfigValue> {
        None
    }

    fn to_key_values(&self) -> BTreeMap<String, ConfigValue> {
        BTreeMap::new()
    }

    fn dump(&self, _writer: &mut dyn Write) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_provider_finds_nothing_and_dumps_nothing() {
        let provider = NullValuesProvider;
        assert_eq!(provider.read("anything"), None);
        assert!(provider.to_key_values().is_empty());

        let mut out = Vec::new();
        provider.dump(&mut out).expect("dump succeeds");
        assert!(out.is_empty());
    }

    #[test]
    fn shared_providers_delegate() {
        let shared: Arc<dyn ValuesProvider> = Arc::new(MapValuesProvider::new([("one", 1)]));
        assert_eq!(shared.read("one"), Some(ConfigValue::Int(1)));
        assert_eq!(shared.to_key_values().len(), 1);
    }
}
