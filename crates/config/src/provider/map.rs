use std::collections::BTreeMap;

use dashmap::DashMap;
use toolbelt_types::ConfigValue;

use super::ValuesProvider;

/// In-memory provider backed by a concurrent map.
///
/// Reads never block on writers elsewhere in the process; concurrent writers
/// to the same key resolve as last-write-wins.
#[derive(Debug, Default)]
pub struct MapValuesProvider {
    parameters: DashMap<String, ConfigValue>,
}

impl MapValuesProvider {
    /// Creates a provider holding the given entries.
    pub fn new<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        let provider = Self::default();
        provider.extend(params);
        provider
    }

    /// Returns a new, independent provider holding this provider's entries
    /// overlaid with `overrides`. `self` is left untouched.
    pub fn copy_with<I, K, V>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        let copy = Self {
            parameters: self.parameters.clone(),
        };
        copy.extend(overrides);
        copy
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn set(&self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
        self.parameters.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    fn extend<I, K, V>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }
}

impl ValuesProvider for MapValuesProvider {
    fn read(&self, name: &str) -> Option<ConfigValue> {
        self.parameters.get(name).map(|entry| entry.value().clone())
    }

    fn to_key_values(&self) -> BTreeMap<String, ConfigValue> {
        self.parameters
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
