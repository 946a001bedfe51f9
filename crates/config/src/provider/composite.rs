use std::collections::BTreeMap;
use std::sync::Arc;

use toolbelt_types::ConfigValue;

use super::ValuesProvider;

/// Ordered chain of providers; the first provider that knows a name wins.
#[derive(Debug, Default, Clone)]
pub struct CompositeValuesProvider {
    providers: Vec<Arc<dyn ValuesProvider>>,
}

impl CompositeValuesProvider {
    /// Builds a chain that consults `providers` in the given order.
    pub fn new(providers: Vec<Arc<dyn ValuesProvider>>) -> Self {
        Self { providers }
    }

    /// Appends a provider with lower precedence than every provider already registered.
    pub fn with_provider(mut self, provider: impl ValuesProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ValuesProvider for CompositeValuesProvider {
    fn read(&self, name: &str) -> Option<ConfigValue> {
        self.providers.iter().find_map(|provider| provider.read(name))
    }

    /// Merged entries of every provider. A key known to several providers
    /// carries the value `read` would return for it.
    fn to_key_values(&self) -> BTreeMap<String, ConfigValue> {
        let mut merged = BTreeMap::new();
        for provider in &self.providers {
            for (key, value) in provider.to_key_values() {
                merged.entry(key).or_insert(value);
            }
        }
        merged
    }
}
