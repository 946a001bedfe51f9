use std::collections::BTreeMap;
use std::env;
use std::io::Write;

use toolbelt_types::ConfigValue;

use super::ValuesProvider;
use crate::ConfigError;

/// Provider reading the process environment.
///
/// Enumerating or dumping this provider exposes every variable of the
/// process, secrets included. Mask the output before showing it to anyone.
/// Variables whose name or value is not valid UTF-8 are treated as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvValuesProvider;

impl ValuesProvider for EnvValuesProvider {
    fn read(&self, name: &str) -> Option<ConfigValue> {
        env::var(name).ok().map(ConfigValue::String)
    }

    fn to_key_values(&self) -> BTreeMap<String, ConfigValue> {
        utf8_vars().map(|(key, value)| (key, ConfigValue::String(value))).collect()
    }

    /// Writes the raw `KEY=VALUE` pairs as a JSON array of strings.
    fn dump(&self, writer: &mut dyn Write) -> Result<(), ConfigError> {
        let mut pairs: Vec<String> = utf8_vars().map(|(key, value)| format!("{key}={value}")).collect();
        pairs.sort();
        serde_json::to_writer(&mut *writer, &pairs)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn utf8_vars() -> impl Iterator<Item = (String, String)> {
    env::vars_os().filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}
