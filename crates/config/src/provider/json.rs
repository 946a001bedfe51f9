use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};
use toolbelt_types::ConfigValue;
use tracing::debug;

use super::{MapValuesProvider, ValuesProvider};
use crate::ConfigError;

/// Provider built once from a flat JSON object.
///
/// Field types are inferred from the JSON tokens: integers that fit in an
/// `i64` become [`ConfigValue::Int`], other numbers [`ConfigValue::Float`],
/// strings stay strings (empty ones included) and `null` becomes
/// [`ConfigValue::Null`]. Booleans, arrays and nested objects are kept as
/// their JSON text, e.g. `"true"` or `"[1,2]"`.
#[derive(Debug)]
pub struct JsonFileValuesProvider {
    values: MapValuesProvider,
}

impl JsonFileValuesProvider {
    /// Reads the whole stream and parses it as a JSON object.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ConfigError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_slice(&data)
    }

    /// Opens and parses the JSON file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let provider = Self::from_reader(BufReader::new(file))?;
        debug!("loaded {} configuration values from {}", provider.values.len(), path.display());
        Ok(provider)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, ConfigError> {
        let object: Map<String, Value> = serde_json::from_slice(data)?;
        let values = MapValuesProvider::new(object.into_iter().map(|(key, raw)| (key, infer_value(raw))));
        Ok(Self { values })
    }
}

fn infer_value(raw: Value) -> ConfigValue {
    match raw {
        Value::Null => ConfigValue::Null,
        Value::String(text) => ConfigValue::String(text),
        Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => ConfigValue::Int(integer),
            (None, Some(float)) => ConfigValue::Float(float),
            (None, None) => ConfigValue::String(number.to_string()),
        },
        other => ConfigValue::String(other.to_string()),
    }
}

impl ValuesProvider for JsonFileValuesProvider {
    fn read(&self, name: &str) -> Option<ConfigValue> {
        self.values.read(name)
    }

    fn to_key_values(&self) -> BTreeMap<String, ConfigValue> {
        self.values.to_key_values()
    }
}
