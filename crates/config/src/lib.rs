//! Layered configuration lookups.
//!
//! A [`ParameterBag`] wraps one [`ValuesProvider`] and offers typed reads
//! with defaults (`read_*`) or with errors (`read_required_*`). Providers
//! can be chained with [`CompositeValuesProvider`]; the first provider that
//! knows a name wins.
//!
//! ```
//! use toolbelt_config::{ConfigValue, MapValuesProvider, ParameterBag};
//!
//! let bag = ParameterBag::new(MapValuesProvider::new([("port", ConfigValue::from("8080"))]));
//! assert_eq!(bag.read_uint("port", 80), 8080);
//! assert_eq!(bag.read_uint("missing", 80), 80);
//! assert!(bag.read_required_string("missing").is_err());
//! ```

mod bag;
mod error;
pub mod provider;

pub use bag::{ParameterBag, REQUIRED_VALUES_SEPARATOR};
pub use error::ConfigError;
pub use provider::{
    CompositeValuesProvider, EnvValuesProvider, JsonFileValuesProvider, MapValuesProvider, NullValuesProvider,
    ValuesProvider,
};
pub use toolbelt_types::ConfigValue;
