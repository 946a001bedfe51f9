use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toolbelt_types::ConfigValue;
use toolbelt_util::CollectedErrors;

/// Errors surfaced by providers and strict parameter bag reads.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required option has no value in any provider.
    #[error("required option {name} is empty")]
    RequiredOptionEmpty { name: String },

    /// A value was found but cannot be coerced to the requested type.
    #[error("cannot convert {value} to {target}")]
    Conversion { value: ConfigValue, target: &'static str },

    /// Reading configuration content failed.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// A configuration file could not be opened.
    #[error("failed to open configuration file {}: {source}", .path.display())]
    File { path: PathBuf, source: io::Error },

    /// Configuration content is not a JSON object.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Several checks failed; messages are joined with a space.
    #[error(transparent)]
    Aggregate(#[from] CollectedErrors<ConfigError>),
}

impl ConfigError {
    /// Names of the options reported missing by this error, including the
    /// ones nested inside an aggregate.
    pub fn missing_options(&self) -> Vec<&str> {
        match self {
            Self::RequiredOptionEmpty { name } => vec![name.as_str()],
            Self::Aggregate(errors) => errors.errors().iter().flat_map(ConfigError::missing_options).collect(),
            _ => Vec::new(),
        }
    }
}
