//! Typed readers for process environment variables.
//!
//! Lenient readers fall back to the given default when the variable is unset
//! or does not parse. [`read_env_or_error`] is the strict variant.

use std::env;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

/// Error returned when a required environment variable is missing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("Required env variable '{name}' is not set")]
    NotSet { name: String },
}

/// Reads a string variable, returning `default` when it is unset.
pub fn read_env(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Reads an integer variable, returning `default` when it is unset or not an integer.
pub fn read_env_int(name: &str, default: i64) -> i64 {
    read_env_parsed(name).unwrap_or(default)
}

/// Reads a float variable, returning `default` when it is unset or not a number.
pub fn read_env_float(name: &str, default: f64) -> f64 {
    read_env_parsed(name).unwrap_or(default)
}

/// Reads a string variable, failing when it is unset.
pub fn read_env_or_error(name: &str) -> Result<String, EnvError> {
    env::var(name).map_err(|_| EnvError::NotSet { name: name.to_string() })
}

fn read_env_parsed<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("ignoring unparsable value of env variable {}", name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_strings_with_defaults() {
        temp_env::with_vars(
            [("TOOLBELT_TEST_ENV_STRING", Some("toolbelt-value")), ("TOOLBELT_TEST_ENV_MISSING", None)],
            || {
                assert_eq!(read_env("TOOLBELT_TEST_ENV_STRING", ""), "toolbelt-value");
                assert_eq!(read_env("TOOLBELT_TEST_ENV_MISSING", "Some default val"), "Some default val");
            },
        );
    }

    #[test]
    fn reads_numbers_with_defaults() {
        temp_env::with_vars(
            [
                ("TOOLBELT_TEST_ENV_INT", Some("123")),
                ("TOOLBELT_TEST_ENV_FLOAT", Some("123.345")),
                ("TOOLBELT_TEST_ENV_MISSING", None),
            ],
            || {
                assert_eq!(read_env_int("TOOLBELT_TEST_ENV_INT", 0), 123);
                assert_eq!(read_env_int("TOOLBELT_TEST_ENV_MISSING", 7), 7);
                assert_eq!(read_env_int("TOOLBELT_TEST_ENV_FLOAT", 5), 5);
                assert_eq!(read_env_float("TOOLBELT_TEST_ENV_FLOAT", 0.1), 123.345);
                assert_eq!(read_env_float("TOOLBELT_TEST_ENV_MISSING", 0.1), 0.1);
            },
        );
    }

    #[test]
    fn strict_read_reports_missing_variable() {
        temp_env::with_vars(
            [("TOOLBELT_TEST_ENV_STRING", Some("toolbelt-value")), ("TOOLBELT_TEST_ENV_MISSING", None)],
            || {
                assert_eq!(read_env_or_error("TOOLBELT_TEST_ENV_STRING").as_deref(), Ok("toolbelt-value"));
                let error = read_env_or_error("TOOLBELT_TEST_ENV_MISSING").unwrap_err();
                assert_eq!(error.to_string(), "Required env variable 'TOOLBELT_TEST_ENV_MISSING' is not set");
            },
        );
    }
}
