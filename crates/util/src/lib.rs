//! Small helpers shared by the toolbelt crates.

pub mod env;
pub mod errors;
pub mod redact;

pub use env::{EnvError, read_env, read_env_float, read_env_int, read_env_or_error};
pub use errors::{CollectedErrors, ErrorCollector, collect_errors};
pub use redact::{REDACTED, is_sensitive_key, redact_entries};
