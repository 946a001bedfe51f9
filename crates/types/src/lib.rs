//! Shared value types for the toolbelt crates.

pub mod value;

pub use value::{ConfigValue, FALSY_LITERALS};
