//! Masking of values whose keys look like secrets.
//!
//! Dumping the process environment or a merged configuration prints every
//! entry verbatim. These helpers let callers hide credentials first.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Replacement written in place of a sensitive value.
pub const REDACTED: &str = "<redacted>";

static SENSITIVE_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(KEY|TOKEN|SECRET|PASSWORD|PASSWD|CREDENTIAL|AUTH|DATABASE_URL|DSN)")
        .expect("sensitive key pattern compiles")
});

/// Returns true if a key name looks like it holds a credential.
///
/// ```rust
/// use toolbelt_util::redact::is_sensitive_key;
///
/// assert!(is_sensitive_key("AWS_SECRET_ACCESS_KEY"));
/// assert!(is_sensitive_key("db_password"));
/// assert!(!is_sensitive_key("HOME"));
/// ```
pub fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEY.is_match(key)
}

/// Replaces the value of every sensitive key with [`REDACTED`].
/// Returns how many entries were masked.
pub fn redact_entries<V>(entries: &mut BTreeMap<String, V>) -> usize
where
    V: From<&'static str>,
{
    let mut masked = 0;
    for (key, value) in entries.iter_mut() {
        if is_sensitive_key(key) {
            *value = V::from(REDACTED);
            masked += 1;
        }
    }
    masked
}
