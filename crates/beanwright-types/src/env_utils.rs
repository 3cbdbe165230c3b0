//! Environment variable parsing utilities.
//!
//! Configuration structs read their overrides through these helpers instead
//! of repeating `std::env::var(..).ok().and_then(..)` chains.
//!
//! # Example
//!
//! ```
//! use beanwright_types::env_utils::{env_bool_or, env_var_or};
//!
//! let memoize = env_bool_or("BEANWRIGHT_MEMOIZE_RESOLVED_VALUES", true);
//! let depth: usize = env_var_or("BEANWRIGHT_MAX_DEPTH", 64);
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable, falling back to `default` when unset or malformed.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Read a boolean flag, with a default for unset or unrecognized values.
///
/// Truthy: `1`, `true`, `yes`, `on`. Falsy: `0`, `false`, `no`, `off`
/// (case-insensitive).
pub fn env_bool_or(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

/// Interpret a textual flag value. Shared with the type converter's bool rules.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
