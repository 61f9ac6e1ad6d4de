//! Environment variable lookup and value parsing.

use std::sync::Arc;

use thiserror::Error;

/// Source of environment variables.
///
/// The driver reads the real process environment via [`ProcessEnv`]; tests
/// substitute a map-backed source so gating can be exercised without
/// mutating global state.
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads `std::env`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for Arc<T> {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvValueError {
    #[error("not a yes/no value: {0:?}")]
    NotYesNo(String),

    #[error("not a non-negative integer: {0:?}")]
    NotInt(String),
}

/// Parse a yes/no environment value.
///
/// Accepts `1`/`y`/`yes`/`true`/`on` and `0`/`n`/`no`/`false`/`off`,
/// case-insensitive. Anything else fails; gate resolution treats a failure
/// as "feature disabled".
pub fn parse_yesno(value: &str) -> Result<bool, EnvValueError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "true" | "on" => Ok(true),
        "0" | "n" | "no" | "false" | "off" => Ok(false),
        _ => Err(EnvValueError::NotYesNo(value.to_string())),
    }
}

/// Parse a trace indent width in spaces.
pub fn parse_indent_width(value: &str) -> Result<usize, EnvValueError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| EnvValueError::NotInt(value.to_string()))
}
