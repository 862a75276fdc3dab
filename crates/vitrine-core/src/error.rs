//! Error types for the site core

use thiserror::Error;

/// Errors raised while bringing site components up
///
/// None of these abort the page: callers log them and fall back to a
/// disabled component or to default configuration.
#[derive(Debug, Error)]
pub enum VitrineError {
    /// A required DOM element was not found
    #[error("required element missing: {0}")]
    MissingElement(&'static str),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A browser API call failed
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the components cannot work with
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

pub type Result<T, E = VitrineError> = core::result::Result<T, E>;
