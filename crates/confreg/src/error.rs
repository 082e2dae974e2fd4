//! Error types for registry operations.

use thiserror::Error;

/// Errors returned by option registration, access, and deprecation APIs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The key is already registered as a leaf option.
    #[error("option '{0}' is already registered")]
    DuplicateKey(String),
    /// The key conflicts with existing namespace structure.
    #[error("path collision at '{key}': {message}")]
    PathCollision { key: String, message: String },
    /// A validator rejected a default or a candidate value.
    #[error("invalid value for '{key}': {message}")]
    Validation { key: String, message: String },
    /// Lookup of a key with no registered option behind it.
    #[error("no such option: '{0}'")]
    OptionNotFound(String),
    /// The key has already been deprecated.
    #[error("option '{0}' is already deprecated")]
    AlreadyDeprecated(String),
    /// Malformed key.
    #[error("invalid key: {0}")]
    Invalid(String),
}
