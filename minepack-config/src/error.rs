//! Error types for the Minepack configuration store

use minepack_fs::FsError;
use serde_json::Value;
use thiserror::Error;

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A config document broke one of the configuration rules.
///
/// Carries the offending document so callers can report or repair it.
/// Displays as the reason alone.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{reason}")]
pub struct ConfigValidationError {
    /// The candidate document that failed validation
    pub config: Value,
    /// Human-readable reason
    pub reason: String,
}

impl ConfigValidationError {
    pub fn new(config: &Value, reason: impl Into<String>) -> Self {
        Self {
            config: config.clone(),
            reason: reason.into(),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document failed validation; nothing was written
    #[error(transparent)]
    Validation(#[from] ConfigValidationError),

    /// Reading or writing the config file failed
    #[error(transparent)]
    Fs(#[from] FsError),

    /// A validated document could not be decoded into the config type
    #[error("failed to decode config: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    /// The validation failure, if this is one.
    pub fn validation(&self) -> Option<&ConfigValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}
