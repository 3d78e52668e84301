//! Error types for path, file and directory operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using FsError.
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors that can occur during filesystem operations.
#[derive(Error, Debug)]
pub enum FsError {
    /// An I/O call failed. `operation` is the verb that was attempted
    /// (e.g. "read", "rename", "mkdir").
    #[error("failed to {operation} '{path}': {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content was not valid JSON for the requested type.
    #[error("failed to parse JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized to JSON.
    #[error("failed to serialize JSON: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    /// A shallow merge was attempted on something other than a JSON object.
    #[error("cannot patch '{path}': JSON value is not an object")]
    NotAnObject { path: PathBuf },

    /// Cannot determine home directory.
    #[error("cannot determine home directory")]
    NoHomeDirectory,
}

impl FsError {
    /// Create an Io error for the given operation.
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Create a Json parse error.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// The underlying I/O error, if this is one.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether this error means the target does not exist.
    pub fn is_not_found(&self) -> bool {
        self.io_error()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<serde_json::Error> for FsError {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize { source }
    }
}
