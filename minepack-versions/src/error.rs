//! Error types for the version catalog client

use thiserror::Error;

/// Result type alias using VersionsError.
pub type Result<T> = std::result::Result<T, VersionsError>;

#[derive(Error, Debug)]
pub enum VersionsError {
    /// The request failed, returned an error status, or had an unreadable body
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response was JSON but not of the expected shape
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// A catalog timestamp was not RFC 3339
    #[error("invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl VersionsError {
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// The HTTP status, if the server answered with an error status.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http { source, .. } => source.status(),
            _ => None,
        }
    }
}
