//! Identity of the program that writes a document.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Name and version of a program that updates Minepack documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramInfo {
    pub name: String,
    pub version: String,
}

impl ProgramInfo {
    pub const MINEPACK: &'static str = "minepack";

    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Minepack at the version of this crate.
    pub fn current() -> Self {
        Self::new(Self::MINEPACK, env!("CARGO_PKG_VERSION"))
    }
}

impl Default for ProgramInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// The `lastUpdateBy` stamp written into every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMetadata {
    pub name: String,
    pub version: String,
    /// RFC 3339 timestamp of the write, `null` for compiled defaults.
    pub date: Option<String>,
}

impl UpdateMetadata {
    /// Metadata without a date, as used by defaults.
    pub fn unstamped(program: &ProgramInfo) -> Self {
        Self {
            name: program.name.clone(),
            version: program.version.clone(),
            date: None,
        }
    }

    /// Metadata dated now, in UTC with millisecond precision.
    pub fn now(program: &ProgramInfo) -> Self {
        Self {
            date: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            ..Self::unstamped(program)
        }
    }

    pub fn program(&self) -> ProgramInfo {
        ProgramInfo::new(&self.name, &self.version)
    }
}
