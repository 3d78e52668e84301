//! Location of the per-user Minepack config directory.

use crate::config_file::{ConfigFile, CONFIG_FILE_NAME};
use minepack_fs::{Directory, FsPath, Result};
use std::fmt;
use tracing::debug;

/// Where a [`ConfigDirectory`]'s root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRootSource {
    /// Taken from the `MINEPACK_HOME` override
    Environment,

    /// `~/.config/minepack`
    Default,

    /// Passed explicitly (for testing or special cases)
    Custom,
}

impl fmt::Display for ConfigRootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "{}", ConfigDirectory::ENVIRONMENT_VARIABLE),
            Self::Default => write!(f, "default location"),
            Self::Custom => write!(f, "custom path"),
        }
    }
}

/// The directory holding `config.json` and, by default, the cache.
///
/// Referencing the directory does not create it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDirectory {
    directory: Directory,
    source: ConfigRootSource,
}

impl ConfigDirectory {
    /// Environment variable that overrides the config directory location.
    pub const ENVIRONMENT_VARIABLE: &'static str = "MINEPACK_HOME";

    /// Resolve the location from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `NoHomeDirectory` if the override is unset and the home
    /// directory cannot be determined.
    pub fn from_env() -> Result<Self> {
        let value = std::env::var(Self::ENVIRONMENT_VARIABLE).ok();
        Self::resolve(value.as_deref())
    }

    /// Resolve the location from an explicit override value.
    ///
    /// `None` and the empty string both fall back to the default location.
    pub fn resolve(override_value: Option<&str>) -> Result<Self> {
        let (path, source) = match override_value {
            Some(value) if !value.is_empty() => (FsPath::new(value), ConfigRootSource::Environment),
            _ => (Self::default_path()?, ConfigRootSource::Default),
        };
        debug!("Config directory is {} ({})", path, source);
        Ok(Self {
            directory: Directory::new(path),
            source,
        })
    }

    /// A config directory at an explicit path.
    pub fn at(path: impl Into<FsPath>) -> Self {
        Self {
            directory: Directory::new(path),
            source: ConfigRootSource::Custom,
        }
    }

    /// `~/.config/minepack`
    pub fn default_path() -> Result<FsPath> {
        Ok(Directory::home()?.resolve([".config", "minepack"]))
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn path(&self) -> &FsPath {
        self.directory.path()
    }

    pub fn source(&self) -> ConfigRootSource {
        self.source
    }

    /// The config file within this directory.
    pub fn config_file(&self) -> ConfigFile {
        ConfigFile::new(self.directory.resolve([CONFIG_FILE_NAME]))
    }

    /// Resolve `segments` beneath this directory.
    pub fn resolve_path<I, S>(&self, segments: I) -> FsPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.directory.resolve(segments)
    }

    pub fn subdirectory<I, S>(&self, segments: I) -> Directory
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.directory.subdirectory(segments)
    }

    pub async fn create(&self) -> Result<()> {
        self.directory.create().await
    }

    pub async fn exists(&self) -> bool {
        self.directory.exists().await
    }
}
