//! The Minepack cache directory.
//!
//! The cache lives in `<config dir>/cache` unless the config file points it
//! elsewhere or disables it. Nothing is created until something is written.

use minepack_config::{ConfigDirectory, MinepackConfigWithMetadata};
use minepack_fs::{Directory, File, FileOps, FsPath, PathBacked, Result};
use tracing::debug;

/// A directory for cached downloads and derived files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirectory {
    directory: Directory,
}

impl CacheDirectory {
    /// Name of the cache directory within the config directory.
    pub const DEFAULT_NAME: &'static str = "cache";

    pub fn new(path: impl Into<FsPath>) -> Self {
        Self {
            directory: Directory::new(path),
        }
    }

    /// The default cache location inside `config`.
    pub fn within(config: &ConfigDirectory) -> Self {
        Self::new(config.resolve_path([Self::DEFAULT_NAME]))
    }

    /// The default cache location inside the config directory resolved from
    /// the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::within(&ConfigDirectory::from_env()?))
    }

    /// The cache location a loaded config asks for.
    ///
    /// Returns `None` when the cache is disabled. A relative
    /// `cacheDirectory` resolves against `config_dir`; an absolute one is
    /// used as-is.
    pub fn for_config(
        config_dir: &ConfigDirectory,
        config: &MinepackConfigWithMetadata,
    ) -> Option<Self> {
        if !config.cache_enabled() {
            debug!("Cache is disabled by {}", config_dir.config_file().fs_path());
            return None;
        }
        Some(Self::new(config_dir.resolve_path([config.cache_directory()])))
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn path(&self) -> &FsPath {
        self.directory.path()
    }

    pub async fn exists(&self) -> bool {
        self.directory.exists().await
    }

    /// Create the cache directory if it is missing.
    pub async fn ensure_exists(&self) -> Result<()> {
        self.directory.create().await
    }

    /// A cache entry at `relative` (not created).
    pub fn file(&self, relative: impl AsRef<str>) -> File {
        self.directory.file([relative])
    }

    /// Store `bytes` at `relative`, creating the cache and any intermediate
    /// directories on demand.
    pub async fn write(&self, relative: impl AsRef<str>, bytes: &[u8]) -> Result<File> {
        let file = File::create_from_buffer(self.directory.resolve([relative]), bytes).await?;
        debug!("Cached {} bytes at {}", bytes.len(), file.fs_path());
        Ok(file)
    }

    /// The cached bytes at `relative`, or `None` if there is no such entry.
    pub async fn read(&self, relative: impl AsRef<str>) -> Result<Option<Vec<u8>>> {
        match self.file(relative).read_as_buffer().await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
