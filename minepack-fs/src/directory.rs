//! Directory capabilities over an [`FsPath`].
//!
//! A `Directory` is only a path. Creating one does not touch the disk;
//! [`Directory::create`] does, with `mkdir -p` semantics, so it is safe to
//! call on every run.

use crate::capability::PathBacked;
use crate::error::{FsError, Result};
use crate::file::File;
use crate::path::FsPath;
use tracing::debug;

/// A directory on disk, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directory {
    path: FsPath,
}

impl Directory {
    pub fn new(path: impl Into<FsPath>) -> Self {
        Self { path: path.into() }
    }

    /// Construct a directory and create it on disk.
    pub async fn create_at(path: impl Into<FsPath>) -> Result<Self> {
        let directory = Self::new(path);
        directory.create().await?;
        Ok(directory)
    }

    /// The current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns `NoHomeDirectory` if the home directory cannot be determined.
    pub fn home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(FsError::NoHomeDirectory)?;
        Ok(Self::new(home))
    }

    /// The platform temporary directory.
    pub fn tmp() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }

    /// Resolve `segments` beneath this directory.
    pub fn resolve<I, S>(&self, segments: I) -> FsPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.path.resolve(segments)
    }

    /// A directory resolved beneath this one (does not create it).
    pub fn subdirectory<I, S>(&self, segments: I) -> Directory
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Directory::new(self.resolve(segments))
    }

    /// A file resolved beneath this directory (does not create it).
    pub fn file<I, S>(&self, segments: I) -> File
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        File::new(self.resolve(segments))
    }

    /// Create the directory and any missing ancestors.
    ///
    /// Succeeds silently if the directory already exists.
    pub async fn create(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.path)
            .await
            .map_err(|e| FsError::io("mkdir", self.path.to_path_buf(), e))?;
        debug!("Ensured directory exists: {}", self.path);
        Ok(())
    }

    pub async fn exists(&self) -> bool {
        self.path.exists().await
    }

    /// Remove the directory and everything in it.
    ///
    /// Removing a directory that does not exist is an error.
    pub async fn remove(&self) -> Result<()> {
        tokio::fs::remove_dir_all(&self.path)
            .await
            .map_err(|e| FsError::io("remove", self.path.to_path_buf(), e))?;
        debug!("Removed directory: {}", self.path);
        Ok(())
    }

    /// Alias for [`Directory::remove`].
    pub async fn delete(&self) -> Result<()> {
        self.remove().await
    }
}

impl PathBacked for Directory {
    fn fs_path(&self) -> &FsPath {
        &self.path
    }

    fn with_path(&self, path: FsPath) -> Self {
        Self::new(path)
    }
}
