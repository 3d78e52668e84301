//! Plain byte-oriented files.

use crate::capability::{FileOps, PathBacked};
use crate::error::Result;
use crate::path::FsPath;
use tokio::io::AsyncRead;

/// A file on disk, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    path: FsPath,
}

impl File {
    pub fn new(path: impl Into<FsPath>) -> Self {
        Self { path: path.into() }
    }

    /// Write `bytes` to a new file at `path`, creating parent directories.
    pub async fn create_from_buffer(path: impl Into<FsPath>, bytes: &[u8]) -> Result<Self> {
        let file = Self::new(path);
        file.ensure_parent_directory_exists().await?;
        file.write_from_buffer(bytes).await?;
        Ok(file)
    }

    /// Stream `reader` into a new file at `path`, creating parent directories.
    ///
    /// Returns once the file has been closed.
    pub async fn create_from_stream<R>(path: impl Into<FsPath>, reader: R) -> Result<Self>
    where
        R: AsyncRead + Unpin + Send,
    {
        let file = Self::new(path);
        file.ensure_parent_directory_exists().await?;
        file.write_from_stream(reader).await?;
        Ok(file)
    }
}

impl PathBacked for File {
    fn fs_path(&self) -> &FsPath {
        &self.path
    }

    fn with_path(&self, path: FsPath) -> Self {
        Self::new(path)
    }
}

impl FileOps for File {}
