//! Capability traits shared by every file type.
//!
//! Concrete file types (`File`, `TextFile`, `JsonFile<T>` and the
//! specializations built on them in other crates) hold an [`FsPath`] and
//! implement [`PathBacked`]. Every other file capability comes from the
//! default methods of [`FileOps`], so the path record is the only shared
//! state.

use crate::directory::Directory;
use crate::error::{FsError, Result};
use crate::path::FsPath;
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::debug;

/// Access to the path a value is bound to.
pub trait PathBacked {
    /// The path this value operates on.
    fn fs_path(&self) -> &FsPath;

    /// A value of the same concrete type bound to another path.
    ///
    /// Any non-path attributes (encoding, payload type, injected
    /// collaborators) are carried over unchanged.
    fn with_path(&self, path: FsPath) -> Self
    where
        Self: Sized;
}

/// File operations available on every file type.
///
/// Nothing is cached. Each call goes to the filesystem through the stored
/// path.
#[async_trait]
pub trait FileOps: PathBacked + Send + Sync + Sized {
    /// The directory containing this file.
    fn directory(&self) -> Directory {
        Directory::new(self.fs_path().parent())
    }

    /// Quiet existence probe.
    async fn exists(&self) -> bool {
        self.fs_path().exists().await
    }

    /// Create the containing directory (and its ancestors) if missing.
    async fn ensure_parent_directory_exists(&self) -> Result<()> {
        self.directory().create().await
    }

    /// Read the whole file into memory.
    async fn read_as_buffer(&self) -> Result<Vec<u8>> {
        let path = self.fs_path();
        tokio::fs::read(path)
            .await
            .map_err(|e| FsError::io("read", path.to_path_buf(), e))
    }

    /// Replace the file's content with `bytes`, creating the file if needed.
    async fn write_from_buffer(&self, bytes: &[u8]) -> Result<()> {
        let path = self.fs_path();
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| FsError::io("write", path.to_path_buf(), e))?;
        debug!("Wrote {} bytes to {}", bytes.len(), path);
        Ok(())
    }

    /// Open the file for incremental reading.
    async fn read_stream(&self) -> Result<tokio::fs::File> {
        let path = self.fs_path();
        tokio::fs::File::open(path)
            .await
            .map_err(|e| FsError::io("open", path.to_path_buf(), e))
    }

    /// Open the file for incremental writing, truncating existing content.
    async fn write_stream(&self) -> Result<tokio::fs::File> {
        let path = self.fs_path();
        tokio::fs::File::create(path)
            .await
            .map_err(|e| FsError::io("create", path.to_path_buf(), e))
    }

    /// Pipe `reader` into this file.
    ///
    /// Resolves only after the destination has been flushed and closed, so
    /// a successful return always means the file holds the full content.
    /// Returns the number of bytes written.
    async fn write_from_stream<R>(&self, mut reader: R) -> Result<u64>
    where
        R: AsyncRead + Unpin + Send,
    {
        let path = self.fs_path();
        let mut destination = self.write_stream().await?;

        let written = tokio::io::copy(&mut reader, &mut destination)
            .await
            .map_err(|e| FsError::io("write", path.to_path_buf(), e))?;
        destination
            .shutdown()
            .await
            .map_err(|e| FsError::io("close", path.to_path_buf(), e))?;
        drop(destination);

        debug!("Streamed {} bytes into {}", written, path);
        Ok(written)
    }

    /// Rename this file to `destination`.
    ///
    /// Renames across filesystem boundaries fail on most platforms and the
    /// error is returned as-is.
    async fn move_to<P>(&self, destination: P) -> Result<Self>
    where
        P: Into<FsPath> + Send,
    {
        let destination = destination.into();
        tokio::fs::rename(self.fs_path(), &destination)
            .await
            .map_err(|e| FsError::io("rename", self.fs_path().to_path_buf(), e))?;
        debug!("Moved {} to {}", self.fs_path(), destination);
        Ok(self.with_path(destination))
    }

    /// Copy this file to `destination`, leaving the original in place.
    async fn copy_to<P>(&self, destination: P) -> Result<Self>
    where
        P: Into<FsPath> + Send,
    {
        let destination = destination.into();
        tokio::fs::copy(self.fs_path(), &destination)
            .await
            .map_err(|e| FsError::io("copy", self.fs_path().to_path_buf(), e))?;
        debug!("Copied {} to {}", self.fs_path(), destination);
        Ok(self.with_path(destination))
    }

    /// Remove the file.
    async fn delete(&self) -> Result<()> {
        let path = self.fs_path();
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| FsError::io("delete", path.to_path_buf(), e))?;
        debug!("Deleted {}", path);
        Ok(())
    }

    /// Metadata of the path itself (symlinks are not followed).
    async fn stat(&self) -> Result<std::fs::Metadata> {
        let path = self.fs_path();
        tokio::fs::symlink_metadata(path)
            .await
            .map_err(|e| FsError::io("stat", path.to_path_buf(), e))
    }
}
