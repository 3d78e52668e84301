//! Text files with an associated character encoding.

use crate::capability::{FileOps, PathBacked};
use crate::error::Result;
use crate::path::FsPath;
use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// Per-call overrides for text I/O.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextOptions {
    /// Use this encoding instead of the file's own.
    pub encoding: Option<&'static Encoding>,
}

impl TextOptions {
    pub fn with_encoding(encoding: &'static Encoding) -> Self {
        Self {
            encoding: Some(encoding),
        }
    }
}

/// A file whose content is text in a fixed encoding (UTF-8 by default).
#[derive(Debug, Clone, PartialEq)]
pub struct TextFile {
    path: FsPath,
    encoding: &'static Encoding,
}

impl TextFile {
    pub fn new(path: impl Into<FsPath>) -> Self {
        Self::with_encoding(path, UTF_8)
    }

    pub fn with_encoding(path: impl Into<FsPath>, encoding: &'static Encoding) -> Self {
        Self {
            path: path.into(),
            encoding,
        }
    }

    /// Write `text` to a new file at `path`, creating parent directories.
    pub async fn create_from_text(
        path: impl Into<FsPath>,
        text: &str,
        options: TextOptions,
    ) -> Result<Self> {
        let file = Self::with_encoding(path, options.encoding.unwrap_or(UTF_8));
        file.ensure_parent_directory_exists().await?;
        file.write_from_text(text).await?;
        Ok(file)
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub async fn read_as_text(&self) -> Result<String> {
        self.read_as_text_with(TextOptions::default()).await
    }

    /// Read and decode the whole file.
    ///
    /// Malformed sequences are replaced with U+FFFD. A byte order mark is
    /// kept as content, not used to switch encodings.
    pub async fn read_as_text_with(&self, options: TextOptions) -> Result<String> {
        let encoding = options.encoding.unwrap_or(self.encoding);
        let bytes = self.read_as_buffer().await?;
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes);
        if had_errors {
            debug!(
                "{} contained malformed {} sequences",
                self.path,
                encoding.name()
            );
        }
        Ok(text.into_owned())
    }

    pub async fn write_from_text(&self, text: &str) -> Result<()> {
        self.write_from_text_with(text, TextOptions::default()).await
    }

    /// Encode and write `text`, replacing the file's content.
    ///
    /// Encodings that `encoding_rs` cannot produce (UTF-16) are written as
    /// UTF-8.
    pub async fn write_from_text_with(&self, text: &str, options: TextOptions) -> Result<()> {
        let encoding = options.encoding.unwrap_or(self.encoding);
        let (bytes, _, _) = encoding.encode(text);
        self.write_from_buffer(&bytes).await
    }
}

impl PathBacked for TextFile {
    fn fs_path(&self) -> &FsPath {
        &self.path
    }

    fn with_path(&self, path: FsPath) -> Self {
        Self::with_encoding(path, self.encoding)
    }
}

impl FileOps for TextFile {}
