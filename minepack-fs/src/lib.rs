//! Structured paths and layered file/directory capabilities.
//!
//! This crate is the filesystem foundation for Minepack. It provides:
//!
//! - [`FsPath`] - an immutable path record that keeps its parsed parts and
//!   its formatted string in sync
//! - [`Directory`] - create, remove and resolve beneath a directory
//! - [`File`], [`TextFile`] and [`JsonFile`] - progressively richer views of
//!   a file, sharing the operations of [`FileOps`]
//!
//! Specialized file types in other crates (configuration files, install
//! manifests) implement [`PathBacked`] and pick up every [`FileOps`]
//! operation from its default methods.
//!
//! # Example
//!
//! ```no_run
//! use minepack_fs::{Directory, FileOps, JsonFile};
//! use serde_json::json;
//!
//! # async fn run() -> minepack_fs::Result<()> {
//! let home = Directory::home()?;
//! let settings: JsonFile<serde_json::Value> =
//!     JsonFile::new(home.resolve([".config", "minepack", "settings.json"]));
//!
//! settings.ensure_parent_directory_exists().await?;
//! settings.write_from_json(&json!({ "enableCache": true })).await?;
//! let merged = settings.patch_json(&json!({ "cacheDirectory": "cache" })).await?;
//! assert_eq!(merged["enableCache"], true);
//! # Ok(())
//! # }
//! ```

mod capability;
mod directory;
mod error;
mod file;
mod json;
mod path;
mod text;

pub use capability::{FileOps, PathBacked};
pub use directory::Directory;
pub use error::{FsError, Result};
pub use file::File;
pub use json::{shallow_merge, JsonFile, JsonWriteOptions};
pub use path::{normalize, AccessMode, ExistsOptions, FsPath, PathParts};
pub use text::{TextFile, TextOptions};
