//! Minepack configuration store
//!
//! This crate manages the per-user Minepack configuration: where it lives,
//! what it defaults to, and how it is safely updated.
//!
//! # Features
//!
//! - **Lazy creation**: a missing `config.json` reads as the compiled
//!   defaults and is created by the first update
//! - **Version checks**: every document records which program and version
//!   last wrote it; incompatible major versions are rejected, other
//!   differences produce warnings
//! - **Validate before write**: updates are merged, validated and only then
//!   persisted
//! - **No caching**: every read and update goes to disk
//! - **Injected warnings**: advisory messages go through a [`WarningSink`],
//!   by default [`TracingWarnings`]
//!
//! # Quick Start
//!
//! ```no_run
//! use minepack_config::{ConfigDirectory, MinepackConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = ConfigDirectory::from_env()?;
//! let config_file = directory.config_file();
//!
//! let config = config_file.read_config().await?;
//! println!("cache enabled: {}", config.cache_enabled());
//!
//! config_file
//!     .update_config(&MinepackConfig::default().with_enable_cache(false))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Location
//!
//! The config directory is `$MINEPACK_HOME` when set and non-empty, and
//! `~/.config/minepack` otherwise.

pub mod config_directory;
pub mod config_file;
pub mod error;
pub mod program;
pub mod types;
pub mod validation;
pub mod version;
pub mod warnings;

pub use config_directory::{ConfigDirectory, ConfigRootSource};
pub use config_file::{ConfigFile, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigValidationError, Result};
pub use program::{ProgramInfo, UpdateMetadata};
pub use types::{
    MinepackConfig, MinepackConfigWithMetadata, DEFAULT_CACHE_DIRECTORY,
    DEFAULT_INSTANCE_DIRECTORY,
};
pub use validation::validate_config;
pub use version::{InvalidVersion, Version, VersionDiff};
pub use warnings::{CollectedWarnings, TracingWarnings, WarningSink};
