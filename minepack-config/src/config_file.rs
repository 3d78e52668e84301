//! The Minepack config file: defaults, validation and read-modify-write.

use crate::error::{ConfigError, ConfigValidationError, Result};
use crate::program::{ProgramInfo, UpdateMetadata};
use crate::types::{defaults_value, MinepackConfig, MinepackConfigWithMetadata};
use crate::validation::validate_config;
use crate::warnings::{TracingWarnings, WarningSink};
use minepack_fs::{shallow_merge, FileOps, FsError, FsPath, JsonFile, PathBacked};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// File name of the config file within the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A JSON config document with defaults and version checks.
///
/// A missing file is a valid state: reads return the compiled defaults and
/// the first update creates the file. Every mutation merges, validates and
/// only then writes.
#[derive(Clone)]
pub struct ConfigFile {
    json: JsonFile<Value>,
    program: ProgramInfo,
    warnings: Arc<dyn WarningSink>,
}

impl ConfigFile {
    /// A config file at `path`, written by the current Minepack version and
    /// logging warnings through `tracing`.
    pub fn new(path: impl Into<FsPath>) -> Self {
        Self {
            json: JsonFile::new(path),
            program: ProgramInfo::current(),
            warnings: Arc::new(TracingWarnings),
        }
    }

    /// Attribute updates to `program` and check versions against it.
    pub fn with_program(mut self, program: ProgramInfo) -> Self {
        self.program = program;
        self
    }

    /// Send advisory warnings to `warnings`.
    pub fn with_warnings(mut self, warnings: Arc<dyn WarningSink>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn program(&self) -> &ProgramInfo {
        &self.program
    }

    pub fn as_json_file(&self) -> &JsonFile<Value> {
        &self.json
    }

    /// The compiled defaults, attributed to this file's program.
    pub fn defaults(&self) -> MinepackConfigWithMetadata {
        MinepackConfigWithMetadata::defaults(&self.program)
    }

    /// Check `candidate` against the configuration rules.
    pub fn validate_config(&self, candidate: &Value) -> std::result::Result<(), ConfigValidationError> {
        validate_config(candidate, &self.program, self.warnings.as_ref())
    }

    /// Read the config, merged over the defaults.
    ///
    /// A missing file yields the defaults without touching the disk. Any
    /// other read failure, malformed JSON included, is returned.
    pub async fn read_config(&self) -> Result<MinepackConfigWithMetadata> {
        let stored = match self.json.read_as_json().await {
            Ok(stored) => stored,
            Err(e) if e.is_not_found() => {
                debug!("No config file at {}, using defaults", self.fs_path());
                return Ok(self.defaults());
            }
            Err(e) => return Err(e.into()),
        };

        self.validate_config(&stored)?;
        self.merge_with_defaults(stored)
    }

    /// Apply `patch` to the stored document and stamp it as updated now.
    ///
    /// The merged document is validated before anything is written; a
    /// validation failure leaves the file untouched. A missing file is
    /// created, along with its parent directory. Returns the new document
    /// merged over the defaults.
    ///
    /// Updates are not atomic. Concurrent updaters race and the last write
    /// wins, as described on [`JsonFile::update_json`].
    pub async fn update_config(&self, patch: &MinepackConfig) -> Result<MinepackConfigWithMetadata> {
        let changes = MinepackConfigWithMetadata {
            config: patch.clone(),
            last_update_by: UpdateMetadata::now(&self.program),
        };
        let changes = serde_json::to_value(&changes).map_err(FsError::from)?;

        let retry_changes = changes.clone();
        let written = match self
            .json
            .update_json(|current| async move { self.apply_changes(current, changes) })
            .await
        {
            Err(ConfigError::Fs(e)) if e.is_not_found() => {
                debug!("Creating config file at {}", self.fs_path());
                let document = self.apply_changes(Value::Object(Map::new()), retry_changes)?;
                self.json.ensure_parent_directory_exists().await?;
                self.json.write_from_json(&document).await?;
                document
            }
            result => result?,
        };

        self.merge_with_defaults(written)
    }

    /// Write the defaults, stamped now, replacing any existing file.
    pub async fn create(&self) -> Result<MinepackConfigWithMetadata> {
        let config = MinepackConfigWithMetadata {
            last_update_by: UpdateMetadata::now(&self.program),
            ..self.defaults()
        };
        let document = serde_json::to_value(&config).map_err(FsError::from)?;

        self.json.ensure_parent_directory_exists().await?;
        self.json.write_from_json(&document).await?;
        debug!("Created config file at {}", self.fs_path());
        Ok(config)
    }

    fn apply_changes(&self, mut current: Value, changes: Value) -> Result<Value> {
        if !shallow_merge(&mut current, changes) {
            return Err(ConfigValidationError::new(
                &current,
                "Config file must contain a JSON object",
            )
            .into());
        }
        self.validate_config(&current)?;
        Ok(current)
    }

    /// Null-valued keys in `stored` fall back to their defaults.
    fn merge_with_defaults(&self, mut stored: Value) -> Result<MinepackConfigWithMetadata> {
        if let Some(document) = stored.as_object_mut() {
            document.retain(|_, value| !value.is_null());
        }
        let mut merged = defaults_value(&self.program);
        shallow_merge(&mut merged, stored);
        serde_json::from_value(merged).map_err(ConfigError::decode)
    }
}

impl fmt::Debug for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFile")
            .field("path", self.fs_path())
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl PathBacked for ConfigFile {
    fn fs_path(&self) -> &FsPath {
        self.json.fs_path()
    }

    fn with_path(&self, path: FsPath) -> Self {
        Self {
            json: JsonFile::new(path),
            program: self.program.clone(),
            warnings: Arc::clone(&self.warnings),
        }
    }
}

impl FileOps for ConfigFile {}
