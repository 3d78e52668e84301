//! Bookkeeping for installed assets.
//!
//! The install manifest records every asset the installer has placed on
//! disk, with the URL it came from and its integrity hash. Assets are only
//! ever appended.

use minepack_config::{ProgramInfo, UpdateMetadata};
use minepack_fs::{FileOps, FsPath, JsonFile, PathBacked, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

/// One installed asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallAssetManifest {
    /// Where the asset was installed
    pub path: String,
    /// Where the asset was downloaded from
    pub url: String,
    /// Subresource-integrity string for the asset's content
    pub integrity_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallManifest {
    pub last_update_by: UpdateMetadata,
    #[serde(default)]
    pub assets: Vec<InstallAssetManifest>,
}

impl InstallManifest {
    /// A manifest with no assets, attributed to `program`.
    pub fn empty(program: &ProgramInfo) -> Self {
        Self {
            last_update_by: UpdateMetadata::unstamped(program),
            assets: Vec::new(),
        }
    }
}

/// The install manifest file. A missing file is an empty manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallManifestFile {
    json: JsonFile<InstallManifest>,
    program: ProgramInfo,
}

impl InstallManifestFile {
    pub const PROGRAM_NAME: &'static str = "minepack-installer";

    pub fn new(path: impl Into<FsPath>) -> Self {
        Self {
            json: JsonFile::new(path),
            program: Self::installer(),
        }
    }

    /// The identity stamped into `lastUpdateBy` on every update.
    pub fn installer() -> ProgramInfo {
        ProgramInfo::new(Self::PROGRAM_NAME, env!("CARGO_PKG_VERSION"))
    }

    pub fn with_program(mut self, program: ProgramInfo) -> Self {
        self.program = program;
        self
    }

    pub fn as_json_file(&self) -> &JsonFile<InstallManifest> {
        &self.json
    }

    pub async fn read_manifest(&self) -> Result<InstallManifest> {
        match self.json.read_as_json().await {
            Err(e) if e.is_not_found() => Ok(InstallManifest::empty(&self.program)),
            result => result,
        }
    }

    /// Replace the manifest with `updater(old)`.
    ///
    /// Only the updater's `assets` are kept; `lastUpdateBy` is always
    /// re-stamped with the installer identity and the current time. A
    /// missing file is treated as an empty manifest and created, along with
    /// its parent directory.
    ///
    /// Shares the race described on [`JsonFile::update_json`].
    pub async fn update_json<F, Fut>(&self, updater: F) -> Result<InstallManifest>
    where
        F: FnOnce(InstallManifest) -> Fut,
        Fut: Future<Output = Result<InstallManifest>>,
    {
        if self.json.exists().await {
            return self
                .json
                .update_json(|old| self.restamp(updater(old)))
                .await;
        }

        debug!("Creating install manifest at {}", self.fs_path());
        self.json.ensure_parent_directory_exists().await?;
        let manifest = self
            .restamp(updater(InstallManifest::empty(&self.program)))
            .await?;
        self.json.write_from_json(&manifest).await?;
        Ok(manifest)
    }

    /// Append `assets` to the manifest.
    pub async fn add_assets<I>(&self, assets: I) -> Result<InstallManifest>
    where
        I: IntoIterator<Item = InstallAssetManifest>,
    {
        let assets: Vec<_> = assets.into_iter().collect();
        let added = assets.len();

        let manifest = self
            .update_json(|mut old| async move {
                old.assets.extend(assets);
                Ok(old)
            })
            .await?;
        debug!(
            "Recorded {} new assets ({} total) in {}",
            added,
            manifest.assets.len(),
            self.fs_path()
        );
        Ok(manifest)
    }

    async fn restamp<Fut>(&self, pending: Fut) -> Result<InstallManifest>
    where
        Fut: Future<Output = Result<InstallManifest>>,
    {
        let InstallManifest { assets, .. } = pending.await?;
        Ok(InstallManifest {
            last_update_by: UpdateMetadata::now(&self.program),
            assets,
        })
    }
}

impl PathBacked for InstallManifestFile {
    fn fs_path(&self) -> &FsPath {
        self.json.fs_path()
    }

    fn with_path(&self, path: FsPath) -> Self {
        Self {
            json: JsonFile::new(path),
            program: self.program.clone(),
        }
    }
}

impl FileOps for InstallManifestFile {}
