//! Client for the Minecraft launcher's version catalog.
//!
//! The catalog is two kinds of JSON documents: the listing of all versions
//! ([`VersionListing`]) and one manifest per version ([`VersionManifest`]).
//! Both are retrieved through the [`Fetch`] trait; [`HttpFetcher`] is the
//! network implementation.
//!
//! # Example
//!
//! ```no_run
//! use minepack_versions::{Fetch, HttpFetcher, MinecraftVersion, VersionType};
//! use std::sync::Arc;
//!
//! # async fn run() -> minepack_versions::Result<()> {
//! let fetch: Arc<dyn Fetch> = Arc::new(HttpFetcher::new()?);
//! if let Some(latest) = MinecraftVersion::latest(&fetch, VersionType::Release).await? {
//!     let manifest = latest.version_manifest().await?;
//!     println!("{} runs {}", latest.id(), manifest.main_class);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod fetch;
mod listing;
mod manifest;
mod version;

pub use error::{Result, VersionsError};
pub use fetch::{fetch_typed, Fetch, HttpFetcher};
pub use listing::{
    get_version_listing, LatestVersions, RawVersion, VersionListing, VersionType,
    VERSION_LISTING_URL,
};
pub use manifest::{
    get_version_manifest, ArgumentValue, AssetIndexLink, ClientArgument, ClientArguments,
    ClientLogging, DownloadLink, Downloads, Library, LibraryArtifact, LibraryDownloads,
    LoggingConfig, LoggingFile, OsRule, Rule, RuleAction, VersionManifest,
};
pub use version::MinecraftVersion;
