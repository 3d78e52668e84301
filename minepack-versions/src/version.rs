//! Queries over the version listing.

use crate::error::{Result, VersionsError};
use crate::fetch::Fetch;
use crate::listing::{get_version_listing, RawVersion, VersionListing, VersionType};
use crate::manifest::{get_version_manifest, VersionManifest};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// A version from the listing, bound to the fetcher it was loaded with.
#[derive(Clone)]
pub struct MinecraftVersion {
    raw: RawVersion,
    fetch: Arc<dyn Fetch>,
}

impl MinecraftVersion {
    pub fn from_raw(raw: RawVersion, fetch: Arc<dyn Fetch>) -> Self {
        Self { raw, fetch }
    }

    pub fn id(&self) -> &str {
        &self.raw.id
    }

    pub fn version_type(&self) -> VersionType {
        self.raw.version_type
    }

    pub fn manifest_url(&self) -> &str {
        &self.raw.url
    }

    pub fn raw(&self) -> &RawVersion {
        &self.raw
    }

    pub fn released_at(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.raw.release_time)
    }

    /// When the version's files were last updated in the listing.
    pub fn available_since(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.raw.time)
    }

    pub async fn version_manifest(&self) -> Result<VersionManifest> {
        get_version_manifest(self.manifest_url(), self.fetch.as_ref()).await
    }

    /// Every version in the listing, newest first.
    pub async fn all(fetch: &Arc<dyn Fetch>) -> Result<Vec<Self>> {
        let listing = get_version_listing(fetch.as_ref()).await?;
        Ok(listing
            .versions
            .into_iter()
            .map(|raw| Self::from_raw(raw, Arc::clone(fetch)))
            .collect())
    }

    pub async fn all_ids(fetch: &Arc<dyn Fetch>) -> Result<Vec<String>> {
        let listing = get_version_listing(fetch.as_ref()).await?;
        Ok(listing.versions.into_iter().map(|raw| raw.id).collect())
    }

    /// The first version matching `predicate`.
    pub async fn find<P>(fetch: &Arc<dyn Fetch>, predicate: P) -> Result<Option<Self>>
    where
        P: Fn(&RawVersion) -> bool,
    {
        let listing = get_version_listing(fetch.as_ref()).await?;
        Ok(Self::find_in(listing, predicate, fetch))
    }

    pub async fn by_id(fetch: &Arc<dyn Fetch>, id: &str) -> Result<Option<Self>> {
        Self::find(fetch, |raw| raw.id == id).await
    }

    /// The newest version of `version_type`.
    ///
    /// Releases and snapshots use the listing's `latest` ids; other types
    /// take the first listed version of that type.
    pub async fn latest(fetch: &Arc<dyn Fetch>, version_type: VersionType) -> Result<Option<Self>> {
        let listing = get_version_listing(fetch.as_ref()).await?;
        match listing.latest_id(version_type).map(str::to_string) {
            Some(id) => Ok(Self::find_in(listing, |raw| raw.id == id, fetch)),
            None => Ok(Self::find_in(
                listing,
                |raw| raw.version_type == version_type,
                fetch,
            )),
        }
    }

    fn find_in<P>(listing: VersionListing, predicate: P, fetch: &Arc<dyn Fetch>) -> Option<Self>
    where
        P: Fn(&RawVersion) -> bool,
    {
        listing
            .versions
            .into_iter()
            .find(|raw| predicate(raw))
            .map(|raw| Self::from_raw(raw, Arc::clone(fetch)))
    }
}

impl fmt::Debug for MinecraftVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinecraftVersion")
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|source| VersionsError::Timestamp {
            value: value.to_string(),
            source,
        })
}
