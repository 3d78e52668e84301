//! The launcher's list of available versions (`version_manifest.json`).
//!
//! A version missing from this list is not available in the launcher. The
//! list changes every time a new Java Edition version is published.

use crate::error::Result;
use crate::fetch::{fetch_typed, Fetch};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote URL of the version listing.
pub const VERSION_LISTING_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    Snapshot,
    #[default]
    Release,
    OldAlpha,
    OldBeta,
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Snapshot => "snapshot",
            Self::Release => "release",
            Self::OldAlpha => "old_alpha",
            Self::OldBeta => "old_beta",
        };
        f.write_str(name)
    }
}

/// Ids of the newest release and snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

/// One entry of the version listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVersion {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: VersionType,
    /// Link to this version's `<id>.json` manifest
    pub url: String,
    /// When the version's files were last updated, RFC 3339
    pub time: String,
    /// When the version was released, RFC 3339
    pub release_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionListing {
    pub latest: LatestVersions,
    pub versions: Vec<RawVersion>,
}

impl VersionListing {
    /// The id the listing advertises as latest for `version_type`, if it
    /// tracks one.
    pub fn latest_id(&self, version_type: VersionType) -> Option<&str> {
        match version_type {
            VersionType::Release => Some(&self.latest.release),
            VersionType::Snapshot => Some(&self.latest.snapshot),
            VersionType::OldAlpha | VersionType::OldBeta => None,
        }
    }
}

/// Fetch the list of all available versions.
pub async fn get_version_listing(fetch: &dyn Fetch) -> Result<VersionListing> {
    fetch_typed(fetch, VERSION_LISTING_URL).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_listing() {
        let listing: VersionListing = serde_json::from_value(json!({
            "latest": { "release": "1.16.1", "snapshot": "20w29a" },
            "versions": [{
                "id": "b1.7.3",
                "type": "old_beta",
                "url": "https://launchermeta.mojang.com/v1/packages/b1.7.3.json",
                "time": "2019-03-04T15:56:10+00:00",
                "releaseTime": "2011-07-07T22:00:00+00:00"
            }]
        }))
        .unwrap();

        assert_eq!(listing.versions[0].version_type, VersionType::OldBeta);
        assert_eq!(listing.versions[0].release_time, "2011-07-07T22:00:00+00:00");
        assert_eq!(listing.latest_id(VersionType::Snapshot), Some("20w29a"));
        assert_eq!(listing.latest_id(VersionType::OldAlpha), None);
    }

    #[test]
    fn test_version_type_display_matches_wire_name() {
        for version_type in [
            VersionType::Snapshot,
            VersionType::Release,
            VersionType::OldAlpha,
            VersionType::OldBeta,
        ] {
            assert_eq!(
                serde_json::to_value(version_type).unwrap(),
                json!(version_type.to_string())
            );
        }
    }
}
