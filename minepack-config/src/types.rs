//! The config document and its compiled defaults.

use crate::program::{ProgramInfo, UpdateMetadata};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default cache directory, relative to the config directory.
pub const DEFAULT_CACHE_DIRECTORY: &str = "cache";

/// Default instance directory, relative to the config directory.
pub const DEFAULT_INSTANCE_DIRECTORY: &str = "instance";

/// User-settable configuration. Every field is optional, so this type also
/// serves as the patch passed to `ConfigFile::update_config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinepackConfig {
    /// When false the cache directory is never created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_cache: Option<bool>,

    /// Cache location. Relative paths resolve against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_directory: Option<String>,

    /// Instance location. Relative paths resolve against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_directory: Option<String>,
}

impl MinepackConfig {
    pub fn with_enable_cache(mut self, enable: bool) -> Self {
        self.enable_cache = Some(enable);
        self
    }

    pub fn with_cache_directory(mut self, directory: impl Into<String>) -> Self {
        self.cache_directory = Some(directory.into());
        self
    }

    pub fn with_instance_directory(mut self, directory: impl Into<String>) -> Self {
        self.instance_directory = Some(directory.into());
        self
    }
}

/// A config document as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinepackConfigWithMetadata {
    #[serde(flatten)]
    pub config: MinepackConfig,
    pub last_update_by: UpdateMetadata,
}

impl MinepackConfigWithMetadata {
    /// The compiled defaults, attributed to `program` with no date.
    pub fn defaults(program: &ProgramInfo) -> Self {
        Self {
            config: MinepackConfig {
                enable_cache: Some(true),
                cache_directory: Some(DEFAULT_CACHE_DIRECTORY.to_string()),
                instance_directory: Some(DEFAULT_INSTANCE_DIRECTORY.to_string()),
            },
            last_update_by: UpdateMetadata::unstamped(program),
        }
    }

    pub fn cache_enabled(&self) -> bool {
        self.config.enable_cache.unwrap_or(true)
    }

    pub fn cache_directory(&self) -> &str {
        self.config
            .cache_directory
            .as_deref()
            .unwrap_or(DEFAULT_CACHE_DIRECTORY)
    }

    pub fn instance_directory(&self) -> &str {
        self.config
            .instance_directory
            .as_deref()
            .unwrap_or(DEFAULT_INSTANCE_DIRECTORY)
    }
}

/// The defaults as a JSON object, for key-by-key merging.
pub(crate) fn defaults_value(program: &ProgramInfo) -> Value {
    json!({
        "enableCache": true,
        "cacheDirectory": DEFAULT_CACHE_DIRECTORY,
        "instanceDirectory": DEFAULT_INSTANCE_DIRECTORY,
        "lastUpdateBy": {
            "name": program.name,
            "version": program.version,
            "date": null,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_json_defaults() {
        let program = ProgramInfo::new("minepack", "0.1.0");
        let typed = MinepackConfigWithMetadata::defaults(&program);

        assert_eq!(serde_json::to_value(&typed).unwrap(), defaults_value(&program));
        assert!(typed.cache_enabled());
        assert_eq!(typed.cache_directory(), "cache");
        assert_eq!(typed.instance_directory(), "instance");
    }

    #[test]
    fn test_patch_omits_unset_fields() {
        let patch = MinepackConfig::default().with_enable_cache(false);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "enableCache": false })
        );
    }

    #[test]
    fn test_document_uses_camel_case() {
        let document: MinepackConfigWithMetadata = serde_json::from_value(json!({
            "cacheDirectory": "/var/cache/minepack",
            "lastUpdateBy": { "name": "minepack", "version": "0.1.0", "date": null },
        }))
        .unwrap();

        assert_eq!(
            document.config.cache_directory.as_deref(),
            Some("/var/cache/minepack")
        );
        assert_eq!(document.config.enable_cache, None);
        assert!(document.cache_enabled());
        assert_eq!(document.last_update_by.date, None);
    }
}
