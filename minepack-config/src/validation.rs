//! Validation of config documents before they are merged or persisted.
//!
//! Checks run in a fixed order: update metadata and version compatibility,
//! then field types, then inter-field rules. The first violation is returned
//! as a [`ConfigValidationError`]; advisory findings go to the warning sink.

use crate::error::ConfigValidationError;
use crate::program::ProgramInfo;
use crate::version::{Version, VersionDiff};
use crate::warnings::WarningSink;
use minepack_fs::normalize;
use serde_json::{Map, Value};

type Checked = Result<(), ConfigValidationError>;

/// Validate a candidate config document written by `program`'s peers.
pub fn validate_config(
    candidate: &Value,
    program: &ProgramInfo,
    warnings: &dyn WarningSink,
) -> Checked {
    let invalid = |reason: &str| ConfigValidationError::new(candidate, reason);

    let Some(document) = candidate.as_object() else {
        return Err(invalid("Config file must contain a JSON object"));
    };

    match document.get("lastUpdateBy") {
        None | Some(Value::Null) => {
            warnings.warn("Config file does not have any update metadata");
        }
        Some(metadata) => check_update_metadata(candidate, metadata, program, warnings)?,
    }

    check_field_types(candidate, document)?;

    let cache_directory = document.get("cacheDirectory").and_then(Value::as_str);
    let instance_directory = document.get("instanceDirectory").and_then(Value::as_str);
    if let (Some(cache), Some(instance)) = (cache_directory, instance_directory) {
        if normalize(cache) == normalize(instance) {
            return Err(invalid(
                "cacheDirectory and instanceDirectory must not resolve to the same path",
            ));
        }
    }

    if document.get("enableCache") == Some(&Value::Bool(false)) && cache_directory.is_some() {
        warnings.warn("enableCache is false, but cacheDirectory is set");
    }

    Ok(())
}

fn check_update_metadata(
    candidate: &Value,
    metadata: &Value,
    program: &ProgramInfo,
    warnings: &dyn WarningSink,
) -> Checked {
    let invalid = |reason: String| ConfigValidationError::new(candidate, reason);

    let metadata = metadata
        .as_object()
        .ok_or_else(|| invalid("lastUpdateBy must be an object".to_string()))?;
    let name = metadata
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("lastUpdateBy.name must be a string".to_string()))?;
    let version = metadata
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("lastUpdateBy.version must be a string".to_string()))?;
    if !matches!(metadata.get("date"), None | Some(Value::Null) | Some(Value::String(_))) {
        return Err(invalid("lastUpdateBy.date must be a string or null".to_string()));
    }

    if name != program.name {
        warnings.warn(&format!(
            "Config file was last updated by something other than Minepack ({}@{})",
            name, version
        ));
        return Ok(());
    }

    let theirs = Version::parse(version)
        .map_err(|e| invalid(format!("lastUpdateBy.version is not a valid version: {}", e)))?;
    let ours = Version::parse(&program.version)
        .map_err(|e| invalid(format!("program version is not a valid version: {}", e)))?;

    let Some(diff) = ours.diff(&theirs) else {
        return Ok(());
    };

    if diff == VersionDiff::Major {
        return Err(invalid(format!(
            "Config file was last updated by {}, which is incompatible with {}",
            version, program.version
        )));
    }
    if diff == VersionDiff::Minor {
        warnings.warn(&format!(
            "Config file was last updated by v{}, which might not be compatible with v{}",
            theirs, ours
        ));
    }
    let direction = if theirs > ours { '>' } else { '<' };
    warnings.warn(&format!(
        "Config file was last updated by a different version of Minepack (v{} {} v{})",
        theirs, direction, ours
    ));

    Ok(())
}

fn check_field_types(candidate: &Value, document: &Map<String, Value>) -> Checked {
    let checks: [(&str, fn(&Value) -> bool, &str); 3] = [
        ("enableCache", Value::is_boolean, "enableCache must be a boolean"),
        ("cacheDirectory", Value::is_string, "cacheDirectory must be a string"),
        ("instanceDirectory", Value::is_string, "instanceDirectory must be a string"),
    ];

    for (key, has_type, reason) in checks {
        // Present-but-null is a violation; only absence is allowed.
        if let Some(value) = document.get(key) {
            if !has_type(value) {
                return Err(ConfigValidationError::new(candidate, reason));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::CollectedWarnings;
    use serde_json::json;

    fn program() -> ProgramInfo {
        ProgramInfo::new("minepack", "0.1.0")
    }

    fn last_update_by() -> Value {
        json!({ "name": "minepack", "version": "0.1.0", "date": null })
    }

    fn validate(candidate: Value) -> (Checked, Vec<String>) {
        let warnings = CollectedWarnings::new();
        let result = validate_config(&candidate, &program(), &warnings);
        (result, warnings.messages())
    }

    fn reason(result: Checked) -> String {
        result.unwrap_err().reason
    }

    #[test]
    fn test_valid_config() {
        let (result, warnings) = validate(json!({
            "enableCache": true,
            "cacheDirectory": "my-cache",
            "instanceDirectory": "my-instance",
            "lastUpdateBy": last_update_by(),
        }));

        assert!(result.is_ok());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_type_violations() {
        let cases = [
            (json!({ "enableCache": "yes" }), "enableCache must be a boolean"),
            (json!({ "cacheDirectory": 3 }), "cacheDirectory must be a string"),
            (json!({ "instanceDirectory": 3 }), "instanceDirectory must be a string"),
            (json!({ "instanceDirectory": null }), "instanceDirectory must be a string"),
        ];

        for (mut candidate, expected) in cases {
            candidate["lastUpdateBy"] = last_update_by();
            let (result, warnings) = validate(candidate);
            assert_eq!(reason(result), expected);
            assert!(warnings.is_empty());
        }
    }

    #[test]
    fn test_aliased_directories_rejected() {
        let candidate = json!({
            "cacheDirectory": "same",
            "instanceDirectory": "./up/two/../../same",
            "lastUpdateBy": last_update_by(),
        });
        let (result, warnings) = validate(candidate.clone());

        let err = result.unwrap_err();
        assert_eq!(
            err.reason,
            "cacheDirectory and instanceDirectory must not resolve to the same path"
        );
        assert_eq!(err.config, candidate);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_major_version_rejected_without_warnings() {
        let (result, warnings) = validate(json!({
            "lastUpdateBy": { "name": "minepack", "version": "4.2.0", "date": null },
        }));

        assert_eq!(
            reason(result),
            "Config file was last updated by 4.2.0, which is incompatible with 0.1.0"
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_other_program_warns_and_skips_version_check() {
        let (result, warnings) = validate(json!({
            "lastUpdateBy": { "name": "another-package", "version": "4.2.0", "date": null },
        }));

        assert!(result.is_ok());
        assert_eq!(
            warnings,
            vec!["Config file was last updated by something other than Minepack (another-package@4.2.0)"]
        );
    }

    #[test]
    fn test_minor_version_warns_with_both_versions() {
        let (result, warnings) = validate(json!({
            "lastUpdateBy": { "name": "minepack", "version": "0.2.0", "date": null },
        }));

        assert!(result.is_ok());
        assert_eq!(
            warnings,
            vec![
                "Config file was last updated by v0.2.0, which might not be compatible with v0.1.0",
                "Config file was last updated by a different version of Minepack (v0.2.0 > v0.1.0)",
            ]
        );
    }

    #[test]
    fn test_older_patch_version_warns_once() {
        let warnings = CollectedWarnings::new();
        let candidate = json!({
            "lastUpdateBy": { "name": "minepack", "version": "v1.4.2", "date": null },
        });

        validate_config(&candidate, &ProgramInfo::new("minepack", "1.4.5"), &warnings).unwrap();

        assert_eq!(
            warnings.messages(),
            vec!["Config file was last updated by a different version of Minepack (v1.4.2 < v1.4.5)"]
        );
    }

    #[test]
    fn test_cache_disabled_with_directory_warns() {
        let (result, warnings) = validate(json!({
            "enableCache": false,
            "cacheDirectory": "cache",
            "lastUpdateBy": last_update_by(),
        }));

        assert!(result.is_ok());
        assert_eq!(warnings, vec!["enableCache is false, but cacheDirectory is set"]);
    }

    #[test]
    fn test_missing_metadata_warns() {
        let (result, warnings) = validate(json!({ "enableCache": true }));

        assert!(result.is_ok());
        assert_eq!(warnings, vec!["Config file does not have any update metadata"]);
    }

    #[test]
    fn test_null_metadata_warns() {
        let (result, warnings) = validate(json!({ "enableCache": true, "lastUpdateBy": null }));

        assert!(result.is_ok());
        assert_eq!(warnings, vec!["Config file does not have any update metadata"]);
    }

    #[test]
    fn test_malformed_metadata_rejected() {
        let cases = [
            (json!({ "lastUpdateBy": "minepack" }), "lastUpdateBy must be an object"),
            (
                json!({ "lastUpdateBy": { "name": 1, "version": "0.1.0" } }),
                "lastUpdateBy.name must be a string",
            ),
            (
                json!({ "lastUpdateBy": { "name": "minepack" } }),
                "lastUpdateBy.version must be a string",
            ),
            (
                json!({ "lastUpdateBy": { "name": "minepack", "version": "0.1.0", "date": 5 } }),
                "lastUpdateBy.date must be a string or null",
            ),
        ];

        for (candidate, expected) in cases {
            assert_eq!(reason(validate(candidate).0), expected);
        }

        let (result, _) = validate(json!({
            "lastUpdateBy": { "name": "minepack", "version": "latest", "date": null },
        }));
        assert!(reason(result).starts_with("lastUpdateBy.version is not a valid version"));
    }

    #[test]
    fn test_non_object_rejected() {
        let (result, _) = validate(json!([1, 2, 3]));
        assert_eq!(reason(result), "Config file must contain a JSON object");
    }
}
