//! Environment variable tests for the config directory
//!
//! These tests mutate `MINEPACK_HOME` and `HOME`, so they run serially and
//! restore the original values on drop.

use minepack_config::{ConfigDirectory, ConfigRootSource};
use minepack_fs::{FsPath, PathBacked};
use serial_test::serial;
use std::env;
use tempfile::TempDir;

/// Restores the environment variables it touched when dropped.
struct IsolatedEnv {
    temp_dir: TempDir,
    restore: Vec<(String, Option<String>)>,
}

impl IsolatedEnv {
    fn new() -> Self {
        let mut isolated = Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            restore: Vec::new(),
        };
        let home = isolated.temp_dir.path().join("home");
        std::fs::create_dir(&home).expect("Failed to create home dir");
        isolated.set("HOME", home.to_str().expect("temp path is UTF-8"));
        isolated
    }

    fn home(&self) -> FsPath {
        FsPath::from(self.temp_dir.path().join("home"))
    }

    fn set(&mut self, key: &str, value: &str) {
        self.restore.push((key.to_string(), env::var(key).ok()));
        env::set_var(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.restore.push((key.to_string(), env::var(key).ok()));
        env::remove_var(key);
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (key, original) in self.restore.drain(..).rev() {
            match original {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}

#[test]
#[serial]
fn test_minepack_home_overrides_default() {
    let mut isolated = IsolatedEnv::new();
    let custom = isolated.temp_dir.path().join("custom-home");
    isolated.set(
        ConfigDirectory::ENVIRONMENT_VARIABLE,
        custom.to_str().unwrap(),
    );

    let dir = ConfigDirectory::from_env().unwrap();

    assert_eq!(dir.path(), &FsPath::from(custom.as_path()));
    assert_eq!(dir.source(), ConfigRootSource::Environment);
    assert_eq!(
        dir.config_file().fs_path(),
        &FsPath::from(custom.join("config.json"))
    );
}

#[test]
#[serial]
fn test_unset_falls_back_to_home_config() {
    let mut isolated = IsolatedEnv::new();
    isolated.remove(ConfigDirectory::ENVIRONMENT_VARIABLE);

    let dir = ConfigDirectory::from_env().unwrap();

    assert_eq!(dir.path(), &isolated.home().resolve([".config", "minepack"]));
    assert_eq!(dir.source(), ConfigRootSource::Default);
}

#[test]
#[serial]
fn test_empty_value_counts_as_unset() {
    let mut isolated = IsolatedEnv::new();
    isolated.set(ConfigDirectory::ENVIRONMENT_VARIABLE, "");

    let dir = ConfigDirectory::from_env().unwrap();

    assert_eq!(dir.path(), &isolated.home().resolve([".config", "minepack"]));
    assert_eq!(dir.source(), ConfigRootSource::Default);
}

#[tokio::test]
#[serial]
async fn test_environment_is_read_once() {
    let mut isolated = IsolatedEnv::new();
    let first = isolated.temp_dir.path().join("first");
    isolated.set(ConfigDirectory::ENVIRONMENT_VARIABLE, first.to_str().unwrap());

    let dir = ConfigDirectory::from_env().unwrap();
    isolated.set(ConfigDirectory::ENVIRONMENT_VARIABLE, "/somewhere/else");

    assert_eq!(dir.path(), &FsPath::from(first.as_path()));
    dir.config_file()
        .update_config(&Default::default())
        .await
        .unwrap();
    assert!(first.join("config.json").is_file());
}
