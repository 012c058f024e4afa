use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORE_DIRNAME: &str = "droplets";

/// Configuration for droplets, stored in `<home>/config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DropletsConfig {
    /// Where the file runner keeps droplets (defaults to `<home>/droplets`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,

    /// Where packaged archives are created (defaults to the OS temp dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
}

impl DropletsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Store root, resolving relative paths against `home`
    pub fn store_dir(&self, home: &Path) -> PathBuf {
        match &self.store_dir {
            Some(dir) => home.join(dir),
            None => home.join(DEFAULT_STORE_DIRNAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = DropletsConfig::load(dir.path()).unwrap();
        assert_eq!(config, DropletsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");

        let config = DropletsConfig {
            store_dir: Some(PathBuf::from("/srv/droplets")),
            temp_dir: Some(PathBuf::from("/var/tmp")),
        };
        config.save(&home).unwrap();

        assert_eq!(DropletsConfig::load(&home).unwrap(), config);
    }

    #[test]
    fn test_store_dir_defaults_under_home() {
        let config = DropletsConfig::default();
        assert_eq!(
            config.store_dir(Path::new("/home/me/.droplets")),
            PathBuf::from("/home/me/.droplets/droplets")
        );
    }

    #[test]
    fn test_relative_store_dir_resolves_against_home() {
        let config = DropletsConfig {
            store_dir: Some(PathBuf::from("blobs")),
            temp_dir: None,
        };
        assert_eq!(
            config.store_dir(Path::new("/h")),
            PathBuf::from("/h/blobs")
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{not json").unwrap();
        assert!(DropletsConfig::load(dir.path()).is_err());
    }
}
