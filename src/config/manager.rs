//! Configuration manager for loading and saving session configuration
//!
//! This module provides functionality to load and save configuration as
//! JSON with atomic writes to prevent corruption. The caller supplies the
//! path; the library does not assume a platform-specific location.

use crate::config::models::SlideshowConfig;
use crate::error::Result;
use std::path::Path;
use tracing::{info, warn};

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist or is corrupt, returns the
    /// default configuration.
    pub fn load(path: &Path) -> Result<SlideshowConfig> {
        if !path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(SlideshowConfig::default());
        }

        let json = std::fs::read_to_string(path)?;

        match serde_json::from_str(&json) {
            Ok(config) => {
                info!("Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(SlideshowConfig::default())
            }
        }
    }

    /// Save configuration to disk with an atomic write
    ///
    /// Serializes to a temporary file in the target directory, then
    /// persists it over the destination so readers never observe a
    /// partially written file.
    pub fn save(config: &SlideshowConfig, path: &Path) -> Result<()> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = dir {
            std::fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(config)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
        std::io::Write::write_all(&mut tmp, json.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;

        info!("Configuration saved successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::TimingConfig;

    #[test]
    fn test_load_missing_config_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigManager::load(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn test_load_corrupt_config_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = ConfigManager::load(&path).unwrap();
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = SlideshowConfig {
            timing: TimingConfig {
                period_ms: 3000,
                startup_leeway_ms: 500,
            },
        };
        ConfigManager::save(&config, &path).unwrap();

        let loaded = ConfigManager::load(&path).unwrap();
        assert_eq!(loaded.timing, config.timing);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        ConfigManager::save(&SlideshowConfig::default(), &path).unwrap();
        assert!(path.exists());
    }
}
