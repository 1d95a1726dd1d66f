//! # Configuration
//!
//! Defaults for the display controls and the layout cache, optionally read from a
//! JSON file. Command-line flags take precedence over anything loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{GroupBy, TimeScale};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Initial time scale
    pub scale: TimeScale,
    /// Initial lane grouping
    pub group_by: GroupBy,
    /// Number of layouts kept by the memoization cache
    pub cache_capacity: usize,
    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            scale: TimeScale::default(),
            group_by: GroupBy::default(),
            cache_capacity: 16,
            log_filter: "info".to_string(),
        }
    }
}

impl TimelineConfig {
    /// `<config dir>/commit-timeline/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("commit-timeline").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load from `path` if given, else from the default location if a file exists
    /// there, else fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "scale": "week", "cache_capacity": 4 }"#).unwrap();

        let config = TimelineConfig::load(Some(&path)).unwrap();
        assert_eq!(
            config,
            TimelineConfig {
                scale: TimeScale::Week,
                cache_capacity: 4,
                ..TimelineConfig::default()
            }
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(TimelineConfig::load(Some(&temp_dir.path().join("absent.json"))).is_err());
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "group_by": "branch" }"#).unwrap();
        assert!(TimelineConfig::from_file(&path).is_err());
    }
}
