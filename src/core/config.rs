//! Application configuration management

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the stored content (defaults to the platform data dir)
    pub storage_dir: Option<PathBuf>,
    /// Recently written export files, newest first
    pub recent_exports: Vec<PathBuf>,
    /// UI settings
    pub ui: UiConfig,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Dark theme instead of the default black-on-white
    pub dark_mode: bool,
    /// Default width of the admin window
    pub admin_width: f32,
    /// Edge length of image thumbnails
    pub thumbnail_size: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            admin_width: 720.0,
            thumbnail_size: 160.0,
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "folio", "Folio")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Remember an export location
    pub fn add_recent_export(&mut self, path: PathBuf) {
        self.recent_exports.retain(|p| p != &path);
        self.recent_exports.insert(0, path);
        self.recent_exports.truncate(10);
    }

    /// Directory for the content store
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().join("storage"))
                .unwrap_or_else(|| PathBuf::from("storage"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_exports_dedup_and_cap() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_export(PathBuf::from(format!("/tmp/{}.json", i)));
        }
        config.add_recent_export(PathBuf::from("/tmp/5.json"));
        assert_eq!(config.recent_exports.len(), 10);
        assert_eq!(config.recent_exports[0], PathBuf::from("/tmp/5.json"));
        assert_eq!(
            config
                .recent_exports
                .iter()
                .filter(|p| **p == PathBuf::from("/tmp/5.json"))
                .count(),
            1
        );
    }

    #[test]
    fn test_storage_dir_override() {
        let config = AppConfig {
            storage_dir: Some(PathBuf::from("/data/folio")),
            ..Default::default()
        };
        assert_eq!(config.storage_dir(), PathBuf::from("/data/folio"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"ui":{"dark_mode":true}}"#).unwrap();
        assert!(config.ui.dark_mode);
        assert_eq!(config.ui.thumbnail_size, 160.0);
        assert!(config.storage_dir.is_none());
    }
}
