use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory scanned for media files
    pub media_root: PathBuf,
    /// Path of the persisted work store
    pub store_path: PathBuf,
    /// Number of concurrent conversion workers
    pub workers: usize,
    /// Maximum files converted per run
    pub batch_size: usize,
    /// Extension allow-list, leading dot included
    pub extensions: Vec<String>,
    /// Seconds a worker waits on an empty queue before exiting
    pub idle_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("."),
            store_path: default_store_path(),
            workers: 8,
            batch_size: 25,
            extensions: vec![".mp4".to_string(), ".avi".to_string(), ".mkv".to_string()],
            idle_timeout_secs: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file, or create default if not found
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if config_path.exists() {
            match Self::load_from_file(&config_path) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config: {}. Using defaults.", e);
                }
            }
        }

        let config = Self::default();
        // Save default config for future editing
        if let Err(e) = config.save() {
            warn!("Failed to save default config: {}", e);
        }
        config
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to the TOML file
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, toml_string)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("transcodeq")
            .join("config.toml")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.workers == 0 {
            return Err(AppError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(AppError::Config(
                "batch size must be at least 1".to_string(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(AppError::Config(
                "extension allow-list must not be empty".to_string(),
            ));
        }
        if let Some(ext) = self.extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(AppError::Config(format!(
                "extension {:?} must include the leading dot",
                ext
            )));
        }
        Ok(())
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("transcodeq")
        .join("state.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_run_parameters() {
        let config = AppConfig::default();
        assert_eq!(config.workers, 8);
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.extensions, vec![".mp4", ".avi", ".mkv"]);
        assert_eq!(config.idle_timeout_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "workers = 2\nbatch_size = 5\n").unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();

        assert_eq!(config.workers, 2);
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.extensions, vec![".mp4", ".avi", ".mkv"]);
    }

    #[test]
    fn unreadable_config_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "workers = \"many\"").unwrap();

        assert!(matches!(
            AppConfig::load_from_file(&path),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn validation_rejects_degenerate_values() {
        let zero_workers = AppConfig {
            workers: 0,
            ..AppConfig::default()
        };
        assert!(zero_workers.validate().is_err());

        let zero_batch = AppConfig {
            batch_size: 0,
            ..AppConfig::default()
        };
        assert!(zero_batch.validate().is_err());

        let no_extensions = AppConfig {
            extensions: Vec::new(),
            ..AppConfig::default()
        };
        assert!(no_extensions.validate().is_err());

        let dotless = AppConfig {
            extensions: vec!["mp4".to_string()],
            ..AppConfig::default()
        };
        assert!(dotless.validate().is_err());
    }
}
