//! Configuration file support for bodylog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bodylog/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub units: UnitsConfig,

    #[serde(default)]
    pub trend: TrendConfig,
}

/// Location of the measurement log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

/// Unit normalization policy
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UnitsConfig {
    /// Reject samples with unrecognized unit tokens instead of warning
    #[serde(default)]
    pub strict: bool,
}

/// Trend line parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_fit_extension_days")]
    pub fit_extension_days: i32,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            fit_extension_days: default_fit_extension_days(),
        }
    }
}

/// Longest fit line projection accepted from the config, about a century
pub const MAX_FIT_EXTENSION_DAYS: i32 = 36_500;

// Default value functions
fn default_log_path() -> PathBuf {
    PathBuf::from("data.yaml")
}

fn default_fit_extension_days() -> i32 {
    100
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".config"))
        });
        base.join("bodylog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let days = self.trend.fit_extension_days;
        if !(0..=MAX_FIT_EXTENSION_DAYS).contains(&days) {
            return Err(Error::Config(format!(
                "trend.fit_extension_days must be between 0 and {} (got {})",
                MAX_FIT_EXTENSION_DAYS, days
            )));
        }
        Ok(())
    }
}
