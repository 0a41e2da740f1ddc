//! Configuration and settings management for PixelPong
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Connection settings (service URL, request timeout)
//! - Polling settings (cadence, validation sampling)
//! - Render settings (visual budget, cell clamps, grid overlay, output file)

use crate::error::{SettingsError, SettingsResult};
use pixelpong_core::{SamplingPolicy, DEFAULT_EXHAUSTIVE_LIMIT, DEFAULT_SAMPLE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Base URL of the grid service API
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ConnectionSettings {
    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Polling and validation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    /// Delay between ticks in milliseconds
    pub interval_ms: u64,
    /// Grids up to this many cells are validated in full
    pub exhaustive_limit: u64,
    /// Cells examined on larger grids
    pub sample_size: usize,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl PollingSettings {
    /// Tick cadence as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Validation sampling policy
    pub fn sampling_policy(&self) -> SamplingPolicy {
        SamplingPolicy {
            exhaustive_limit: self.exhaustive_limit,
            sample_size: self.sample_size,
        }
    }
}

/// Canvas rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Target extent of the longer canvas axis in pixels
    pub budget: u32,
    /// Smallest cell edge in pixels
    pub min_cell_size: u32,
    /// Largest cell edge in pixels
    pub max_cell_size: u32,
    /// Draw the faint reference grid
    pub grid_overlay: bool,
    /// Where the finished canvas is written
    pub output_path: PathBuf,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            budget: 600,
            min_cell_size: 2,
            max_cell_size: 10,
            grid_overlay: true,
            output_path: PathBuf::from("pixelpong.png"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionSettings,
    /// Polling settings
    pub polling: PollingSettings,
    /// Render settings
    pub render: RenderSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location, `<config_dir>/pixelpong/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("pixelpong").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.connection.base_url.trim().is_empty() {
            return Err(SettingsError::invalid("connection.base_url", "must not be empty"));
        }
        if self.connection.request_timeout_ms == 0 {
            return Err(SettingsError::invalid(
                "connection.request_timeout_ms",
                "must be > 0",
            ));
        }

        if self.polling.interval_ms == 0 {
            return Err(SettingsError::invalid("polling.interval_ms", "must be > 0"));
        }
        if self.polling.sample_size == 0 {
            return Err(SettingsError::invalid("polling.sample_size", "must be > 0"));
        }

        if self.render.budget == 0 {
            return Err(SettingsError::invalid("render.budget", "must be > 0"));
        }
        if self.render.min_cell_size == 0 {
            return Err(SettingsError::invalid("render.min_cell_size", "must be > 0"));
        }
        if self.render.min_cell_size > self.render.max_cell_size {
            return Err(SettingsError::invalid(
                "render.max_cell_size",
                format!(
                    "must be >= min_cell_size ({})",
                    self.render.min_cell_size
                ),
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.polling.interval(), Duration::from_millis(500));
        assert_eq!(config.polling.sampling_policy(), SamplingPolicy::default());
        assert_eq!(config.render.budget, 600);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let mut config = Config::default();
        config.polling.interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { key, .. }) if key == "polling.interval_ms"
        ));
    }

    #[test]
    fn test_rejects_inverted_cell_clamps() {
        let mut config = Config::default();
        config.render.min_cell_size = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[polling]\ninterval_ms = 250\n").unwrap();
        assert_eq!(config.polling.interval_ms, 250);
        assert_eq!(config.polling.sample_size, DEFAULT_SAMPLE_SIZE);
        assert_eq!(config.connection, ConnectionSettings::default());
    }
}
