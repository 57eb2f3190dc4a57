use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    pairing::{similarity::DEFAULT_SIMILARITY_THRESHOLD, window::DEFAULT_WINDOW_HOURS},
};

/// Main configuration for video pairing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Matching heuristics
    #[serde(default)]
    pub pairing: PairingConfig,

    /// How paired rows are presented
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.pairing.validate()
    }
}

/// Matching heuristics for the pairing engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Maximum distance between the two posting times (hours)
    pub window_hours: u32,

    /// Maximum duration difference for a duration match (seconds)
    pub max_duration_diff_secs: f64,

    /// Maximum Hamming distance (out of 64 bits) for a thumbnail match
    pub similarity_threshold: u32,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            max_duration_diff_secs: 1.0,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl PairingConfig {
    fn validate(&self) -> Result<()> {
        if self.window_hours == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pairing.window_hours".to_string(),
                value: self.window_hours.to_string()
            }.into());
        }

        if !self.max_duration_diff_secs.is_finite() || self.max_duration_diff_secs < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "pairing.max_duration_diff_secs".to_string(),
                value: self.max_duration_diff_secs.to_string()
            }.into());
        }

        if self.similarity_threshold > 64 {
            return Err(ConfigError::InvalidValue {
                key: "pairing.similarity_threshold".to_string(),
                value: self.similarity_threshold.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Presentation of the paired rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Sort rows by date after pairing (the engine itself keeps input order)
    pub sort_by_date: bool,

    /// Newest rows first when sorting
    pub newest_first: bool,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sort_by_date: false,
            newest_first: true,
            pretty: true,
        }
    }
}
