//! # Composition configuration
//!
//! Limits shared by the timeline and lineup models. The defaults match the
//! session planner screen: new entries start at 30 minutes and the duration input
//! accepts 1-240.
//!
//! ```rust
//! use coach_core::config::CompositionConfig;
//!
//! let config = CompositionConfig::default();
//! let youth = CompositionConfig::youth();
//! assert!(youth.max_duration_minutes < config.max_duration_minutes);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};
use thiserror::Error;

/// Environment variable naming a JSON config file read by [`CompositionConfig::from_env`].
pub const CONFIG_PATH_ENV: &str = "COACH_CORE_CONFIG_PATH";

/// Largest accepted `max_duration_minutes`: one block can not exceed a day.
pub const MAX_DURATION_LIMIT: u32 = 24 * 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Duration given to a bundle dropped onto the timeline
    pub default_duration_minutes: u32,
    /// Upper bound accepted by `set_duration`
    pub max_duration_minutes: u32,
    /// Bench capacity, `None` for unlimited
    pub max_bench_size: Option<usize>,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self { default_duration_minutes: 30, max_duration_minutes: 240, max_bench_size: None }
    }
}

impl CompositionConfig {
    /// Senior squad settings (same as default)
    pub fn standard() -> Self {
        Self::default()
    }

    /// Youth squads: shorter blocks, capped match-day bench
    pub fn youth() -> Self {
        Self { default_duration_minutes: 20, max_duration_minutes: 90, max_bench_size: Some(7) }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_duration_minutes == 0 {
            return Err(ConfigError::Invalid(
                "default_duration_minutes must be positive".to_string(),
            ));
        }
        if self.max_duration_minutes < self.default_duration_minutes {
            return Err(ConfigError::Invalid(format!(
                "max_duration_minutes ({}) is below default_duration_minutes ({})",
                self.max_duration_minutes, self.default_duration_minutes
            )));
        }
        if self.max_duration_minutes > MAX_DURATION_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_duration_minutes ({}) exceeds {}",
                self.max_duration_minutes, MAX_DURATION_LIMIT
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON document. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&content)
    }

    /// Reads the file named by `COACH_CORE_CONFIG_PATH`, or returns the defaults
    /// when the variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let config = Self::load_from_path(Path::new(path))?;
        log::info!("Loaded composition config from {CONFIG_PATH_ENV}='{path}'");
        Ok(config)
    }

    /// Clamps an arbitrary duration into `[1, max_duration_minutes]`.
    pub(crate) fn clamp_duration(&self, minutes: u32) -> u32 {
        minutes.clamp(1, self.max_duration_minutes.max(1))
    }
}
