//! Configuration management
//!
//! Loads and validates the replay configuration from a TOML file. Every
//! section and field is optional; anything left out takes its default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod types;

pub use types::{GestureDefaults, LoggingConfig, PacingConfig, TargetConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Emulated device calibration
    #[serde(default)]
    pub target: TargetConfig,
    /// Flush pacing
    #[serde(default)]
    pub pacing: PacingConfig,
    /// Gesture defaults for scripts
    #[serde(default)]
    pub defaults: GestureDefaults,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let target = &self.target;
        if !(target.touch_slop_dips.is_finite() && target.touch_slop_dips >= 0.0) {
            anyhow::bail!("Invalid touch slop: {}", target.touch_slop_dips);
        }
        if !(target.min_scaling_span_dips.is_finite() && target.min_scaling_span_dips > 0.0) {
            anyhow::bail!(
                "Invalid minimum scaling span: {}",
                target.min_scaling_span_dips
            );
        }
        if target.default_source == crate::gesture::GestureSourceType::Default {
            anyhow::bail!("target.default_source must be \"touch\" or \"mouse\"");
        }

        if self.pacing.flush_interval_ms == 0 {
            anyhow::bail!("pacing.flush_interval_ms must be greater than 0");
        }
        if self.pacing.max_duration_ms < self.pacing.flush_interval_ms {
            anyhow::bail!(
                "pacing.max_duration_ms ({}) cannot be less than flush_interval_ms ({})",
                self.pacing.max_duration_ms,
                self.pacing.flush_interval_ms
            );
        }

        let defaults = &self.defaults;
        if !(defaults.scroll_speed_px_s.is_finite() && defaults.scroll_speed_px_s > 0.0) {
            anyhow::bail!("Invalid default scroll speed: {}", defaults.scroll_speed_px_s);
        }
        if !(defaults.pinch_speed_px_s.is_finite() && defaults.pinch_speed_px_s > 0.0) {
            anyhow::bail!("Invalid default pinch speed: {}", defaults.pinch_speed_px_s);
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        Ok(())
    }
}
