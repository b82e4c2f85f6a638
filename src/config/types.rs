//! Configuration type definitions

use crate::gesture::GestureSourceType;
use crate::target::{
    TargetCalibration, DEFAULT_MIN_SCALING_SPAN_DIPS, DEFAULT_POINTER_ASSUMED_STOPPED_TIME,
    DEFAULT_TOUCH_SLOP_DIPS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Calibration of the emulated device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Touch slop in DIPs
    #[serde(default = "default_touch_slop_dips")]
    pub touch_slop_dips: f64,

    /// Minimum span between two touches recognised as a pinch (DIPs)
    #[serde(default = "default_min_scaling_span_dips")]
    pub min_scaling_span_dips: f64,

    /// Milliseconds a motionless pointer needs to count as stopped
    #[serde(default = "default_pointer_assumed_stopped_time_ms")]
    pub pointer_assumed_stopped_time_ms: u64,

    /// Source used for gestures that ask for "default" ("touch", "mouse")
    #[serde(default = "default_source_type")]
    pub default_source: GestureSourceType,
}

fn default_touch_slop_dips() -> f64 {
    DEFAULT_TOUCH_SLOP_DIPS
}

fn default_min_scaling_span_dips() -> f64 {
    DEFAULT_MIN_SCALING_SPAN_DIPS
}

fn default_pointer_assumed_stopped_time_ms() -> u64 {
    DEFAULT_POINTER_ASSUMED_STOPPED_TIME.as_millis() as u64
}

fn default_source_type() -> GestureSourceType {
    GestureSourceType::Touch
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            touch_slop_dips: default_touch_slop_dips(),
            min_scaling_span_dips: default_min_scaling_span_dips(),
            pointer_assumed_stopped_time_ms: default_pointer_assumed_stopped_time_ms(),
            default_source: default_source_type(),
        }
    }
}

impl TargetConfig {
    /// Calibration for a [`crate::target::RecordingTarget`]
    pub fn calibration(&self) -> TargetCalibration {
        TargetCalibration {
            touch_slop_dips: self.touch_slop_dips,
            min_scaling_span_dips: self.min_scaling_span_dips,
            pointer_assumed_stopped_time: Duration::from_millis(
                self.pointer_assumed_stopped_time_ms,
            ),
            default_source_type: self.default_source,
        }
    }
}

/// Flush cycle pacing for replay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Virtual time between flushes in milliseconds (16 ≈ 60Hz)
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,

    /// Give up after this much virtual time in milliseconds
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,

    /// Flush cycles between a flush request and its acknowledgment
    /// Default: 0 (acknowledged in the same cycle)
    #[serde(default)]
    pub ack_latency_frames: u32,
}

fn default_flush_interval_ms() -> u64 {
    16
}

fn default_max_duration_ms() -> u64 {
    60_000
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            flush_interval_ms: default_flush_interval_ms(),
            max_duration_ms: default_max_duration_ms(),
            ack_latency_frames: 0,
        }
    }
}

/// Values filled in for gesture fields a script leaves out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureDefaults {
    /// Scroll speed (px/s)
    #[serde(default = "default_scroll_speed_px_s")]
    pub scroll_speed_px_s: f64,

    /// Hold the pointer still before releasing a scroll
    #[serde(default = "default_prevent_fling")]
    pub prevent_fling: bool,

    /// Relative speed of the pinch contacts (px/s)
    #[serde(default = "default_pinch_speed_px_s")]
    pub pinch_speed_px_s: f64,

    /// Tap hold time in milliseconds
    #[serde(default = "default_tap_duration_ms")]
    pub tap_duration_ms: u64,
}

fn default_scroll_speed_px_s() -> f64 {
    800.0
}

fn default_prevent_fling() -> bool {
    true
}

fn default_pinch_speed_px_s() -> f64 {
    500.0
}

fn default_tap_duration_ms() -> u64 {
    50
}

impl Default for GestureDefaults {
    fn default() -> Self {
        Self {
            scroll_speed_px_s: default_scroll_speed_px_s(),
            prevent_fling: default_prevent_fling(),
            pinch_speed_px_s: default_pinch_speed_px_s(),
            tap_duration_ms: default_tap_duration_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files (None = console only)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}
