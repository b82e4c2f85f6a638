//! Gesture Scripts
//!
//! A script is a TOML file listing gestures in the order they are queued:
//!
//! ```toml
//! [[gesture]]
//! type = "smooth_scroll"
//! source = "touch"
//! anchor = [200.0, 400.0]
//! distances = [[0.0, 300.0], [0.0, -100.0]]
//!
//! [[gesture]]
//! type = "pinch"
//! anchor = [200.0, 400.0]
//! scale_factor = 2.0
//!
//! [[gesture]]
//! type = "tap"
//! source = "mouse"
//! position = [50.0, 60.0]
//! duration_ms = 120
//! ```
//!
//! Speeds, durations and fling prevention fall back to
//! [`GestureDefaults`] when omitted.

use crate::config::GestureDefaults;
use crate::gesture::{
    GestureError, GestureParams, GestureSourceType, PinchParams, SmoothScrollParams, TapParams,
};
use kurbo::{Point, Vec2};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading or interpreting a gesture script
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read
    #[error("failed to read gesture script {path}: {source}")]
    Read {
        /// Script path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The script is not valid TOML or has unknown fields
    #[error("failed to parse gesture script: {0}")]
    Parse(#[from] toml::de::Error),

    /// The script contains no gestures
    #[error("gesture script is empty")]
    Empty,

    /// A gesture entry has invalid parameters
    #[error("gesture #{index}: {source}")]
    InvalidGesture {
        /// Position of the entry in the script
        index: usize,
        /// Validation failure
        #[source]
        source: GestureError,
    },
}

/// One `[[gesture]]` entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureSpec {
    /// Smooth scroll along one or more segments
    SmoothScroll {
        /// Device source
        #[serde(default)]
        source: GestureSourceType,
        /// Start position `[x, y]`
        anchor: [f64; 2],
        /// Segment distances `[[dx, dy], ...]`
        distances: Vec<[f64; 2]>,
        /// Speed (px/s)
        speed_px_s: Option<f64>,
        /// Dwell before release so no fling starts
        prevent_fling: Option<bool>,
    },
    /// Two-finger pinch
    Pinch {
        /// Device source
        #[serde(default)]
        source: GestureSourceType,
        /// Point the contacts straddle `[x, y]`
        anchor: [f64; 2],
        /// Scale factor, > 1 zooms in
        scale_factor: f64,
        /// Relative contact speed (px/s)
        speed_px_s: Option<f64>,
    },
    /// Tap or click
    Tap {
        /// Device source
        #[serde(default)]
        source: GestureSourceType,
        /// Tap position `[x, y]`
        position: [f64; 2],
        /// Hold time in milliseconds
        duration_ms: Option<u64>,
    },
}

impl GestureSpec {
    /// Resolve omitted fields and validate
    pub fn to_params(&self, defaults: &GestureDefaults) -> Result<GestureParams, GestureError> {
        let params: GestureParams = match self {
            GestureSpec::SmoothScroll {
                source,
                anchor,
                distances,
                speed_px_s,
                prevent_fling,
            } => SmoothScrollParams::new(
                point(anchor),
                distances.iter().map(|[x, y]| Vec2::new(*x, *y)).collect(),
                speed_px_s.unwrap_or(defaults.scroll_speed_px_s),
            )?
            .with_source_type(*source)
            .with_prevent_fling(prevent_fling.unwrap_or(defaults.prevent_fling))
            .into(),
            GestureSpec::Pinch {
                source,
                anchor,
                scale_factor,
                speed_px_s,
            } => PinchParams::new(
                point(anchor),
                *scale_factor,
                speed_px_s.unwrap_or(defaults.pinch_speed_px_s),
            )?
            .with_source_type(*source)
            .into(),
            GestureSpec::Tap {
                source,
                position,
                duration_ms,
            } => TapParams::new(
                point(position),
                duration_ms.unwrap_or(defaults.tap_duration_ms),
            )?
            .with_source_type(*source)
            .into(),
        };
        Ok(params)
    }
}

fn point([x, y]: &[f64; 2]) -> Point {
    Point::new(*x, *y)
}

/// An ordered list of gestures
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GestureScript {
    /// Entries in queue order
    #[serde(rename = "gesture", default)]
    pub gestures: Vec<GestureSpec>,
}

impl GestureScript {
    /// Read and parse a script file
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse script text
    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        let script: GestureScript = toml::from_str(content)?;
        if script.gestures.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(script)
    }

    /// Validated parameters for every entry, in order
    pub fn to_params(&self, defaults: &GestureDefaults) -> Result<Vec<GestureParams>, ScriptError> {
        self.gestures
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.to_params(defaults)
                    .map_err(|source| ScriptError::InvalidGesture { index, source })
            })
            .collect()
    }
}
