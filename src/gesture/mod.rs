//! Synthetic Gestures
//!
//! Each gesture is a small state machine that turns its parameters into a
//! realistic sequence of input events. Progress is driven from outside:
//! every call to [`SyntheticGesture::forward_input_events`] performs one
//! unit of work (a press, a move, a release) for the given timestamp and
//! reports whether more steps are needed.
//!
//! # Variants
//!
//! | Gesture | Sources | States |
//! |---------|---------|--------|
//! | Smooth scroll | touch, mouse | Setup → Started → Moving → Stopping → Done |
//! | Pinch | touch | Setup → Started → Moving → Done |
//! | Tap | touch, mouse | Setup → Press → WaitingToRelease → Done |
//!
//! On its first step a gesture resolves [`GestureSourceType::Default`]
//! against the target. A source the variant cannot synthesize ends the
//! gesture with [`GestureResult::SourceTypeNotImplemented`].
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use lamco_synthetic_gesture::gesture::{GestureResult, SyntheticGesture, TapParams};
//! use lamco_synthetic_gesture::target::RecordingTarget;
//! use lamco_synthetic_gesture::time::Timestamp;
//!
//! let params = TapParams::new(Point::new(50.0, 50.0), 100).unwrap();
//! let mut gesture = SyntheticGesture::new(params.into());
//! let mut target = RecordingTarget::default();
//!
//! assert_eq!(
//!     gesture.forward_input_events(Timestamp::ZERO, &mut target),
//!     GestureResult::Running
//! );
//! assert_eq!(
//!     gesture.forward_input_events(Timestamp::from_millis(100), &mut target),
//!     GestureResult::Finished
//! );
//! assert_eq!(target.events().len(), 2);
//! ```

use crate::target::SyntheticGestureTarget;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod error;
pub mod params;
pub mod pinch;
pub mod smooth_scroll;
pub mod tap;

pub use error::{GestureError, Result};
pub use params::{GestureParams, PinchParams, SmoothScrollParams, TapParams};
pub use pinch::PinchGesture;
pub use smooth_scroll::SmoothScrollGesture;
pub use tap::TapGesture;

/// Device a gesture synthesizes events for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureSourceType {
    /// Whatever the target prefers; resolved on the first step
    #[default]
    Default,
    /// Touchscreen contacts
    Touch,
    /// Mouse cursor and wheel
    Mouse,
}

impl GestureSourceType {
    /// Resolve `Default` against the target's preference
    pub fn resolve(self, target: &dyn SyntheticGestureTarget) -> GestureSourceType {
        match self {
            GestureSourceType::Default => target.default_synthetic_gesture_source_type(),
            other => other,
        }
    }
}

impl fmt::Display for GestureSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Touch => write!(f, "touch"),
            Self::Mouse => write!(f, "mouse"),
        }
    }
}

impl FromStr for GestureSourceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "auto" => Ok(Self::Default),
            "touch" | "touchscreen" => Ok(Self::Touch),
            "mouse" | "wheel" => Ok(Self::Mouse),
            _ => Err(format!("Unknown gesture source type: {}", s)),
        }
    }
}

/// Outcome of one progress step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureResult {
    /// More steps are required
    Running,
    /// The gesture completed
    Finished,
    /// The resolved source type is not supported by this gesture
    SourceTypeNotImplemented,
}

impl GestureResult {
    /// Whether no further steps will be taken
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GestureResult::Running)
    }
}

impl fmt::Display for GestureResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Finished => write!(f, "finished"),
            Self::SourceTypeNotImplemented => write!(f, "source type not implemented"),
        }
    }
}

/// Gesture variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureType {
    /// Smooth scroll
    SmoothScroll,
    /// Pinch zoom
    Pinch,
    /// Tap or click
    Tap,
}

impl fmt::Display for GestureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmoothScroll => write!(f, "smooth-scroll"),
            Self::Pinch => write!(f, "pinch"),
            Self::Tap => write!(f, "tap"),
        }
    }
}

/// A gesture state machine of any variant
#[derive(Debug, Clone)]
pub enum SyntheticGesture {
    /// Smooth scroll
    SmoothScroll(SmoothScrollGesture),
    /// Pinch zoom
    Pinch(PinchGesture),
    /// Tap or click
    Tap(TapGesture),
}

impl SyntheticGesture {
    /// Build the state machine for a set of parameters
    pub fn new(params: GestureParams) -> Self {
        match params {
            GestureParams::SmoothScroll(p) => Self::SmoothScroll(SmoothScrollGesture::new(p)),
            GestureParams::Pinch(p) => Self::Pinch(PinchGesture::new(p)),
            GestureParams::Tap(p) => Self::Tap(TapGesture::new(p)),
        }
    }

    /// Variant tag
    pub fn gesture_type(&self) -> GestureType {
        match self {
            Self::SmoothScroll(_) => GestureType::SmoothScroll,
            Self::Pinch(_) => GestureType::Pinch,
            Self::Tap(_) => GestureType::Tap,
        }
    }

    /// Perform one unit of progress at `timestamp`
    pub fn forward_input_events(
        &mut self,
        timestamp: Timestamp,
        target: &mut dyn SyntheticGestureTarget,
    ) -> GestureResult {
        match self {
            Self::SmoothScroll(g) => g.forward_input_events(timestamp, target),
            Self::Pinch(g) => g.forward_input_events(timestamp, target),
            Self::Tap(g) => g.forward_input_events(timestamp, target),
        }
    }
}

impl From<GestureParams> for SyntheticGesture {
    fn from(params: GestureParams) -> Self {
        Self::new(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{RecordingTarget, TargetCalibration};
    use kurbo::{Point, Vec2};

    #[test]
    fn test_source_type_from_str() {
        assert_eq!(
            "Touch".parse::<GestureSourceType>().unwrap(),
            GestureSourceType::Touch
        );
        assert_eq!(
            "wheel".parse::<GestureSourceType>().unwrap(),
            GestureSourceType::Mouse
        );
        assert!("pen".parse::<GestureSourceType>().is_err());
    }

    #[test]
    fn test_resolve_default() {
        let target = RecordingTarget::new(TargetCalibration {
            default_source_type: GestureSourceType::Mouse,
            ..TargetCalibration::default()
        });
        assert_eq!(
            GestureSourceType::Default.resolve(&target),
            GestureSourceType::Mouse
        );
        assert_eq!(
            GestureSourceType::Touch.resolve(&target),
            GestureSourceType::Touch
        );
    }

    #[test]
    fn test_result_is_terminal() {
        assert!(!GestureResult::Running.is_terminal());
        assert!(GestureResult::Finished.is_terminal());
        assert!(GestureResult::SourceTypeNotImplemented.is_terminal());
    }

    #[test]
    fn test_factory_picks_variant() {
        let scroll = SmoothScrollParams::new(Point::ZERO, vec![Vec2::new(0.0, 10.0)], 800.0)
            .unwrap();
        let pinch = PinchParams::new(Point::ZERO, 2.0, 500.0).unwrap();
        let tap = TapParams::new(Point::ZERO, 50).unwrap();

        assert_eq!(
            SyntheticGesture::new(scroll.into()).gesture_type(),
            GestureType::SmoothScroll
        );
        assert_eq!(
            SyntheticGesture::new(pinch.into()).gesture_type(),
            GestureType::Pinch
        );
        assert_eq!(
            SyntheticGesture::new(tap.into()).gesture_type(),
            GestureType::Tap
        );
    }
}
