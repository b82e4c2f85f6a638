//! Gesture Targets
//!
//! A target is the collaborator that receives synthesized events and knows
//! the calibration of the device being emulated. Gestures only ever talk to
//! a target through [`SyntheticGestureTarget`]; the controller additionally
//! uses [`SyntheticGestureTarget::set_needs_flush`] to ask the host for
//! another flush cycle.
//!
//! [`RecordingTarget`] keeps every dispatched event in memory and is what the
//! replay driver and the tests run against.

use crate::gesture::GestureSourceType;
use crate::input::SyntheticInputEvent;
use std::time::Duration;

mod recording;

pub use recording::RecordingTarget;

/// Default touch slop (DIPs)
pub const DEFAULT_TOUCH_SLOP_DIPS: f64 = 7.0;

/// Default minimum scaling span (DIPs)
pub const DEFAULT_MIN_SCALING_SPAN_DIPS: f64 = 27.5;

/// Default time after which a motionless pointer counts as stopped
pub const DEFAULT_POINTER_ASSUMED_STOPPED_TIME: Duration = Duration::from_millis(43);

/// Event sink and device calibration consumed by gestures
#[cfg_attr(test, mockall::automock)]
pub trait SyntheticGestureTarget {
    /// Hand one synthesized event to the platform
    fn dispatch_input_event_to_platform(&mut self, event: SyntheticInputEvent);

    /// Request another flush cycle before further progress counts as delivered
    fn set_needs_flush(&mut self);

    /// Source type used when a gesture asks for [`GestureSourceType::Default`]
    fn default_synthetic_gesture_source_type(&self) -> GestureSourceType;

    /// How long a pointer must rest before the platform treats it as stopped
    fn pointer_assumed_stopped_time(&self) -> Duration;

    /// Distance a touch must travel before it counts as a drag (DIPs)
    fn touch_slop_in_dips(&self) -> f64;

    /// Smallest span between two touches recognised as a pinch (DIPs)
    fn min_scaling_span_in_dips(&self) -> f64;
}

/// Device calibration constants for a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCalibration {
    /// Touch slop (DIPs)
    pub touch_slop_dips: f64,
    /// Minimum scaling span (DIPs)
    pub min_scaling_span_dips: f64,
    /// Pointer-assumed-stopped time
    pub pointer_assumed_stopped_time: Duration,
    /// Resolution for [`GestureSourceType::Default`]
    pub default_source_type: GestureSourceType,
}

impl Default for TargetCalibration {
    fn default() -> Self {
        Self {
            touch_slop_dips: DEFAULT_TOUCH_SLOP_DIPS,
            min_scaling_span_dips: DEFAULT_MIN_SCALING_SPAN_DIPS,
            pointer_assumed_stopped_time: DEFAULT_POINTER_ASSUMED_STOPPED_TIME,
            default_source_type: GestureSourceType::Touch,
        }
    }
}
