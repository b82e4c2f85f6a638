//! In-memory recording target

use super::{SyntheticGestureTarget, TargetCalibration};
use crate::gesture::GestureSourceType;
use crate::input::SyntheticInputEvent;
use std::time::Duration;
use tracing::trace;

/// Target that records dispatched events and flush requests
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    calibration: TargetCalibration,
    events: Vec<SyntheticInputEvent>,
    flush_requests: u64,
    flush_requested: bool,
}

impl RecordingTarget {
    /// Create a target with the given calibration
    pub fn new(calibration: TargetCalibration) -> Self {
        Self {
            calibration,
            ..Self::default()
        }
    }

    /// Calibration in use
    pub fn calibration(&self) -> &TargetCalibration {
        &self.calibration
    }

    /// Events dispatched so far, in order
    pub fn events(&self) -> &[SyntheticInputEvent] {
        &self.events
    }

    /// Take all recorded events, leaving the log empty
    pub fn take_events(&mut self) -> Vec<SyntheticInputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Total number of `set_needs_flush` calls
    pub fn flush_requests(&self) -> u64 {
        self.flush_requests
    }

    /// Whether a flush has been requested and not yet taken
    pub fn flush_requested(&self) -> bool {
        self.flush_requested
    }

    /// Consume an outstanding flush request
    ///
    /// Returns `true` if one was outstanding. Hosts call this once per flush
    /// cycle and acknowledge the controller when it returns `true`.
    pub fn take_flush_request(&mut self) -> bool {
        std::mem::take(&mut self.flush_requested)
    }
}

impl SyntheticGestureTarget for RecordingTarget {
    fn dispatch_input_event_to_platform(&mut self, event: SyntheticInputEvent) {
        trace!("Recorded event #{}: {:?}", self.events.len(), event);
        self.events.push(event);
    }

    fn set_needs_flush(&mut self) {
        self.flush_requests += 1;
        self.flush_requested = true;
    }

    fn default_synthetic_gesture_source_type(&self) -> GestureSourceType {
        self.calibration.default_source_type
    }

    fn pointer_assumed_stopped_time(&self) -> Duration {
        self.calibration.pointer_assumed_stopped_time
    }

    fn touch_slop_in_dips(&self) -> f64 {
        self.calibration.touch_slop_dips
    }

    fn min_scaling_span_in_dips(&self) -> f64 {
        self.calibration.min_scaling_span_dips
    }
}
