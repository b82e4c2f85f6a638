//! Pinch Gesture
//!
//! Two touch contacts straddle the anchor vertically and move in exactly
//! opposite directions at the same speed.
//!
//! The span is derived from the target calibration so that the scale the
//! platform recognises, after it has consumed the touch slop of both
//! contacts, equals the requested scale factor:
//!
//! ```text
//! zoom in  (s > 1): initial = min_span / 2    final = (initial + slop) * s
//! zoom out (s < 1): final   = min_span / 2    initial = final / s + slop
//!
//! duration = |2 * (initial - final)| / relative_speed   (truncated to µs)
//! ```
//!
//! A scale factor of exactly 1 finishes on the first step without events.

use super::params::{travel_duration, PinchParams};
use super::{GestureResult, GestureSourceType};
use crate::input::{SyntheticInputEvent, SyntheticTouchEvent};
use crate::target::SyntheticGestureTarget;
use crate::time::Timestamp;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinchState {
    Setup,
    Started,
    Moving,
    Done,
}

/// Pinch zoom state machine
#[derive(Debug, Clone)]
pub struct PinchGesture {
    params: PinchParams,
    source_type: GestureSourceType,
    state: PinchState,
    touch_event: SyntheticTouchEvent,
    start_y_0: f64,
    start_y_1: f64,
    max_pointer_delta_0: f64,
    start_time: Timestamp,
    stop_time: Timestamp,
}

impl PinchGesture {
    /// Create a pinch gesture in its initial state
    pub fn new(params: PinchParams) -> Self {
        Self {
            source_type: params.source_type(),
            params,
            state: PinchState::Setup,
            touch_event: SyntheticTouchEvent::new(),
            start_y_0: 0.0,
            start_y_1: 0.0,
            max_pointer_delta_0: 0.0,
            start_time: Timestamp::ZERO,
            stop_time: Timestamp::ZERO,
        }
    }

    /// Parameters this gesture was built from
    pub fn params(&self) -> &PinchParams {
        &self.params
    }

    /// Perform one unit of progress
    pub fn forward_input_events(
        &mut self,
        timestamp: Timestamp,
        target: &mut dyn SyntheticGestureTarget,
    ) -> GestureResult {
        if self.state == PinchState::Setup {
            self.source_type = self.params.source_type().resolve(target);
            self.state = PinchState::Started;
            self.start_time = timestamp;
        }

        if self.source_type != GestureSourceType::Touch {
            debug!("Pinch cannot be synthesized for source {}", self.source_type);
            return GestureResult::SourceTypeNotImplemented;
        }
        self.forward_touch_input_events(timestamp, target);

        if self.state == PinchState::Done {
            GestureResult::Finished
        } else {
            GestureResult::Running
        }
    }

    fn forward_touch_input_events(
        &mut self,
        timestamp: Timestamp,
        target: &mut dyn SyntheticGestureTarget,
    ) {
        match self.state {
            PinchState::Started => {
                if self.params.scale_factor() == 1.0 {
                    debug!("Pinch with unit scale factor is a no-op");
                    self.state = PinchState::Done;
                    return;
                }
                self.setup_coordinates_and_stop_time(target);
                self.press_touch_points(target, timestamp);
                self.state = PinchState::Moving;
            }
            PinchState::Moving => {
                let event_timestamp = self.clamp_timestamp(timestamp);
                let delta = self.delta_for_pointer_0_at(event_timestamp);
                self.move_touch_points(target, delta, event_timestamp);

                if self.has_reached_target(event_timestamp) {
                    self.release_touch_points(target, event_timestamp);
                    self.state = PinchState::Done;
                }
            }
            PinchState::Setup | PinchState::Done => {}
        }
    }

    fn setup_coordinates_and_stop_time(&mut self, target: &dyn SyntheticGestureTarget) {
        // Both contacts move at the same speed, so each one's distance to
        // the anchor is half the span.
        let min_span = target.min_scaling_span_in_dips();
        let slop = target.touch_slop_in_dips();
        let scale_factor = self.params.scale_factor();

        let (initial_distance_to_anchor, final_distance_to_anchor) = if scale_factor > 1.0 {
            let initial = min_span / 2.0;
            (initial, (initial + slop) * scale_factor)
        } else {
            let final_distance = min_span / 2.0;
            (final_distance / scale_factor + slop, final_distance)
        };

        let anchor_y = self.params.anchor().y;
        self.start_y_0 = anchor_y - initial_distance_to_anchor;
        self.start_y_1 = anchor_y + initial_distance_to_anchor;
        self.max_pointer_delta_0 = initial_distance_to_anchor - final_distance_to_anchor;

        let mut duration = travel_duration(
            (2.0 * self.max_pointer_delta_0).abs(),
            self.params.relative_pointer_speed_in_pixels_s(),
        );
        if duration.is_zero() {
            // Calibration left nothing to travel; land on the final span in one move.
            duration = Duration::from_micros(1);
        }
        self.stop_time = self.start_time + duration;

        debug!(
            "Pinch {}: span {:.2} → {:.2} DIPs over {:?}",
            if scale_factor > 1.0 { "in" } else { "out" },
            2.0 * initial_distance_to_anchor,
            2.0 * final_distance_to_anchor,
            duration
        );
    }

    fn delta_for_pointer_0_at(&self, timestamp: Timestamp) -> f64 {
        if self.has_reached_target(timestamp) {
            return self.max_pointer_delta_0;
        }

        let elapsed = timestamp.saturating_duration_since(self.start_time);
        let total_abs_delta = self.params.relative_pointer_speed_in_pixels_s() * elapsed.as_secs_f64();
        let abs_delta_pointer_0 = total_abs_delta / 2.0;
        if self.params.scale_factor() > 1.0 {
            -abs_delta_pointer_0
        } else {
            abs_delta_pointer_0
        }
    }

    fn press_touch_points(&mut self, target: &mut dyn SyntheticGestureTarget, timestamp: Timestamp) {
        let x = self.params.anchor().x;
        self.touch_event.press_point(x, self.start_y_0);
        self.touch_event.press_point(x, self.start_y_1);
        self.forward_touch_event(target, timestamp);
    }

    fn move_touch_points(
        &mut self,
        target: &mut dyn SyntheticGestureTarget,
        delta: f64,
        timestamp: Timestamp,
    ) {
        let x = self.params.anchor().x;
        self.touch_event.move_point(0, x, self.start_y_0 + delta);
        self.touch_event.move_point(1, x, self.start_y_1 - delta);
        self.forward_touch_event(target, timestamp);
    }

    fn release_touch_points(
        &mut self,
        target: &mut dyn SyntheticGestureTarget,
        timestamp: Timestamp,
    ) {
        self.touch_event.release_point(0);
        self.touch_event.release_point(1);
        self.forward_touch_event(target, timestamp);
    }

    fn forward_touch_event(
        &mut self,
        target: &mut dyn SyntheticGestureTarget,
        timestamp: Timestamp,
    ) {
        let event = self.touch_event.build(timestamp);
        trace!("Pinch touch {:?} at {}", event.kind, timestamp);
        target.dispatch_input_event_to_platform(SyntheticInputEvent::Touch(event));
        self.touch_event.reset_points();
    }

    fn clamp_timestamp(&self, timestamp: Timestamp) -> Timestamp {
        timestamp.min(self.stop_time)
    }

    fn has_reached_target(&self, timestamp: Timestamp) -> bool {
        timestamp >= self.stop_time
    }
}
