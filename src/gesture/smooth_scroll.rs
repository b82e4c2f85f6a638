//! Smooth Scroll Gesture
//!
//! Plays a list of distance segments back to back at a constant speed.
//!
//! # Touch
//!
//! ```text
//! press(anchor) → move … move (segment 0) → move … (segment n)
//!     → [dwell for pointer_assumed_stopped_time] → release
//! ```
//!
//! The first segment is lengthened by the target's touch slop so that the
//! distance the platform actually scrolls matches the request; platforms
//! consume the slop before they start scrolling. With fling prevention the
//! contact rests at its final position until the platform considers it
//! stopped, so lifting it does not start a fling.
//!
//! # Mouse
//!
//! One wheel event per step carrying the whole-pixel delta since the
//! previous event. Deltas are accumulated per segment so the wheel total of a
//! segment equals its (integer part of the) distance exactly.
//!
//! # Timing
//!
//! ```text
//! segment_duration = |distance| / speed          (truncated to µs)
//! delta(t)         = distance * speed * (t - segment_start) / |distance|
//! ```
//!
//! Timestamps are clamped to the segment stop time and the final delta of a
//! segment is its exact distance, so floating point error never overshoots.

use super::params::{travel_duration, SmoothScrollParams};
use super::{GestureResult, GestureSourceType};
use crate::input::{MouseWheelEvent, SyntheticInputEvent, SyntheticTouchEvent};
use crate::target::SyntheticGestureTarget;
use crate::time::Timestamp;
use kurbo::{Point, Vec2};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollState {
    Setup,
    Started,
    Moving,
    Stopping,
    Done,
}

/// Smooth scroll state machine
#[derive(Debug, Clone)]
pub struct SmoothScrollGesture {
    params: SmoothScrollParams,
    /// Working copy of the distances, first segment slop-adjusted for touch
    distances: Vec<Vec2>,
    source_type: GestureSourceType,
    state: ScrollState,
    touch_event: SyntheticTouchEvent,
    current_segment: Option<usize>,
    segment_start_position: Point,
    segment_start_time: Timestamp,
    segment_stop_time: Timestamp,
    /// Wheel delta already dispatched for the current segment
    segment_total_delta_discrete: Vec2,
}

/// Scale `vector` to length `scalar`
fn project_scalar_onto_vector(scalar: f64, vector: Vec2) -> Vec2 {
    vector * (scalar / vector.hypot())
}

/// Snap values within rounding noise of an integer onto it
fn snap_to_integer(v: f64) -> f64 {
    let rounded = v.round();
    if (v - rounded).abs() < 1e-9 {
        rounded
    } else {
        v
    }
}

fn ceil_from_zero(v: f64) -> f64 {
    let v = snap_to_integer(v);
    if v > 0.0 {
        v.ceil()
    } else {
        v.floor()
    }
}

fn floor_toward_zero(v: f64) -> f64 {
    v.trunc()
}

fn clamp_to_i32(v: f64) -> f64 {
    v.clamp(f64::from(i32::MIN), f64::from(i32::MAX))
}

impl SmoothScrollGesture {
    /// Create a scroll gesture in its initial state
    pub fn new(params: SmoothScrollParams) -> Self {
        Self {
            distances: params.distances().to_vec(),
            source_type: params.source_type(),
            segment_start_position: params.anchor(),
            params,
            state: ScrollState::Setup,
            touch_event: SyntheticTouchEvent::new(),
            current_segment: None,
            segment_start_time: Timestamp::ZERO,
            segment_stop_time: Timestamp::ZERO,
            segment_total_delta_discrete: Vec2::ZERO,
        }
    }

    /// Parameters this gesture was built from
    pub fn params(&self) -> &SmoothScrollParams {
        &self.params
    }

    /// Perform one unit of progress
    pub fn forward_input_events(
        &mut self,
        timestamp: Timestamp,
        target: &mut dyn SyntheticGestureTarget,
    ) -> GestureResult {
        if self.state == ScrollState::Setup {
            self.source_type = self.params.source_type().resolve(target);
            self.state = ScrollState::Started;
            self.current_segment = None;
            self.segment_stop_time = timestamp;
            debug!(
                "Smooth scroll started: source={}, segments={}, speed={}px/s",
                self.source_type,
                self.distances.len(),
                self.params.speed_in_pixels_s()
            );
        }

        match self.source_type {
            GestureSourceType::Touch => self.forward_touch_input_events(timestamp, target),
            GestureSourceType::Mouse => self.forward_mouse_input_events(timestamp, target),
            GestureSourceType::Default => return GestureResult::SourceTypeNotImplemented,
        }

        if self.state == ScrollState::Done {
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
            ScrollState::Started => {
                if self.params.is_no_op() {
                    debug!("Smooth scroll is a no-op");
                    self.state = ScrollState::Done;
                    return;
                }
                self.add_touch_slop_to_first_distance(target);
                self.compute_next_segment();
                self.segment_start_position = self.params.anchor();
                self.press_touch_point(target, timestamp);
                self.state = ScrollState::Moving;
            }
            ScrollState::Moving => {
                let event_timestamp = self.clamp_timestamp(timestamp);
                let delta = self.position_delta_at(event_timestamp);
                self.move_touch_point(target, delta, event_timestamp);

                if self.finished_current_segment(event_timestamp) {
                    if !self.is_last_segment() {
                        self.segment_start_position += self.current_distance();
                        self.compute_next_segment();
                    } else if self.params.prevent_fling() {
                        trace!("Holding touch point until it is assumed stopped");
                        self.state = ScrollState::Stopping;
                    } else {
                        self.release_touch_point(target, event_timestamp);
                        self.state = ScrollState::Done;
                    }
                }
            }
            ScrollState::Stopping => {
                let stopped_time = target.pointer_assumed_stopped_time();
                if timestamp.saturating_duration_since(self.segment_stop_time) >= stopped_time {
                    let event_timestamp = self.segment_stop_time + stopped_time;
                    self.release_touch_point(target, event_timestamp);
                    self.state = ScrollState::Done;
                }
            }
            ScrollState::Setup | ScrollState::Done => {}
        }
    }

    fn forward_mouse_input_events(
        &mut self,
        timestamp: Timestamp,
        target: &mut dyn SyntheticGestureTarget,
    ) {
        if self.state == ScrollState::Started {
            if self.params.is_no_op() {
                debug!("Smooth scroll is a no-op");
                self.state = ScrollState::Done;
                return;
            }
            self.compute_next_segment();
            self.state = ScrollState::Moving;
        }

        if self.state != ScrollState::Moving {
            return;
        }

        // A step that ends a segment rolls straight into the next one
        loop {
            let event_timestamp = self.clamp_timestamp(timestamp);
            let total_delta = self.position_delta_at(event_timestamp);
            let remaining = total_delta - self.segment_total_delta_discrete;
            let delta_discrete = Vec2::new(
                floor_toward_zero(remaining.x),
                floor_toward_zero(remaining.y),
            );
            let mut pending = delta_discrete;
            // Wheel deltas are i32; larger steps go out as several events
            while pending != Vec2::ZERO {
                let chunk = Vec2::new(clamp_to_i32(pending.x), clamp_to_i32(pending.y));
                self.forward_mouse_wheel_event(target, chunk, event_timestamp);
                self.segment_total_delta_discrete += chunk;
                pending -= chunk;
            }

            if !self.finished_current_segment(event_timestamp) {
                break;
            }
            if self.is_last_segment() {
                self.state = ScrollState::Done;
                break;
            }
            self.segment_total_delta_discrete = Vec2::ZERO;
            self.compute_next_segment();
        }
    }

    fn forward_mouse_wheel_event(
        &mut self,
        target: &mut dyn SyntheticGestureTarget,
        delta: Vec2,
        timestamp: Timestamp,
    ) {
        let anchor = self.params.anchor();
        let event = MouseWheelEvent {
            delta_x: delta.x as i32,
            delta_y: delta.y as i32,
            x: anchor.x as i32,
            y: anchor.y as i32,
            timestamp,
        };
        trace!(
            "Wheel delta ({}, {}) at {}",
            event.delta_x,
            event.delta_y,
            timestamp
        );
        target.dispatch_input_event_to_platform(SyntheticInputEvent::MouseWheel(event));
    }

    fn press_touch_point(&mut self, target: &mut dyn SyntheticGestureTarget, timestamp: Timestamp) {
        let anchor = self.params.anchor();
        self.touch_event.press_point(anchor.x, anchor.y);
        self.forward_touch_event(target, timestamp);
    }

    fn move_touch_point(
        &mut self,
        target: &mut dyn SyntheticGestureTarget,
        delta: Vec2,
        timestamp: Timestamp,
    ) {
        let position = self.segment_start_position + delta;
        self.touch_event.move_point(0, position.x, position.y);
        self.forward_touch_event(target, timestamp);
    }

    fn release_touch_point(
        &mut self,
        target: &mut dyn SyntheticGestureTarget,
        timestamp: Timestamp,
    ) {
        self.touch_event.release_point(0);
        self.forward_touch_event(target, timestamp);
    }

    fn forward_touch_event(
        &mut self,
        target: &mut dyn SyntheticGestureTarget,
        timestamp: Timestamp,
    ) {
        let event = self.touch_event.build(timestamp);
        trace!("Touch {:?} at {}", event.kind, timestamp);
        target.dispatch_input_event_to_platform(SyntheticInputEvent::Touch(event));
        self.touch_event.reset_points();
    }

    fn add_touch_slop_to_first_distance(&mut self, target: &dyn SyntheticGestureTarget) {
        let slop = target.touch_slop_in_dips();
        if let Some(first) = self.distances.first_mut() {
            let extra = project_scalar_onto_vector(slop, *first);
            *first += Vec2::new(ceil_from_zero(extra.x), ceil_from_zero(extra.y));
            trace!("First scroll segment with slop: ({}, {})", first.x, first.y);
        }
    }

    fn compute_next_segment(&mut self) {
        let next = self.current_segment.map_or(0, |s| s + 1);
        self.current_segment = Some(next);

        let duration = travel_duration(
            self.distances[next].hypot(),
            self.params.speed_in_pixels_s(),
        );
        self.segment_start_time = self.segment_stop_time;
        self.segment_stop_time = self.segment_start_time + duration;
        trace!(
            "Scroll segment {} runs {} → {}",
            next,
            self.segment_start_time,
            self.segment_stop_time
        );
    }

    fn current_distance(&self) -> Vec2 {
        self.current_segment
            .map_or(Vec2::ZERO, |segment| self.distances[segment])
    }

    fn position_delta_at(&self, timestamp: Timestamp) -> Vec2 {
        let distance = self.current_distance();
        if self.finished_current_segment(timestamp) {
            return distance;
        }

        let elapsed = timestamp.saturating_duration_since(self.segment_start_time);
        let delta_length = self.params.speed_in_pixels_s() * elapsed.as_secs_f64();
        project_scalar_onto_vector(delta_length, distance)
    }

    fn clamp_timestamp(&self, timestamp: Timestamp) -> Timestamp {
        timestamp.min(self.segment_stop_time)
    }

    fn finished_current_segment(&self, timestamp: Timestamp) -> bool {
        timestamp >= self.segment_stop_time
    }

    fn is_last_segment(&self) -> bool {
        self.current_segment == Some(self.distances.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{TouchEventKind, TouchPointState};
    use crate::target::{RecordingTarget, TargetCalibration};
    use std::time::Duration;

    fn target_with(slop: f64, stopped_ms: u64, source: GestureSourceType) -> RecordingTarget {
        RecordingTarget::new(TargetCalibration {
            touch_slop_dips: slop,
            pointer_assumed_stopped_time: Duration::from_millis(stopped_ms),
            default_source_type: source,
            ..TargetCalibration::default()
        })
    }

    fn scroll(distances: Vec<Vec2>, speed: f64) -> SmoothScrollGesture {
        SmoothScrollGesture::new(
            SmoothScrollParams::new(Point::new(100.0, 200.0), distances, speed).unwrap(),
        )
    }

    /// Step every 16ms until finished; returns the final step timestamp
    fn run(gesture: &mut SmoothScrollGesture, target: &mut RecordingTarget) -> Timestamp {
        let mut now = Timestamp::ZERO;
        for _ in 0..10_000 {
            if gesture.forward_input_events(now, target) != GestureResult::Running {
                return now;
            }
            now += Duration::from_millis(16);
        }
        panic!("scroll did not finish");
    }

    fn last_touch_y(target: &RecordingTarget) -> f64 {
        target
            .events()
            .iter()
            .filter_map(|e| e.as_touch())
            .filter_map(|t| t.point(0))
            .last()
            .map(|p| p.y)
            .unwrap()
    }

    #[test]
    fn test_touch_scroll_adds_slop() {
        let mut target = target_with(7.0, 43, GestureSourceType::Touch);
        let mut gesture = scroll(vec![Vec2::new(0.0, 123.0)], 800.0);
        run(&mut gesture, &mut target);

        let events = target.events();
        let first = events.first().and_then(|e| e.as_touch()).unwrap();
        assert_eq!(first.kind, TouchEventKind::Start);
        assert_eq!(first.points[0].y, 200.0);

        let last = events.last().and_then(|e| e.as_touch()).unwrap();
        assert_eq!(last.kind, TouchEventKind::End);
        assert_eq!(last.points[0].state, TouchPointState::Released);

        assert!((last_touch_y(&target) - 200.0 - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_slop_rounds_away_from_zero_on_both_axes() {
        let mut target = target_with(7.0, 0, GestureSourceType::Touch);
        let mut gesture = scroll(vec![Vec2::new(-30.0, 40.0)], 1000.0);
        run(&mut gesture, &mut target);

        // slop projected: (-4.2, 5.6) → (-5, 6)
        let last = target
            .events()
            .iter()
            .filter_map(|e| e.as_touch())
            .last()
            .and_then(|t| t.point(0).copied())
            .unwrap();
        assert!((last.x - (100.0 - 35.0)).abs() < 1e-9);
        assert!((last.y - (200.0 + 46.0)).abs() < 1e-9);
    }

    #[test]
    fn test_axis_aligned_slop_is_exact() {
        // slop / |dy| * dy lands just above 7.0 for this distance
        let dy = 1763.7475653096965;
        let mut target = target_with(7.0, 0, GestureSourceType::Touch);
        let mut gesture = scroll(vec![Vec2::new(0.0, dy)], 200.0);
        run(&mut gesture, &mut target);

        assert!((last_touch_y(&target) - 200.0 - (dy + 7.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance_is_no_op() {
        let mut target = target_with(7.0, 43, GestureSourceType::Touch);
        let mut gesture = scroll(vec![Vec2::ZERO], 800.0);

        assert_eq!(
            gesture.forward_input_events(Timestamp::ZERO, &mut target),
            GestureResult::Finished
        );
        assert!(target.events().is_empty());
    }

    #[test]
    fn test_empty_distances_is_no_op_for_mouse() {
        let mut target = target_with(7.0, 43, GestureSourceType::Mouse);
        let mut gesture = scroll(vec![], 800.0);
        assert_eq!(
            gesture.forward_input_events(Timestamp::ZERO, &mut target),
            GestureResult::Finished
        );
        assert!(target.events().is_empty());
    }

    #[test]
    fn test_prevent_fling_dwells_before_release() {
        let mut target = target_with(7.0, 1000, GestureSourceType::Touch);
        let mut gesture = scroll(vec![Vec2::new(0.0, 10.0)], 800.0);
        let finished_at = run(&mut gesture, &mut target);

        assert!(finished_at >= Timestamp::from_millis(1000));
        let release = target.events().last().unwrap();
        // 17px at 800px/s = 21.25ms, then the 1s dwell
        assert_eq!(release.timestamp(), Timestamp::from_micros(21_250 + 1_000_000));
    }

    #[test]
    fn test_fling_allowed_releases_after_last_move() {
        let mut target = target_with(7.0, 1000, GestureSourceType::Touch);
        let mut gesture = SmoothScrollGesture::new(
            SmoothScrollParams::new(Point::ZERO, vec![Vec2::new(0.0, 10.0)], 800.0)
                .unwrap()
                .with_prevent_fling(false),
        );
        let finished_at = run(&mut gesture, &mut target);

        assert!(finished_at <= Timestamp::from_millis(1000));
        let events = target.events();
        let release = events.last().unwrap();
        let last_move = &events[events.len() - 2];
        assert_eq!(release.timestamp(), last_move.timestamp());
    }

    #[test]
    fn test_multi_segment_touch_is_continuous() {
        let mut target = target_with(0.0, 0, GestureSourceType::Touch);
        let mut gesture = scroll(vec![Vec2::new(0.0, 80.0), Vec2::new(40.0, 0.0)], 800.0);
        run(&mut gesture, &mut target);

        let last = target
            .events()
            .iter()
            .filter_map(|e| e.as_touch())
            .filter(|t| t.kind == TouchEventKind::Move)
            .last()
            .and_then(|t| t.point(0).copied())
            .unwrap();
        assert!((last.x - 140.0).abs() < 1e-9);
        assert!((last.y - 280.0).abs() < 1e-9);
    }

    #[test]
    fn test_mouse_wheel_total_matches_distance() {
        let mut target = target_with(7.0, 43, GestureSourceType::Mouse);
        let mut gesture = scroll(vec![Vec2::new(0.0, -333.0), Vec2::new(25.0, 0.0)], 800.0);
        run(&mut gesture, &mut target);

        let (mut total_x, mut total_y) = (0, 0);
        for event in target.events() {
            let wheel = event.as_mouse_wheel().unwrap();
            assert_eq!((wheel.x, wheel.y), (100, 200));
            assert!(wheel.delta_x != 0 || wheel.delta_y != 0);
            total_x += wheel.delta_x;
            total_y += wheel.delta_y;
        }
        // no slop for mouse
        assert_eq!((total_x, total_y), (25, -333));
    }

    #[test]
    fn test_huge_wheel_step_splits_into_i32_events() {
        let mut target = target_with(0.0, 0, GestureSourceType::Mouse);
        let mut gesture = scroll(vec![Vec2::new(0.0, 5e9)], 1e12);
        run(&mut gesture, &mut target);

        let mut total_y = 0i64;
        for event in target.events() {
            let wheel = event.as_mouse_wheel().unwrap();
            assert_eq!(wheel.delta_x, 0);
            total_y += i64::from(wheel.delta_y);
        }
        assert!(target.events().len() >= 3);
        assert_eq!(total_y, 5_000_000_000);
    }

    #[test]
    fn test_mouse_segment_rollover_in_one_step() {
        let mut target = target_with(0.0, 0, GestureSourceType::Mouse);
        let mut gesture = scroll(vec![Vec2::new(0.0, 8.0), Vec2::new(0.0, 8.0)], 800.0);

        assert_eq!(
            gesture.forward_input_events(Timestamp::ZERO, &mut target),
            GestureResult::Running
        );
        // Both 10ms segments are complete at 20ms
        assert_eq!(
            gesture.forward_input_events(Timestamp::from_millis(20), &mut target),
            GestureResult::Finished
        );
        let deltas: Vec<_> = target
            .events()
            .iter()
            .filter_map(|e| e.as_mouse_wheel())
            .map(|w| w.delta_y)
            .collect();
        assert_eq!(deltas, vec![8, 8]);
    }

    #[test]
    fn test_default_source_unresolvable() {
        let mut target = target_with(7.0, 43, GestureSourceType::Default);
        let mut gesture = scroll(vec![Vec2::new(0.0, 10.0)], 800.0);
        assert_eq!(
            gesture.forward_input_events(Timestamp::ZERO, &mut target),
            GestureResult::SourceTypeNotImplemented
        );
        assert!(target.events().is_empty());
    }

    #[test]
    fn test_step_after_done_is_quiet() {
        let mut target = target_with(7.0, 0, GestureSourceType::Touch);
        let mut gesture = scroll(vec![Vec2::new(0.0, 10.0)], 800.0);
        let end = run(&mut gesture, &mut target);
        let count = target.events().len();

        assert_eq!(
            gesture.forward_input_events(end + Duration::from_secs(1), &mut target),
            GestureResult::Finished
        );
        assert_eq!(target.events().len(), count);
    }
}
