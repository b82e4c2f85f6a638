//! Gesture Controller
//!
//! Serializes gesture execution and paces it against the host's flush cycle.
//!
//! # Protocol
//!
//! ```text
//!  host                       controller                      target
//!  ━━━━                       ━━━━━━━━━━                      ━━━━━━
//!  queue_synthetic_gesture ──> push (activate if first)
//!
//!  flush(ts) ────────────────> step active gesture ─────────> dispatch_input_event_to_platform
//!                               Running       ──────────────> set_needs_flush, await ack
//!                               terminal + events ──────────> set_needs_flush, park result
//!                               terminal, no events          report now, activate next
//!
//!  on_did_flush_input() ─────> clear ack; report parked result, activate next
//! ```
//!
//! A newly activated gesture is never stepped in the call that activated it.
//! Its first step happens on the next [`SyntheticGestureController::flush`].
//! While an acknowledgment is outstanding, `flush` does nothing, so a gesture
//! cannot be advanced twice for one delivered batch of events.

use crate::gesture::{GestureResult, GestureSourceType, SyntheticGesture};
use crate::input::SyntheticInputEvent;
use crate::target::SyntheticGestureTarget;
use crate::time::Timestamp;
use std::time::Duration;
use tracing::{debug, trace};

mod queue;

pub use queue::CompletionCallback;
use queue::GestureQueue;

/// Target wrapper that observes what a single step did
struct StepTarget<'a> {
    inner: &'a mut dyn SyntheticGestureTarget,
    dispatched: usize,
    flush_requested: bool,
}

impl<'a> StepTarget<'a> {
    fn new(inner: &'a mut dyn SyntheticGestureTarget) -> Self {
        Self {
            inner,
            dispatched: 0,
            flush_requested: false,
        }
    }
}

impl SyntheticGestureTarget for StepTarget<'_> {
    fn dispatch_input_event_to_platform(&mut self, event: SyntheticInputEvent) {
        self.dispatched += 1;
        self.inner.dispatch_input_event_to_platform(event);
    }

    fn set_needs_flush(&mut self) {
        self.flush_requested = true;
        self.inner.set_needs_flush();
    }

    fn default_synthetic_gesture_source_type(&self) -> GestureSourceType {
        self.inner.default_synthetic_gesture_source_type()
    }

    fn pointer_assumed_stopped_time(&self) -> Duration {
        self.inner.pointer_assumed_stopped_time()
    }

    fn touch_slop_in_dips(&self) -> f64 {
        self.inner.touch_slop_in_dips()
    }

    fn min_scaling_span_in_dips(&self) -> f64 {
        self.inner.min_scaling_span_in_dips()
    }
}

/// Runs queued gestures one at a time against a target
pub struct SyntheticGestureController<T: SyntheticGestureTarget> {
    target: T,
    queue: GestureQueue,
    awaiting_ack: bool,
    parked_result: Option<GestureResult>,
}

impl<T: SyntheticGestureTarget> SyntheticGestureController<T> {
    /// Create an idle controller owning `target`
    pub fn new(target: T) -> Self {
        Self {
            target,
            queue: GestureQueue::default(),
            awaiting_ack: false,
            parked_result: None,
        }
    }

    /// Append a gesture; `callback` receives its terminal result
    ///
    /// Returns the gesture's sequence number. If the queue was empty the
    /// gesture becomes active immediately and is first stepped on the next
    /// [`flush`](Self::flush).
    pub fn queue_synthetic_gesture<F>(&mut self, gesture: SyntheticGesture, callback: F) -> u64
    where
        F: FnOnce(GestureResult) + 'static,
    {
        let gesture_type = gesture.gesture_type();
        let was_empty = self.queue.is_empty();
        let sequence = self.queue.push(gesture, Box::new(callback));

        if was_empty {
            debug!("Gesture #{} ({}) active", sequence, gesture_type);
        } else {
            debug!(
                "Gesture #{} ({}) queued behind {} pending",
                sequence,
                gesture_type,
                self.queue.len() - 1
            );
        }
        sequence
    }

    /// Advance the active gesture by one step at `timestamp`
    pub fn flush(&mut self, timestamp: Timestamp) {
        if self.awaiting_ack || self.parked_result.is_some() {
            trace!("Flush at {} ignored, acknowledgment outstanding", timestamp);
            return;
        }
        let Some(entry) = self.queue.front_mut() else {
            return;
        };

        let mut step_target = StepTarget::new(&mut self.target);
        let result = entry.gesture.forward_input_events(timestamp, &mut step_target);
        let StepTarget {
            dispatched,
            flush_requested,
            ..
        } = step_target;

        trace!(
            "Gesture #{} stepped at {}: {} ({} events)",
            entry.sequence,
            timestamp,
            result,
            dispatched
        );

        if !result.is_terminal() {
            if !flush_requested {
                self.target.set_needs_flush();
            }
            self.awaiting_ack = true;
            return;
        }

        if dispatched > 0 || flush_requested {
            if !flush_requested {
                self.target.set_needs_flush();
            }
            self.awaiting_ack = true;
            self.parked_result = Some(result);
        } else {
            self.stop_gesture(result);
        }
    }

    /// Acknowledge that everything dispatched so far has been delivered
    pub fn on_did_flush_input(&mut self) {
        if !self.awaiting_ack {
            trace!("Spurious flush acknowledgment ignored");
            return;
        }
        self.awaiting_ack = false;

        if let Some(result) = self.parked_result.take() {
            self.stop_gesture(result);
        }
    }

    fn stop_gesture(&mut self, result: GestureResult) {
        let Some(entry) = self.queue.pop() else {
            return;
        };
        debug!(
            "Gesture #{} ({}) completed: {}",
            entry.sequence,
            entry.gesture.gesture_type(),
            result
        );
        (entry.callback)(result);

        if let Some(next) = self.queue.front() {
            debug!(
                "Gesture #{} ({}) active",
                next.sequence,
                next.gesture.gesture_type()
            );
        }
    }

    /// Whether no gesture is queued
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued gestures, including the active one
    pub fn pending_gestures(&self) -> usize {
        self.queue.len()
    }

    /// Whether the controller waits for [`on_did_flush_input`](Self::on_did_flush_input)
    pub fn awaiting_flush_ack(&self) -> bool {
        self.awaiting_ack
    }

    /// The target
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The target, mutably
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Consume the controller and return its target
    ///
    /// Gestures still queued are dropped without their callbacks firing.
    pub fn into_target(self) -> T {
        self.target
    }
}
