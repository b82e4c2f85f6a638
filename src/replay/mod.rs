//! Gesture Replay
//!
//! Drives a [`SyntheticGestureController`] over a [`RecordingTarget`] with a
//! virtual clock, standing in for the host event loop:
//!
//! ```text
//! tick (every pacing.flush_interval_ms)
//!   ├─> controller.flush(now)
//!   ├─> target.take_flush_request()  → start ack countdown
//!   └─> countdown reached zero       → controller.on_did_flush_input()
//! ```
//!
//! Nothing sleeps; the whole run is deterministic for a given script and
//! configuration.

use crate::config::Config;
use crate::controller::SyntheticGestureController;
use crate::gesture::{GestureParams, GestureResult, GestureType, SyntheticGesture};
use crate::input::SyntheticInputEvent;
use crate::target::RecordingTarget;
use crate::time::Timestamp;
use anyhow::{Context, Result};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

pub mod script;

pub use script::{GestureScript, GestureSpec, ScriptError};

/// Terminal result of one gesture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureOutcome {
    /// Position of the gesture in the input list
    pub index: usize,
    /// Variant
    pub gesture_type: GestureType,
    /// Result passed to the completion callback
    pub result: GestureResult,
    /// Virtual time of the call that reported completion (µs)
    pub completed_at: Timestamp,
}

/// Everything a replay produced
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Outcomes in completion order
    pub results: Vec<GestureOutcome>,
    /// Dispatched events in order
    pub events: Vec<SyntheticInputEvent>,
    /// Virtual time at which the queue drained (µs)
    pub elapsed: Timestamp,
    /// Flush cycles run
    pub flushes: u64,
    /// Flush requests made by the controller
    pub flush_requests: u64,
}

impl ReplayReport {
    /// Whether every gesture finished normally
    pub fn all_finished(&self) -> bool {
        self.results
            .iter()
            .all(|outcome| outcome.result == GestureResult::Finished)
    }
}

/// Replay gestures in order and collect what they produced
///
/// Fails if `config` does not validate, or if the queue has not drained
/// after `pacing.max_duration_ms` of virtual time.
pub fn run(params: Vec<GestureParams>, config: &Config) -> Result<ReplayReport> {
    config
        .validate()
        .context("Invalid replay configuration")?;

    let target = RecordingTarget::new(config.target.calibration());
    let mut controller = SyntheticGestureController::new(target);

    let outcomes = Rc::new(RefCell::new(Vec::with_capacity(params.len())));
    let clock = Rc::new(Cell::new(Timestamp::ZERO));

    info!("Replaying {} gestures", params.len());
    for (index, params) in params.into_iter().enumerate() {
        let gesture_type = params.gesture_type();
        let outcomes = Rc::clone(&outcomes);
        let clock = Rc::clone(&clock);
        controller.queue_synthetic_gesture(SyntheticGesture::new(params), move |result| {
            outcomes.borrow_mut().push(GestureOutcome {
                index,
                gesture_type,
                result,
                completed_at: clock.get(),
            });
        });
    }

    let interval = Duration::from_millis(config.pacing.flush_interval_ms);
    let deadline = Timestamp::from_millis(config.pacing.max_duration_ms);
    let ack_latency = config.pacing.ack_latency_frames;

    let mut now = Timestamp::ZERO;
    let mut flushes = 0u64;
    let mut ack_countdown: Option<u32> = None;

    while !controller.is_idle() {
        if now > deadline {
            anyhow::bail!(
                "Replay timed out after {} ms with {} gestures pending",
                config.pacing.max_duration_ms,
                controller.pending_gestures()
            );
        }

        clock.set(now);
        controller.flush(now);
        flushes += 1;

        if controller.target_mut().take_flush_request() {
            ack_countdown = Some(ack_latency);
        }
        match ack_countdown {
            Some(0) => {
                ack_countdown = None;
                controller.on_did_flush_input();
            }
            Some(frames) => ack_countdown = Some(frames - 1),
            None => {}
        }

        if !controller.is_idle() {
            now += interval;
        }
    }

    let mut target = controller.into_target();
    let flush_requests = target.flush_requests();
    let events = target.take_events();
    let results = outcomes.take();

    info!(
        "Replay finished at {}: {} events, {} flushes",
        now,
        events.len(),
        flushes
    );
    for outcome in &results {
        debug!(
            "Gesture {} ({}) {} at {}",
            outcome.index, outcome.gesture_type, outcome.result, outcome.completed_at
        );
    }

    Ok(ReplayReport {
        results,
        events,
        elapsed: now,
        flushes,
        flush_requests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{GestureSourceType, PinchParams, SmoothScrollParams, TapParams};
    use kurbo::{Point, Vec2};

    #[test]
    fn test_tap_elapsed_covers_duration() {
        let tap = TapParams::new(Point::new(1.0, 2.0), 123).unwrap();
        let report = run(vec![tap.into()], &Config::default_config()).unwrap();

        assert!(report.all_finished());
        assert_eq!(report.events.len(), 2);
        assert_eq!(
            report.events[1]
                .timestamp()
                .saturating_duration_since(report.events[0].timestamp()),
            Duration::from_millis(123)
        );
        assert!(report.elapsed >= Timestamp::from_millis(123));
        assert_eq!(report.results[0].completed_at, report.elapsed);
    }

    #[test]
    fn test_results_in_queue_order() {
        let params: Vec<GestureParams> = vec![
            SmoothScrollParams::new(Point::ZERO, vec![Vec2::new(0.0, 40.0)], 800.0)
                .unwrap()
                .into(),
            PinchParams::new(Point::new(100.0, 100.0), 1.5, 500.0)
                .unwrap()
                .into(),
            TapParams::new(Point::ZERO, 0).unwrap().into(),
        ];
        let report = run(params, &Config::default_config()).unwrap();

        let indices: Vec<_> = report.results.iter().map(|o| o.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(report
            .results
            .windows(2)
            .all(|w| w[0].completed_at <= w[1].completed_at));
    }

    #[test]
    fn test_ack_latency_slows_replay() {
        let tap = || -> Vec<GestureParams> { vec![TapParams::new(Point::ZERO, 10).unwrap().into()] };

        let fast = run(tap(), &Config::default_config()).unwrap();

        let mut config = Config::default_config();
        config.pacing.ack_latency_frames = 3;
        let slow = run(tap(), &config).unwrap();

        assert!(slow.elapsed > fast.elapsed);
        assert!(slow.flushes > fast.flushes);
        assert_eq!(slow.events, fast.events);
    }

    #[test]
    fn test_not_implemented_reported() {
        let pinch = PinchParams::new(Point::ZERO, 2.0, 500.0)
            .unwrap()
            .with_source_type(GestureSourceType::Mouse);
        let report = run(vec![pinch.into()], &Config::default_config()).unwrap();
        assert!(!report.all_finished());
        assert_eq!(
            report.results[0].result,
            GestureResult::SourceTypeNotImplemented
        );
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_timeout() {
        let tap = TapParams::new(Point::ZERO, 10_000).unwrap();
        let mut config = Config::default_config();
        config.pacing.max_duration_ms = 100;

        let err = run(vec![tap.into()], &config).unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_zero_flush_interval_rejected() {
        let tap = TapParams::new(Point::ZERO, 50).unwrap();
        let mut config = Config::default_config();
        config.pacing.flush_interval_ms = 0;

        let err = run(vec![tap.into()], &config).unwrap_err();
        assert!(format!("{:#}", err).contains("flush_interval_ms"));
    }

    #[test]
    fn test_report_serializes() {
        let tap = TapParams::new(Point::ZERO, 20).unwrap();
        let report = run(vec![tap.into()], &Config::default_config()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["result"], "finished");
        assert_eq!(json["results"][0]["gesture_type"], "tap");
        assert_eq!(json["events"].as_array().unwrap().len(), 2);
    }
}
