//! # lamco-synthetic-gesture
//!
//! Synthetic input gestures: smooth scrolls, pinches and taps turned into
//! timed touch, mouse and wheel event streams, paced against a host flush
//! cycle.
//!
//! # Architecture
//!
//! ```text
//! lamco-synthetic-gesture
//!   ├─> gesture     (parameters + per-variant state machines)
//!   ├─> controller  (FIFO queue, flush/ack pacing, completion callbacks)
//!   ├─> target      (event sink + device calibration, recording target)
//!   ├─> input       (touch/mouse/wheel events, synthetic pointers)
//!   └─> replay      (TOML gesture scripts driven on a virtual clock)
//! ```
//!
//! # Data Flow
//!
//! **Gesture Path:** GestureParams → SyntheticGesture → Controller → Target
//!
//! **Pacing:** `flush(ts)` → `set_needs_flush` → host → `on_did_flush_input`
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use lamco_synthetic_gesture::controller::SyntheticGestureController;
//! use lamco_synthetic_gesture::gesture::{SyntheticGesture, TapParams};
//! use lamco_synthetic_gesture::target::RecordingTarget;
//! use lamco_synthetic_gesture::time::Timestamp;
//!
//! let mut controller = SyntheticGestureController::new(RecordingTarget::default());
//! let tap = TapParams::new(Point::new(10.0, 20.0), 0).unwrap();
//! controller.queue_synthetic_gesture(SyntheticGesture::new(tap.into()), |result| {
//!     println!("tap {}", result);
//! });
//!
//! controller.flush(Timestamp::ZERO);
//! if controller.target_mut().take_flush_request() {
//!     controller.on_did_flush_input();
//! }
//! assert!(controller.is_idle());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Replay configuration
pub mod config;

/// Gesture queue and pacing
pub mod controller;

/// Gesture parameters and state machines
pub mod gesture;

/// Synthesized input events and pointers
pub mod input;

/// Script replay driver
pub mod replay;

/// Event sinks
pub mod target;

/// Monotonic timestamps
pub mod time;

/// Utility functions
pub mod utils;

pub use controller::SyntheticGestureController;
pub use gesture::{GestureParams, GestureResult, GestureSourceType, SyntheticGesture};
pub use target::{RecordingTarget, SyntheticGestureTarget};
pub use time::Timestamp;
