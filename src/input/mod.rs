//! Synthetic Input Events
//!
//! Event types produced by gestures and the builders that produce them.
//!
//! # Architecture
//!
//! ```text
//! Gesture state machine
//!       ↓
//! ┌──────────────────────┐   ┌──────────────────────┐
//! │ SyntheticTouchEvent  │   │  SyntheticPointer    │
//! │ - multi-point set    │   │  - touch or mouse    │
//! │ - press/move/release │   │  - press/move/release│
//! └──────────────────────┘   └──────────────────────┘
//!       ↓                            ↓
//! SyntheticInputEvent { Touch | Mouse | MouseWheel }
//!       ↓
//! SyntheticGestureTarget::dispatch_input_event_to_platform
//! ```
//!
//! Coordinates are device-independent pixels (DIPs). Timestamps come from
//! the caller of the gesture step, never from a clock.

pub mod events;
pub mod mouse;
pub mod pointer;
pub mod touch;

pub use events::SyntheticInputEvent;
pub use mouse::{MouseButton, MouseEvent, MouseEventKind, MouseWheelEvent};
pub use pointer::SyntheticPointer;
pub use touch::{
    SyntheticTouchEvent, TouchEvent, TouchEventKind, TouchPoint, TouchPointState,
    MAX_TOUCH_POINTS,
};
