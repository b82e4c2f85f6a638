//! Synthesized Input Events
//!
//! The single event type handed to
//! [`SyntheticGestureTarget::dispatch_input_event_to_platform`](crate::target::SyntheticGestureTarget::dispatch_input_event_to_platform).

use crate::input::mouse::{MouseEvent, MouseWheelEvent};
use crate::input::touch::TouchEvent;
use crate::time::Timestamp;
use serde::Serialize;

/// Synthesized input event ready for platform dispatch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyntheticInputEvent {
    /// Touch point set change
    Touch(TouchEvent),
    /// Mouse button or move
    Mouse(MouseEvent),
    /// Mouse wheel delta
    MouseWheel(MouseWheelEvent),
}

impl SyntheticInputEvent {
    /// Event timestamp
    pub fn timestamp(&self) -> Timestamp {
        match self {
            SyntheticInputEvent::Touch(e) => e.timestamp,
            SyntheticInputEvent::Mouse(e) => e.timestamp,
            SyntheticInputEvent::MouseWheel(e) => e.timestamp,
        }
    }

    /// Touch payload, if this is a touch event
    pub fn as_touch(&self) -> Option<&TouchEvent> {
        match self {
            SyntheticInputEvent::Touch(e) => Some(e),
            _ => None,
        }
    }

    /// Mouse payload, if this is a mouse button or move event
    pub fn as_mouse(&self) -> Option<&MouseEvent> {
        match self {
            SyntheticInputEvent::Mouse(e) => Some(e),
            _ => None,
        }
    }

    /// Wheel payload, if this is a wheel event
    pub fn as_mouse_wheel(&self) -> Option<&MouseWheelEvent> {
        match self {
            SyntheticInputEvent::MouseWheel(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TouchEvent> for SyntheticInputEvent {
    fn from(event: TouchEvent) -> Self {
        SyntheticInputEvent::Touch(event)
    }
}

impl From<MouseEvent> for SyntheticInputEvent {
    fn from(event: MouseEvent) -> Self {
        SyntheticInputEvent::Mouse(event)
    }
}

impl From<MouseWheelEvent> for SyntheticInputEvent {
    fn from(event: MouseWheelEvent) -> Self {
        SyntheticInputEvent::MouseWheel(event)
    }
}
