//! Synthetic Pointers
//!
//! A device-neutral pointer that gestures drive with press/move/release and
//! then flush to a target with [`SyntheticPointer::dispatch`]. Touch pointers
//! batch every change since the last dispatch into one touch event; mouse
//! pointers emit one event per action, always with the left button and a
//! click count of one.

use crate::gesture::GestureSourceType;
use crate::input::events::SyntheticInputEvent;
use crate::input::mouse::{MouseButton, MouseEvent};
use crate::input::touch::SyntheticTouchEvent;
use crate::target::SyntheticGestureTarget;
use crate::time::Timestamp;
use tracing::trace;

/// Touch-backed pointer
#[derive(Debug, Clone, Default)]
pub struct SyntheticTouchPointer {
    touch: SyntheticTouchEvent,
}

/// Mouse-backed pointer
#[derive(Debug, Clone, Default)]
pub struct SyntheticMousePointer {
    pending: Option<MouseEvent>,
    pressed: Option<MouseButton>,
    x: f64,
    y: f64,
}

/// Pointer that synthesizes touch or mouse events
#[derive(Debug, Clone)]
pub enum SyntheticPointer {
    /// Touch contacts
    Touch(SyntheticTouchPointer),
    /// Single mouse cursor
    Mouse(SyntheticMousePointer),
}

impl SyntheticPointer {
    /// Create a pointer for a resolved source type
    ///
    /// Returns `None` for [`GestureSourceType::Default`], which must be
    /// resolved against the target first.
    pub fn new(source_type: GestureSourceType) -> Option<Self> {
        match source_type {
            GestureSourceType::Touch => Some(Self::Touch(SyntheticTouchPointer::default())),
            GestureSourceType::Mouse => Some(Self::Mouse(SyntheticMousePointer::default())),
            GestureSourceType::Default => None,
        }
    }

    /// Put the pointer down at a position, returning the contact index
    pub fn press(&mut self, x: f64, y: f64, timestamp: Timestamp) -> Option<usize> {
        match self {
            Self::Touch(p) => p.touch.press_point(x, y),
            Self::Mouse(p) => {
                p.x = x;
                p.y = y;
                p.pressed = Some(MouseButton::Left);
                p.pending = Some(MouseEvent::down(MouseButton::Left, x, y, 1, timestamp));
                Some(0)
            }
        }
    }

    /// Move contact `index` to a position
    pub fn move_to(&mut self, index: usize, x: f64, y: f64, timestamp: Timestamp) {
        match self {
            Self::Touch(p) => p.touch.move_point(index, x, y),
            Self::Mouse(p) => {
                p.x = x;
                p.y = y;
                p.pending = Some(MouseEvent::moved(p.pressed, x, y, timestamp));
            }
        }
    }

    /// Lift contact `index`
    pub fn release(&mut self, index: usize, timestamp: Timestamp) {
        match self {
            Self::Touch(p) => p.touch.release_point(index),
            Self::Mouse(p) => {
                let button = p.pressed.take().unwrap_or(MouseButton::Left);
                p.pending = Some(MouseEvent::up(button, p.x, p.y, 1, timestamp));
            }
        }
    }

    /// Send pending changes to the target
    pub fn dispatch(&mut self, target: &mut dyn SyntheticGestureTarget, timestamp: Timestamp) {
        match self {
            Self::Touch(p) => {
                if !p.touch.has_pending_changes() {
                    return;
                }
                let event = p.touch.build(timestamp);
                trace!("Dispatching touch {:?} at {}", event.kind, timestamp);
                target.dispatch_input_event_to_platform(SyntheticInputEvent::Touch(event));
                p.touch.reset_points();
            }
            Self::Mouse(p) => {
                if let Some(mut event) = p.pending.take() {
                    event.timestamp = timestamp;
                    trace!("Dispatching mouse {:?} at {}", event.kind, timestamp);
                    target.dispatch_input_event_to_platform(SyntheticInputEvent::Mouse(event));
                }
            }
        }
    }
}
