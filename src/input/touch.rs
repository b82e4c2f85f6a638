//! Touch Event Synthesis
//!
//! Maintains a set of synthetic touch points and turns their pending state
//! changes into [`TouchEvent`]s. A touch point goes through
//! `Pressed → Moved* → Released`; after each dispatched event the set is
//! reset so that released points disappear and untouched points are
//! reported as stationary in the next event.

use crate::time::Timestamp;
use serde::Serialize;

/// Maximum number of simultaneous touch points
pub const MAX_TOUCH_POINTS: usize = 16;

/// State of a single touch point within one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPointState {
    /// Point went down in this event
    Pressed,
    /// Point moved in this event
    Moved,
    /// Point lifted in this event
    Released,
    /// Point is down but unchanged
    Stationary,
    /// Point was cancelled in this event
    Cancelled,
}

/// A single touch point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TouchPoint {
    /// Stable identifier for the lifetime of the contact
    pub id: u32,
    /// State within the event that carries it
    pub state: TouchPointState,
    /// X coordinate (DIPs)
    pub x: f64,
    /// Y coordinate (DIPs)
    pub y: f64,
}

/// Kind of touch event, derived from the point states it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchEventKind {
    /// At least one point went down
    Start,
    /// Points moved
    Move,
    /// At least one point lifted
    End,
    /// At least one point was cancelled
    Cancel,
}

/// A synthesized touch event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TouchEvent {
    /// Event kind
    pub kind: TouchEventKind,
    /// All points currently known, including stationary ones
    pub points: Vec<TouchPoint>,
    /// Event timestamp
    pub timestamp: Timestamp,
}

impl TouchEvent {
    /// Point at `index`, if present
    pub fn point(&self, index: usize) -> Option<&TouchPoint> {
        self.points.get(index)
    }
}

/// Stateful builder for touch events
#[derive(Debug, Clone, Default)]
pub struct SyntheticTouchEvent {
    points: Vec<TouchPoint>,
    next_id: u32,
}

impl SyntheticTouchEvent {
    /// Create an empty touch point set
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a new point down, returning its index
    ///
    /// Returns `None` when [`MAX_TOUCH_POINTS`] are already down.
    pub fn press_point(&mut self, x: f64, y: f64) -> Option<usize> {
        if self.points.len() >= MAX_TOUCH_POINTS {
            return None;
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.points.push(TouchPoint {
            id,
            state: TouchPointState::Pressed,
            x,
            y,
        });
        Some(self.points.len() - 1)
    }

    /// Move the point at `index`
    pub fn move_point(&mut self, index: usize, x: f64, y: f64) {
        if let Some(point) = self.points.get_mut(index) {
            point.x = x;
            point.y = y;
            point.state = TouchPointState::Moved;
        }
    }

    /// Lift the point at `index`
    pub fn release_point(&mut self, index: usize) {
        if let Some(point) = self.points.get_mut(index) {
            point.state = TouchPointState::Released;
        }
    }

    /// Cancel the point at `index`
    pub fn cancel_point(&mut self, index: usize) {
        if let Some(point) = self.points.get_mut(index) {
            point.state = TouchPointState::Cancelled;
        }
    }

    /// Number of points in the set
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Whether any point has a change that has not been dispatched yet
    pub fn has_pending_changes(&self) -> bool {
        self.points
            .iter()
            .any(|p| p.state != TouchPointState::Stationary)
    }

    /// Event kind for the current point states
    pub fn kind(&self) -> TouchEventKind {
        let has = |state| self.points.iter().any(|p| p.state == state);

        if has(TouchPointState::Cancelled) {
            TouchEventKind::Cancel
        } else if has(TouchPointState::Released) {
            TouchEventKind::End
        } else if has(TouchPointState::Pressed) {
            TouchEventKind::Start
        } else {
            TouchEventKind::Move
        }
    }

    /// Snapshot the current point set as an event
    pub fn build(&self, timestamp: Timestamp) -> TouchEvent {
        TouchEvent {
            kind: self.kind(),
            points: self.points.clone(),
            timestamp,
        }
    }

    /// Drop lifted points and mark the remaining ones stationary
    pub fn reset_points(&mut self) {
        self.points.retain(|p| {
            !matches!(
                p.state,
                TouchPointState::Released | TouchPointState::Cancelled
            )
        });
        for point in &mut self.points {
            point.state = TouchPointState::Stationary;
        }
    }
}
