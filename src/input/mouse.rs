//! Mouse Event Types
//!
//! Button presses, pointer moves and wheel deltas produced by mouse-sourced
//! gestures.

use crate::time::Timestamp;
use serde::Serialize;

/// Mouse button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Mouse event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseEventKind {
    /// Button pressed
    Down,
    /// Button released
    Up,
    /// Pointer moved
    Move,
}

/// A synthesized mouse button or move event
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MouseEvent {
    /// Event kind
    pub kind: MouseEventKind,
    /// Button changed (down/up) or held (move), if any
    pub button: Option<MouseButton>,
    /// X coordinate (DIPs)
    pub x: f64,
    /// Y coordinate (DIPs)
    pub y: f64,
    /// Click count for down/up events
    pub click_count: u32,
    /// Event timestamp
    pub timestamp: Timestamp,
}

impl MouseEvent {
    /// Button press at a position
    pub fn down(button: MouseButton, x: f64, y: f64, click_count: u32, timestamp: Timestamp) -> Self {
        Self {
            kind: MouseEventKind::Down,
            button: Some(button),
            x,
            y,
            click_count,
            timestamp,
        }
    }

    /// Button release at a position
    pub fn up(button: MouseButton, x: f64, y: f64, click_count: u32, timestamp: Timestamp) -> Self {
        Self {
            kind: MouseEventKind::Up,
            button: Some(button),
            x,
            y,
            click_count,
            timestamp,
        }
    }

    /// Pointer move, optionally with a held button
    pub fn moved(button: Option<MouseButton>, x: f64, y: f64, timestamp: Timestamp) -> Self {
        Self {
            kind: MouseEventKind::Move,
            button,
            x,
            y,
            click_count: 0,
            timestamp,
        }
    }
}

/// A synthesized wheel event with discrete pixel deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MouseWheelEvent {
    /// Horizontal scroll delta (pixels)
    pub delta_x: i32,
    /// Vertical scroll delta (pixels)
    pub delta_y: i32,
    /// X coordinate of the wheel position (whole DIPs)
    pub x: i32,
    /// Y coordinate of the wheel position (whole DIPs)
    pub y: i32,
    /// Event timestamp
    pub timestamp: Timestamp,
}
