//! Gesture Error Types
//!
//! Errors raised when gesture parameters violate the caller contract. They
//! are reported at construction time; a constructed gesture never fails at
//! runtime except through [`GestureResult::SourceTypeNotImplemented`].
//!
//! [`GestureResult::SourceTypeNotImplemented`]: crate::gesture::GestureResult::SourceTypeNotImplemented

use thiserror::Error;

/// Result type for gesture construction
pub type Result<T> = std::result::Result<T, GestureError>;

/// Gesture parameter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    /// Scroll speed is zero, negative or not finite
    #[error("Invalid scroll speed: {0} px/s (must be finite and positive)")]
    InvalidScrollSpeed(f64),

    /// A scroll distance has a non-finite component
    #[error("Scroll segment {index} has a non-finite distance")]
    NonFiniteDistance {
        /// Segment index
        index: usize,
    },

    /// A scroll segment is too short to last at least one microsecond
    #[error("Scroll segment {index} is too short to play back at {speed} px/s")]
    DegenerateSegment {
        /// Segment index
        index: usize,
        /// Configured speed (px/s)
        speed: f64,
    },

    /// Pinch scale factor is zero, negative or not finite
    #[error("Invalid scale factor: {0} (must be finite and positive)")]
    InvalidScaleFactor(f64),

    /// Pinch pointer speed is zero, negative or not finite
    #[error("Invalid relative pointer speed: {0} px/s (must be finite and positive)")]
    InvalidPointerSpeed(f64),

    /// Anchor or tap position has a non-finite coordinate
    #[error("Invalid position: ({0}, {1})")]
    InvalidPosition(f64, f64),
}
