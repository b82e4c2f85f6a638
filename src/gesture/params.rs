//! Gesture Parameters
//!
//! Immutable, validated configuration for each gesture variant. Values are
//! checked once at construction so that a running state machine never has
//! to deal with a zero speed, a non-positive scale factor or a scroll
//! segment that would take no time at all.
//!
//! Defaults such as the scroll speed are not baked in here; callers supply
//! fully resolved values (see [`crate::config::GestureDefaults`]).

use super::error::{GestureError, Result};
use super::{GestureSourceType, GestureType};
use kurbo::{Point, Vec2};
use std::time::Duration;

/// Time needed to travel `length` pixels at `speed` pixels/second,
/// truncated to whole microseconds
pub(crate) fn travel_duration(length: f64, speed: f64) -> Duration {
    Duration::from_micros((1e6 * (length / speed)) as u64)
}

fn check_position(point: Point) -> Result<()> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(GestureError::InvalidPosition(point.x, point.y))
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Smooth scroll parameters
///
/// Positive distance components scroll content left/up.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothScrollParams {
    source_type: GestureSourceType,
    anchor: Point,
    distances: Vec<Vec2>,
    prevent_fling: bool,
    speed_in_pixels_s: f64,
}

impl SmoothScrollParams {
    /// Validate and build scroll parameters
    ///
    /// Fling prevention defaults to on and the source type to
    /// [`GestureSourceType::Default`].
    pub fn new(anchor: Point, distances: Vec<Vec2>, speed_in_pixels_s: f64) -> Result<Self> {
        check_position(anchor)?;
        if !is_positive_finite(speed_in_pixels_s) {
            return Err(GestureError::InvalidScrollSpeed(speed_in_pixels_s));
        }

        for (index, distance) in distances.iter().enumerate() {
            if !distance.is_finite() {
                return Err(GestureError::NonFiniteDistance { index });
            }
        }

        let params = Self {
            source_type: GestureSourceType::Default,
            anchor,
            distances,
            prevent_fling: true,
            speed_in_pixels_s,
        };

        // A no-op scroll never plays its segments back
        if !params.is_no_op() {
            for (index, distance) in params.distances.iter().enumerate() {
                if travel_duration(distance.hypot(), speed_in_pixels_s).is_zero() {
                    return Err(GestureError::DegenerateSegment {
                        index,
                        speed: speed_in_pixels_s,
                    });
                }
            }
        }

        Ok(params)
    }

    /// Set the source type
    pub fn with_source_type(mut self, source_type: GestureSourceType) -> Self {
        self.source_type = source_type;
        self
    }

    /// Set fling prevention
    pub fn with_prevent_fling(mut self, prevent_fling: bool) -> Self {
        self.prevent_fling = prevent_fling;
        self
    }

    /// Requested source type
    pub fn source_type(&self) -> GestureSourceType {
        self.source_type
    }

    /// Scroll anchor
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Segment distances
    pub fn distances(&self) -> &[Vec2] {
        &self.distances
    }

    /// Whether the pointer dwells before release so no fling starts
    pub fn prevent_fling(&self) -> bool {
        self.prevent_fling
    }

    /// Scroll speed (px/s)
    pub fn speed_in_pixels_s(&self) -> f64 {
        self.speed_in_pixels_s
    }

    /// Whether the scroll produces no events at all
    pub fn is_no_op(&self) -> bool {
        self.distances.first().map_or(true, |d| *d == Vec2::ZERO)
    }
}

/// Pinch parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PinchParams {
    source_type: GestureSourceType,
    anchor: Point,
    scale_factor: f64,
    relative_pointer_speed_in_pixels_s: f64,
}

impl PinchParams {
    /// Validate and build pinch parameters
    pub fn new(anchor: Point, scale_factor: f64, relative_pointer_speed_in_pixels_s: f64) -> Result<Self> {
        check_position(anchor)?;
        if !is_positive_finite(scale_factor) {
            return Err(GestureError::InvalidScaleFactor(scale_factor));
        }
        if !is_positive_finite(relative_pointer_speed_in_pixels_s) {
            return Err(GestureError::InvalidPointerSpeed(
                relative_pointer_speed_in_pixels_s,
            ));
        }

        Ok(Self {
            source_type: GestureSourceType::Default,
            anchor,
            scale_factor,
            relative_pointer_speed_in_pixels_s,
        })
    }

    /// Set the source type
    pub fn with_source_type(mut self, source_type: GestureSourceType) -> Self {
        self.source_type = source_type;
        self
    }

    /// Requested source type
    pub fn source_type(&self) -> GestureSourceType {
        self.source_type
    }

    /// Point the two contacts straddle
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Requested scale factor (> 1 zooms in)
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Speed at which the contacts approach or separate (px/s)
    pub fn relative_pointer_speed_in_pixels_s(&self) -> f64 {
        self.relative_pointer_speed_in_pixels_s
    }
}

/// Tap parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TapParams {
    source_type: GestureSourceType,
    position: Point,
    duration_ms: u64,
}

impl TapParams {
    /// Validate and build tap parameters
    ///
    /// A zero duration releases in the same step as the press.
    pub fn new(position: Point, duration_ms: u64) -> Result<Self> {
        check_position(position)?;
        Ok(Self {
            source_type: GestureSourceType::Default,
            position,
            duration_ms,
        })
    }

    /// Set the source type
    pub fn with_source_type(mut self, source_type: GestureSourceType) -> Self {
        self.source_type = source_type;
        self
    }

    /// Requested source type
    pub fn source_type(&self) -> GestureSourceType {
        self.source_type
    }

    /// Tap position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Hold time in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Hold time
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Parameters for any gesture variant
#[derive(Debug, Clone, PartialEq)]
pub enum GestureParams {
    /// Smooth scroll
    SmoothScroll(SmoothScrollParams),
    /// Two-finger pinch
    Pinch(PinchParams),
    /// Tap or click
    Tap(TapParams),
}

impl GestureParams {
    /// Variant tag
    pub fn gesture_type(&self) -> GestureType {
        match self {
            GestureParams::SmoothScroll(_) => GestureType::SmoothScroll,
            GestureParams::Pinch(_) => GestureType::Pinch,
            GestureParams::Tap(_) => GestureType::Tap,
        }
    }

    /// Requested source type
    pub fn source_type(&self) -> GestureSourceType {
        match self {
            GestureParams::SmoothScroll(p) => p.source_type(),
            GestureParams::Pinch(p) => p.source_type(),
            GestureParams::Tap(p) => p.source_type(),
        }
    }
}

impl From<SmoothScrollParams> for GestureParams {
    fn from(params: SmoothScrollParams) -> Self {
        GestureParams::SmoothScroll(params)
    }
}

impl From<PinchParams> for GestureParams {
    fn from(params: PinchParams) -> Self {
        GestureParams::Pinch(params)
    }
}

impl From<TapParams> for GestureParams {
    fn from(params: TapParams) -> Self {
        GestureParams::Tap(params)
    }
}
