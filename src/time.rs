//! Monotonic Timestamps
//!
//! Gestures never read a clock themselves. Every progress step is handed a
//! [`Timestamp`] by its caller, which keeps synthesis deterministic: the same
//! parameters stepped at the same timestamps always produce the same events.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::time::Duration;

/// A point on a monotonic timeline, measured from an arbitrary origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The origin of the timeline
    pub const ZERO: Timestamp = Timestamp(Duration::ZERO);

    /// Timestamp at `millis` milliseconds past the origin
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Timestamp at `micros` microseconds past the origin
    pub const fn from_micros(micros: u64) -> Self {
        Self(Duration::from_micros(micros))
    }

    /// Timestamp at `secs` seconds past the origin
    ///
    /// Negative and non-finite inputs saturate to the origin.
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Self(Duration::from_secs_f64(secs))
        } else {
            Self::ZERO
        }
    }

    /// Offset from the origin
    pub fn since_origin(&self) -> Duration {
        self.0
    }

    /// Seconds past the origin
    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Whole microseconds past the origin
    pub fn as_micros(&self) -> u64 {
        self.0.as_micros() as u64
    }

    /// Time elapsed since `earlier`, or zero if `earlier` is later than `self`
    pub fn saturating_duration_since(&self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

impl AddAssign<Duration> for Timestamp {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs;
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}ms", self.0.as_secs_f64() * 1000.0)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_micros())
    }
}
