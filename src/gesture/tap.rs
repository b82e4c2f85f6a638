//! Tap Gesture
//!
//! Press at a position, hold for the configured duration, release at the
//! same position. Touch sources produce a touch start/end pair, mouse
//! sources a left-button down/up pair with a click count of one.
//!
//! The hold is measured against step timestamps and the release is stamped
//! exactly `press + duration`, however late the releasing step arrives.

use super::params::TapParams;
use super::{GestureResult, GestureSourceType};
use crate::input::SyntheticPointer;
use crate::target::SyntheticGestureTarget;
use crate::time::Timestamp;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TapState {
    Setup,
    Press,
    WaitingToRelease,
    Done,
}

/// Tap state machine
#[derive(Debug, Clone)]
pub struct TapGesture {
    params: TapParams,
    source_type: GestureSourceType,
    state: TapState,
    pointer: Option<SyntheticPointer>,
    start_time: Timestamp,
}

impl TapGesture {
    /// Create a tap gesture in its initial state
    pub fn new(params: TapParams) -> Self {
        Self {
            source_type: params.source_type(),
            params,
            state: TapState::Setup,
            pointer: None,
            start_time: Timestamp::ZERO,
        }
    }

    /// Parameters this gesture was built from
    pub fn params(&self) -> &TapParams {
        &self.params
    }

    /// Perform one unit of progress
    pub fn forward_input_events(
        &mut self,
        timestamp: Timestamp,
        target: &mut dyn SyntheticGestureTarget,
    ) -> GestureResult {
        if self.state == TapState::Setup {
            self.source_type = self.params.source_type().resolve(target);
            self.state = TapState::Press;
        }

        if self.pointer.is_none() {
            self.pointer = SyntheticPointer::new(self.source_type);
        }
        let Some(pointer) = self.pointer.as_mut() else {
            debug!("Tap cannot be synthesized for source {}", self.source_type);
            return GestureResult::SourceTypeNotImplemented;
        };

        let position = self.params.position();
        let duration = self.params.duration();

        match self.state {
            TapState::Press => {
                let index = pointer.press(position.x, position.y, timestamp).unwrap_or(0);
                pointer.dispatch(target, timestamp);

                if duration.is_zero() {
                    pointer.release(index, timestamp);
                    pointer.dispatch(target, timestamp);
                    self.state = TapState::Done;
                } else {
                    self.start_time = timestamp;
                    self.state = TapState::WaitingToRelease;
                }
                debug!(
                    "Tap pressed at ({}, {}) via {}, holding {:?}",
                    position.x, position.y, self.source_type, duration
                );
            }
            TapState::WaitingToRelease => {
                if timestamp.saturating_duration_since(self.start_time) >= duration {
                    let release_time = self.start_time + duration;
                    pointer.release(0, release_time);
                    pointer.dispatch(target, release_time);
                    self.state = TapState::Done;
                }
            }
            TapState::Setup | TapState::Done => {}
        }

        if self.state == TapState::Done {
            GestureResult::Finished
        } else {
            GestureResult::Running
        }
    }
}
