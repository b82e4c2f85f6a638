//! Gesture Queue
//!
//! FIFO of pending gestures, each paired with the callback that receives its
//! terminal result. The front entry is the active gesture.

use crate::gesture::{GestureResult, SyntheticGesture};
use std::collections::VecDeque;
use std::fmt;

/// Completion callback, invoked exactly once with the terminal result
pub type CompletionCallback = Box<dyn FnOnce(GestureResult)>;

/// One queued gesture
pub(super) struct QueueEntry {
    pub(super) sequence: u64,
    pub(super) gesture: SyntheticGesture,
    pub(super) callback: CompletionCallback,
}

impl fmt::Debug for QueueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueEntry")
            .field("sequence", &self.sequence)
            .field("gesture", &self.gesture.gesture_type())
            .finish_non_exhaustive()
    }
}

/// Ordered gesture queue with monotonically increasing sequence numbers
#[derive(Debug, Default)]
pub(super) struct GestureQueue {
    entries: VecDeque<QueueEntry>,
    next_sequence: u64,
}

impl GestureQueue {
    /// Append a gesture, returning its sequence number
    pub(super) fn push(&mut self, gesture: SyntheticGesture, callback: CompletionCallback) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push_back(QueueEntry {
            sequence,
            gesture,
            callback,
        });
        sequence
    }

    /// Active entry
    pub(super) fn front_mut(&mut self) -> Option<&mut QueueEntry> {
        self.entries.front_mut()
    }

    /// Active entry, read-only
    pub(super) fn front(&self) -> Option<&QueueEntry> {
        self.entries.front()
    }

    /// Remove the active entry
    pub(super) fn pop(&mut self) -> Option<QueueEntry> {
        self.entries.pop_front()
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::TapParams;
    use kurbo::Point;

    fn tap() -> SyntheticGesture {
        SyntheticGesture::new(TapParams::new(Point::ZERO, 10).unwrap().into())
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let mut queue = GestureQueue::default();
        assert_eq!(queue.push(tap(), Box::new(|_| {})), 0);
        assert_eq!(queue.push(tap(), Box::new(|_| {})), 1);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.pop().map(|e| e.sequence), Some(0));
        assert_eq!(queue.push(tap(), Box::new(|_| {})), 2);
        assert_eq!(queue.front().map(|e| e.sequence), Some(1));
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = GestureQueue::default();
        assert!(queue.is_empty());
        assert!(queue.front_mut().is_none());
        assert!(queue.pop().is_none());
    }
}
