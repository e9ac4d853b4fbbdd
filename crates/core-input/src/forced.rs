//! Bounded queue of synthetic input units.
//!
//! Macro expansion and tab expansion push here; every consumer drains this
//! queue before looking at live input. A push onto a full queue is dropped
//! and reported to the caller, never blocked on.

use core_events::{FORCED_MAX, KeyUnit};
use std::collections::VecDeque;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct ForcedQueue {
    units: VecDeque<KeyUnit>,
    capacity: usize,
}

impl Default for ForcedQueue {
    fn default() -> Self {
        Self::with_capacity(FORCED_MAX)
    }
}

impl ForcedQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            units: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a unit. Returns false (and drops the unit) when full.
    pub fn push(&mut self, unit: impl Into<KeyUnit>) -> bool {
        if self.units.len() >= self.capacity {
            trace!(target: "input.forced", capacity = self.capacity, "push_dropped");
            return false;
        }
        self.units.push_back(unit.into());
        true
    }

    /// Push each byte of `s` as a character, stopping when full.
    /// Returns how many bytes were accepted.
    pub fn push_str(&mut self, s: &str) -> usize {
        s.bytes()
            .take_while(|b| self.push(KeyUnit::Char(*b)))
            .count()
    }

    pub fn pop(&mut self) -> Option<KeyUnit> {
        self.units.pop_front()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::Command;

    #[test]
    fn fifo_order() {
        let mut q = ForcedQueue::default();
        assert!(q.push(Command::Up));
        assert!(q.push(KeyUnit::Char(b'a')));
        assert_eq!(q.pop(), Some(KeyUnit::Command(Command::Up)));
        assert_eq!(q.pop(), Some(KeyUnit::Char(b'a')));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn overflow_drops_and_reports() {
        let mut q = ForcedQueue::with_capacity(2);
        assert!(q.push(KeyUnit::Null));
        assert!(q.push(KeyUnit::Null));
        assert!(!q.push(Command::Down));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn push_str_truncates_silently() {
        let mut q = ForcedQueue::with_capacity(3);
        assert_eq!(q.push_str("hello"), 3);
        let got: Vec<_> = std::iter::from_fn(|| q.pop()).collect();
        assert_eq!(
            got,
            vec![KeyUnit::Char(b'h'), KeyUnit::Char(b'e'), KeyUnit::Char(b'l')]
        );
    }
}
