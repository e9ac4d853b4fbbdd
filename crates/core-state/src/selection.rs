//! Line-based block selection.
//!
//! Lifecycle: `Unset -> Started -> Ended`, back to `Unset` through
//! [`BlockSelection::unset`]. A block is usable (highlighted, eligible for
//! clipboard operations) only once both bounds are set.
//!
//! Invariants:
//! - When both bounds are set, `start <= end` (enforced on every mark).
//! - `span_len()` is the number of selected lines while active, 0 otherwise.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Unset,
    Started,
    Ended,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockSelection {
    start: Option<usize>,
    end: Option<usize>,
}

impl BlockSelection {
    pub fn state(&self) -> BlockState {
        match (self.start, self.end) {
            (None, None) => BlockState::Unset,
            (Some(_), Some(_)) => BlockState::Ended,
            _ => BlockState::Started,
        }
    }

    pub fn mark_start(&mut self, line: usize) {
        self.start = Some(line);
        self.order();
        trace!(target: "state.block", line, state = ?self.state(), "mark_start");
    }

    pub fn mark_end(&mut self, line: usize) {
        self.end = Some(line);
        self.order();
        trace!(target: "state.block", line, state = ?self.state(), "mark_end");
    }

    fn order(&mut self) {
        if let (Some(s), Some(e)) = (self.start, self.end)
            && e < s
        {
            self.start = Some(e);
            self.end = Some(s);
        }
    }

    /// Forget both bounds. No-op when already unset.
    pub fn unset(&mut self) {
        if self.state() != BlockState::Unset {
            self.start = None;
            self.end = None;
            trace!(target: "state.block", "unset");
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == BlockState::Ended
    }

    /// `(start, end)` inclusive, only while active.
    pub fn range(&self) -> Option<(usize, usize)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }

    pub fn span_len(&self) -> usize {
        self.range().map(|(s, e)| e - s + 1).unwrap_or(0)
    }

    pub fn contains(&self, line: usize) -> bool {
        self.range().is_some_and(|(s, e)| line >= s && line <= e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_before_start_is_swapped() {
        let mut b = BlockSelection::default();
        b.mark_start(5);
        assert_eq!(b.state(), BlockState::Started);
        assert!(!b.is_active());
        b.mark_end(2);
        assert!(b.is_active());
        assert_eq!(b.range(), Some((2, 5)));
        assert_eq!(b.span_len(), 4);
        assert!(b.contains(2) && b.contains(5) && !b.contains(6));
    }

    #[test]
    fn remarking_start_after_end_keeps_order() {
        let mut b = BlockSelection::default();
        b.mark_start(1);
        b.mark_end(3);
        b.mark_start(7);
        assert_eq!(b.range(), Some((3, 7)));
    }

    #[test]
    fn unset_is_idempotent() {
        let mut b = BlockSelection::default();
        b.unset();
        assert_eq!(b, BlockSelection::default());
        b.mark_end(4);
        assert_eq!(b.state(), BlockState::Started);
        b.unset();
        b.unset();
        assert_eq!(b.state(), BlockState::Unset);
        assert_eq!(b.span_len(), 0);
    }

    #[derive(Debug, Clone)]
    enum Mark {
        Start(usize),
        End(usize),
        Unset,
    }

    fn mark() -> impl proptest::strategy::Strategy<Value = Mark> {
        use proptest::prelude::*;
        prop_oneof![
            (0usize..50).prop_map(Mark::Start),
            (0usize..50).prop_map(Mark::End),
            Just(Mark::Unset),
        ]
    }

    proptest::proptest! {
        #[test]
        fn bounds_stay_ordered(marks in proptest::collection::vec(mark(), 0..40)) {
            let mut b = BlockSelection::default();
            for m in marks {
                match m {
                    Mark::Start(l) => b.mark_start(l),
                    Mark::End(l) => b.mark_end(l),
                    Mark::Unset => b.unset(),
                }
                if let Some((s, e)) = b.range() {
                    proptest::prop_assert!(s <= e);
                    proptest::prop_assert_eq!(b.span_len(), e - s + 1);
                } else {
                    proptest::prop_assert_eq!(b.span_len(), 0);
                }
            }
        }
    }
}
