//! Threshold predicates deciding when a usage change requires rescoring.

use std::fmt::Debug;

/// Decides whether a part's usage count moving from `old` to `new` changes
/// the score of the combinations holding that part.
pub trait ThresholdPredicate: Debug {
    fn is_crossed(&self, old: usize, new: usize) -> bool;
}

/// Fires when a part becomes unique or stops being unique (1 <-> other).
#[derive(Debug, Clone, Copy, Default)]
pub struct UniquenessCrossing;

impl ThresholdPredicate for UniquenessCrossing {
    fn is_crossed(&self, old: usize, new: usize) -> bool {
        (old == 1) != (new == 1)
    }
}

/// Fires whenever either side of the change exceeds the limit.
#[derive(Debug, Clone, Copy)]
pub struct LimitCrossing {
    pub limit: usize,
}

impl ThresholdPredicate for LimitCrossing {
    fn is_crossed(&self, old: usize, new: usize) -> bool {
        old > self.limit || new > self.limit
    }
}

/// Fires on every change.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyChange;

impl ThresholdPredicate for AnyChange {
    fn is_crossed(&self, old: usize, new: usize) -> bool {
        old != new
    }
}
