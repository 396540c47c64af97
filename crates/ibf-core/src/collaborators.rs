//! Contracts of the collaborators the curation core consumes.
//!
//! Combination enumeration, fare pricing and itinerary data live outside of
//! this workspace. The appraisers only see them through these traits.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::combination::{LegId, SopCombination, SopId};

/// Classifies combinations as online options for the requesting carrier.
pub trait OnlineClassifier: Debug {
    fn is_online(&self, combination: &SopCombination) -> bool;
}

/// Itinerary data for a single `(leg, sop)`.
pub trait ItineraryLookup: Debug {
    /// Number of flight segments of the SOP.
    fn segment_count(&self, leg: LegId, sop: SopId) -> usize;

    /// Returns true when the SOP is a bare direct itinerary: a single flight
    /// that stops en route without a change of aircraft.
    fn is_bare_direct(&self, leg: LegId, sop: SopId) -> bool;
}

/// Minimum-connect-time feasibility of a whole combination.
pub trait ConnectTimeCheck: Debug {
    fn is_combinable(&self, combination: &SopCombination) -> bool;
}

/// Read side of the search loop's progress.
pub trait SearchProgress: Debug {
    /// Number of search iterations performed so far. Monotonic.
    fn iterations(&self) -> u64;
}

/// Shared, monotonically increasing iteration counter.
///
/// The search loop keeps one handle and increments it; appraisers hold a
/// clone and only read it.
///
/// ```
/// use ibf_core::{IterationCounter, SearchProgress};
///
/// let counter = IterationCounter::new();
/// let reader = counter.clone();
/// counter.advance(3);
/// counter.increment();
/// assert_eq!(reader.iterations(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IterationCounter {
    count: Rc<Cell<u64>>,
}

impl IterationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.advance(1);
    }

    /// Adds `by` iterations.
    ///
    /// # Panics
    /// Panics if the counter would overflow.
    pub fn advance(&self, by: u64) {
        let next = self
            .count
            .get()
            .checked_add(by)
            .unwrap_or_else(|| panic!("iteration counter overflow"));
        self.count.set(next);
    }
}

impl SearchProgress for IterationCounter {
    fn iterations(&self) -> u64 {
        self.count.get()
    }
}
