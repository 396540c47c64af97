//! In-memory itinerary data.

use std::collections::{HashMap, HashSet};

use ibf_core::{ItineraryLookup, LegId, SopId};

/// Segment counts and bare-direct flags per `(leg, sop)`.
///
/// Unlisted SOPs are single-segment and not bare direct.
#[derive(Debug, Clone, Default)]
pub struct ItineraryTable {
    segments: HashMap<(LegId, SopId), usize>,
    bare_direct: HashSet<(LegId, SopId)>,
}

impl ItineraryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of segments of a SOP.
    pub fn with_segments(mut self, leg: LegId, sop: SopId, segments: usize) -> Self {
        self.segments.insert((leg, sop), segments);
        self
    }

    /// Marks a SOP as a bare direct itinerary.
    pub fn with_bare_direct(mut self, leg: LegId, sop: SopId) -> Self {
        self.bare_direct.insert((leg, sop));
        self
    }
}

impl ItineraryLookup for ItineraryTable {
    fn segment_count(&self, leg: LegId, sop: SopId) -> usize {
        self.segments.get(&(leg, sop)).copied().unwrap_or(1)
    }

    fn is_bare_direct(&self, leg: LegId, sop: SopId) -> bool {
        self.bare_direct.contains(&(leg, sop))
    }
}
