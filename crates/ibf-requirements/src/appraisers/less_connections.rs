//! Tie-break: fewer connections are better.

use std::rc::Rc;

use ibf_core::{BasicAppraiserScore, ItineraryLookup, SopCombination};
use ibf_swapper::{Appraiser, Blackboard};

/// NICE_TO_HAVE ranked by the negated number of connections; a combination
/// using a bare direct itinerary on any leg is WANT_TO_REMOVE.
#[derive(Debug)]
pub struct LessConnectionsIsBetter {
    itineraries: Rc<dyn ItineraryLookup>,
}

impl LessConnectionsIsBetter {
    pub fn new(itineraries: Rc<dyn ItineraryLookup>) -> Self {
        Self { itineraries }
    }

    /// Total connections: segments minus one, summed over legs.
    pub fn connections(&self, combination: &SopCombination) -> usize {
        combination
            .parts()
            .map(|part| {
                self.itineraries
                    .segment_count(part.leg, part.sop)
                    .saturating_sub(1)
            })
            .sum()
    }
}

impl Appraiser<SopCombination> for LessConnectionsIsBetter {
    fn rate(
        &mut self,
        combination: &SopCombination,
        _blackboard: &mut Blackboard<SopCombination>,
    ) -> BasicAppraiserScore {
        let bare_direct = combination
            .parts()
            .any(|part| self.itineraries.is_bare_direct(part.leg, part.sop));
        if bare_direct {
            return BasicAppraiserScore::want_to_remove(0);
        }
        BasicAppraiserScore::nice_to_have(-(self.connections(combination) as i64))
    }

    fn retract(&mut self, _combination: &SopCombination, _blackboard: &mut Blackboard<SopCombination>) {}

    fn is_satisfied(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "Less connections is better".to_string()
    }
}
