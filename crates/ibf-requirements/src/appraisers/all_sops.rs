//! Requirement: every known SOP appears in at least one retained combination.

use ibf_core::{BasicAppraiserScore, LegId, SopCombination, SopId, SopPart};
use ibf_swapper::{Appraiser, Blackboard};

use crate::usage::{
    AnyChange, SopDecomposer, SopUsageTracker, ThresholdPredicate, UniquenessCrossing,
    UsageChange,
};

/// How combinations without a unique SOP are rated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoverageScoring {
    /// IGNORE: only unique SOP holders matter.
    #[default]
    UniqueSops,
    /// NICE_TO_HAVE ranked by how many SOP repetitions the combination adds.
    SopCounting,
}

/// A combination holding SOPs no other retained combination holds is
/// MUST_HAVE, ranked by the number of such SOPs. Once a second combination
/// covers the SOP both are rescored.
#[derive(Debug)]
pub struct AllSopsRepresented {
    usage: SopUsageTracker,
    scoring: CoverageScoring,
}

impl Default for AllSopsRepresented {
    fn default() -> Self {
        Self::new(CoverageScoring::default())
    }
}

impl AllSopsRepresented {
    pub fn new(scoring: CoverageScoring) -> Self {
        Self {
            usage: SopUsageTracker::new(SopDecomposer::all_legs()),
            scoring,
        }
    }

    pub fn scoring(&self) -> CoverageScoring {
        self.scoring
    }

    /// Registers a SOP that must be covered.
    pub fn add_sop(&mut self, leg: LegId, sop: SopId) {
        self.usage.add_known_part(SopPart::new(leg, sop));
    }

    /// Restricts coverage to SOPs of a single leg.
    ///
    /// # Panics
    /// Panics if combinations are already tracked.
    pub fn set_leg_id_to_track(&mut self, leg: LegId) {
        self.usage.set_decomposer(SopDecomposer::single_leg(leg));
    }

    pub fn leg_id_to_track(&self) -> Option<LegId> {
        self.usage.decomposer().leg()
    }

    pub fn usage(&self) -> &SopUsageTracker {
        &self.usage
    }

    fn score(&self, combination: &SopCombination) -> BasicAppraiserScore {
        let parts = self.usage.parts(combination);
        let unique = parts
            .iter()
            .filter(|part| self.usage.is_known(part) && self.usage.usage(part) == 1)
            .count();
        if unique > 0 {
            return BasicAppraiserScore::must_have(unique as i64);
        }
        match self.scoring {
            CoverageScoring::UniqueSops => BasicAppraiserScore::ignore(),
            CoverageScoring::SopCounting => {
                let repeats: usize = parts
                    .iter()
                    .map(|part| self.usage.usage(part).saturating_sub(1))
                    .sum();
                BasicAppraiserScore::nice_to_have(-(repeats as i64))
            }
        }
    }

    fn fires(&self, old: usize, new: usize) -> bool {
        match self.scoring {
            CoverageScoring::UniqueSops => UniquenessCrossing.is_crossed(old, new),
            CoverageScoring::SopCounting => AnyChange.is_crossed(old, new),
        }
    }

    fn rescore(
        &self,
        changes: &[UsageChange<SopPart>],
        combination: &SopCombination,
        blackboard: &mut Blackboard<SopCombination>,
    ) {
        let affected = self
            .usage
            .affected_holders(changes, combination, |c| self.fires(c.old, c.new));
        for holder in affected {
            let score = self.score(&holder);
            blackboard.update_value(holder, score);
        }
    }
}

impl Appraiser<SopCombination> for AllSopsRepresented {
    fn rate(
        &mut self,
        combination: &SopCombination,
        blackboard: &mut Blackboard<SopCombination>,
    ) -> BasicAppraiserScore {
        let changes = self.usage.add(combination);
        self.rescore(&changes, combination, blackboard);
        self.score(combination)
    }

    fn retract(&mut self, combination: &SopCombination, blackboard: &mut Blackboard<SopCombination>) {
        let changes = self.usage.remove(combination);
        self.rescore(&changes, combination, blackboard);
    }

    fn is_satisfied(&self) -> bool {
        self.usage.unused_parts_count() == 0
    }

    fn describe(&self) -> String {
        match self.scoring {
            CoverageScoring::UniqueSops => "All SOPs represented".to_string(),
            CoverageScoring::SopCounting => "All SOPs represented (SOP counting)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ibf_core::ScoreCategory;
    use ibf_swapper::Swapper;
    use ibf_test::comb;

    use super::*;

    fn registered(scoring: CoverageScoring, legs: usize, sops: usize) -> AllSopsRepresented {
        let mut appraiser = AllSopsRepresented::new(scoring);
        for leg in 0..legs {
            for sop in 0..sops {
                appraiser.add_sop(leg, sop);
            }
        }
        appraiser
    }

    #[test]
    fn test_unique_holders_are_must_have() {
        let mut swapper = Swapper::new(10);
        let handle = swapper.add_appraiser(registered(CoverageScoring::UniqueSops, 2, 2), 1);

        swapper.add_item(comb(&[0, 0]));
        assert_eq!(
            swapper.item_score(&comb(&[0, 0])).map(|s| s[0]),
            Some(BasicAppraiserScore::must_have(2))
        );

        // Shares leg 0 SOP 0: the first combination keeps one unique SOP
        swapper.add_item(comb(&[0, 1]));
        assert_eq!(
            swapper.item_score(&comb(&[0, 0])).map(|s| s[0]),
            Some(BasicAppraiserScore::must_have(1))
        );
        assert_eq!(
            swapper.item_score(&comb(&[0, 1])).map(|s| s[0]),
            Some(BasicAppraiserScore::must_have(1))
        );
        assert!(!swapper.appraiser(handle).is_satisfied());

        swapper.add_item(comb(&[1, 1]));
        assert!(swapper.appraiser(handle).is_satisfied());
        assert_eq!(
            swapper.item_score(&comb(&[0, 1])).map(|s| s[0]),
            Some(BasicAppraiserScore::ignore())
        );
    }

    #[test]
    fn test_coverage_round_trip() {
        let mut swapper = Swapper::new(10);
        let handle = swapper.add_appraiser(registered(CoverageScoring::UniqueSops, 2, 2), 1);

        swapper.add_item(comb(&[0, 0]));
        assert!(!swapper.appraiser(handle).is_satisfied());
        swapper.add_item(comb(&[1, 1]));
        assert!(swapper.appraiser(handle).is_satisfied());

        swapper.remove_item(&comb(&[1, 1]));
        assert!(!swapper.appraiser(handle).is_satisfied());
        assert_eq!(swapper.appraiser(handle).usage().unused_parts_count(), 2);
    }

    #[test]
    fn test_sop_counting_ranks_repeats() {
        let mut swapper = Swapper::new(10);
        swapper.add_appraiser(registered(CoverageScoring::SopCounting, 2, 2), 1);

        swapper.add_item(comb(&[0, 0]));
        swapper.add_item(comb(&[1, 1]));
        swapper.add_item(comb(&[0, 1]));
        swapper.add_item(comb(&[1, 0]));

        for item in [comb(&[0, 0]), comb(&[1, 1]), comb(&[0, 1]), comb(&[1, 0])] {
            let score = swapper.item_score(&item).map(|s| s[0]);
            assert_eq!(score, Some(BasicAppraiserScore::nice_to_have(-2)));
        }

        swapper.remove_item(&comb(&[1, 0]));
        let score = swapper.item_score(&comb(&[0, 0])).map(|s| s[0]);
        assert_eq!(score, Some(BasicAppraiserScore::must_have(1)));
        let score = swapper.item_score(&comb(&[1, 1])).map(|s| s[0]);
        assert_eq!(score, Some(BasicAppraiserScore::must_have(1)));
        let score = swapper.item_score(&comb(&[0, 1])).map(|s| s[0]);
        assert_eq!(score, Some(BasicAppraiserScore::nice_to_have(-2)));
    }

    #[test]
    fn test_unregistered_sops_do_not_make_must_have() {
        let mut swapper = Swapper::new(10);
        swapper.add_appraiser(registered(CoverageScoring::UniqueSops, 1, 1), 1);

        swapper.add_item(comb(&[5]));
        let score = swapper.item_score(&comb(&[5])).map(|s| s[0].category());
        assert_eq!(score, Some(ScoreCategory::Ignore));
    }

    #[test]
    fn test_leg_to_track() {
        let mut appraiser = registered(CoverageScoring::UniqueSops, 2, 2);
        appraiser.set_leg_id_to_track(1);
        assert_eq!(appraiser.leg_id_to_track(), Some(1));
        assert_eq!(appraiser.usage().known_parts_count(), 2);

        let mut swapper = Swapper::new(10);
        let handle = swapper.add_appraiser(appraiser, 1);
        swapper.add_item(comb(&[0, 0]));
        swapper.add_item(comb(&[0, 1]));
        assert!(swapper.appraiser(handle).is_satisfied());
    }
}
