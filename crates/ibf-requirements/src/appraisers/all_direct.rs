//! Requirement: all-direct combinations are present, up to what fits.

use std::collections::{BTreeMap, HashSet};

use ibf_core::{BasicAppraiserScore, LegId, SopCombination, SopId, SopPart};
use ibf_swapper::{Appraiser, Blackboard};

/// Combinations built only of registered direct SOPs are MUST_HAVE.
///
/// The target is the number of distinct all-direct combinations, capped by
/// the result-set capacity. It is frozen by
/// [`calculate_target_count`](Self::calculate_target_count); until then the
/// requirement is not requested and counts as satisfied.
#[derive(Debug)]
pub struct AllDirectOptionsRepresented {
    capacity: usize,
    direct: HashSet<SopPart>,
    direct_per_leg: BTreeMap<LegId, usize>,
    target: Option<usize>,
    collected: HashSet<SopCombination>,
}

impl AllDirectOptionsRepresented {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            direct: HashSet::new(),
            direct_per_leg: BTreeMap::new(),
            target: None,
            collected: HashSet::new(),
        }
    }

    /// Registers a direct SOP.
    pub fn add_direct_sop(&mut self, leg: LegId, sop: SopId) {
        if self.direct.insert(SopPart::new(leg, sop)) {
            *self.direct_per_leg.entry(leg).or_insert(0) += 1;
        }
    }

    /// Freezes the target: the product of per-leg direct SOP counts over
    /// the trip's legs, capped by the capacity. A leg without direct SOPs
    /// makes the target zero.
    ///
    /// `legs_count` is widened to cover every leg holding a direct SOP.
    pub fn calculate_target_count(&mut self, legs_count: usize) -> usize {
        let legs = self
            .direct_per_leg
            .keys()
            .next_back()
            .map_or(legs_count, |&last| legs_count.max(last + 1));
        let combinations = if legs == 0 {
            0
        } else {
            (0..legs)
                .map(|leg| self.direct_per_leg.get(&leg).copied().unwrap_or(0))
                .fold(1usize, usize::saturating_mul)
        };
        let target = combinations.min(self.capacity);
        self.target = Some(target);
        target
    }

    pub fn target_count(&self) -> Option<usize> {
        self.target
    }

    pub fn direct_sops_count(&self) -> usize {
        self.direct.len()
    }

    /// Number of retained all-direct combinations.
    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    pub fn is_all_direct(&self, combination: &SopCombination) -> bool {
        !combination.is_empty() && combination.parts().all(|part| self.direct.contains(&part))
    }
}

impl Appraiser<SopCombination> for AllDirectOptionsRepresented {
    fn rate(
        &mut self,
        combination: &SopCombination,
        _blackboard: &mut Blackboard<SopCombination>,
    ) -> BasicAppraiserScore {
        if !self.is_all_direct(combination) {
            return BasicAppraiserScore::ignore();
        }
        assert!(
            self.collected.insert(combination.clone()),
            "{} rated twice",
            combination
        );
        BasicAppraiserScore::must_have(0)
    }

    fn retract(&mut self, combination: &SopCombination, _blackboard: &mut Blackboard<SopCombination>) {
        if self.is_all_direct(combination) {
            assert!(
                self.collected.remove(combination),
                "{} was never rated",
                combination
            );
        }
    }

    fn is_satisfied(&self) -> bool {
        self.target
            .map_or(true, |target| self.collected.len() >= target)
    }

    fn describe(&self) -> String {
        "All direct options represented".to_string()
    }
}
