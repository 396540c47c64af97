//! Tie-break: combinations meeting minimum connect time are better.

use ibf_core::{BasicAppraiserScore, ConnectTimeCheck, SopCombination};
use ibf_swapper::{Appraiser, Blackboard};

/// Demotes combinations violating minimum connect time to last resort.
#[derive(Debug)]
pub struct MctCombinableOptionsAreBetter {
    check: Box<dyn ConnectTimeCheck>,
}

impl MctCombinableOptionsAreBetter {
    pub fn new(check: Box<dyn ConnectTimeCheck>) -> Self {
        Self { check }
    }
}

impl Appraiser<SopCombination> for MctCombinableOptionsAreBetter {
    fn rate(
        &mut self,
        combination: &SopCombination,
        _blackboard: &mut Blackboard<SopCombination>,
    ) -> BasicAppraiserScore {
        if self.check.is_combinable(combination) {
            BasicAppraiserScore::nice_to_have(0)
        } else {
            BasicAppraiserScore::want_to_remove(0)
        }
    }

    fn retract(&mut self, _combination: &SopCombination, _blackboard: &mut Blackboard<SopCombination>) {}

    fn is_satisfied(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "MCT combinable options are better".to_string()
    }
}
