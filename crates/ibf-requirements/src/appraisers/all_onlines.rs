//! Requirement: enough online options of the requesting carrier.

use std::collections::HashSet;

use ibf_core::{BasicAppraiserScore, OnlineClassifier, SopCombination};
use ibf_swapper::{Appraiser, Blackboard};

/// Online combinations of the requesting carrier are MUST_HAVE; satisfied
/// once the desired number of them is retained.
#[derive(Debug)]
pub struct AllOnlinesForCarrier {
    classifier: Box<dyn OnlineClassifier>,
    target: usize,
    collected: HashSet<SopCombination>,
}

impl AllOnlinesForCarrier {
    pub fn new(classifier: Box<dyn OnlineClassifier>) -> Self {
        Self {
            classifier,
            target: 0,
            collected: HashSet::new(),
        }
    }

    pub fn set_target_count(&mut self, count: usize) {
        self.target = count;
    }

    pub fn target_count(&self) -> usize {
        self.target
    }

    /// Number of retained online combinations.
    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }
}

impl Appraiser<SopCombination> for AllOnlinesForCarrier {
    fn rate(
        &mut self,
        combination: &SopCombination,
        _blackboard: &mut Blackboard<SopCombination>,
    ) -> BasicAppraiserScore {
        if !self.classifier.is_online(combination) {
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
        if self.classifier.is_online(combination) {
            assert!(
                self.collected.remove(combination),
                "{} was never rated",
                combination
            );
        }
    }

    fn is_satisfied(&self) -> bool {
        self.collected.len() >= self.target
    }

    fn describe(&self) -> String {
        "RC online options preferred".to_string()
    }
}

#[cfg(test)]
mod tests {
    use ibf_swapper::Swapper;
    use ibf_test::{comb, OnlineTable};

    use super::*;

    #[test]
    fn test_online_combinations_are_collected() {
        let table = OnlineTable::new()
            .with_online(0, 0)
            .with_online(1, 0)
            .with_online(1, 1);
        let mut appraiser = AllOnlinesForCarrier::new(Box::new(table));
        appraiser.set_target_count(2);

        let mut swapper = Swapper::new(4);
        let handle = swapper.add_appraiser(appraiser, 1);

        swapper.add_item(comb(&[0, 0]));
        swapper.add_item(comb(&[2, 0]));
        assert_eq!(swapper.appraiser(handle).collected_count(), 1);
        assert!(!swapper.appraiser(handle).is_satisfied());
        assert_eq!(
            swapper.item_score(&comb(&[2, 0])).map(|s| s[0]),
            Some(BasicAppraiserScore::ignore())
        );

        swapper.add_item(comb(&[0, 1]));
        assert!(swapper.appraiser(handle).is_satisfied());
        assert_eq!(swapper.appraiser(handle).target_count(), 2);
    }

    #[test]
    fn test_zero_target_is_satisfied() {
        let appraiser = AllOnlinesForCarrier::new(Box::new(OnlineTable::new()));
        assert!(appraiser.is_satisfied());
    }
}
