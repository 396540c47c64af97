//! Tie-break: earlier found options are better.

use std::collections::HashMap;

use ibf_core::{BasicAppraiserScore, SopCombination};
use ibf_swapper::{Appraiser, Blackboard};

/// NICE_TO_HAVE ranked by the negated arrival sequence number. Options are
/// generated roughly cheapest first, so earlier ones rank higher.
#[derive(Debug, Default)]
pub struct EarlierOptionsAreBetter {
    next_sequence: u64,
    sequences: HashMap<SopCombination, u64>,
}

impl EarlierOptionsAreBetter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number given to a tracked combination.
    pub fn sequence(&self, combination: &SopCombination) -> Option<u64> {
        self.sequences.get(combination).copied()
    }
}

impl Appraiser<SopCombination> for EarlierOptionsAreBetter {
    /// # Panics
    /// Panics when the sequence number no longer fits the minor rank.
    fn rate(
        &mut self,
        combination: &SopCombination,
        _blackboard: &mut Blackboard<SopCombination>,
    ) -> BasicAppraiserScore {
        let sequence = self.next_sequence;
        self.next_sequence = sequence
            .checked_add(1)
            .unwrap_or_else(|| panic!("sequence number overflow"));
        let rank = i64::try_from(sequence)
            .unwrap_or_else(|_| panic!("sequence number {} overflows the minor rank", sequence));
        let previous = self.sequences.insert(combination.clone(), sequence);
        assert!(previous.is_none(), "{} rated twice", combination);
        BasicAppraiserScore::nice_to_have(-rank)
    }

    fn retract(&mut self, combination: &SopCombination, _blackboard: &mut Blackboard<SopCombination>) {
        assert!(
            self.sequences.remove(combination).is_some(),
            "{} was never rated",
            combination
        );
    }

    fn is_satisfied(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "Earlier options are better".to_string()
    }
}

#[cfg(test)]
mod tests {
    use ibf_swapper::Swapper;
    use ibf_test::comb;

    use super::*;

    #[test]
    fn test_latest_option_is_worst() {
        let mut swapper = Swapper::new(2);
        let handle = swapper.add_appraiser(EarlierOptionsAreBetter::new(), 1);

        swapper.add_item(comb(&[3]));
        swapper.add_item(comb(&[1]));
        assert_eq!(
            swapper.item_score(&comb(&[1])).map(|s| s[0]),
            Some(BasicAppraiserScore::nice_to_have(-1))
        );
        assert_eq!(swapper.appraiser(handle).sequence(&comb(&[3])), Some(0));

        // The newcomer carries the highest sequence and is rejected
        assert_eq!(swapper.add_item(comb(&[2])), Some(comb(&[2])));
        assert_eq!(swapper.appraiser(handle).sequence(&comb(&[2])), None);

        // Sequence numbers keep increasing after a rejection
        swapper.remove_item(&comb(&[1]));
        swapper.add_item(comb(&[5]));
        assert_eq!(swapper.appraiser(handle).sequence(&comb(&[5])), Some(3));
    }
}
