//! Number appraisers shared by the mediator and swapper tests.

use std::collections::HashSet;

use ibf_core::BasicAppraiserScore;

use crate::appraiser::{Appraiser, Blackboard};

/// MUST_HAVE for even numbers, IGNORE for odd ones.
#[derive(Debug, Default)]
pub struct AllEven {
    rated: HashSet<i32>,
}

impl Appraiser<i32> for AllEven {
    fn rate(&mut self, item: &i32, _blackboard: &mut Blackboard<i32>) -> BasicAppraiserScore {
        assert!(self.rated.insert(*item), "{} rated twice", item);
        if item % 2 == 0 {
            BasicAppraiserScore::must_have(0)
        } else {
            BasicAppraiserScore::ignore()
        }
    }

    fn retract(&mut self, item: &i32, _blackboard: &mut Blackboard<i32>) {
        assert!(self.rated.remove(item), "{} was never rated", item);
    }

    fn is_satisfied(&self) -> bool {
        self.rated.iter().all(|n| n % 2 == 0)
    }

    fn describe(&self) -> String {
        "All even".to_string()
    }
}

/// MUST_HAVE for numbers above 100 while at most three are held, then
/// NICE_TO_HAVE for all of them.
#[derive(Debug, Default)]
pub struct ThreeAbove100 {
    above: HashSet<i32>,
    others: HashSet<i32>,
}

impl ThreeAbove100 {
    const WANTED: usize = 3;

    fn current_score(&self) -> BasicAppraiserScore {
        if self.above.len() <= Self::WANTED {
            BasicAppraiserScore::must_have(0)
        } else {
            BasicAppraiserScore::nice_to_have(0)
        }
    }

    fn rescore_all_except(&self, item: i32, blackboard: &mut Blackboard<i32>) {
        for &other in self.above.iter().filter(|&&n| n != item) {
            blackboard.update_value(other, self.current_score());
        }
    }
}

impl Appraiser<i32> for ThreeAbove100 {
    fn rate(&mut self, item: &i32, blackboard: &mut Blackboard<i32>) -> BasicAppraiserScore {
        if *item <= 100 {
            assert!(self.others.insert(*item), "{} rated twice", item);
            return BasicAppraiserScore::ignore();
        }
        assert!(self.above.insert(*item), "{} rated twice", item);
        if self.above.len() == Self::WANTED + 1 {
            self.rescore_all_except(*item, blackboard);
        }
        self.current_score()
    }

    fn retract(&mut self, item: &i32, blackboard: &mut Blackboard<i32>) {
        if *item <= 100 {
            assert!(self.others.remove(item), "{} was never rated", item);
            return;
        }
        assert!(self.above.remove(item), "{} was never rated", item);
        if self.above.len() == Self::WANTED {
            self.rescore_all_except(*item, blackboard);
        }
    }

    fn is_satisfied(&self) -> bool {
        self.above.len() >= Self::WANTED
    }

    fn describe(&self) -> String {
        "Three above 100".to_string()
    }
}

/// MUST_HAVE for everything.
#[derive(Debug, Default)]
pub struct TakeAll;

impl Appraiser<i32> for TakeAll {
    fn rate(&mut self, _item: &i32, _blackboard: &mut Blackboard<i32>) -> BasicAppraiserScore {
        BasicAppraiserScore::must_have(0)
    }

    fn retract(&mut self, _item: &i32, _blackboard: &mut Blackboard<i32>) {}

    fn is_satisfied(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "Take all".to_string()
    }
}

/// NICE_TO_HAVE ranked by the negated value.
#[derive(Debug, Default)]
pub struct SmallerIsBetter;

impl Appraiser<i32> for SmallerIsBetter {
    fn rate(&mut self, item: &i32, _blackboard: &mut Blackboard<i32>) -> BasicAppraiserScore {
        BasicAppraiserScore::nice_to_have(-i64::from(*item))
    }

    fn retract(&mut self, _item: &i32, _blackboard: &mut Blackboard<i32>) {}

    fn is_satisfied(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "Smaller is better".to_string()
    }
}

/// Misbehaving appraiser pushing an edit for the item it is rating.
#[derive(Debug, Default)]
pub struct EditsItself;

impl Appraiser<i32> for EditsItself {
    fn rate(&mut self, item: &i32, blackboard: &mut Blackboard<i32>) -> BasicAppraiserScore {
        blackboard.update_value(*item, BasicAppraiserScore::must_have(0));
        BasicAppraiserScore::ignore()
    }

    fn retract(&mut self, _item: &i32, _blackboard: &mut Blackboard<i32>) {}

    fn is_satisfied(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "Edits itself".to_string()
    }
}
