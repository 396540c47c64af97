//! Per-item storage of appraiser scores.

use std::collections::HashMap;

use ibf_core::BasicAppraiserScore;
use smallvec::SmallVec;

use crate::appraiser::{AppraiserId, SwapperItem};

/// Scores of one item, one entry per appraiser in registration order.
pub type AppraiserScores = Vec<(AppraiserId, BasicAppraiserScore)>;

type Entry = SmallVec<[Option<BasicAppraiserScore>; 8]>;

/// Map `item -> {appraiser -> score}`.
///
/// An entry is opened when the item starts being rated, filled as each
/// appraiser answers, and purged when the item leaves. While an item is
/// tracked it holds exactly one score per appraiser.
#[derive(Debug)]
pub struct ScoreBank<I> {
    entries: HashMap<I, Entry>,
}

impl<I: SwapperItem> Default for ScoreBank<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: SwapperItem> ScoreBank<I> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Opens an empty entry for `appraisers` scores.
    ///
    /// # Panics
    /// Panics if the item already has an entry.
    pub fn open(&mut self, item: I, appraisers: usize) {
        let previous = self
            .entries
            .insert(item, SmallVec::from_elem(None, appraisers));
        assert!(previous.is_none(), "item is already in the score bank");
    }

    /// Stores a score and returns the previous one.
    ///
    /// # Panics
    /// Panics if the item is not tracked.
    pub fn set(
        &mut self,
        item: &I,
        appraiser: AppraiserId,
        score: BasicAppraiserScore,
    ) -> Option<BasicAppraiserScore> {
        let entry = self
            .entries
            .get_mut(item)
            .unwrap_or_else(|| panic!("score update for untracked item {:?}", item));
        entry[appraiser.index()].replace(score)
    }

    /// Returns the score an appraiser gave to an item.
    pub fn get(&self, item: &I, appraiser: AppraiserId) -> Option<BasicAppraiserScore> {
        self.entries
            .get(item)
            .and_then(|entry| entry.get(appraiser.index()).copied().flatten())
    }

    /// Returns all scores of an item in registration order, or `None` if the
    /// item is untracked or not fully rated yet.
    pub fn complete_scores(&self, item: &I) -> Option<SmallVec<[BasicAppraiserScore; 8]>> {
        self.entries
            .get(item)
            .and_then(|entry| entry.iter().copied().collect())
    }

    /// Removes the entry of an item.
    pub fn purge(&mut self, item: &I) -> bool {
        self.entries.remove(item).is_some()
    }

    pub fn contains(&self, item: &I) -> bool {
        self.entries.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_set_get() {
        let mut bank: ScoreBank<i32> = ScoreBank::new();
        bank.open(5, 2);

        assert!(bank.complete_scores(&5).is_none());
        assert_eq!(
            bank.set(&5, AppraiserId::new(0), BasicAppraiserScore::must_have(1)),
            None
        );
        assert_eq!(
            bank.set(&5, AppraiserId::new(1), BasicAppraiserScore::ignore()),
            None
        );

        assert_eq!(
            bank.get(&5, AppraiserId::new(0)),
            Some(BasicAppraiserScore::must_have(1))
        );
        let scores = bank.complete_scores(&5).unwrap();
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut bank: ScoreBank<i32> = ScoreBank::new();
        bank.open(1, 1);
        bank.set(&1, AppraiserId::new(0), BasicAppraiserScore::must_have(0));
        let previous = bank.set(&1, AppraiserId::new(0), BasicAppraiserScore::nice_to_have(0));
        assert_eq!(previous, Some(BasicAppraiserScore::must_have(0)));
    }

    #[test]
    fn test_purge() {
        let mut bank: ScoreBank<i32> = ScoreBank::new();
        bank.open(1, 1);
        assert!(bank.purge(&1));
        assert!(!bank.purge(&1));
        assert!(bank.is_empty());
    }

    #[test]
    #[should_panic(expected = "already in the score bank")]
    fn test_open_twice_panics() {
        let mut bank: ScoreBank<i32> = ScoreBank::new();
        bank.open(1, 1);
        bank.open(1, 1);
    }

    #[test]
    #[should_panic(expected = "untracked item")]
    fn test_set_untracked_panics() {
        let mut bank: ScoreBank<i32> = ScoreBank::new();
        bank.set(&3, AppraiserId::new(0), BasicAppraiserScore::ignore());
    }
}
