//! Items ordered by combined score, worst first.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use ibf_core::ItemScore;

use crate::appraiser::SwapperItem;

/// Outward map receiving combined-score changes from the mediator.
pub trait ItemScoreMap<I> {
    /// Replaces the combined score of a tracked item.
    fn update_value(&mut self, item: &I, score: ItemScore);
}

impl<I: SwapperItem> ItemScoreMap<I> for HashMap<I, ItemScore> {
    fn update_value(&mut self, item: &I, score: ItemScore) {
        self.insert(item.clone(), score);
    }
}

/// Ordered collection of items keyed by `ItemScore`.
///
/// Lookup of the worst item is O(log n). Among equal scores the most
/// recently inserted item is the worse one; rescoring keeps an item's
/// insertion sequence.
#[derive(Debug)]
pub struct ScoreSet<I> {
    ordered: BTreeMap<(ItemScore, Reverse<u64>), I>,
    index: HashMap<I, (ItemScore, u64)>,
    next_sequence: u64,
}

impl<I: SwapperItem> Default for ScoreSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: SwapperItem> ScoreSet<I> {
    pub fn new() -> Self {
        Self {
            ordered: BTreeMap::new(),
            index: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Inserts a new item.
    ///
    /// # Panics
    /// Panics if the item is already present.
    pub fn insert(&mut self, item: I, score: ItemScore) {
        assert!(
            !self.index.contains_key(&item),
            "item {:?} is already in the score set",
            item
        );
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.ordered
            .insert((score.clone(), Reverse(sequence)), item.clone());
        self.index.insert(item, (score, sequence));
    }

    /// Removes an item and returns its score.
    pub fn remove(&mut self, item: &I) -> Option<ItemScore> {
        let (score, sequence) = self.index.remove(item)?;
        self.ordered.remove(&(score.clone(), Reverse(sequence)));
        Some(score)
    }

    /// The worst-scored item.
    pub fn worst(&self) -> Option<(&I, &ItemScore)> {
        self.ordered
            .iter()
            .next()
            .map(|((score, _), item)| (item, score))
    }

    /// The best-scored item.
    pub fn best(&self) -> Option<(&I, &ItemScore)> {
        self.ordered
            .iter()
            .next_back()
            .map(|((score, _), item)| (item, score))
    }

    pub fn get(&self, item: &I) -> Option<&ItemScore> {
        self.index.get(item).map(|(score, _)| score)
    }

    pub fn contains(&self, item: &I) -> bool {
        self.index.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterates from the worst item to the best.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&I, &ItemScore)> {
        self.ordered.iter().map(|((score, _), item)| (item, score))
    }
}

impl<I: SwapperItem> ItemScoreMap<I> for ScoreSet<I> {
    /// # Panics
    /// Panics if the item is not present.
    fn update_value(&mut self, item: &I, score: ItemScore) {
        let (current, sequence) = self
            .index
            .get_mut(item)
            .unwrap_or_else(|| panic!("score update for item {:?} not in the score set", item));
        if *current == score {
            return;
        }
        let old_key = (std::mem::replace(current, score.clone()), Reverse(*sequence));
        let sequence = *sequence;
        self.ordered.remove(&old_key);
        self.ordered.insert((score, Reverse(sequence)), item.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibf_core::BasicAppraiserScore;

    fn score(rank: i64) -> ItemScore {
        ItemScore::from_ranked([BasicAppraiserScore::nice_to_have(rank)])
    }

    #[test]
    fn test_worst_and_best() {
        let mut set = ScoreSet::new();
        set.insert(1, score(5));
        set.insert(2, score(-5));
        set.insert(3, score(0));

        assert_eq!(set.worst().map(|(i, _)| *i), Some(2));
        assert_eq!(set.best().map(|(i, _)| *i), Some(1));
        let order: Vec<i32> = set.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_newest_is_worst() {
        let mut set = ScoreSet::new();
        set.insert(10, score(0));
        set.insert(20, score(0));
        set.insert(30, score(0));

        let order: Vec<i32> = set.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![30, 20, 10]);
    }

    #[test]
    fn test_update_value_reorders_and_keeps_sequence() {
        let mut set = ScoreSet::new();
        set.insert(1, score(0));
        set.insert(2, score(3));

        set.update_value(&2, score(-1));
        assert_eq!(set.worst().map(|(i, _)| *i), Some(2));

        // Back to a tie: the older item wins it
        set.update_value(&2, score(0));
        assert_eq!(set.worst().map(|(i, _)| *i), Some(2));
        assert_eq!(set.get(&2), Some(&score(0)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut set = ScoreSet::new();
        set.insert(1, score(1));
        set.insert(2, score(2));

        assert_eq!(set.remove(&1), Some(score(1)));
        assert_eq!(set.remove(&1), None);
        assert_eq!(set.worst().map(|(i, _)| *i), Some(2));
        assert!(!set.contains(&1));
    }

    #[test]
    #[should_panic(expected = "already in the score set")]
    fn test_duplicate_insert_panics() {
        let mut set = ScoreSet::new();
        set.insert(1, score(1));
        set.insert(1, score(2));
    }

    #[test]
    #[should_panic(expected = "not in the score set")]
    fn test_update_missing_panics() {
        let mut set: ScoreSet<i32> = ScoreSet::new();
        set.update_value(&4, score(0));
    }
}
