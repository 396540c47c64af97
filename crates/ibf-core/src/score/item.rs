//! ItemScore - combined score of one item across all appraisers

use std::fmt;
use std::ops::Index;

use smallvec::SmallVec;

use super::BasicAppraiserScore;

/// Combined score of an item.
///
/// Holds one [`BasicAppraiserScore`] per appraiser, positioned by the
/// appraiser's dense rank: index 0 belongs to the highest-priority appraiser.
/// Comparison is lexicographic, so a higher-priority appraiser always
/// dominates the ones below it.
///
/// # Examples
///
/// ```
/// use ibf_core::{BasicAppraiserScore, ItemScore};
///
/// let a = ItemScore::from_ranked([BasicAppraiserScore::must_have(0), BasicAppraiserScore::nice_to_have(-500)]);
/// let b = ItemScore::from_ranked([BasicAppraiserScore::ignore(), BasicAppraiserScore::nice_to_have(0)]);
///
/// assert!(a > b);
/// assert_eq!(a.len(), 2);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ItemScore {
    ranked: SmallVec<[BasicAppraiserScore; 8]>,
}

impl ItemScore {
    /// Creates an item score of `len` neutral entries.
    pub fn neutral(len: usize) -> Self {
        ItemScore {
            ranked: SmallVec::from_elem(BasicAppraiserScore::IGNORE, len),
        }
    }

    /// Creates an item score from scores already ordered by rank.
    pub fn from_ranked(scores: impl IntoIterator<Item = BasicAppraiserScore>) -> Self {
        ItemScore {
            ranked: scores.into_iter().collect(),
        }
    }

    /// Sets the score at the given rank.
    ///
    /// # Panics
    /// Panics if `rank >= len()`.
    pub fn set(&mut self, rank: usize, score: BasicAppraiserScore) {
        self.ranked[rank] = score;
    }

    /// Returns the score at the given rank, if any.
    pub fn get(&self, rank: usize) -> Option<&BasicAppraiserScore> {
        self.ranked.get(rank)
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Iterates scores from the highest-priority rank down.
    pub fn iter(&self) -> impl Iterator<Item = &BasicAppraiserScore> {
        self.ranked.iter()
    }
}

impl Index<usize> for ItemScore {
    type Output = BasicAppraiserScore;

    fn index(&self, rank: usize) -> &Self::Output {
        &self.ranked[rank]
    }
}

impl fmt::Debug for ItemScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemScore({})", self)
    }
}

impl fmt::Display for ItemScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for score in &self.ranked {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            f.write_str(&score.short_format())?;
        }
        Ok(())
    }
}
