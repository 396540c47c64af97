//! Fixed-capacity admission controller.

use std::fmt;
use std::rc::Rc;

use ibf_core::{BasicAppraiserScore, ItemScore};
use tracing::debug;

use crate::appraiser::{Appraiser, AppraiserHandle, SwapperItem};
use crate::bank::AppraiserScores;
use crate::builder::{PriorityScoreBuilder, ScoreBuilder};
use crate::mediator::ScoringMediator;
use crate::observer::{ObserverId, ObserverList, SwapperObserver};
use crate::ordered::ScoreSet;

/// Result of offering an item to a [`Swapper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome<I> {
    /// The swapper had room; nothing left.
    Added,
    /// The item was admitted and the worst member was evicted.
    Swapped {
        evicted: I,
        /// Scores of the evicted item, captured before it was retracted.
        scores: AppraiserScores,
    },
    /// The offered item itself scored worst and was not kept.
    Rejected { scores: AppraiserScores },
}

impl<I> AddOutcome<I> {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, AddOutcome::Rejected { .. })
    }
}

/// Bounded multi-criteria container.
///
/// Every offered item is rated by all appraisers through the mediator and
/// inserted into the ordered score set. When the set overflows, the worst
/// item is retracted and dropped; among equal scores the newest item is the
/// worst, so a newcomer that merely ties is rejected.
///
/// # Examples
///
/// ```
/// use ibf_core::BasicAppraiserScore;
/// use ibf_swapper::{Appraiser, Blackboard, Swapper};
///
/// #[derive(Debug)]
/// struct Bigger;
///
/// impl Appraiser<u32> for Bigger {
///     fn rate(&mut self, item: &u32, _: &mut Blackboard<u32>) -> BasicAppraiserScore {
///         BasicAppraiserScore::nice_to_have(i64::from(*item))
///     }
///     fn retract(&mut self, _: &u32, _: &mut Blackboard<u32>) {}
///     fn is_satisfied(&self) -> bool { true }
///     fn describe(&self) -> String { "Bigger is better".into() }
/// }
///
/// let mut swapper = Swapper::new(2);
/// swapper.add_appraiser(Bigger, 1);
/// assert_eq!(swapper.add_item(5), None);
/// assert_eq!(swapper.add_item(9), None);
/// assert_eq!(swapper.add_item(7), Some(5));
/// assert_eq!(swapper.add_item(1), Some(1));
/// ```
pub struct Swapper<I: SwapperItem, B: ScoreBuilder = PriorityScoreBuilder> {
    capacity: usize,
    mediator: ScoringMediator<I, B>,
    items: ScoreSet<I>,
    observers: ObserverList<I>,
    no_progress: u64,
}

impl<I: SwapperItem> Swapper<I, PriorityScoreBuilder> {
    /// Creates an empty swapper.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_builder(capacity, PriorityScoreBuilder)
    }
}

impl<I: SwapperItem, B: ScoreBuilder> Swapper<I, B> {
    /// Creates an empty swapper with a custom score-combination policy.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_builder(capacity: usize, builder: B) -> Self {
        assert!(capacity > 0, "swapper capacity must be positive");
        Self {
            capacity,
            mediator: ScoringMediator::with_builder(builder),
            items: ScoreSet::new(),
            observers: ObserverList::new(),
            no_progress: 0,
        }
    }

    /// Registers an appraiser. See [`ScoringMediator::add_appraiser`].
    pub fn add_appraiser<A: Appraiser<I>>(&mut self, appraiser: A, priority: i32) -> AppraiserHandle<A> {
        self.mediator.add_appraiser(appraiser, priority)
    }

    /// Offers an item and reports what happened to it.
    ///
    /// # Panics
    /// Panics if the item is the sentinel (`I::default()`) or already present.
    pub fn add(&mut self, item: I) -> AddOutcome<I> {
        assert!(item != I::default(), "cannot add the sentinel item");
        assert!(
            !self.items.contains(&item),
            "item {:?} is already in the swapper",
            item
        );

        let score = self.mediator.before_item_added(&item, &mut self.items);
        self.items.insert(item.clone(), score);

        if self.items.len() <= self.capacity {
            self.no_progress = 0;
            debug!(event = "item_added", item = ?item, size = self.items.len());
            self.observers.fire_added(&item);
            return AddOutcome::Added;
        }

        let worst = match self.items.worst() {
            Some((worst, _)) => worst.clone(),
            None => unreachable!("an overflowing score set has a worst item"),
        };
        let scores = self.mediator.scores_for_item(&worst);
        self.mediator.before_item_removed(&worst, &mut self.items);
        self.items.remove(&worst);

        if worst == item {
            self.no_progress += 1;
            debug!(
                event = "item_rejected",
                item = ?item,
                no_progress = self.no_progress,
            );
            return AddOutcome::Rejected { scores };
        }

        self.no_progress = 0;
        debug!(event = "item_swapped", item = ?item, evicted = ?worst);
        self.observers.fire_added(&item);
        self.observers.fire_removed(&worst);
        AddOutcome::Swapped {
            evicted: worst,
            scores,
        }
    }

    /// Offers an item and returns whatever left the swapper: the evicted
    /// item, the offered item itself when it was rejected, or `None`.
    ///
    /// # Panics
    /// Same as [`add`](Self::add).
    pub fn add_item(&mut self, item: I) -> Option<I> {
        let offered = item.clone();
        match self.add(item) {
            AddOutcome::Added => None,
            AddOutcome::Swapped { evicted, .. } => Some(evicted),
            AddOutcome::Rejected { .. } => Some(offered),
        }
    }

    /// Removes a member explicitly.
    ///
    /// # Panics
    /// Panics if the item is not present.
    pub fn remove_item(&mut self, item: &I) {
        assert!(
            self.items.contains(item),
            "item {:?} is not in the swapper",
            item
        );
        self.mediator.before_item_removed(item, &mut self.items);
        self.items.remove(item);
        debug!(event = "item_removed", item = ?item, size = self.items.len());
        self.observers.fire_removed(item);
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn are_all_appraisers_satisfied(&self) -> bool {
        self.mediator.are_all_appraisers_satisfied()
    }

    /// Full and every appraiser satisfied.
    pub fn is_done(&self) -> bool {
        self.is_full() && self.are_all_appraisers_satisfied()
    }

    pub fn contains(&self, item: &I) -> bool {
        self.items.contains(item)
    }

    /// Combined score of a member.
    pub fn item_score(&self, item: &I) -> Option<&ItemScore> {
        self.items.get(item)
    }

    /// Per-appraiser scores of a member, highest priority first, paired
    /// with the appraiser descriptions.
    ///
    /// # Panics
    /// Panics if the item is not present.
    pub fn appraiser_scores_for_item(&self, item: &I) -> Vec<(String, BasicAppraiserScore)> {
        let scores = self.mediator.scores_for_item(item);
        let names: Vec<String> = self
            .mediator
            .appraisers()
            .map(|(_, appraiser)| appraiser.describe())
            .collect();
        self.mediator
            .ids_by_rank()
            .into_iter()
            .map(|id| (names[id.index()].clone(), scores[id.index()].1))
            .collect()
    }

    /// The current worst member.
    pub fn worst(&self) -> Option<(&I, &ItemScore)> {
        self.items.worst()
    }

    /// Iterates members from the worst to the best.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&I, &ItemScore)> {
        self.items.iter()
    }

    pub fn mediator(&self) -> &ScoringMediator<I, B> {
        &self.mediator
    }

    pub fn appraiser<A: Appraiser<I>>(&self, handle: AppraiserHandle<A>) -> &A {
        self.mediator.appraiser(handle)
    }

    /// See [`ScoringMediator::appraiser_mut`].
    pub fn appraiser_mut<A: Appraiser<I>>(&mut self, handle: AppraiserHandle<A>) -> &mut A {
        self.mediator.appraiser_mut(handle)
    }

    /// Consecutive rejected offers since the last accepted one.
    pub fn no_progress_iterations_count(&self) -> u64 {
        self.no_progress
    }

    pub fn reset_no_progress_iterations_count(&mut self) {
        self.no_progress = 0;
    }

    pub fn add_observer(&mut self, observer: Rc<dyn SwapperObserver<I>>) -> ObserverId {
        self.observers.add(observer)
    }

    /// Returns false if the observer was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }
}

impl<I: SwapperItem, B: ScoreBuilder> fmt::Debug for Swapper<I, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Swapper")
            .field("capacity", &self.capacity)
            .field("size", &self.items.len())
            .field("no_progress", &self.no_progress)
            .field("mediator", &self.mediator)
            .field("observers", &self.observers)
            .finish()
    }
}

#[cfg(test)]
#[path = "swapper_tests.rs"]
mod tests;
