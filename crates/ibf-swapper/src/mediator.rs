//! Scoring mediator: fans item lifecycle calls out to all appraisers.

use std::fmt;

use ibf_core::ItemScore;
use smallvec::SmallVec;
use tracing::trace;

use crate::appraiser::{Appraiser, AppraiserHandle, AppraiserId, Blackboard, SwapperItem};
use crate::bank::{AppraiserScores, ScoreBank};
use crate::builder::{derive_ranks, AppraiserInfo, DerivedInfo, PriorityScoreBuilder, ScoreBuilder};
use crate::ordered::ItemScoreMap;

/// Owns the appraiser registry and the score bank.
///
/// Appraisers are called in registration order, not priority order, so that
/// a roster always produces the same call sequence. After every single
/// `rate`/`retract` call the appraiser's blackboard is applied: each edit
/// for another tracked item updates the bank, rebuilds that item's combined
/// score and is forwarded to the outward [`ItemScoreMap`]. Edits that do not
/// change the stored score are dropped.
pub struct ScoringMediator<I: SwapperItem, B: ScoreBuilder = PriorityScoreBuilder> {
    appraisers: Vec<Box<dyn Appraiser<I>>>,
    infos: Vec<AppraiserInfo>,
    derived: Vec<DerivedInfo>,
    bank: ScoreBank<I>,
    builder: B,
}

impl<I: SwapperItem> Default for ScoringMediator<I, PriorityScoreBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: SwapperItem> ScoringMediator<I, PriorityScoreBuilder> {
    pub fn new() -> Self {
        Self::with_builder(PriorityScoreBuilder)
    }
}

impl<I: SwapperItem, B: ScoreBuilder> ScoringMediator<I, B> {
    pub fn with_builder(builder: B) -> Self {
        Self {
            appraisers: Vec::new(),
            infos: Vec::new(),
            derived: Vec::new(),
            bank: ScoreBank::new(),
            builder,
        }
    }

    /// Registers an appraiser with a priority.
    ///
    /// # Panics
    /// Panics if the priority is already taken or if items are already
    /// being tracked.
    pub fn add_appraiser<A>(&mut self, appraiser: A, priority: i32) -> AppraiserHandle<A>
    where
        A: Appraiser<I>,
    {
        assert!(
            self.bank.is_empty(),
            "appraisers must be registered before any item is tracked"
        );
        if let Some(taken) = self.infos.iter().position(|info| info.priority == priority) {
            panic!(
                "duplicate appraiser priority {}: already used by '{}'",
                priority,
                self.appraisers[taken].describe()
            );
        }

        let id = AppraiserId::new(self.appraisers.len());
        self.appraisers.push(Box::new(appraiser));
        self.infos.push(AppraiserInfo { priority });
        self.derived = derive_ranks(&self.infos);
        AppraiserHandle::new(id)
    }

    /// Rates a new item with every appraiser and returns its combined score.
    ///
    /// # Panics
    /// Panics if the item is already tracked, or if an appraiser pushes an
    /// edit for the item itself or for an untracked item.
    pub fn before_item_added<M>(&mut self, item: &I, outward: &mut M) -> ItemScore
    where
        M: ItemScoreMap<I> + ?Sized,
    {
        self.bank.open(item.clone(), self.appraisers.len());
        for index in 0..self.appraisers.len() {
            let id = AppraiserId::new(index);
            let mut blackboard = Blackboard::new(id);
            let score = self.appraisers[index].rate(item, &mut blackboard);
            self.bank.set(item, id, score);
            self.apply(blackboard, item, outward);
        }
        self.build(item)
    }

    /// Retracts an item from every appraiser and purges its scores.
    ///
    /// # Panics
    /// Panics if the item is not tracked.
    pub fn before_item_removed<M>(&mut self, item: &I, outward: &mut M)
    where
        M: ItemScoreMap<I> + ?Sized,
    {
        assert!(
            self.bank.contains(item),
            "cannot remove untracked item {:?}",
            item
        );
        for index in 0..self.appraisers.len() {
            let mut blackboard = Blackboard::new(AppraiserId::new(index));
            self.appraisers[index].retract(item, &mut blackboard);
            self.apply(blackboard, item, outward);
        }
        self.bank.purge(item);
    }

    fn apply<M>(&mut self, blackboard: Blackboard<I>, processing: &I, outward: &mut M)
    where
        M: ItemScoreMap<I> + ?Sized,
    {
        let appraiser = blackboard.appraiser();
        for (target, score) in blackboard.into_updates() {
            assert!(
                target != *processing,
                "appraiser '{}' edited the score of the item it is processing",
                self.appraisers[appraiser.index()].describe()
            );
            let previous = self.bank.set(&target, appraiser, score);
            if previous == Some(score) {
                continue;
            }
            let combined = self.build(&target);
            trace!(
                event = "score_updated",
                appraiser = appraiser.index(),
                item = ?target,
                score = %combined,
            );
            outward.update_value(&target, combined);
        }
    }

    /// Builds the combined score of a fully rated item.
    ///
    /// # Panics
    /// Panics if the item is not tracked or not rated by every appraiser.
    pub fn build(&self, item: &I) -> ItemScore {
        let scores = self
            .bank
            .complete_scores(item)
            .unwrap_or_else(|| panic!("item {:?} is not fully rated", item));
        self.builder.build(&scores, &self.derived)
    }

    /// Scores of an item in registration order.
    ///
    /// # Panics
    /// Panics if the item is not tracked.
    pub fn scores_for_item(&self, item: &I) -> AppraiserScores {
        let scores: SmallVec<[_; 8]> = self
            .bank
            .complete_scores(item)
            .unwrap_or_else(|| panic!("no scores for untracked item {:?}", item));
        scores
            .into_iter()
            .enumerate()
            .map(|(index, score)| (AppraiserId::new(index), score))
            .collect()
    }

    /// Registered and derived metadata of an appraiser.
    ///
    /// # Panics
    /// Panics if the id is unknown.
    pub fn info_for_appraiser(&self, id: AppraiserId) -> (AppraiserInfo, DerivedInfo) {
        assert!(
            id.index() < self.appraisers.len(),
            "unknown appraiser {}",
            id
        );
        (self.infos[id.index()], self.derived[id.index()])
    }

    /// Registered appraisers in registration order.
    pub fn appraisers(&self) -> impl Iterator<Item = (AppraiserId, &dyn Appraiser<I>)> {
        self.appraisers
            .iter()
            .enumerate()
            .map(|(index, appraiser)| (AppraiserId::new(index), appraiser.as_ref()))
    }

    /// Ids ordered from the highest priority down.
    pub fn ids_by_rank(&self) -> Vec<AppraiserId> {
        let mut ids: Vec<AppraiserId> = (0..self.appraisers.len()).map(AppraiserId::new).collect();
        ids.sort_by_key(|id| self.derived[id.index()].rank);
        ids
    }

    /// Borrows a registered appraiser by its typed handle.
    pub fn appraiser<A: Appraiser<I>>(&self, handle: AppraiserHandle<A>) -> &A {
        let appraiser: &dyn Appraiser<I> = self.appraisers[handle.id().index()].as_ref();
        appraiser
            .as_any()
            .downcast_ref::<A>()
            .unwrap_or_else(|| panic!("appraiser handle {} does not match its type", handle.id()))
    }

    /// Mutably borrows a registered appraiser.
    ///
    /// Meant for configuration before items are tracked; changes made here
    /// do not rescore tracked items.
    pub fn appraiser_mut<A: Appraiser<I>>(&mut self, handle: AppraiserHandle<A>) -> &mut A {
        let appraiser: &mut dyn Appraiser<I> = self.appraisers[handle.id().index()].as_mut();
        appraiser
            .as_any_mut()
            .downcast_mut::<A>()
            .unwrap_or_else(|| panic!("appraiser handle {} does not match its type", handle.id()))
    }

    pub fn are_all_appraisers_satisfied(&self) -> bool {
        self.appraisers.iter().all(|appraiser| appraiser.is_satisfied())
    }

    pub fn appraisers_count(&self) -> usize {
        self.appraisers.len()
    }

    pub fn is_tracked(&self, item: &I) -> bool {
        self.bank.contains(item)
    }

    pub fn tracked_count(&self) -> usize {
        self.bank.len()
    }
}

impl<I: SwapperItem, B: ScoreBuilder> fmt::Debug for ScoringMediator<I, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringMediator")
            .field("appraisers", &self.appraisers)
            .field("infos", &self.infos)
            .field("tracked", &self.bank.len())
            .field("builder", &self.builder)
            .finish()
    }
}

#[cfg(test)]
#[path = "mediator_tests.rs"]
mod tests;
