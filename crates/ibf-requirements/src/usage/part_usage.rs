//! Per-part usage tracking of combinations.

use std::collections::{BTreeSet, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use ibf_core::{LegId, SopCombination, SopPart};
use smallvec::SmallVec;

use super::multimap::CountingMultimap;

/// Splits an item into the parts whose usage is tracked.
pub trait Decomposer<I>: Debug {
    type Part: Clone + Eq + Hash + Debug;

    fn decompose(&self, item: &I) -> SmallVec<[Self::Part; 4]>;

    /// Returns false for parts this decomposer never yields.
    fn accepts(&self, _part: &Self::Part) -> bool {
        true
    }
}

/// Decomposes combinations into `(leg, sop)` parts, optionally keeping a
/// single leg only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SopDecomposer {
    leg: Option<LegId>,
}

impl SopDecomposer {
    pub fn all_legs() -> Self {
        Self { leg: None }
    }

    pub fn single_leg(leg: LegId) -> Self {
        Self { leg: Some(leg) }
    }

    pub fn leg(&self) -> Option<LegId> {
        self.leg
    }
}

impl Decomposer<SopCombination> for SopDecomposer {
    type Part = SopPart;

    fn decompose(&self, item: &SopCombination) -> SmallVec<[SopPart; 4]> {
        item.parts().filter(|part| self.accepts(part)).collect()
    }

    fn accepts(&self, part: &SopPart) -> bool {
        self.leg.map_or(true, |leg| part.leg == leg)
    }
}

/// Usage count transition of one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageChange<P> {
    pub part: P,
    pub old: usize,
    pub new: usize,
}

/// Tracks, per part, the set of held items containing it.
///
/// Known parts are registered up front; the ones no held item covers are
/// "unused". Parts outside the known set are still counted but never
/// reported as unused.
#[derive(Debug)]
pub struct PartUsageTracker<I, D: Decomposer<I>> {
    decomposer: D,
    usage: CountingMultimap<D::Part, I>,
    known: HashSet<D::Part>,
    held: HashSet<I>,
    unused_known: usize,
}

impl<I, D> PartUsageTracker<I, D>
where
    I: Clone + Eq + Hash + Debug,
    D: Decomposer<I>,
{
    pub fn new(decomposer: D) -> Self {
        Self {
            decomposer,
            usage: CountingMultimap::new(),
            known: HashSet::new(),
            held: HashSet::new(),
            unused_known: 0,
        }
    }

    pub fn decomposer(&self) -> &D {
        &self.decomposer
    }

    /// Replaces the decomposer, dropping known parts it does not accept.
    ///
    /// # Panics
    /// Panics if any item is held.
    pub fn set_decomposer(&mut self, decomposer: D) {
        assert!(
            self.held.is_empty(),
            "cannot change the decomposer while items are tracked"
        );
        self.decomposer = decomposer;
        let known: Vec<D::Part> = self.known.drain().collect();
        self.usage = CountingMultimap::new();
        self.unused_known = 0;
        for part in known {
            self.add_known_part(part);
        }
    }

    /// Registers a part that should be covered. Returns false if the part
    /// was already known or is not accepted by the decomposer.
    pub fn add_known_part(&mut self, part: D::Part) -> bool {
        if !self.decomposer.accepts(&part) || !self.known.insert(part.clone()) {
            return false;
        }
        if self.usage.count(&part) == 0 {
            self.unused_known += 1;
        }
        self.usage.add_key(part);
        true
    }

    /// Records a new item and returns the usage change of each of its parts.
    ///
    /// # Panics
    /// Panics if the item is already held.
    pub fn add(&mut self, item: &I) -> Vec<UsageChange<D::Part>> {
        assert!(
            self.held.insert(item.clone()),
            "item {:?} is already tracked for usage",
            item
        );
        let parts = self.decomposer.decompose(item);
        let mut changes = Vec::with_capacity(parts.len());
        for part in parts {
            let new = self.usage.add(part.clone(), item.clone());
            if new == 1 && self.known.contains(&part) {
                self.unused_known -= 1;
            }
            changes.push(UsageChange {
                part,
                old: new - 1,
                new,
            });
        }
        changes
    }

    /// Forgets an item and returns the usage change of each of its parts.
    ///
    /// # Panics
    /// Panics if the item is not held.
    pub fn remove(&mut self, item: &I) -> Vec<UsageChange<D::Part>> {
        assert!(
            self.held.remove(item),
            "item {:?} is not tracked for usage",
            item
        );
        let parts = self.decomposer.decompose(item);
        let mut changes = Vec::with_capacity(parts.len());
        for part in parts {
            let new = self.usage.remove(&part, item);
            if new == 0 && self.known.contains(&part) {
                self.unused_known += 1;
            }
            changes.push(UsageChange {
                part,
                old: new + 1,
                new,
            });
        }
        changes
    }

    /// Distinct holders, other than `item`, of the parts whose change fires.
    pub fn affected_holders<F>(&self, changes: &[UsageChange<D::Part>], item: &I, fires: F) -> Vec<I>
    where
        F: Fn(&UsageChange<D::Part>) -> bool,
    {
        let mut seen: HashSet<&I> = HashSet::new();
        let mut affected = Vec::new();
        for change in changes.iter().filter(|change| fires(change)) {
            for holder in self.usage.values(&change.part) {
                if holder != item && seen.insert(holder) {
                    affected.push(holder.clone());
                }
            }
        }
        affected
    }

    /// Number of held items containing the part.
    pub fn usage(&self, part: &D::Part) -> usize {
        self.usage.count(part)
    }

    /// Held items containing the part.
    pub fn holders(&self, part: &D::Part) -> impl Iterator<Item = &I> {
        self.usage.values(part)
    }

    /// Tracked parts of an item.
    pub fn parts(&self, item: &I) -> SmallVec<[D::Part; 4]> {
        self.decomposer.decompose(item)
    }

    pub fn is_known(&self, part: &D::Part) -> bool {
        self.known.contains(part)
    }

    pub fn known_parts(&self) -> impl Iterator<Item = &D::Part> {
        self.known.iter()
    }

    pub fn known_parts_count(&self) -> usize {
        self.known.len()
    }

    /// Known parts no held item covers.
    pub fn unused_parts_count(&self) -> usize {
        self.unused_known
    }

    /// Known parts no held item covers, in arbitrary order.
    pub fn unused_parts(&self) -> impl Iterator<Item = &D::Part> {
        self.known.iter().filter(move |part| self.usage.count(part) == 0)
    }

    /// Every counted part with its usage, in arbitrary order.
    pub fn counts(&self) -> impl Iterator<Item = (&D::Part, usize)> {
        self.usage.counts()
    }

    pub fn contains(&self, item: &I) -> bool {
        self.held.contains(item)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}

impl<I, D> PartUsageTracker<I, D>
where
    I: Clone + Eq + Hash + Debug,
    D: Decomposer<I, Part = SopPart>,
{
    /// Legs having at least one known or counted part, ascending.
    pub fn legs(&self) -> BTreeSet<LegId> {
        self.usage.counts().map(|(part, _)| part.leg).collect()
    }

    pub fn known_on_leg(&self, leg: LegId) -> usize {
        self.known.iter().filter(|part| part.leg == leg).count()
    }

    pub fn unused_on_leg(&self, leg: LegId) -> usize {
        self.unused_parts().filter(|part| part.leg == leg).count()
    }

    /// Usage counts of the known parts of a leg, ordered by SOP.
    pub fn known_usage_on_leg(&self, leg: LegId) -> Vec<usize> {
        let mut parts: Vec<&SopPart> = self.known.iter().filter(|part| part.leg == leg).collect();
        parts.sort_unstable();
        parts.into_iter().map(|part| self.usage.count(part)).collect()
    }
}
