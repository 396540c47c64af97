//! Requirement: no SOP repeats more often than the schedule repeat limit.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use ibf_core::{BasicAppraiserScore, LegId, SearchProgress, SopCombination, SopId, SopPart};
use ibf_swapper::{Appraiser, Blackboard};

use crate::usage::{LimitCrossing, SopDecomposer, SopUsageTracker, ThresholdPredicate, UsageChange};

/// Dispersion of the usage counts of one leg's SOPs.
pub type VariationFn = Box<dyn Fn(&[usize]) -> f64>;

/// Highest dispersion accepted after the given number of search iterations.
pub type BalanceThresholdFn = Box<dyn Fn(u64) -> f64>;

/// Default slope of the balance threshold per search iteration.
pub const DEFAULT_BALANCE_COEFFICIENT: f64 = 0.0004;

/// Population standard deviation divided by the mean; zero when the mean is.
pub fn coefficient_of_variation(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let n = counts.len() as f64;
    let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    variance.sqrt() / mean
}

/// Threshold growing linearly with the iteration count.
pub fn linear_threshold(coefficient: f64) -> BalanceThresholdFn {
    Box::new(move |iterations| coefficient * iterations as f64)
}

/// Caps how many retained combinations may share one SOP.
///
/// A leg whose SOPs cannot spread the requested solutions under the limit
/// (`sops_on_leg * limit < requested_solutions`) is excluded from hard
/// limiting. Excluded legs are only required to be balanced: the
/// dispersion of their SOP usage must not exceed a threshold that loosens
/// as the search goes on.
///
/// Combinations exceeding the limit on hard-limited legs are
/// WANT_TO_REMOVE, ranked by the total excess.
pub struct ScheduleRepeatLimit {
    limit: Option<usize>,
    requested_solutions: usize,
    usage: SopUsageTracker,
    sops_per_leg: BTreeMap<LegId, usize>,
    progress: Rc<dyn SearchProgress>,
    variation: VariationFn,
    threshold: BalanceThresholdFn,
}

impl ScheduleRepeatLimit {
    /// Creates a disabled limit with the default balance strategies.
    pub fn new(requested_solutions: usize, progress: Rc<dyn SearchProgress>) -> Self {
        Self::with_strategies(
            requested_solutions,
            progress,
            Box::new(coefficient_of_variation),
            linear_threshold(DEFAULT_BALANCE_COEFFICIENT),
        )
    }

    pub fn with_strategies(
        requested_solutions: usize,
        progress: Rc<dyn SearchProgress>,
        variation: VariationFn,
        threshold: BalanceThresholdFn,
    ) -> Self {
        Self {
            limit: None,
            requested_solutions,
            usage: SopUsageTracker::new(SopDecomposer::all_legs()),
            sops_per_leg: BTreeMap::new(),
            progress,
            variation,
            threshold,
        }
    }

    /// Enables the limit. Enabling again with the same limit does nothing.
    ///
    /// # Panics
    /// Panics if `limit` is zero, or if the limit changes while
    /// combinations are tracked.
    pub fn enable(&mut self, limit: usize) {
        assert!(limit > 0, "schedule repeat limit must be positive");
        if self.limit == Some(limit) {
            return;
        }
        assert!(
            self.usage.held_count() == 0,
            "schedule repeat limit cannot change while combinations are tracked"
        );
        self.limit = Some(limit);
    }

    pub fn is_enabled(&self) -> bool {
        self.limit.is_some()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Registers a SOP of a leg.
    pub fn add_sop(&mut self, leg: LegId, sop: SopId) {
        if self.usage.add_known_part(SopPart::new(leg, sop)) {
            *self.sops_per_leg.entry(leg).or_insert(0) += 1;
        }
    }

    pub fn sops_on_leg(&self, leg: LegId) -> usize {
        self.sops_per_leg.get(&leg).copied().unwrap_or(0)
    }

    /// Returns true when the leg is judged by balance instead of the limit.
    pub fn is_leg_excluded(&self, leg: LegId) -> bool {
        match self.limit {
            Some(limit) => self.sops_on_leg(leg).saturating_mul(limit) < self.requested_solutions,
            None => false,
        }
    }

    /// Excluded legs among the known ones, ascending.
    pub fn excluded_legs(&self) -> Vec<LegId> {
        self.usage
            .legs()
            .into_iter()
            .filter(|&leg| self.is_leg_excluded(leg))
            .collect()
    }

    /// Returns true when the SOP usage on the leg is balanced enough for
    /// the current search progress.
    pub fn is_leg_balanced(&self, leg: LegId) -> bool {
        let counts = self.usage.known_usage_on_leg(leg);
        (self.variation)(&counts) <= (self.threshold)(self.progress.iterations())
    }

    /// Usage above the limit summed over the combination's parts on
    /// hard-limited legs.
    pub fn excess(&self, combination: &SopCombination) -> usize {
        let Some(limit) = self.limit else {
            return 0;
        };
        self.usage
            .parts(combination)
            .iter()
            .filter(|part| !self.is_leg_excluded(part.leg))
            .map(|part| self.usage.usage(part).saturating_sub(limit))
            .sum()
    }

    pub fn usage(&self) -> &SopUsageTracker {
        &self.usage
    }

    fn score(&self, combination: &SopCombination) -> BasicAppraiserScore {
        match self.excess(combination) {
            0 => BasicAppraiserScore::ignore(),
            excess => BasicAppraiserScore::want_to_remove(-(excess as i64)),
        }
    }

    fn rescore(
        &self,
        changes: &[UsageChange<SopPart>],
        combination: &SopCombination,
        blackboard: &mut Blackboard<SopCombination>,
    ) {
        let Some(limit) = self.limit else {
            return;
        };
        let predicate = LimitCrossing { limit };
        let affected = self.usage.affected_holders(changes, combination, |c| {
            !self.is_leg_excluded(c.part.leg) && predicate.is_crossed(c.old, c.new)
        });
        for holder in affected {
            let score = self.score(&holder);
            blackboard.update_value(holder, score);
        }
    }
}

impl Appraiser<SopCombination> for ScheduleRepeatLimit {
    fn rate(
        &mut self,
        combination: &SopCombination,
        blackboard: &mut Blackboard<SopCombination>,
    ) -> BasicAppraiserScore {
        let changes = self.usage.add(combination);
        self.rescore(&changes, combination, blackboard);
        self.score(combination)
    }

    fn retract(&mut self, combination: &SopCombination, blackboard: &mut Blackboard<SopCombination>) {
        let changes = self.usage.remove(combination);
        self.rescore(&changes, combination, blackboard);
    }

    fn is_satisfied(&self) -> bool {
        let Some(limit) = self.limit else {
            return true;
        };
        self.usage.legs().into_iter().all(|leg| {
            if self.is_leg_excluded(leg) {
                self.is_leg_balanced(leg)
            } else {
                self.usage
                    .counts()
                    .all(|(part, count)| part.leg != leg || count <= limit)
            }
        })
    }

    fn describe(&self) -> String {
        match self.limit {
            Some(limit) => format!("Schedule repeat limit {}", limit),
            None => "Schedule repeat limit (disabled)".to_string(),
        }
    }
}

impl fmt::Debug for ScheduleRepeatLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleRepeatLimit")
            .field("limit", &self.limit)
            .field("requested_solutions", &self.requested_solutions)
            .field("usage", &self.usage)
            .field("sops_per_leg", &self.sops_per_leg)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}
