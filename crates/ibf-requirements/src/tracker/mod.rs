//! IbfRequirementsTracker - facade wiring the IBF roster into one swapper.
//!
//! The search loop configures the tracker before the search (SRL, desired
//! RC online count, SOPs to cover, direct SOPs), then offers every found
//! combination through [`IbfRequirementsTracker::new_queue_solution`] and
//! polls the satisfaction flags to decide when to stop.

use std::fmt;
use std::rc::Rc;

use ibf_config::{CoverageMode, TrackerConfig};
use ibf_core::{
    ConnectTimeCheck, IbfError, ItemScore, ItineraryLookup, LegId, OnlineClassifier,
    SearchProgress, SopCombination, SopId, SopPart,
};
use ibf_swapper::{AddOutcome, Appraiser, AppraiserHandle, AppraiserScores, Swapper};
use tracing::{debug, info};

use crate::appraisers::{
    coefficient_of_variation, linear_threshold, AllDirectOptionsRepresented,
    AllOnlinesForCarrier, AllSopsRepresented, CoverageScoring, EarlierOptionsAreBetter,
    LessConnectionsIsBetter, MctCombinableOptionsAreBetter, ScheduleRepeatLimit,
};
use crate::usage::SopUsageTracker;

/// External services the appraisers consult.
pub struct Collaborators {
    pub online_classifier: Box<dyn OnlineClassifier>,
    pub itineraries: Rc<dyn ItineraryLookup>,
    pub connect_time: Box<dyn ConnectTimeCheck>,
    pub progress: Rc<dyn SearchProgress>,
}

/// What happened to an offered solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddResponse {
    /// False when the offered solution itself was dropped.
    pub accepted: bool,
    /// The evicted solution, or the offered one when rejected.
    pub removed: Option<SopCombination>,
    /// Scores of the removed solution, captured before it was retracted.
    pub scores: AppraiserScores,
}

#[derive(Debug, Clone, Copy)]
struct Roster {
    srl: AppraiserHandle<ScheduleRepeatLimit>,
    all_sops: AppraiserHandle<AllSopsRepresented>,
    all_direct: AppraiserHandle<AllDirectOptionsRepresented>,
    mct: AppraiserHandle<MctCombinableOptionsAreBetter>,
    rc_onlines: AppraiserHandle<AllOnlinesForCarrier>,
    less_connections: AppraiserHandle<LessConnectionsIsBetter>,
    earlier: AppraiserHandle<EarlierOptionsAreBetter>,
}

/// Result-set curation for IBF shopping responses.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use ibf_core::{IterationCounter, SopCombination};
/// use ibf_requirements::{Collaborators, IbfRequirementsTracker};
/// use ibf_test::{ItineraryTable, MctTable, OnlineTable};
///
/// let collaborators = Collaborators {
///     online_classifier: Box::new(OnlineTable::new()),
///     itineraries: Rc::new(ItineraryTable::new()),
///     connect_time: Box::new(MctTable::new()),
///     progress: Rc::new(IterationCounter::new()),
/// };
/// let mut tracker = IbfRequirementsTracker::new(2, collaborators);
/// tracker.add_sop_for_usage_tracking(0, 0);
/// tracker.add_sop_for_usage_tracking(0, 1);
///
/// tracker.new_queue_solution(SopCombination::from([0]));
/// assert!(!tracker.is_all_sops_represented_satisfied());
/// tracker.new_queue_solution(SopCombination::from([1]));
/// assert!(tracker.are_all_requirements_met());
/// assert!(tracker.has_requested_nbr_of_solutions());
/// ```
pub struct IbfRequirementsTracker {
    swapper: Swapper<SopCombination>,
    requested_solutions: usize,
    queue_iterations_limit: usize,
    legs_count: usize,
    roster: Roster,
}

impl IbfRequirementsTracker {
    /// Creates a tracker with the default roster priorities.
    ///
    /// # Panics
    /// Panics if `requested_solutions` is zero.
    pub fn new(requested_solutions: usize, collaborators: Collaborators) -> Self {
        let config = TrackerConfig::new().with_requested_solutions(requested_solutions);
        Self::build(&config, collaborators)
    }

    /// Creates and configures a tracker.
    ///
    /// # Errors
    ///
    /// Returns an error if two requirements share a priority or the
    /// configuration is out of range.
    pub fn from_config(
        config: &TrackerConfig,
        collaborators: Collaborators,
    ) -> Result<Self, IbfError> {
        let named = config.priorities.named();
        for (i, (name, priority)) in named.iter().enumerate() {
            if named[..i].iter().any(|(_, other)| other == priority) {
                return Err(IbfError::DuplicatePriority {
                    priority: *priority,
                    appraiser: name.to_string(),
                });
            }
        }
        config.validate()?;

        let mut tracker = Self::build(config, collaborators);
        if let Some(leg) = config.leg_to_track {
            tracker.set_leg_id_to_track(leg);
        }
        if let Some(limit) = config.srl_limit() {
            tracker.enable_srl(limit);
        }
        if let Some(count) = config.rc_onlines_desired_count {
            tracker.set_rc_onlines_desired_count(count);
        }
        info!(
            event = "tracker_configured",
            requested_solutions = config.requested_solutions,
            coverage = ?config.coverage,
            queue_iterations_limit = config.queue_iterations_limit,
        );
        Ok(tracker)
    }

    fn build(config: &TrackerConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            online_classifier,
            itineraries,
            connect_time,
            progress,
        } = collaborators;
        let priorities = &config.priorities;
        let scoring = match config.coverage {
            CoverageMode::UniqueSops => CoverageScoring::UniqueSops,
            CoverageMode::SopCounting => CoverageScoring::SopCounting,
        };

        let mut swapper = Swapper::new(config.requested_solutions);
        let roster = Roster {
            srl: swapper.add_appraiser(
                ScheduleRepeatLimit::with_strategies(
                    config.requested_solutions,
                    progress,
                    Box::new(coefficient_of_variation),
                    linear_threshold(config.srl_balance_coefficient),
                ),
                priorities.schedule_repeat_limit,
            ),
            all_sops: swapper.add_appraiser(AllSopsRepresented::new(scoring), priorities.all_sops),
            all_direct: swapper.add_appraiser(
                AllDirectOptionsRepresented::new(config.requested_solutions),
                priorities.all_direct,
            ),
            mct: swapper.add_appraiser(
                MctCombinableOptionsAreBetter::new(connect_time),
                priorities.mct_combinable,
            ),
            rc_onlines: swapper.add_appraiser(
                AllOnlinesForCarrier::new(online_classifier),
                priorities.rc_onlines,
            ),
            less_connections: swapper.add_appraiser(
                LessConnectionsIsBetter::new(itineraries),
                priorities.less_connections,
            ),
            earlier: swapper.add_appraiser(EarlierOptionsAreBetter::new(), priorities.earlier),
        };

        Self {
            swapper,
            requested_solutions: config.requested_solutions,
            queue_iterations_limit: config.queue_iterations_limit,
            legs_count: 0,
            roster,
        }
    }

    fn assert_not_started(&self, operation: &str) {
        assert!(
            self.swapper.is_empty(),
            "{} must be called before the first solution is offered",
            operation
        );
    }

    // === Configuration ===

    /// Enables the schedule repeat limit.
    ///
    /// # Panics
    /// Panics if `limit` is zero, or if the limit changes once solutions
    /// are tracked.
    pub fn enable_srl(&mut self, limit: usize) {
        self.swapper.appraiser_mut(self.roster.srl).enable(limit);
        info!(event = "srl_enabled", limit = limit);
    }

    pub fn set_rc_onlines_desired_count(&mut self, count: usize) {
        self.swapper
            .appraiser_mut(self.roster.rc_onlines)
            .set_target_count(count);
        info!(event = "rc_onlines_desired_count_set", count = count);
    }

    /// Restricts "all SOPs represented" to one leg.
    ///
    /// # Panics
    /// Panics once solutions are tracked.
    pub fn set_leg_id_to_track(&mut self, leg: LegId) {
        self.assert_not_started("set_leg_id_to_track");
        self.swapper
            .appraiser_mut(self.roster.all_sops)
            .set_leg_id_to_track(leg);
        info!(event = "leg_to_track_set", leg = leg);
    }

    /// Registers a valid SOP for coverage and repeat limiting.
    ///
    /// # Panics
    /// Panics once solutions are tracked.
    pub fn add_sop_for_usage_tracking(&mut self, leg: LegId, sop: SopId) {
        self.assert_not_started("add_sop_for_usage_tracking");
        self.legs_count = self.legs_count.max(leg + 1);
        self.swapper.appraiser_mut(self.roster.all_sops).add_sop(leg, sop);
        self.swapper.appraiser_mut(self.roster.srl).add_sop(leg, sop);
    }

    /// Registers a direct SOP.
    ///
    /// # Panics
    /// Panics once solutions are tracked.
    pub fn add_direct_sop_for_tracking(&mut self, leg: LegId, sop: SopId) {
        self.assert_not_started("add_direct_sop_for_tracking");
        self.swapper
            .appraiser_mut(self.roster.all_direct)
            .add_direct_sop(leg, sop);
    }

    /// Freezes the number of all-direct solutions to collect.
    ///
    /// Every leg seen by [`add_sop_for_usage_tracking`](Self::add_sop_for_usage_tracking)
    /// counts; a leg without direct SOPs leaves nothing to collect.
    pub fn calculate_direct_fos_target_count(&mut self) -> usize {
        let legs = self.legs_count;
        let target = self
            .swapper
            .appraiser_mut(self.roster.all_direct)
            .calculate_target_count(legs);
        info!(event = "direct_target_calculated", legs = legs, target = target);
        target
    }

    /// Number of legs seen among the registered SOPs.
    pub fn legs_count(&self) -> usize {
        self.legs_count
    }

    // === Solutions ===

    /// Offers an all-direct flight-only solution.
    pub fn new_direct_fos_solution(&mut self, combination: SopCombination) -> AddResponse {
        self.insert("direct_fos", combination)
    }

    /// Offers a solution found by the search queue.
    pub fn new_queue_solution(&mut self, combination: SopCombination) -> AddResponse {
        self.insert("queue", combination)
    }

    fn insert(&mut self, source: &'static str, combination: SopCombination) -> AddResponse {
        let offered = combination.clone();
        let response = match self.swapper.add(combination) {
            AddOutcome::Added => AddResponse {
                accepted: true,
                removed: None,
                scores: AppraiserScores::new(),
            },
            AddOutcome::Swapped { evicted, scores } => AddResponse {
                accepted: true,
                removed: Some(evicted),
                scores,
            },
            AddOutcome::Rejected { scores } => AddResponse {
                accepted: false,
                removed: Some(offered.clone()),
                scores,
            },
        };
        debug!(
            event = "solution_offered",
            source = source,
            solution = %offered,
            accepted = response.accepted,
            removed = ?response.removed,
            size = self.swapper.size(),
        );
        response
    }

    /// Retained solutions from the worst to the best.
    pub fn solutions(&self) -> impl DoubleEndedIterator<Item = (&SopCombination, &ItemScore)> {
        self.swapper.iter()
    }

    pub fn swapper(&self) -> &Swapper<SopCombination> {
        &self.swapper
    }

    pub fn solutions_count(&self) -> usize {
        self.swapper.size()
    }

    pub fn requested_nbr_of_solutions(&self) -> usize {
        self.requested_solutions
    }

    pub fn reset_no_progress_iterations_count(&mut self) {
        self.swapper.reset_no_progress_iterations_count();
    }

    // === Satisfaction ===

    pub fn is_srl_satisfied(&self) -> bool {
        self.swapper.appraiser(self.roster.srl).is_satisfied()
    }

    pub fn is_all_sops_represented_satisfied(&self) -> bool {
        self.swapper.appraiser(self.roster.all_sops).is_satisfied()
    }

    pub fn is_all_direct_options_present_satisfied(&self) -> bool {
        self.swapper.appraiser(self.roster.all_direct).is_satisfied()
    }

    pub fn is_all_onlines_for_carrier_satisfied(&self) -> bool {
        self.swapper.appraiser(self.roster.rc_onlines).is_satisfied()
    }

    pub fn has_requested_nbr_of_solutions(&self) -> bool {
        self.swapper.size() >= self.requested_solutions
    }

    pub fn are_all_requirements_met(&self) -> bool {
        self.swapper.are_all_appraisers_satisfied()
    }

    /// Enough solutions collected without violating the repeat limit.
    pub fn is_result_set_done(&self) -> bool {
        self.has_requested_nbr_of_solutions() && self.is_srl_satisfied()
    }

    /// The queue stopped improving the result set.
    pub fn is_search_stalled(&self) -> bool {
        self.swapper.no_progress_iterations_count() >= self.queue_iterations_limit as u64
    }

    // === Statistics ===

    pub fn sop_usage_tracker(&self) -> &SopUsageTracker {
        self.swapper.appraiser(self.roster.all_sops).usage()
    }

    pub fn sop_usage_count(&self, leg: LegId, sop: SopId) -> usize {
        self.sop_usage_tracker().usage(&SopPart::new(leg, sop))
    }

    pub fn known_sops_count(&self) -> usize {
        self.sop_usage_tracker().known_parts_count()
    }

    pub fn unused_sops_count(&self) -> usize {
        self.sop_usage_tracker().unused_parts_count()
    }

    /// Registered SOPs no retained solution uses, in arbitrary order.
    pub fn unused_sops(&self) -> impl Iterator<Item = &SopPart> {
        self.sop_usage_tracker().unused_parts()
    }

    pub fn unused_sops_count_on_leg(&self, leg: LegId) -> usize {
        self.sop_usage_tracker().unused_on_leg(leg)
    }

    /// Retained online solutions of the requesting carrier.
    pub fn rc_onlines_count(&self) -> usize {
        self.swapper
            .appraiser(self.roster.rc_onlines)
            .collected_count()
    }

    pub fn direct_fos_target_count(&self) -> Option<usize> {
        self.swapper.appraiser(self.roster.all_direct).target_count()
    }

    pub fn srl(&self) -> &ScheduleRepeatLimit {
        self.swapper.appraiser(self.roster.srl)
    }

    pub fn mct_appraiser(&self) -> &MctCombinableOptionsAreBetter {
        self.swapper.appraiser(self.roster.mct)
    }

    pub fn less_connections_appraiser(&self) -> &LessConnectionsIsBetter {
        self.swapper.appraiser(self.roster.less_connections)
    }

    pub fn earlier_appraiser(&self) -> &EarlierOptionsAreBetter {
        self.swapper.appraiser(self.roster.earlier)
    }
}

impl fmt::Display for IbfRequirementsTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "IBF requirements: {}/{} solutions",
            self.swapper.size(),
            self.requested_solutions
        )?;
        let mediator = self.swapper.mediator();
        let appraisers: Vec<_> = mediator.appraisers().collect();
        for id in mediator.ids_by_rank() {
            let appraiser = appraisers[id.index()].1;
            let mark = if appraiser.is_satisfied() { 'x' } else { ' ' };
            writeln!(f, "  [{}] {}", mark, appraiser.describe())?;
        }
        Ok(())
    }
}

impl fmt::Debug for IbfRequirementsTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbfRequirementsTracker")
            .field("requested_solutions", &self.requested_solutions)
            .field("queue_iterations_limit", &self.queue_iterations_limit)
            .field("legs_count", &self.legs_count)
            .field("swapper", &self.swapper)
            .finish()
    }
}
