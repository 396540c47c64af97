//! Reference search loop driving the tracker.

use ibf_core::{IterationCounter, SopCombination};
use ibf_requirements::IbfRequirementsTracker;
use tracing::info;

/// Why [`curate`] stopped offering candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The result set is full, within the repeat limit and every
    /// requirement is met.
    RequirementsMet,
    /// Too many consecutive candidates were rejected.
    Stalled,
    /// The candidates ran out.
    Exhausted,
}

/// Outcome of one [`curate`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationSummary {
    pub stop: StopReason,
    /// Candidates offered to the tracker.
    pub offered: usize,
    /// Offered candidates that entered the result set.
    pub accepted: usize,
    /// Retained solutions at the end of the run.
    pub solutions: usize,
}

/// Offers candidates in order until the result set is complete, the
/// search stalls or the candidates run out.
///
/// `counter` is advanced once per offered candidate; it should be the
/// counter the tracker's collaborators read search progress from.
pub fn curate<C>(
    tracker: &mut IbfRequirementsTracker,
    counter: &IterationCounter,
    candidates: C,
) -> CurationSummary
where
    C: IntoIterator<Item = SopCombination>,
{
    info!(
        event = "curation_start",
        requested_solutions = tracker.requested_nbr_of_solutions(),
        known_sops = tracker.known_sops_count(),
    );

    let mut offered = 0;
    let mut accepted = 0;
    let mut stop = StopReason::Exhausted;
    for candidate in candidates {
        counter.increment();
        offered += 1;
        if tracker.new_queue_solution(candidate).accepted {
            accepted += 1;
        }
        if tracker.is_result_set_done() && tracker.are_all_requirements_met() {
            stop = StopReason::RequirementsMet;
            break;
        }
        if tracker.is_search_stalled() {
            stop = StopReason::Stalled;
            break;
        }
    }

    let summary = CurationSummary {
        stop,
        offered,
        accepted,
        solutions: tracker.solutions_count(),
    };
    info!(
        event = "curation_end",
        stop = ?summary.stop,
        offered = summary.offered,
        accepted = summary.accepted,
        solutions = summary.solutions,
        unused_sops = tracker.unused_sops_count(),
    );
    summary
}
