//! Usage tracking shared by the requirement appraisers.
//!
//! Every appraiser follows the same shape: decompose a combination into
//! parts, count per part the held combinations containing it, and rescore
//! the other holders of a part when its count crosses a threshold the
//! appraiser cares about.

mod multimap;
mod part_usage;
mod predicate;

pub use multimap::CountingMultimap;
pub use part_usage::{Decomposer, PartUsageTracker, SopDecomposer, UsageChange};
pub use predicate::{AnyChange, LimitCrossing, ThresholdPredicate, UniquenessCrossing};

/// Usage tracker of `(leg, sop)` parts of combinations.
pub type SopUsageTracker = PartUsageTracker<ibf_core::SopCombination, SopDecomposer>;
