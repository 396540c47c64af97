//! The IBF requirement appraisers.
//!
//! Coverage requirements (`AllSopsRepresented`, `AllDirectOptionsRepresented`,
//! `AllOnlinesForCarrier`, `ScheduleRepeatLimit`) report satisfaction;
//! the remaining appraisers are pure tie-breaks and are always satisfied.

mod all_direct;
mod all_onlines;
mod all_sops;
mod earlier;
mod less_connections;
mod mct;
mod srl;

pub use all_direct::AllDirectOptionsRepresented;
pub use all_onlines::AllOnlinesForCarrier;
pub use all_sops::{AllSopsRepresented, CoverageScoring};
pub use earlier::EarlierOptionsAreBetter;
pub use less_connections::LessConnectionsIsBetter;
pub use mct::MctCombinableOptionsAreBetter;
pub use srl::{
    coefficient_of_variation, linear_threshold, BalanceThresholdFn, ScheduleRepeatLimit,
    VariationFn, DEFAULT_BALANCE_COEFFICIENT,
};
