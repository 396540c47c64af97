//! IBF Requirements - requirement appraisers and the tracker facade
//!
//! This crate provides:
//! - [`usage`]: per-SOP usage counting shared by the appraisers
//! - [`appraisers`]: the IBF requirements and tie-breaks
//! - [`tracker`]: [`IbfRequirementsTracker`], wiring them into a swapper

pub mod appraisers;
pub mod tracker;
pub mod usage;

pub use appraisers::{
    AllDirectOptionsRepresented, AllOnlinesForCarrier, AllSopsRepresented, CoverageScoring,
    EarlierOptionsAreBetter, LessConnectionsIsBetter, MctCombinableOptionsAreBetter,
    ScheduleRepeatLimit,
};
pub use tracker::{AddResponse, Collaborators, IbfRequirementsTracker};
pub use usage::{PartUsageTracker, SopDecomposer, SopUsageTracker};
