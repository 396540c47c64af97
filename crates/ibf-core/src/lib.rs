//! IBF Core - Core types for flight-shopping result-set curation
//!
//! This crate provides the fundamental value types shared by the swapper
//! and the requirement appraisers:
//! - Appraiser scores and combined item scores
//! - SOP combinations and the parts they decompose into
//! - Contracts of the collaborators the curation core consumes
//! - Configuration-time error type

pub mod collaborators;
pub mod combination;
pub mod error;
pub mod score;

pub use collaborators::{
    ConnectTimeCheck, IterationCounter, ItineraryLookup, OnlineClassifier, SearchProgress,
};
pub use combination::{LegId, SopCombination, SopId, SopPart};
pub use error::{IbfError, Result};
pub use score::{BasicAppraiserScore, ItemScore, ScoreCategory};
