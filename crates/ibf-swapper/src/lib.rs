//! Bounded multi-criteria admission control.
//!
//! This crate provides the container at the centre of result-set curation:
//! - Pluggable appraisers (`Appraiser`) rating items against one requirement each
//! - A score bank and an ordered score set with O(log n) worst-item lookup
//! - The scoring mediator combining appraiser opinions and propagating
//!   cascading rescoring through a blackboard
//! - The fixed-capacity `Swapper` deciding admission and eviction
//!
//! # Architecture
//!
//! Appraisers are owned by the mediator and addressed through typed
//! [`AppraiserHandle`]s. Score edits for other items are collected on a
//! [`Blackboard`] during `rate`/`retract` and applied by the mediator right
//! after the call returns, so no appraiser is ever re-entered.

pub mod appraiser;
pub mod bank;
pub mod builder;
pub mod format;
pub mod mediator;
pub mod observer;
pub mod ordered;
pub mod swapper;

#[cfg(test)]
mod test_utils;

pub use appraiser::{Appraiser, AppraiserHandle, AppraiserId, AsAny, Blackboard, SwapperItem};
pub use bank::{AppraiserScores, ScoreBank};
pub use builder::{AppraiserInfo, DerivedInfo, PriorityScoreBuilder, ScoreBuilder};
pub use format::ScoreFormatter;
pub use mediator::ScoringMediator;
pub use observer::{ObserverId, SwapperObserver};
pub use ordered::{ItemScoreMap, ScoreSet};
pub use swapper::{AddOutcome, Swapper};
