//! IBF - Result-set curation for flight shopping
//!
//! Keeps the best N flight combinations found by a search, ranked by a
//! prioritized set of requirements.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use ibf::prelude::*;
//! use ibf_test::{comb, ItineraryTable, MctTable, OnlineTable};
//!
//! let counter = IterationCounter::new();
//! let collaborators = Collaborators {
//!     online_classifier: Box::new(OnlineTable::new()),
//!     itineraries: Rc::new(ItineraryTable::new()),
//!     connect_time: Box::new(MctTable::new()),
//!     progress: Rc::new(counter.clone()),
//! };
//! let config = TrackerConfig::new().with_requested_solutions(2);
//! let mut tracker = IbfRequirementsTracker::from_config(&config, collaborators).unwrap();
//! tracker.add_sop_for_usage_tracking(0, 0);
//! tracker.add_sop_for_usage_tracking(0, 1);
//!
//! let candidates = vec![comb(&[0]), comb(&[1]), comb(&[2])];
//! let summary = curate(&mut tracker, &counter, candidates);
//! assert_eq!(summary.stop, StopReason::RequirementsMet);
//! assert_eq!(summary.offered, 2);
//! ```

// Score and combination types
pub use ibf_core::{
    BasicAppraiserScore, IbfError, ItemScore, LegId, ScoreCategory, SopCombination, SopId,
    SopPart,
};

// Collaborator contracts
pub use ibf_core::{
    ConnectTimeCheck, IterationCounter, ItineraryLookup, OnlineClassifier, SearchProgress,
};

// Generic swapper
pub use ibf_swapper::{
    AddOutcome, Appraiser, AppraiserHandle, Blackboard, ScoreFormatter, ScoringMediator, Swapper,
    SwapperItem, SwapperObserver,
};

// Configuration
pub use ibf_config::{ConfigError, CoverageMode, PriorityConfig, TrackerConfig};

// IBF requirements
pub use ibf_requirements::appraisers;
pub use ibf_requirements::{AddResponse, Collaborators, IbfRequirementsTracker};

#[cfg(feature = "logging")]
pub mod logging;

mod search;
pub use search::{curate, CurationSummary, StopReason};

pub mod prelude {
    pub use super::{
        curate, BasicAppraiserScore, Collaborators, CurationSummary, IbfRequirementsTracker,
        IterationCounter, SopCombination, StopReason, TrackerConfig,
    };
}
