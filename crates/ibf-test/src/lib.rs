//! Shared test fixtures for IBF crates.
//!
//! In-memory stand-ins for the collaborators the requirement appraisers
//! consume, plus helpers building combinations.
//!
//! - [`itinerary`] - segment counts and bare-direct flags per `(leg, sop)`
//! - [`online`] - carrier-online classification by SOP
//! - [`mct`] - connect-time feasibility by combination
//! - [`combinations`] - combination constructors and grids
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! ibf-test = { workspace = true }
//! ```

pub mod combinations;
pub mod itinerary;
pub mod mct;
pub mod online;

pub use combinations::{comb, grid};
pub use itinerary::ItineraryTable;
pub use mct::MctTable;
pub use online::OnlineTable;
