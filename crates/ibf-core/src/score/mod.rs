//! Score types for ranking SOP combinations
//!
//! Every appraiser rates an item with a [`BasicAppraiserScore`]. The scores
//! of all appraisers are folded into one [`ItemScore`] which orders the items
//! held by the swapper. All score types are immutable values.

mod basic;
mod item;


pub use basic::{BasicAppraiserScore, ScoreCategory};
pub use item::ItemScore;
