//! Error types for IBF result-set curation
//!
//! Only configuration problems are recoverable. Violated preconditions inside
//! the swapper and the appraisers are programmer errors and panic instead.

use thiserror::Error;

/// Main error type for IBF configuration and wiring.
#[derive(Debug, Error)]
pub enum IbfError {
    /// A configuration value is outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two requirements were registered with the same priority.
    #[error("Duplicate appraiser priority {priority} for '{appraiser}'")]
    DuplicatePriority { priority: i32, appraiser: String },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for IBF operations
pub type Result<T> = std::result::Result<T, IbfError>;
