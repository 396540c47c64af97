//! Configuration for the IBF requirements tracker.
//!
//! Load the tracker setup from TOML or YAML so the requested result-set
//! size, the schedule repeat limit and the requirement priorities can be
//! tuned without code changes.
//!
//! # Examples
//!
//! ```
//! use ibf_config::{CoverageMode, TrackerConfig};
//!
//! let config = TrackerConfig::from_toml_str(r#"
//!     requested_solutions = 50
//!     schedule_repeat_limit = 3
//!     coverage = "sop_counting"
//!
//!     [priorities]
//!     earlier = 50
//! "#).unwrap();
//!
//! assert_eq!(config.requested_solutions, 50);
//! assert_eq!(config.srl_limit(), Some(3));
//! assert_eq!(config.coverage, CoverageMode::SopCounting);
//! assert_eq!(config.priorities.earlier, 50);
//! assert_eq!(config.priorities.schedule_repeat_limit, 700);
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use ibf_config::TrackerConfig;
//!
//! let config = TrackerConfig::load("ibf.toml").unwrap_or_default();
//! assert_eq!(config.requested_solutions, 1);
//! ```

use std::path::Path;

use ibf_core::IbfError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for IbfError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(message) => IbfError::InvalidConfiguration(message),
            other => IbfError::Config(other.to_string()),
        }
    }
}

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct TrackerConfig {
    /// Size of the result set, and capacity of the swapper.
    pub requested_solutions: usize,

    /// Maximum number of retained combinations sharing one SOP.
    /// `None` or zero disables the limit.
    pub schedule_repeat_limit: Option<usize>,

    /// Number of online options of the requesting carrier to collect.
    pub rc_onlines_desired_count: Option<usize>,

    /// Restricts SOP coverage to a single leg.
    pub leg_to_track: Option<usize>,

    /// How SOP coverage rates combinations that hold no unique SOP.
    pub coverage: CoverageMode,

    /// Consecutive rejected solutions after which the search is stalled.
    pub queue_iterations_limit: usize,

    /// Slope of the coefficient-of-variation threshold used to judge SOP
    /// usage balance on legs that cannot be hard limited.
    pub srl_balance_coefficient: f64,

    /// Requirement priorities.
    pub priorities: PriorityConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            requested_solutions: 1,
            schedule_repeat_limit: None,
            rc_onlines_desired_count: None,
            leg_to_track: None,
            coverage: CoverageMode::default(),
            queue_iterations_limit: 1000,
            srl_balance_coefficient: 0.0004,
            priorities: PriorityConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, YAML for `.yaml`/`.yml`, TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_requested_solutions(mut self, count: usize) -> Self {
        self.requested_solutions = count;
        self
    }

    pub fn with_schedule_repeat_limit(mut self, limit: usize) -> Self {
        self.schedule_repeat_limit = Some(limit);
        self
    }

    pub fn with_rc_onlines_desired_count(mut self, count: usize) -> Self {
        self.rc_onlines_desired_count = Some(count);
        self
    }

    pub fn with_leg_to_track(mut self, leg: usize) -> Self {
        self.leg_to_track = Some(leg);
        self
    }

    pub fn with_coverage(mut self, coverage: CoverageMode) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_queue_iterations_limit(mut self, limit: usize) -> Self {
        self.queue_iterations_limit = limit;
        self
    }

    pub fn with_priorities(mut self, priorities: PriorityConfig) -> Self {
        self.priorities = priorities;
        self
    }

    /// The schedule repeat limit, if enabled.
    pub fn srl_limit(&self) -> Option<usize> {
        self.schedule_repeat_limit.filter(|&limit| limit > 0)
    }

    /// Checks value ranges and priority uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.requested_solutions == 0 {
            return Err(ConfigError::Invalid(
                "requested_solutions must be positive".to_string(),
            ));
        }
        if !self.srl_balance_coefficient.is_finite() || self.srl_balance_coefficient < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "srl_balance_coefficient must be a non-negative number, got {}",
                self.srl_balance_coefficient
            )));
        }
        let named = self.priorities.named();
        for (i, (name, priority)) in named.iter().enumerate() {
            if let Some((other, _)) = named[..i].iter().find(|(_, p)| p == priority) {
                return Err(ConfigError::Invalid(format!(
                    "priority {} is used by both '{}' and '{}'",
                    priority, other, name
                )));
            }
        }
        Ok(())
    }
}

/// How SOP coverage rates combinations that hold no unique SOP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageMode {
    /// Only combinations holding a unique SOP matter.
    #[default]
    UniqueSops,

    /// Other combinations are ranked by how much they repeat SOPs.
    SopCounting,
}

/// Priority of each requirement. Higher dominates; values must be distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PriorityConfig {
    pub schedule_repeat_limit: i32,
    pub all_sops: i32,
    pub all_direct: i32,
    pub mct_combinable: i32,
    pub rc_onlines: i32,
    pub less_connections: i32,
    pub earlier: i32,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            schedule_repeat_limit: 700,
            all_sops: 600,
            all_direct: 500,
            mct_combinable: 400,
            rc_onlines: 300,
            less_connections: 200,
            earlier: 100,
        }
    }
}

impl PriorityConfig {
    /// Requirement names paired with their priorities.
    pub fn named(&self) -> [(&'static str, i32); 7] {
        [
            ("schedule_repeat_limit", self.schedule_repeat_limit),
            ("all_sops", self.all_sops),
            ("all_direct", self.all_direct),
            ("mct_combinable", self.mct_combinable),
            ("rc_onlines", self.rc_onlines),
            ("less_connections", self.less_connections),
            ("earlier", self.earlier),
        ]
    }
}

#[cfg(test)]
mod tests;
