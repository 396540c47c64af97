//! In-memory connect-time feasibility.

use std::collections::HashSet;

use ibf_core::{ConnectTimeCheck, SopCombination};

/// Every combination is combinable unless listed as violating.
#[derive(Debug, Clone, Default)]
pub struct MctTable {
    violating: HashSet<SopCombination>,
}

impl MctTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_violation(mut self, combination: SopCombination) -> Self {
        self.violating.insert(combination);
        self
    }
}

impl ConnectTimeCheck for MctTable {
    fn is_combinable(&self, combination: &SopCombination) -> bool {
        !self.violating.contains(combination)
    }
}
