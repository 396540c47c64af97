//! In-memory carrier-online classification.

use std::collections::HashSet;

use ibf_core::{LegId, OnlineClassifier, SopCombination, SopId, SopPart};

/// A combination is online when every one of its SOPs is listed.
#[derive(Debug, Clone, Default)]
pub struct OnlineTable {
    online: HashSet<SopPart>,
}

impl OnlineTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists a SOP as operated online by the requesting carrier.
    pub fn with_online(mut self, leg: LegId, sop: SopId) -> Self {
        self.online.insert(SopPart::new(leg, sop));
        self
    }
}

impl OnlineClassifier for OnlineTable {
    fn is_online(&self, combination: &SopCombination) -> bool {
        combination.parts().all(|part| self.online.contains(&part))
    }
}
