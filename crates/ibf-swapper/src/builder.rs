//! Score-combination policy: folding per-appraiser scores into an `ItemScore`.

use std::fmt::Debug;

use ibf_core::{BasicAppraiserScore, ItemScore};

/// Registered metadata of an appraiser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppraiserInfo {
    /// Higher priority dominates. Pairwise distinct within one mediator.
    pub priority: i32,
}

/// Metadata derived from all registered priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedInfo {
    /// Dense rank in `0..N`; 0 is the highest priority.
    pub rank: usize,
}

/// Computes dense ranks from priorities, highest priority first.
pub fn derive_ranks(infos: &[AppraiserInfo]) -> Vec<DerivedInfo> {
    let mut order: Vec<usize> = (0..infos.len()).collect();
    order.sort_by(|&a, &b| infos[b].priority.cmp(&infos[a].priority));

    let mut derived = vec![DerivedInfo { rank: 0 }; infos.len()];
    for (rank, &id) in order.iter().enumerate() {
        derived[id].rank = rank;
    }
    derived
}

/// Policy building a comparable `ItemScore` from one item's appraiser scores.
pub trait ScoreBuilder: Debug {
    /// `scores` and `derived` are both indexed by registration order.
    fn build(&self, scores: &[BasicAppraiserScore], derived: &[DerivedInfo]) -> ItemScore;
}

/// Places each appraiser's score at its rank, so the highest-priority
/// appraiser dominates and lower ranks only break ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScoreBuilder;

impl ScoreBuilder for PriorityScoreBuilder {
    fn build(&self, scores: &[BasicAppraiserScore], derived: &[DerivedInfo]) -> ItemScore {
        debug_assert_eq!(scores.len(), derived.len());
        let mut item_score = ItemScore::neutral(scores.len());
        for (score, info) in scores.iter().zip(derived) {
            item_score.set(info.rank, *score);
        }
        item_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infos(priorities: &[i32]) -> Vec<AppraiserInfo> {
        priorities
            .iter()
            .map(|&priority| AppraiserInfo { priority })
            .collect()
    }

    #[test]
    fn test_ranks_follow_descending_priority() {
        let derived = derive_ranks(&infos(&[5, 20, -3, 7]));
        let ranks: Vec<usize> = derived.iter().map(|d| d.rank).collect();
        assert_eq!(ranks, vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_empty_roster() {
        assert!(derive_ranks(&[]).is_empty());
    }

    #[test]
    fn test_priority_builder_orders_by_rank() {
        let derived = derive_ranks(&infos(&[1, 10]));
        let built = PriorityScoreBuilder.build(
            &[
                BasicAppraiserScore::nice_to_have(-4),
                BasicAppraiserScore::must_have(0),
            ],
            &derived,
        );
        assert_eq!(
            built,
            ItemScore::from_ranked([
                BasicAppraiserScore::must_have(0),
                BasicAppraiserScore::nice_to_have(-4),
            ])
        );
    }

    #[test]
    fn test_high_priority_appraiser_dominates() {
        let derived = derive_ranks(&infos(&[1, 10]));
        let a = PriorityScoreBuilder.build(
            &[
                BasicAppraiserScore::must_have(100),
                BasicAppraiserScore::ignore(),
            ],
            &derived,
        );
        let b = PriorityScoreBuilder.build(
            &[
                BasicAppraiserScore::want_to_remove(0),
                BasicAppraiserScore::nice_to_have(0),
            ],
            &derived,
        );
        assert!(b > a);
    }
}
