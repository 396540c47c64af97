//! Human-readable rendering of item scores.

use std::fmt::Write;

use ibf_core::ItemScore;

use crate::appraiser::SwapperItem;
use crate::builder::ScoreBuilder;
use crate::mediator::ScoringMediator;

/// Renders scores against the appraiser roster of one mediator.
///
/// Compact scores list one short code per rank, highest priority first,
/// e.g. `M1 I0 N-5`. The legend names the appraiser behind each position.
#[derive(Debug)]
pub struct ScoreFormatter<'a, I: SwapperItem, B: ScoreBuilder> {
    mediator: &'a ScoringMediator<I, B>,
}

impl<'a, I: SwapperItem, B: ScoreBuilder> ScoreFormatter<'a, I, B> {
    pub fn new(mediator: &'a ScoringMediator<I, B>) -> Self {
        Self { mediator }
    }

    /// Compact form of a combined score.
    pub fn format(&self, score: &ItemScore) -> String {
        score.to_string()
    }

    /// One line per rank: position, description and priority.
    pub fn legend(&self) -> String {
        let appraisers: Vec<_> = self.mediator.appraisers().collect();
        let mut out = String::new();
        for (position, id) in self.mediator.ids_by_rank().into_iter().enumerate() {
            let (info, _) = self.mediator.info_for_appraiser(id);
            let description = appraisers[id.index()].1.describe();
            let _ = writeln!(
                out,
                "[{}] {} (priority {})",
                position, description, info.priority
            );
        }
        out
    }

    /// Detailed scores of a tracked item, in rank order.
    ///
    /// # Panics
    /// Panics if the item is not tracked.
    pub fn format_item(&self, item: &I) -> String {
        let scores = self.mediator.scores_for_item(item);
        let appraisers: Vec<_> = self.mediator.appraisers().collect();
        self.mediator
            .ids_by_rank()
            .into_iter()
            .map(|id| {
                format!(
                    "{}: {}",
                    appraisers[id.index()].1.describe(),
                    scores[id.index()].1
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::test_utils::{AllEven, SmallerIsBetter};

    #[test]
    fn test_legend_and_item_format() {
        let mut mediator = ScoringMediator::new();
        mediator.add_appraiser(SmallerIsBetter, 1);
        mediator.add_appraiser(AllEven::default(), 10);
        let mut outward: HashMap<i32, ItemScore> = HashMap::new();
        let score = mediator.before_item_added(&6, &mut outward);

        let formatter = ScoreFormatter::new(&mediator);
        assert_eq!(formatter.format(&score), "M0 N-6");
        assert_eq!(
            formatter.legend(),
            "[0] All even (priority 10)\n[1] Smaller is better (priority 1)\n"
        );
        assert_eq!(
            formatter.format_item(&6),
            "All even: MUST_HAVE(0); Smaller is better: NICE_TO_HAVE(-6)"
        );
    }
}
