use std::collections::HashMap;

use ibf_core::{BasicAppraiserScore, ItemScore, ScoreCategory};

use super::*;
use crate::test_utils::{AllEven, EditsItself, SmallerIsBetter, TakeAll, ThreeAbove100};

type Outward = HashMap<i32, ItemScore>;

fn add(mediator: &mut ScoringMediator<i32>, outward: &mut Outward, item: i32) -> ItemScore {
    let score = mediator.before_item_added(&item, outward);
    outward.insert(item, score.clone());
    score
}

fn remove(mediator: &mut ScoringMediator<i32>, outward: &mut Outward, item: i32) {
    mediator.before_item_removed(&item, outward);
    outward.remove(&item);
}

#[test]
fn test_combined_score_follows_priority() {
    let mut mediator = ScoringMediator::new();
    mediator.add_appraiser(SmallerIsBetter, 1);
    mediator.add_appraiser(AllEven::default(), 10);
    let mut outward = Outward::new();

    let score = add(&mut mediator, &mut outward, 7);
    assert_eq!(format!("{}", score), "I0 N-7");

    let score = add(&mut mediator, &mut outward, 8);
    assert_eq!(score[0].category(), ScoreCategory::MustHave);
    assert_eq!(score[1], BasicAppraiserScore::nice_to_have(-8));
}

#[test]
fn test_blackboard_cascade_reaches_outward_map() {
    let mut mediator = ScoringMediator::new();
    mediator.add_appraiser(ThreeAbove100::default(), 8);
    mediator.add_appraiser(TakeAll, 5);
    let mut outward = Outward::new();

    for item in [101, 102, 103] {
        let score = add(&mut mediator, &mut outward, item);
        assert_eq!(score[0].category(), ScoreCategory::MustHave);
    }

    let fourth = add(&mut mediator, &mut outward, 104);
    assert_eq!(fourth[0].category(), ScoreCategory::NiceToHave);
    for item in [101, 102, 103] {
        assert_eq!(outward[&item][0].category(), ScoreCategory::NiceToHave);
        assert_eq!(mediator.build(&item), outward[&item]);
    }

    remove(&mut mediator, &mut outward, 102);
    for item in [101, 103, 104] {
        assert_eq!(outward[&item][0].category(), ScoreCategory::MustHave);
    }
    assert_eq!(mediator.tracked_count(), 3);
}

#[test]
fn test_ignored_item_pushes_no_edits() {
    let mut mediator = ScoringMediator::new();
    mediator.add_appraiser(ThreeAbove100::default(), 8);
    let mut outward = Outward::new();

    for item in [101, 102, 103] {
        add(&mut mediator, &mut outward, item);
    }
    outward.clear();
    let score = mediator.before_item_added(&50, &mut outward);
    assert!(outward.is_empty());
    assert_eq!(score[0], BasicAppraiserScore::ignore());
}

#[test]
fn test_scores_for_item_in_registration_order() {
    let mut mediator = ScoringMediator::new();
    let small = mediator.add_appraiser(SmallerIsBetter, 1);
    let even = mediator.add_appraiser(AllEven::default(), 10);
    let mut outward = Outward::new();
    add(&mut mediator, &mut outward, 4);

    let scores = mediator.scores_for_item(&4);
    assert_eq!(
        scores,
        vec![
            (small.id(), BasicAppraiserScore::nice_to_have(-4)),
            (even.id(), BasicAppraiserScore::must_have(0)),
        ]
    );

    let (info, derived) = mediator.info_for_appraiser(even.id());
    assert_eq!(info.priority, 10);
    assert_eq!(derived.rank, 0);
    assert_eq!(mediator.ids_by_rank(), vec![even.id(), small.id()]);
}

#[test]
fn test_typed_handle_access() {
    let mut mediator: ScoringMediator<i32> = ScoringMediator::new();
    let even = mediator.add_appraiser(AllEven::default(), 10);
    let mut outward = Outward::new();

    add(&mut mediator, &mut outward, 3);
    assert!(!mediator.appraiser(even).is_satisfied());
    assert!(!mediator.are_all_appraisers_satisfied());

    remove(&mut mediator, &mut outward, 3);
    assert!(mediator.are_all_appraisers_satisfied());

    let names: Vec<String> = mediator.appraisers().map(|(_, a)| a.describe()).collect();
    assert_eq!(names, vec!["All even".to_string()]);
}

#[test]
#[should_panic(expected = "duplicate appraiser priority 10")]
fn test_duplicate_priority_panics() {
    let mut mediator: ScoringMediator<i32> = ScoringMediator::new();
    mediator.add_appraiser(AllEven::default(), 10);
    mediator.add_appraiser(TakeAll, 10);
}

#[test]
#[should_panic(expected = "before any item is tracked")]
fn test_late_registration_panics() {
    let mut mediator: ScoringMediator<i32> = ScoringMediator::new();
    mediator.add_appraiser(TakeAll, 1);
    let mut outward = Outward::new();
    add(&mut mediator, &mut outward, 1);
    mediator.add_appraiser(SmallerIsBetter, 2);
}

#[test]
#[should_panic(expected = "edited the score of the item it is processing")]
fn test_self_edit_panics() {
    let mut mediator: ScoringMediator<i32> = ScoringMediator::new();
    mediator.add_appraiser(EditsItself, 1);
    let mut outward = Outward::new();
    add(&mut mediator, &mut outward, 1);
}

#[test]
#[should_panic(expected = "cannot remove untracked item")]
fn test_remove_untracked_panics() {
    let mut mediator: ScoringMediator<i32> = ScoringMediator::new();
    mediator.add_appraiser(TakeAll, 1);
    let mut outward = Outward::new();
    remove(&mut mediator, &mut outward, 9);
}
