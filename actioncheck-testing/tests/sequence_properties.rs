//! Property tests for the sequence comparators.

use actioncheck::{
    compare_contains, compare_contains_types, compare_exact, compare_exact_types, project_types,
    resolve, Action, ComparisonResult, Expectation, LengthMismatch,
};
use actioncheck_testing::generators::{arb_action, arb_actions, arb_with_subsequence};
use proptest::prelude::*;
use serde_json::json;

fn patterns(actions: &[Action]) -> Vec<Expectation> {
    actions.iter().cloned().map(Expectation::from).collect()
}

fn actions(kinds: &[&str]) -> Vec<Action> {
    kinds.iter().map(|kind| Action::of_type(*kind)).collect()
}

fn assert_polarity_keeps_payload(result: &ComparisonResult) -> Result<(), TestCaseError> {
    let plain = resolve(result.clone(), false);
    let negated = resolve(result.clone(), true);
    prop_assert_ne!(plain.is_ok(), negated.is_ok());

    let failure = plain.err().or_else(|| negated.err()).expect("one polarity fails");
    prop_assert_eq!(&failure.expected, &result.expected);
    prop_assert_eq!(&failure.actual, &result.actual);
    prop_assert_eq!(failure.diffable, result.diffable);
    Ok(())
}

proptest! {
    #[test]
    fn exact_accepts_pairwise_equal_sequences(recorded in arb_actions(16)) {
        prop_assert!(compare_exact(&patterns(&recorded), &recorded).is_success());
    }

    #[test]
    fn exact_rejects_any_length_difference(
        recorded in arb_actions(12),
        extra in prop::collection::vec(arb_action(), 1..4),
    ) {
        let mut longer = recorded.clone();
        longer.extend(extra);

        let surplus = compare_exact(&patterns(&recorded), &longer);
        prop_assert!(surplus.verdict);
        let is_surplus = matches!(surplus.length_mismatch, Some(LengthMismatch::SurplusActual { .. }));
        prop_assert!(is_surplus);

        let missing = compare_exact(&patterns(&longer), &recorded);
        prop_assert!(missing.verdict);
        let is_missing = matches!(missing.length_mismatch, Some(LengthMismatch::MissingActual { .. }));
        prop_assert!(is_missing);
    }

    #[test]
    fn contains_accepts_order_preserving_selections((recorded, selected) in arb_with_subsequence(16)) {
        let result = compare_contains(&patterns(&selected), &recorded);
        prop_assert!(result.is_success());
        prop_assert_eq!(
            result.actual.as_array().map(Vec::len),
            Some(recorded.len() - selected.len())
        );
    }

    #[test]
    fn contains_types_accept_order_preserving_selections((recorded, selected) in arb_with_subsequence(16)) {
        let result = compare_contains_types(&project_types(&selected), &project_types(&recorded));
        prop_assert!(result.is_success());
    }

    #[test]
    fn contains_accepts_empty_expectations(recorded in arb_actions(16)) {
        prop_assert!(compare_contains(&[], &recorded).is_success());
        prop_assert!(compare_contains_types(&[], &project_types(&recorded)).is_success());
    }

    #[test]
    fn negation_only_flips_the_verdict(
        recorded in arb_actions(10),
        expected in arb_actions(4),
    ) {
        let result = compare_contains(&patterns(&expected), &recorded);
        assert_polarity_keeps_payload(&result)?;

        let result = compare_exact(&patterns(&expected), &recorded);
        if result.length_mismatch.is_none() {
            assert_polarity_keeps_payload(&result)?;
        }
    }

    #[test]
    fn exact_types_agree_with_exact_actions_on_bare_actions(kinds in prop::collection::vec("[A-C]", 0..8)) {
        let recorded: Vec<Action> = kinds.iter().map(|kind| Action::of_type(kind.as_str())).collect();
        let mut reversed = recorded.clone();
        reversed.reverse();

        let by_action = compare_exact(&patterns(&reversed), &recorded).is_success();
        let by_type =
            compare_exact_types(&project_types(&reversed), &project_types(&recorded)).is_success();
        prop_assert_eq!(by_action, by_type);
    }
}

#[test]
fn exact_of_empty_sequences() {
    assert!(compare_exact(&[], &[]).is_success());

    let result = compare_exact(&[], &actions(&["X"]));
    assert_eq!(
        result.length_mismatch,
        Some(LengthMismatch::SurplusActual {
            sequence: actioncheck::SequenceKind::Actions,
            surplus: vec![json!({ "type": "X" })],
        })
    );
}

#[test]
fn exact_is_order_sensitive() {
    let recorded = actions(&["X", "Y"]);
    assert!(compare_exact(&patterns(&actions(&["X", "Y"])), &recorded).is_success());
    assert!(!compare_exact(&patterns(&actions(&["Y", "X"])), &recorded).is_success());
}

#[test]
fn identical_sequences_match_exactly() {
    let recorded = actions(&["X", "Y"]);
    assert!(compare_exact(&patterns(&recorded), &recorded).is_success());
}

#[test]
fn shorter_expectations_fail_exact_but_pass_contains() {
    let recorded = actions(&["X", "Y"]);
    let expected = patterns(&actions(&["X"]));

    let exact = compare_exact(&expected, &recorded);
    assert!(exact.verdict);
    assert!(exact.length_mismatch.is_some());
    assert!(compare_contains(&expected, &recorded).is_success());
}

#[test]
fn contains_skips_between_matches() {
    let recorded = actions(&["X", "Y", "Z"]);
    let expected = patterns(&actions(&["X", "Z"]));

    assert!(compare_contains(&expected, &recorded).is_success());

    let exact = compare_exact(&expected, &recorded);
    assert!(!exact.verdict);
    assert!(exact.message.starts_with("unexpected action at position 1"));
}

#[test]
fn types_contains_but_not_exact() {
    let recorded = project_types(&actions(&["A", "B", "C"]));
    let expected = vec![json!("A"), json!("C")];

    assert!(compare_contains_types(&expected, &recorded).is_success());
    assert!(!compare_exact_types(&expected, &recorded).is_success());
}
