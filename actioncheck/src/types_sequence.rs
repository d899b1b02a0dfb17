//! Comparing the discriminants of recorded actions.
//!
//! Same two disciplines as [`crate::sequence`], over the projection of the
//! recorded sequence to its `type` values. Values are compared by plain
//! equality; there are no predicates on this path, so failures are always
//! diffable.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::action::Action;
use crate::comparison::{check_lengths, ComparisonResult, SequenceKind};
use crate::config::Mode;
use crate::sequence::contains_result;

/// Projects recorded actions to their discriminant values.
pub fn project_types(actions: &[Action]) -> Vec<Value> {
    actions.iter().map(|action| action.kind().clone()).collect()
}

/// Compares discriminant sequences with the discipline selected by `mode`.
pub fn compare_types(expected: &[Value], actual: &[Value], mode: Mode) -> ComparisonResult {
    match mode {
        Mode::Exact => compare_exact_types(expected, actual),
        Mode::Contains => compare_contains_types(expected, actual),
    }
}

/// Exact comparison of discriminant sequences.
///
/// The common prefix is compared as a whole and reported as a whole; the
/// two length checks of an exact comparison follow.
#[instrument(level = "debug", skip_all, fields(expected = expected.len(), actual = actual.len()))]
pub fn compare_exact_types(expected: &[Value], actual: &[Value]) -> ComparisonResult {
    let len = expected.len().min(actual.len());
    let verdict = expected[..len] == actual[..len];
    let length_mismatch = check_lengths(
        SequenceKind::Types,
        expected.len(),
        actual,
        len,
        Clone::clone,
    );
    debug!(verdict, length_ok = length_mismatch.is_none(), "compared types");

    ComparisonResult {
        verdict,
        message: if verdict {
            "types match".to_string()
        } else {
            "types do not match".to_string()
        },
        negated_message: "types should not match".to_string(),
        expected: Value::Array(expected[..len].to_vec()),
        actual: Value::Array(actual[..len].to_vec()),
        diffable: true,
        length_mismatch,
    }
}

/// Subsequence comparison of discriminant sequences.
#[instrument(level = "debug", skip_all, fields(expected = expected.len(), actual = actual.len()))]
pub fn compare_contains_types(expected: &[Value], actual: &[Value]) -> ComparisonResult {
    contains_result(SequenceKind::Types, expected, actual)
}
