//! Comparing recorded actions against a list of expectations.
//!
//! Two disciplines are supported:
//!
//! - **exact**: expectations account for the whole recorded sequence, in
//!   order, one-to-one. The positional walk stops at the first mismatch, and
//!   two length checks always run afterwards so that a wrong value and a
//!   wrong count are reported distinctly.
//! - **contains**: expectations must appear in order as a subsequence. The
//!   scan is greedy: the first recorded action that satisfies the current
//!   expectation is taken, with no backtracking.
//!
//! # Example
//!
//! ```rust
//! use actioncheck::{compare_contains, compare_exact, Action, Expectation};
//!
//! let recorded = vec![Action::of_type("X"), Action::of_type("Y"), Action::of_type("Z")];
//! let expected = vec![Expectation::of_type("X"), Expectation::of_type("Z")];
//!
//! assert!(compare_contains(&expected, &recorded).is_success());
//! assert!(!compare_exact(&expected, &recorded).is_success());
//! ```

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::action::Action;
use crate::comparison::{check_lengths, ComparisonResult, SequenceKind};
use crate::config::Mode;
use crate::expectation::Expectation;
use crate::matcher::{match_action, Matcher, Recorded};

const NEGATED_EXACT: &str = "expected a mismatch but all actions matched";

/// Compares `actual` against `expected` with the discipline selected by
/// `mode`.
pub fn compare(expected: &[Expectation], actual: &[Action], mode: Mode) -> ComparisonResult {
    match mode {
        Mode::Exact => compare_exact(expected, actual),
        Mode::Contains => compare_contains(expected, actual),
    }
}

/// Exact comparison: one expectation per recorded action, in order.
///
/// On the first positional mismatch the walk stops and the result carries
/// that position's expected/actual values. Independently, a surplus of
/// recorded actions or of expectations is reported in `length_mismatch`.
#[instrument(level = "debug", skip_all, fields(expected = expected.len(), actual = actual.len()))]
pub fn compare_exact(expected: &[Expectation], actual: &[Action]) -> ComparisonResult {
    let len = expected.len().min(actual.len());
    let length_mismatch = check_lengths(
        SequenceKind::Actions,
        expected.len(),
        actual,
        len,
        Recorded::to_json,
    );
    if let Some(mismatch) = &length_mismatch {
        debug!(mismatch = %mismatch.message(), "length check failed");
    }

    let divergence = expected[..len]
        .iter()
        .zip(&actual[..len])
        .enumerate()
        .find_map(|(position, (expectation, action))| {
            let result = match_action(expectation, action);
            (!result.matched).then_some((position, result))
        });

    match divergence {
        Some((position, result)) => {
            debug!(position, "action did not match expectation");
            let reason = result
                .reason
                .unwrap_or_else(|| "did not match expectation".to_string());
            ComparisonResult {
                verdict: false,
                message: format!("unexpected action at position {position}: {reason}"),
                negated_message: NEGATED_EXACT.to_string(),
                expected: result
                    .expected
                    .unwrap_or_else(|| expected[position].render()),
                actual: result.actual,
                diffable: result.diffable,
                length_mismatch,
            }
        }
        None => {
            trace!(compared = len, "all compared positions matched");
            ComparisonResult {
                verdict: true,
                message: format!("all {len} compared actions matched"),
                negated_message: NEGATED_EXACT.to_string(),
                expected: Value::Array(expected.iter().map(Expectation::render).collect()),
                actual: Value::Array(actual.iter().map(Recorded::to_json).collect()),
                diffable: expected.iter().all(|expectation| !expectation.is_predicate()),
                length_mismatch,
            }
        }
    }
}

/// Subsequence comparison: every expectation must be found, in order,
/// among the recorded actions.
///
/// On failure the result names the first unsatisfied expectation and
/// carries the recorded actions that were not consumed by earlier matches.
#[instrument(level = "debug", skip_all, fields(expected = expected.len(), actual = actual.len()))]
pub fn compare_contains(expected: &[Expectation], actual: &[Action]) -> ComparisonResult {
    contains_result(SequenceKind::Actions, expected, actual)
}

/// Outcome of a greedy subsequence scan.
#[derive(Debug)]
pub(crate) struct ContainsScan {
    /// Number of expectations satisfied, which is also the index of the
    /// first unsatisfied one.
    pub(crate) found: usize,
    /// Positions in the recorded sequence consumed by a match.
    pub(crate) consumed: BTreeSet<usize>,
}

/// Greedy two-pointer scan of `actual` for `expected` as a subsequence.
pub(crate) fn scan_contains<T, M>(expected: &[M], actual: &[T]) -> ContainsScan
where
    T: Recorded,
    M: Matcher<T>,
{
    let mut consumed = BTreeSet::new();
    let mut expected_idx = 0;
    let mut actual_idx = 0;

    while actual_idx < actual.len() && expected_idx < expected.len() {
        if expected[expected_idx].match_item(&actual[actual_idx]).matched {
            trace!(expected_idx, actual_idx, "expectation found");
            consumed.insert(actual_idx);
            expected_idx += 1;
        }
        actual_idx += 1;
    }

    ContainsScan {
        found: expected_idx,
        consumed,
    }
}

/// Builds the result of a contains comparison for either sequence kind.
pub(crate) fn contains_result<T, M>(
    sequence: SequenceKind,
    expected: &[M],
    actual: &[T],
) -> ComparisonResult
where
    T: Recorded,
    M: Matcher<T>,
{
    let scan = scan_contains(expected, actual);
    let remaining: Vec<Value> = actual
        .iter()
        .enumerate()
        .filter(|(position, _)| !scan.consumed.contains(position))
        .map(|(_, item)| item.to_json())
        .collect();
    let negated_message = format!("all expected {} have been found", sequence.noun());

    match expected.get(scan.found) {
        Some(missing) => {
            debug!(position = scan.found, "expectation not found");
            ComparisonResult {
                verdict: false,
                message: format!(
                    "unable to find expected {} at position {}: {}",
                    sequence.singular(),
                    scan.found,
                    missing.describe()
                ),
                negated_message,
                expected: missing.render(),
                actual: Value::Array(remaining),
                diffable: missing.is_diffable(),
                length_mismatch: None,
            }
        }
        None => ComparisonResult {
            verdict: true,
            message: negated_message.clone(),
            negated_message,
            expected: Value::Array(expected.iter().map(<M as Matcher<T>>::render).collect()),
            actual: Value::Array(remaining),
            diffable: expected.iter().all(<M as Matcher<T>>::is_diffable),
            length_mismatch: None,
        },
    }
}
