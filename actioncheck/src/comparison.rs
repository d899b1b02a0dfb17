//! Results produced by the sequence comparators.

use serde::Serialize;
use serde_json::Value;

use crate::errors::AssertionFailure;

/// What a sequence holds, used to word failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceKind {
    /// Whole actions.
    Actions,
    /// Discriminant values only.
    Types,
}

impl SequenceKind {
    /// Plural noun for messages.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Actions => "actions",
            Self::Types => "types",
        }
    }

    /// Singular noun for messages.
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Actions => "action",
            Self::Types => "type",
        }
    }
}

/// A length check that failed after the positional walk of an exact
/// comparison.
///
/// Length mismatches are reported on their own and are a failure regardless
/// of negation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LengthMismatch {
    /// More items were recorded than expected.
    SurplusActual {
        /// What the sequence holds.
        sequence: SequenceKind,
        /// The recorded items past the last expectation.
        surplus: Vec<Value>,
    },
    /// Fewer items were recorded than expected.
    MissingActual {
        /// What the sequence holds.
        sequence: SequenceKind,
        /// Number of expectations.
        expected: usize,
        /// Number of recorded items.
        dispatched: usize,
    },
}

impl LengthMismatch {
    /// Failure message for this mismatch.
    pub fn message(&self) -> String {
        match self {
            Self::SurplusActual { sequence, .. } => {
                format!("more {} were dispatched than expected", sequence.noun())
            }
            Self::MissingActual {
                sequence,
                expected,
                dispatched,
            } => format!(
                "expected {expected} {}, {dispatched} dispatched",
                sequence.noun()
            ),
        }
    }

    /// The value the check expected: no surplus, or the expected count.
    pub fn expected(&self) -> Value {
        match self {
            Self::SurplusActual { .. } => Value::Array(Vec::new()),
            Self::MissingActual { expected, .. } => Value::from(*expected),
        }
    }

    /// The value the check observed: the surplus items, or the recorded count.
    pub fn actual(&self) -> Value {
        match self {
            Self::SurplusActual { surplus, .. } => Value::Array(surplus.clone()),
            Self::MissingActual { dispatched, .. } => Value::from(*dispatched),
        }
    }

    /// Converts the mismatch into the failure it is reported as.
    pub fn to_failure(&self) -> AssertionFailure {
        AssertionFailure::new(self.message(), self.expected(), self.actual(), true)
    }
}

/// Verdict of comparing a recorded sequence against expectations.
///
/// `verdict`, `expected`, `actual` and `diffable` describe the positional
/// walk (exact mode) or the subsequence scan (contains mode). They point at
/// the first divergence or at the specific unmatched expectation, never at
/// an aggregate of every mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// Outcome of the positional walk or subsequence scan.
    pub verdict: bool,
    /// Message describing the outcome; shown when `verdict` is false.
    pub message: String,
    /// Message shown when `verdict` is true but a mismatch was required.
    pub negated_message: String,
    /// Expected value for diagnostics.
    pub expected: Value,
    /// Actual value for diagnostics.
    pub actual: Value,
    /// Whether a structural diff of `expected`/`actual` is meaningful.
    pub diffable: bool,
    /// Length check failure, exact mode only.
    pub length_mismatch: Option<LengthMismatch>,
}

impl ComparisonResult {
    /// True when the verdict holds and no length check failed.
    pub const fn is_success(&self) -> bool {
        self.verdict && self.length_mismatch.is_none()
    }
}

/// Runs the two mandatory length checks of an exact comparison.
///
/// `len` is the length of the compared prefix, `min(expected, actual)`.
pub(crate) fn check_lengths<T, F>(
    sequence: SequenceKind,
    expected_len: usize,
    actual: &[T],
    len: usize,
    render: F,
) -> Option<LengthMismatch>
where
    F: Fn(&T) -> Value,
{
    if actual.len() > len {
        return Some(LengthMismatch::SurplusActual {
            sequence,
            surplus: actual[len..].iter().map(render).collect(),
        });
    }
    if expected_len > len {
        return Some(LengthMismatch::MissingActual {
            sequence,
            expected: expected_len,
            dispatched: len,
        });
    }
    None
}
