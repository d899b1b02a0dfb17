//! Error types for ActionCheck.
//!
//! Comparators never fail: mismatches are data ([`MatchResult`],
//! [`ComparisonResult`]). Errors only appear at the outer edge:
//!
//! - **ActionError**: a value could not be turned into an action
//! - **PreconditionError**: the assertion subject does not record actions
//! - **AssertionFailure**: the final, user-visible failure of an assertion
//! - **AssertionError**: what the assertion entry points return
//!
//! [`MatchResult`]: crate::matcher::MatchResult
//! [`ComparisonResult`]: crate::comparison::ComparisonResult

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use crate::action::ActionError;

/// The assertion subject lacks the recording capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// The subject cannot report the actions dispatched to it.
    #[error("expected {subject} to record dispatched actions")]
    NotRecordable {
        /// Description of the subject.
        subject: String,
    },
}

/// A failed assertion, with the payload needed to explain it.
///
/// When `diffable` is false, `expected`/`actual` must not be rendered as a
/// structural diff; this happens for predicate expectations that carry no
/// values of their own.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct AssertionFailure {
    /// What went wrong.
    pub message: String,
    /// Expected value.
    pub expected: Value,
    /// Actual value.
    pub actual: Value,
    /// Whether `expected`/`actual` should be shown as a diff.
    pub diffable: bool,
}

impl AssertionFailure {
    /// Creates a failure.
    pub fn new(message: impl Into<String>, expected: Value, actual: Value, diffable: bool) -> Self {
        Self {
            message: message.into(),
            expected,
            actual,
            diffable,
        }
    }

    /// Multi-line report: the message, followed by pretty-printed expected
    /// and actual values when the failure is diffable.
    pub fn report(&self) -> String {
        let mut report = self.message.clone();
        if self.diffable {
            report.push_str(&format!(
                "\n\nexpected:\n{}\n\nactual:\n{}",
                pretty(&self.expected),
                pretty(&self.actual)
            ));
        }
        report
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Errors returned by the assertion entry points.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// The subject cannot be asserted on.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The assertion did not hold.
    #[error(transparent)]
    Failed(#[from] AssertionFailure),
}

impl AssertionError {
    /// The failure payload, if the assertion was evaluated.
    pub const fn failure(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Precondition(_) => None,
        }
    }

    /// Report suitable for a panic message.
    pub fn report(&self) -> String {
        match self {
            Self::Failed(failure) => failure.report(),
            Self::Precondition(error) => error.to_string(),
        }
    }
}
