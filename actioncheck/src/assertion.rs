//! Assertion entry points over anything that records dispatched actions.
//!
//! The adapter reads the recorded sequence from its subject once, picks the
//! exact or contains comparator from the flags, and turns the
//! [`ComparisonResult`] into a pass or an [`AssertionFailure`]. This is the
//! only place where comparison data becomes an error.
//!
//! Negation only inverts the comparator's verdict. The length checks of an
//! exact comparison are a failure under either polarity.
//!
//! # Example
//!
//! ```rust
//! use actioncheck::{expect, Action};
//! use serde_json::json;
//!
//! let recorded = vec![Action::of_type("Started"), Action::of_type("Finished")];
//!
//! expect(&recorded).to().have().dispatched_types(["Started", "Finished"])?;
//! expect(&recorded).to().contain().dispatched_action(json!({ "type": "Finished" }))?;
//! expect(&recorded).not().contain().dispatched_type("Failed")?;
//! # Ok::<(), actioncheck::AssertionError>(())
//! ```

use serde_json::Value;
use tracing::{debug, warn};

use crate::action::Action;
use crate::comparison::ComparisonResult;
use crate::config::AssertionFlags;
use crate::errors::{AssertionError, AssertionFailure, PreconditionError};
use crate::expectation::{Expectations, TypeExpectations};
use crate::sequence;
use crate::types_sequence::{compare_types, project_types};

/// The capability to report recorded actions, in dispatch order.
pub trait ActionRecorder {
    /// Snapshot of every action recorded so far. Must not have side effects.
    fn recorded_actions(&self) -> Vec<Action>;
}

impl ActionRecorder for &[Action] {
    fn recorded_actions(&self) -> Vec<Action> {
        self.to_vec()
    }
}

impl ActionRecorder for Vec<Action> {
    fn recorded_actions(&self) -> Vec<Action> {
        self.clone()
    }
}

/// Anything an assertion can be made about.
///
/// Only subjects that expose an [`ActionRecorder`] can be asserted on;
/// others fail with [`PreconditionError::NotRecordable`].
pub trait Subject {
    /// The recording capability, when the subject has one.
    fn recorder(&self) -> Option<&dyn ActionRecorder>;

    /// Description used in precondition failures.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl Subject for &[Action] {
    fn recorder(&self) -> Option<&dyn ActionRecorder> {
        Some(self)
    }
}

impl Subject for Vec<Action> {
    fn recorder(&self) -> Option<&dyn ActionRecorder> {
        Some(self)
    }
}

impl Subject for Value {
    fn recorder(&self) -> Option<&dyn ActionRecorder> {
        None
    }
}

/// Returns the subject's recorder, or fails fast when it has none.
pub fn ensure_recordable<S>(subject: &S) -> Result<&dyn ActionRecorder, PreconditionError>
where
    S: Subject + ?Sized,
{
    subject.recorder().ok_or_else(|| {
        let subject = subject.describe();
        warn!(%subject, "assertion subject does not record actions");
        PreconditionError::NotRecordable { subject }
    })
}

/// Asserts on the actions dispatched to `subject`.
pub fn dispatched_actions<S>(
    subject: &S,
    expected: impl Into<Expectations>,
    flags: AssertionFlags,
) -> Result<(), AssertionError>
where
    S: Subject + ?Sized,
{
    let recorder = ensure_recordable(subject)?;
    let expected = expected.into();
    let actions = recorder.recorded_actions();
    debug!(
        negate = flags.negate,
        contains = flags.contains,
        expected = expected.len(),
        recorded = actions.len(),
        "asserting dispatched actions"
    );

    let result = sequence::compare(expected.as_slice(), &actions, flags.mode());
    resolve(result, flags.negate).map_err(AssertionError::from)
}

/// Asserts on the discriminants of the actions dispatched to `subject`.
pub fn dispatched_types<S>(
    subject: &S,
    expected: impl Into<TypeExpectations>,
    flags: AssertionFlags,
) -> Result<(), AssertionError>
where
    S: Subject + ?Sized,
{
    let recorder = ensure_recordable(subject)?;
    let expected = expected.into();
    let types = project_types(&recorder.recorded_actions());
    debug!(
        negate = flags.negate,
        contains = flags.contains,
        expected = expected.len(),
        recorded = types.len(),
        "asserting dispatched types"
    );

    let result = compare_types(expected.as_slice(), &types, flags.mode());
    resolve(result, flags.negate).map_err(AssertionError::from)
}

/// Turns a comparison into the assertion outcome.
///
/// The verdict is signalled first, honouring `negate`; a length mismatch is
/// then a failure regardless of `negate`.
pub fn resolve(result: ComparisonResult, negate: bool) -> Result<(), AssertionFailure> {
    let ComparisonResult {
        verdict,
        message,
        negated_message,
        expected,
        actual,
        diffable,
        length_mismatch,
    } = result;

    signal(verdict, negate, message, negated_message, expected, actual, diffable)?;
    match length_mismatch {
        Some(mismatch) => {
            debug!(mismatch = %mismatch.message(), "length check failed");
            Err(mismatch.to_failure())
        }
        None => Ok(()),
    }
}

/// Raises a failure when `verdict`, inverted if `negate`, does not hold.
///
/// `message` is used for a plain failure and `negated_message` for a failed
/// negation; the payload is passed through untouched either way.
pub fn signal(
    verdict: bool,
    negate: bool,
    message: String,
    negated_message: String,
    expected: Value,
    actual: Value,
    diffable: bool,
) -> Result<(), AssertionFailure> {
    if verdict != negate {
        return Ok(());
    }
    let message = if negate { negated_message } else { message };
    debug!(%message, negate, "assertion failed");
    Err(AssertionFailure::new(message, expected, actual, diffable))
}

/// Fluent assertion over a subject, in the style of
/// `expect(store).not().contain().dispatched_actions(..)`.
#[derive(Debug)]
pub struct Assertion<'a, S: ?Sized> {
    subject: &'a S,
    flags: AssertionFlags,
}

/// Starts an exact, non-negated assertion about `subject`.
pub const fn expect<S: Subject + ?Sized>(subject: &S) -> Assertion<'_, S> {
    Assertion {
        subject,
        flags: AssertionFlags::exact(),
    }
}

impl<'a, S: Subject + ?Sized> Assertion<'a, S> {
    /// Starts an assertion with explicit flags.
    pub const fn with_flags(subject: &'a S, flags: AssertionFlags) -> Self {
        Self { subject, flags }
    }

    /// Connective, no effect.
    #[must_use]
    pub const fn to(self) -> Self {
        self
    }

    /// Connective, no effect.
    #[must_use]
    pub const fn have(self) -> Self {
        self
    }

    /// Inverts the verdict.
    #[must_use]
    pub const fn not(mut self) -> Self {
        self.flags.negate = !self.flags.negate;
        self
    }

    /// Switches to subsequence matching.
    #[must_use]
    pub const fn contain(mut self) -> Self {
        self.flags.contains = true;
        self
    }

    /// The flags this assertion will run with.
    pub const fn flags(&self) -> AssertionFlags {
        self.flags
    }

    /// Asserts on the dispatched actions.
    pub fn dispatched_actions(
        &self,
        expected: impl Into<Expectations>,
    ) -> Result<(), AssertionError> {
        dispatched_actions(self.subject, expected, self.flags)
    }

    /// Alias of [`Assertion::dispatched_actions`].
    pub fn dispatched_action(&self, expected: impl Into<Expectations>) -> Result<(), AssertionError> {
        self.dispatched_actions(expected)
    }

    /// Asserts on the dispatched types.
    pub fn dispatched_types(
        &self,
        expected: impl Into<TypeExpectations>,
    ) -> Result<(), AssertionError> {
        dispatched_types(self.subject, expected, self.flags)
    }

    /// Alias of [`Assertion::dispatched_types`].
    pub fn dispatched_type(&self, expected: impl Into<TypeExpectations>) -> Result<(), AssertionError> {
        self.dispatched_types(expected)
    }

    /// Like [`Assertion::dispatched_actions`], panicking with the failure
    /// report.
    #[track_caller]
    pub fn assert_dispatched_actions(&self, expected: impl Into<Expectations>) {
        if let Err(error) = self.dispatched_actions(expected) {
            panic!("{}", error.report());
        }
    }

    /// Like [`Assertion::dispatched_types`], panicking with the failure
    /// report.
    #[track_caller]
    pub fn assert_dispatched_types(&self, expected: impl Into<TypeExpectations>) {
        if let Err(error) = self.dispatched_types(expected) {
            panic!("{}", error.report());
        }
    }
}
