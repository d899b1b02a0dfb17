//! Expectations an assertion compares recorded actions against.
//!
//! An [`Expectation`] is either a structural pattern, compared for deep
//! equality, or a [`Predicate`] that inspects the action itself. Predicates
//! report failure as data through [`PredicateFailure`]; the [`check`] helpers
//! produce failures that carry the compared structures so a diff can be
//! shown for them.
//!
//! # Example
//!
//! ```rust
//! use actioncheck::{check, Expectation};
//! use serde_json::json;
//!
//! // Deep structural pattern
//! let exact = Expectation::pattern(json!({ "type": "Saved", "payload": { "id": 1 } }));
//!
//! // Predicate with a structured failure
//! let has_id = Expectation::predicate(|action| {
//!     check::field_equals(action, "payload", &json!({ "id": 1 }))
//! });
//!
//! // Plain assertions inside a closure
//! let saved = Expectation::asserting(|action| assert_eq!(action.kind(), "Saved"));
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;

use crate::action::{Action, DISCRIMINANT_FIELD};

type PredicateFn = dyn Fn(&Action) -> Result<(), PredicateFailure> + Send + Sync;

/// Failure reported by a predicate expectation.
///
/// `expected` and `actual` are optional: when both are present the failure
/// is diffable, otherwise only the message is meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateFailure {
    /// Human readable reason.
    pub message: String,
    /// What the predicate was looking for.
    pub expected: Option<Value>,
    /// What the predicate found.
    pub actual: Option<Value>,
}

impl PredicateFailure {
    /// Creates a failure that only carries a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Attaches the value the predicate expected.
    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<Value>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Attaches the value the predicate observed.
    #[must_use]
    pub fn with_actual(mut self, actual: impl Into<Value>) -> Self {
        self.actual = Some(actual.into());
        self
    }
}

impl fmt::Display for PredicateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A function expectation evaluated against a single action.
#[derive(Clone)]
pub struct Predicate {
    check: Arc<PredicateFn>,
}

impl Predicate {
    /// Wraps a predicate function.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Action) -> Result<(), PredicateFailure> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Runs the predicate.
    pub fn evaluate(&self, action: &Action) -> Result<(), PredicateFailure> {
        (self.check)(action)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

/// A single expectation: a structural pattern or a predicate.
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Matches when the action is deeply equal to the value.
    Pattern(Value),
    /// Matches when the predicate returns `Ok`.
    Predicate(Predicate),
}

impl Expectation {
    /// Expect an action deeply equal to `value`.
    pub fn pattern(value: impl Into<Value>) -> Self {
        Self::Pattern(value.into())
    }

    /// Expect an action accepted by `check`.
    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(&Action) -> Result<(), PredicateFailure> + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::new(check))
    }

    /// Expect an action whose discriminant equals `kind`, ignoring every
    /// other field.
    pub fn of_type(kind: impl Into<Value>) -> Self {
        let kind = kind.into();
        Self::predicate(move |action| check::field_equals(action, DISCRIMINANT_FIELD, &kind))
    }

    /// Expect an action for which `body` does not panic.
    ///
    /// Lets plain `assert!`/`assert_eq!` be used as a predicate. A panic is
    /// turned into a [`PredicateFailure`] without expected/actual values.
    ///
    /// The process panic hook still runs for every caught panic, so each
    /// rejected action prints a panic report to stderr. A contains-mode scan
    /// tries the expectation against every action it skips; prefer
    /// [`Expectation::of_type`] or a [`check`] based [`Expectation::predicate`]
    /// there to keep test output quiet.
    pub fn asserting<F>(body: F) -> Self
    where
        F: Fn(&Action) + Send + Sync + 'static,
    {
        Self::predicate(move |action| {
            panic::catch_unwind(AssertUnwindSafe(|| body(action)))
                .map_err(|payload| PredicateFailure::new(panic_message(payload.as_ref())))
        })
    }

    /// Returns true for predicate expectations.
    pub const fn is_predicate(&self) -> bool {
        matches!(self, Self::Predicate(_))
    }

    /// The value shown in diagnostics: the pattern itself, or `null` for a
    /// predicate.
    pub fn render(&self) -> Value {
        match self {
            Self::Pattern(value) => value.clone(),
            Self::Predicate(_) => Value::Null,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Pattern(value) => value.to_string(),
            Self::Predicate(_) => "<predicate>".to_string(),
        }
    }
}

impl From<Value> for Expectation {
    fn from(value: Value) -> Self {
        Self::Pattern(value)
    }
}

impl From<Action> for Expectation {
    fn from(action: Action) -> Self {
        Self::Pattern(action.into_value())
    }
}

impl From<Predicate> for Expectation {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "predicate panicked".to_string())
}

/// An ordered list of expectations.
///
/// A single expectation is normalized into a one-element list, and a JSON
/// array is split into one pattern per element.
#[derive(Debug, Clone, Default)]
pub struct Expectations(Vec<Expectation>);

impl Expectations {
    /// The expectations, in order.
    pub fn as_slice(&self) -> &[Expectation] {
        &self.0
    }

    /// Number of expectations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there is nothing to expect.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Expectation> for Expectations {
    fn from(expectation: Expectation) -> Self {
        Self(vec![expectation])
    }
}

impl From<Action> for Expectations {
    fn from(action: Action) -> Self {
        Self(vec![action.into()])
    }
}

impl From<Value> for Expectations {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => Self(values.into_iter().map(Expectation::Pattern).collect()),
            other => Self(vec![Expectation::Pattern(other)]),
        }
    }
}

impl<T: Into<Expectation>> From<Vec<T>> for Expectations {
    fn from(expectations: Vec<T>) -> Self {
        Self(expectations.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Expectation>, const N: usize> From<[T; N]> for Expectations {
    fn from(expectations: [T; N]) -> Self {
        Self(expectations.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<Expectation> for Expectations {
    fn from_iter<I: IntoIterator<Item = Expectation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An ordered list of expected discriminant values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeExpectations(Vec<Value>);

impl TypeExpectations {
    /// The expected discriminants, in order.
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Number of expected discriminants.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there is nothing to expect.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TypeExpectations {
    fn from(kind: &str) -> Self {
        Self(vec![Value::from(kind)])
    }
}

impl From<String> for TypeExpectations {
    fn from(kind: String) -> Self {
        Self(vec![Value::from(kind)])
    }
}

impl From<Value> for TypeExpectations {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => Self(values),
            other => Self(vec![other]),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for TypeExpectations {
    fn from(kinds: Vec<T>) -> Self {
        Self(kinds.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for TypeExpectations {
    fn from(kinds: [T; N]) -> Self {
        Self(kinds.into_iter().map(Into::into).collect())
    }
}

/// Structural checks for use inside predicates.
///
/// Each check returns a [`PredicateFailure`] carrying the compared values, so
/// a failing predicate built from them is reported with a diff.
pub mod check {
    use serde_json::Value;

    use super::PredicateFailure;
    use crate::action::Action;

    /// The whole action must be deeply equal to `expected`.
    pub fn deep_equal(action: &Action, expected: &Value) -> Result<(), PredicateFailure> {
        if action.as_value() == expected {
            return Ok(());
        }
        Err(
            PredicateFailure::new(format!("expected {action} to deeply equal {expected}"))
                .with_expected(expected.clone())
                .with_actual(action.as_value().clone()),
        )
    }

    /// The field `name` must exist and be deeply equal to `expected`.
    pub fn field_equals(
        action: &Action,
        name: &str,
        expected: &Value,
    ) -> Result<(), PredicateFailure> {
        match action.get(name) {
            Some(found) if found == expected => Ok(()),
            Some(found) => Err(PredicateFailure::new(format!(
                "expected field `{name}` to equal {expected}, got {found}"
            ))
            .with_expected(expected.clone())
            .with_actual(found.clone())),
            None => Err(PredicateFailure::new(format!(
                "expected {action} to have field `{name}`"
            ))
            .with_expected(expected.clone())
            .with_actual(Value::Null)),
        }
    }

    /// The field `name` must exist.
    pub fn has_field(action: &Action, name: &str) -> Result<(), PredicateFailure> {
        if action.get(name).is_some() {
            Ok(())
        } else {
            Err(PredicateFailure::new(format!(
                "expected {action} to have field `{name}`"
            )))
        }
    }

    /// Fails with `message` unless `condition` holds.
    pub fn that(condition: bool, message: impl Into<String>) -> Result<(), PredicateFailure> {
        if condition {
            Ok(())
        } else {
            Err(PredicateFailure::new(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_expectation_is_normalized_to_list() {
        let expectations = Expectations::from(Expectation::pattern(json!({ "type": "A" })));
        assert_eq!(expectations.len(), 1);
    }

    #[test]
    fn json_array_is_split_into_patterns() {
        let expectations = Expectations::from(json!([{ "type": "A" }, { "type": "B" }]));
        assert_eq!(expectations.len(), 2);
        assert_eq!(expectations.as_slice()[1].render(), json!({ "type": "B" }));
    }

    #[test]
    fn json_object_is_a_single_pattern() {
        let expectations = Expectations::from(json!({ "type": "A" }));
        assert_eq!(expectations.len(), 1);
        assert!(!expectations.as_slice()[0].is_predicate());
    }

    #[test]
    fn actions_convert_to_patterns() {
        let expectations = Expectations::from(vec![Action::of_type("A"), Action::of_type("B")]);
        assert_eq!(expectations.as_slice()[0].render(), json!({ "type": "A" }));
    }

    #[test]
    fn predicates_render_as_null() {
        let expectation = Expectation::predicate(|_| Ok(()));
        assert!(expectation.is_predicate());
        assert_eq!(expectation.render(), Value::Null);
        assert_eq!(expectation.describe(), "<predicate>");
    }

    #[test]
    fn type_expectations_accept_str_and_lists() {
        assert_eq!(TypeExpectations::from("A").as_slice(), &[json!("A")]);
        assert_eq!(
            TypeExpectations::from(["A", "B"]).as_slice(),
            &[json!("A"), json!("B")]
        );
        assert_eq!(TypeExpectations::from(json!(["A", 2])).len(), 2);
        assert!(TypeExpectations::from(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn of_type_ignores_other_fields() {
        let expectation = Expectation::of_type("A");
        let Expectation::Predicate(predicate) = expectation else {
            panic!("of_type builds a predicate");
        };
        let action = Action::of_type("A").with_field("payload", 1);
        assert!(predicate.evaluate(&action).is_ok());

        let failure = predicate.evaluate(&Action::of_type("B")).unwrap_err();
        assert_eq!(failure.expected, Some(json!("A")));
        assert_eq!(failure.actual, Some(json!("B")));
    }

    #[test]
    fn asserting_turns_panics_into_failures() {
        let Expectation::Predicate(predicate) =
            Expectation::asserting(|action| assert_eq!(action.kind(), "A", "wrong kind"))
        else {
            panic!("asserting builds a predicate");
        };

        assert!(predicate.evaluate(&Action::of_type("A")).is_ok());

        let failure = predicate.evaluate(&Action::of_type("B")).unwrap_err();
        assert!(failure.message.contains("wrong kind"));
        assert_eq!(failure.expected, None);
        assert_eq!(failure.actual, None);
    }

    #[test]
    fn deep_equal_carries_compared_structures() {
        let action = Action::try_new(json!({ "type": "A", "payload": { "foo": "foo" } })).unwrap();
        let expected = json!({ "type": "A", "payload": { "foo": "bar" } });

        let failure = check::deep_equal(&action, &expected).unwrap_err();
        assert_eq!(failure.expected, Some(expected));
        assert_eq!(failure.actual, Some(action.into_value()));
    }

    #[test]
    fn has_field_and_that() {
        let action = Action::of_type("A").with_field("meta", true);
        assert!(check::has_field(&action, "meta").is_ok());
        assert!(check::has_field(&action, "payload").is_err());
        assert!(check::that(true, "never").is_ok());
        assert_eq!(
            check::that(false, "nope").unwrap_err(),
            PredicateFailure::new("nope")
        );
    }
}
