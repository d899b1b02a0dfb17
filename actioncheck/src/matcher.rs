//! Matching a single expectation against a single recorded item.
//!
//! [`Matcher`] is the seam both comparators are built on: expectations
//! match actions (pattern or predicate), and plain values match
//! discriminants by equality.

use serde::Serialize;
use serde_json::Value;

use crate::action::Action;
use crate::expectation::Expectation;

/// Outcome of matching one expectation against one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Whether the item satisfied the expectation.
    pub matched: bool,
    /// The value the expectation asked for, when there is one to show.
    pub expected: Option<Value>,
    /// The value that was inspected.
    pub actual: Value,
    /// Whether a structural diff of `expected`/`actual` is meaningful.
    pub diffable: bool,
    /// Why the match failed.
    pub reason: Option<String>,
}

impl MatchResult {
    /// A successful match against `actual`.
    pub const fn hit(actual: Value) -> Self {
        Self {
            matched: true,
            expected: None,
            actual,
            diffable: false,
            reason: None,
        }
    }
}

/// A recorded item that can be shown in diagnostics.
pub trait Recorded {
    /// JSON rendering of the item.
    fn to_json(&self) -> Value;
}

impl Recorded for Action {
    fn to_json(&self) -> Value {
        self.as_value().clone()
    }
}

impl Recorded for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

/// Something that can be matched against a recorded item of type `T`.
pub trait Matcher<T: Recorded> {
    /// Matches `item`. Never panics and never fails; a mismatch is data.
    fn match_item(&self, item: &T) -> MatchResult;

    /// The value to report when this matcher could not be satisfied.
    fn render(&self) -> Value;

    /// Whether a structural diff against this matcher makes sense.
    fn is_diffable(&self) -> bool;

    /// Short description used in failure messages.
    fn describe(&self) -> String {
        self.render().to_string()
    }
}

impl Matcher<Action> for Expectation {
    fn match_item(&self, action: &Action) -> MatchResult {
        match_action(self, action)
    }

    fn render(&self) -> Value {
        Self::render(self)
    }

    fn is_diffable(&self) -> bool {
        !self.is_predicate()
    }

    fn describe(&self) -> String {
        Self::describe(self)
    }
}

impl Matcher<Value> for Value {
    fn match_item(&self, item: &Value) -> MatchResult {
        if self == item {
            return MatchResult::hit(item.clone());
        }
        MatchResult {
            matched: false,
            expected: Some(self.clone()),
            actual: item.clone(),
            diffable: true,
            reason: Some(format!("expected {item} to equal {self}")),
        }
    }

    fn render(&self) -> Value {
        self.clone()
    }

    fn is_diffable(&self) -> bool {
        true
    }
}

/// Resolves one expectation against one action.
///
/// Patterns are compared for deep structural equality and are always
/// diffable. Predicates are run once; a failure is diffable only when it
/// supplies both an expected and an actual value, otherwise the result
/// falls back to `(None, action)`.
pub fn match_action(expectation: &Expectation, action: &Action) -> MatchResult {
    match expectation {
        Expectation::Pattern(pattern) => {
            if action.as_value() == pattern {
                return MatchResult::hit(action.to_json());
            }
            MatchResult {
                matched: false,
                expected: Some(pattern.clone()),
                actual: action.to_json(),
                diffable: true,
                reason: Some(format!("expected {action} to deeply equal {pattern}")),
            }
        }
        Expectation::Predicate(predicate) => match predicate.evaluate(action) {
            Ok(()) => MatchResult::hit(action.to_json()),
            Err(failure) => {
                let diffable = failure.expected.is_some() && failure.actual.is_some();
                MatchResult {
                    matched: false,
                    expected: failure.expected,
                    actual: failure.actual.unwrap_or_else(|| action.to_json()),
                    diffable,
                    reason: Some(failure.message),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expectation::{check, PredicateFailure};
    use serde_json::json;

    fn action(value: Value) -> Action {
        Action::try_new(value).unwrap()
    }

    #[test]
    fn pattern_match_is_deep_equality() {
        let recorded = action(json!({ "type": "A", "payload": { "a": 1, "b": [1, 2] } }));
        let pattern = Expectation::pattern(json!({ "payload": { "b": [1, 2], "a": 1 }, "type": "A" }));

        let result = match_action(&pattern, &recorded);
        assert!(result.matched);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn pattern_mismatch_reports_pattern_and_action() {
        let recorded = action(json!({ "type": "A" }));
        let pattern = Expectation::pattern(json!({ "type": "B" }));

        let result = match_action(&pattern, &recorded);
        assert!(!result.matched);
        assert_eq!(result.expected, Some(json!({ "type": "B" })));
        assert_eq!(result.actual, json!({ "type": "A" }));
        assert!(result.diffable);
        insta::assert_snapshot!(
            result.reason.unwrap(),
            @r#"expected {"type":"A"} to deeply equal {"type":"B"}"#
        );
    }

    #[test]
    fn pattern_is_not_a_subset_match() {
        let recorded = action(json!({ "type": "A", "payload": 1 }));
        let result = match_action(&Expectation::pattern(json!({ "type": "A" })), &recorded);
        assert!(!result.matched);
    }

    #[test]
    fn passing_predicate_matches() {
        let result = match_action(&Expectation::of_type("A"), &Action::of_type("A"));
        assert!(result.matched);
    }

    #[test]
    fn message_only_predicate_is_not_diffable() {
        let expectation = Expectation::predicate(|_| Err(PredicateFailure::new("nope")));
        let result = match_action(&expectation, &Action::of_type("A"));

        assert!(!result.matched);
        assert_eq!(result.expected, None);
        assert_eq!(result.actual, json!({ "type": "A" }));
        assert!(!result.diffable);
        assert_eq!(result.reason.as_deref(), Some("nope"));
    }

    #[test]
    fn predicate_with_structures_is_diffable() {
        let expected = json!({ "type": "A", "payload": { "foo": "bar", "bar": "bar" } });
        let recorded = action(json!({ "type": "A", "payload": { "foo": "foo", "bar": "bar" } }));
        let inner = expected.clone();
        let expectation = Expectation::predicate(move |action| check::deep_equal(action, &inner));

        let result = match_action(&expectation, &recorded);
        assert!(!result.matched);
        assert!(result.diffable);
        assert_eq!(result.expected, Some(expected));
        assert_eq!(result.actual, recorded.into_value());
    }

    #[test]
    fn predicate_with_only_expected_falls_back_to_action() {
        let expectation = Expectation::predicate(|_| {
            Err(PredicateFailure::new("half").with_expected(json!("B")))
        });
        let result = match_action(&expectation, &Action::of_type("A"));

        assert_eq!(result.expected, Some(json!("B")));
        assert_eq!(result.actual, json!({ "type": "A" }));
        assert!(!result.diffable);
    }

    #[test]
    fn value_matcher_is_plain_equality() {
        let expected = json!("A");
        assert!(expected.match_item(&json!("A")).matched);

        let miss = expected.match_item(&json!("B"));
        assert!(!miss.matched);
        assert!(miss.diffable);
        assert_eq!(miss.expected, Some(json!("A")));
        assert_eq!(miss.actual, json!("B"));
    }

    #[test]
    fn expectation_diffability_follows_variant() {
        assert!(Matcher::<Action>::is_diffable(&Expectation::pattern(json!({ "type": "A" }))));
        assert!(!Matcher::<Action>::is_diffable(&Expectation::of_type("A")));
    }
}
