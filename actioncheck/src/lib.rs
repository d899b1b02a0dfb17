//! `ActionCheck` - assertions over recorded action sequences
//!
//! Compares the ordered list of actions recorded by a subject (a mock store,
//! an event log, a plain `Vec`) against an ordered list of expectations,
//! where each expectation is either a structural pattern or a predicate.
//!
//! Two disciplines are supported, for whole actions and for their `type`
//! discriminants only:
//!
//! - **exact**: the expectations account for the entire recorded sequence
//! - **contains**: the expectations appear in order as a subsequence
//!
//! Comparators are pure functions returning a [`ComparisonResult`]; the
//! assertion adapter in [`assertion`] is the single place where a result
//! becomes an [`AssertionFailure`].
//!
//! # Example
//!
//! ```rust
//! use actioncheck::{check, expect, Action, Expectation};
//! use serde_json::json;
//!
//! let recorded = vec![
//!     Action::of_type("Fetch"),
//!     Action::of_type("Loaded").with_field("payload", json!({ "id": 1 })),
//! ];
//!
//! expect(&recorded).to().have().dispatched_actions(vec![
//!     Expectation::of_type("Fetch"),
//!     Expectation::predicate(|action| {
//!         check::field_equals(action, "payload", &json!({ "id": 1 }))
//!     }),
//! ])?;
//!
//! expect(&recorded).to().contain().dispatched_types("Loaded")?;
//! # Ok::<(), actioncheck::AssertionError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod action;
pub mod assertion;
pub mod comparison;
pub mod config;
pub mod errors;
pub mod expectation;
pub mod matcher;
pub mod sequence;
pub mod types_sequence;

pub use action::{Action, ActionError, DISCRIMINANT_FIELD};
pub use assertion::{
    dispatched_actions, dispatched_types, ensure_recordable, expect, resolve, signal,
    ActionRecorder, Assertion, Subject,
};
pub use comparison::{ComparisonResult, LengthMismatch, SequenceKind};
pub use config::{AssertionFlags, Mode};
pub use errors::{AssertionError, AssertionFailure, PreconditionError};
pub use expectation::{
    check, Expectation, Expectations, Predicate, PredicateFailure, TypeExpectations,
};
pub use matcher::{match_action, MatchResult, Matcher, Recorded};
pub use sequence::{compare, compare_contains, compare_exact};
pub use types_sequence::{
    compare_contains_types, compare_exact_types, compare_types, project_types,
};
