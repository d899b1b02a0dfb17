//! Property test generators for recorded actions.
//!
//! Discriminants are drawn from a deliberately small alphabet part of the
//! time, so generated sequences contain repeated types and the greedy
//! subsequence scan gets exercised on ambiguous input.

use actioncheck::Action;
use proptest::prelude::*;
use proptest::sample::subsequence;

/// Generates action discriminants.
///
/// # Example
/// ```rust,ignore
/// use proptest::prelude::*;
/// use actioncheck_testing::generators::arb_action_type;
///
/// proptest! {
///     #[test]
///     fn test_with_type(kind in arb_action_type()) {
///         assert!(!kind.is_empty());
///     }
/// }
/// ```
pub fn arb_action_type() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[A-E]",
        1 => "[A-Z][a-zA-Z]{1,12}",
    ]
}

/// Generates actions with an optional numeric payload.
pub fn arb_action() -> impl Strategy<Value = Action> {
    (arb_action_type(), prop::option::of(any::<u32>())).prop_map(|(kind, payload)| {
        let action = Action::of_type(kind);
        match payload {
            Some(payload) => action.with_field("payload", payload),
            None => action,
        }
    })
}

/// Generates sequences of up to `max_len` actions.
pub fn arb_actions(max_len: usize) -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(arb_action(), 0..=max_len)
}

/// Generates a recorded sequence together with an order-preserving
/// selection of its elements.
pub fn arb_with_subsequence(max_len: usize) -> impl Strategy<Value = (Vec<Action>, Vec<Action>)> {
    arb_actions(max_len).prop_flat_map(|actions| {
        let len = actions.len();
        (Just(actions.clone()), subsequence(actions, 0..=len))
    })
}
