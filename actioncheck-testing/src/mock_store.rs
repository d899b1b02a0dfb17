//! An in-memory store that records every dispatched action.
//!
//! `MockStore` plays the event-recording collaborator: code under test
//! dispatches into it, and assertions read the recorded sequence back.
//!
//! # Example
//!
//! ```rust
//! use actioncheck::expect;
//! use actioncheck_testing::MockStore;
//! use serde_json::json;
//!
//! let store = MockStore::new();
//! store.dispatch(&json!({ "type": "Loaded" }))?;
//!
//! expect(&store).to().have().dispatched_types("Loaded")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actioncheck::{Action, ActionError, ActionRecorder, Subject};
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

/// A store that records dispatched actions in order.
///
/// Clones share the same recording, so a handle given to the code under
/// test and the handle used for assertions see the same actions.
///
/// # Type Parameters
///
/// - `S`: The state returned by [`MockStore::state`]. Defaults to a JSON
///   value.
#[derive(Debug, Clone)]
pub struct MockStore<S = Value>
where
    S: Clone,
{
    actions: Arc<Mutex<Vec<Action>>>,
    state: S,
}

impl MockStore<Value> {
    /// Creates a store with `null` state and no recorded actions.
    pub fn new() -> Self {
        Self::with_state(Value::Null)
    }
}

impl Default for MockStore<Value> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> MockStore<S>
where
    S: Clone,
{
    /// Creates a store with the given state and no recorded actions.
    pub fn with_state(state: S) -> Self {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
            state,
        }
    }

    /// A copy of the store state.
    pub fn state(&self) -> S {
        self.state.clone()
    }

    /// Serializes and records an action.
    ///
    /// Values that are not valid actions are rejected and nothing is
    /// recorded.
    pub fn dispatch<A>(&self, action: &A) -> Result<Action, ActionError>
    where
        A: Serialize + ?Sized,
    {
        let action = Action::from_serializable(action)?;
        Ok(self.dispatch_action(action))
    }

    /// Records an already validated action.
    pub fn dispatch_action(&self, action: Action) -> Action {
        trace!(kind = %action.kind(), "action dispatched");
        self.recording().push(action.clone());
        action
    }

    /// Every action recorded so far, in dispatch order.
    pub fn actions(&self) -> Vec<Action> {
        self.recording().clone()
    }

    /// Forgets every recorded action.
    pub fn clear_actions(&self) {
        self.recording().clear();
    }

    fn recording(&self) -> MutexGuard<'_, Vec<Action>> {
        // A panicking test thread must not hide what was recorded before it.
        self.actions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> ActionRecorder for MockStore<S>
where
    S: Clone,
{
    fn recorded_actions(&self) -> Vec<Action> {
        self.actions()
    }
}

impl<S> Subject for MockStore<S>
where
    S: Clone,
{
    fn recorder(&self) -> Option<&dyn ActionRecorder> {
        Some(self)
    }

    fn describe(&self) -> String {
        "MockStore".to_string()
    }
}
