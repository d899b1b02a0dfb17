//! The recorded action model.
//!
//! An [`Action`] is an opaque structured record: a JSON object with a
//! required `type` discriminant. Nothing else about its shape is assumed.
//! Actions are validated once at construction, so every comparator can rely
//! on `kind()` without re-checking.
//!
//! # Example
//!
//! ```rust
//! use actioncheck::Action;
//! use serde_json::json;
//!
//! let action = Action::of_type("UserLoaded").with_field("payload", json!({ "id": 7 }));
//! assert_eq!(action.kind(), &json!("UserLoaded"));
//!
//! // Values coming from elsewhere are validated
//! assert!(Action::try_new(json!({ "payload": 1 })).is_err());
//! ```

use nutype::nutype;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the discriminant field every action carries.
pub const DISCRIMINANT_FIELD: &str = "type";

/// Errors raised while turning a value into an [`Action`].
#[derive(Debug, Error)]
pub enum ActionError {
    /// The value is not a JSON object.
    #[error("action must be an object, got {0}")]
    NotAnObject(&'static str),

    /// The object has no `type` field.
    #[error("action is missing the `type` field")]
    MissingType,

    /// The `type` field is not a primitive (string, number or bool).
    #[error("action `type` must be a string, number or bool, got {0}")]
    InvalidType(&'static str),

    /// A typed action could not be serialized to JSON.
    #[error("action serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A dispatched action: a JSON object with a primitive `type` discriminant.
///
/// Serializes as the bare object; deserializing runs the same validation as
/// [`Action::try_new`].
#[nutype(
    validate(with = validate_action, error = ActionError),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Display,
        AsRef,
        TryFrom,
        Into,
        Serialize,
        Deserialize
    )
)]
pub struct Action(Value);

fn validate_action(value: &Value) -> Result<(), ActionError> {
    let object = value
        .as_object()
        .ok_or_else(|| ActionError::NotAnObject(json_kind(value)))?;
    match object.get(DISCRIMINANT_FIELD) {
        None => Err(ActionError::MissingType),
        Some(Value::String(_) | Value::Number(_) | Value::Bool(_)) => Ok(()),
        Some(other) => Err(ActionError::InvalidType(json_kind(other))),
    }
}

impl Action {
    /// Creates an action that only carries a discriminant.
    pub fn of_type(kind: impl Into<String>) -> Self {
        let mut object = Map::new();
        object.insert(DISCRIMINANT_FIELD.to_string(), Value::String(kind.into()));
        Self::try_new(Value::Object(object)).expect("an object with a string `type` is always valid")
    }

    /// Serializes a typed action, for example an enum tagged with
    /// `#[serde(tag = "type")]`, and validates the result.
    pub fn from_serializable<T: Serialize + ?Sized>(action: &T) -> Result<Self, ActionError> {
        Self::try_new(serde_json::to_value(action)?)
    }

    /// Adds or replaces a field. Replacing `type` is ignored.
    #[must_use]
    pub fn with_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if name == DISCRIMINANT_FIELD {
            return self;
        }
        let mut inner = self.into_inner();
        if let Value::Object(object) = &mut inner {
            object.insert(name, value.into());
        }
        Self::try_new(inner).expect("adding a non-discriminant field keeps an action valid")
    }

    /// The discriminant value.
    pub fn kind(&self) -> &Value {
        // Presence is checked by validation.
        self.get(DISCRIMINANT_FIELD).unwrap_or(&Value::Null)
    }

    /// Looks up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_value().get(field)
    }

    /// The underlying JSON object.
    pub fn as_value(&self) -> &Value {
        self.as_ref()
    }

    /// Consumes the action, returning the underlying JSON object.
    pub fn into_value(self) -> Value {
        self.into_inner()
    }
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
