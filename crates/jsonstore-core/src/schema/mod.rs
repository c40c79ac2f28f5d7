//! The schema capability.
//!
//! The store engine never inspects a schema's internals.  It only asks one
//! question: "is this decoded JSON value acceptable, and if so, what typed
//! value does it describe?"  [`Schema::validate`] answers it.
//!
//! Two implementations are provided:
//!
//! - [`TypedSchema`] – parse-or-fail through `serde`: the value is
//!   deserialized into `T`, then any refinement checks registered with
//!   [`TypedSchema::check`] run against the typed value.
//! - [`FnSchema`] – wraps an arbitrary closure, for callers that bring their
//!   own validation library.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A decoded value did not conform to a schema.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("schema validation failed: {reason}")]
pub struct ValidationError {
    reason: String,
}

impl ValidationError {
    /// Creates a validation error with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason the value was rejected.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Accepts or rejects decoded JSON values.
///
/// On acceptance the schema returns a value of [`Schema::Output`], which the
/// store hands back to its caller and serializes when persisting.
pub trait Schema: Send + Sync {
    /// The typed shape values are constrained to.
    type Output: Serialize + Clone + Send + Sync;

    /// Validates `value`, returning the typed value on success.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] describing why `value` was rejected.
    fn validate(&self, value: &Value) -> Result<Self::Output, ValidationError>;
}

type Check<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// A schema backed by `serde` deserialization into `T`.
///
/// Structural constraints (required fields, enum variants, numeric types)
/// come from `T`'s `Deserialize` impl.  Constraints `serde` cannot express,
/// such as numeric ranges, are added with [`TypedSchema::check`].
///
/// # Examples
///
/// ```rust
/// use jsonstore_core::{Schema, TypedSchema};
/// use serde::{Deserialize, Serialize};
/// use serde_json::json;
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct Prefs {
///     volume: u8,
/// }
///
/// let schema = TypedSchema::<Prefs>::new().check(|p| {
///     if p.volume <= 100 {
///         Ok(())
///     } else {
///         Err(format!("volume {} exceeds 100", p.volume))
///     }
/// });
///
/// assert!(schema.validate(&json!({ "volume": 40 })).is_ok());
/// assert!(schema.validate(&json!({ "volume": 140 })).is_err());
/// assert!(schema.validate(&json!({ "volume": "loud" })).is_err());
/// ```
pub struct TypedSchema<T> {
    checks: Vec<Check<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    /// Creates a schema with no refinement checks.
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Adds a refinement check that runs after deserialization succeeds.
    ///
    /// Checks run in registration order; the first failure rejects the value.
    pub fn check<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("type", &std::any::type_name::<T>())
            .field("checks", &self.checks.len())
            .finish()
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: DeserializeOwned + Serialize + Clone + Send + Sync,
{
    type Output = T;

    fn validate(&self, value: &Value) -> Result<T, ValidationError> {
        let typed = T::deserialize(value).map_err(|e| ValidationError::new(e.to_string()))?;
        for check in &self.checks {
            check(&typed).map_err(ValidationError::new)?;
        }
        Ok(typed)
    }
}

/// A schema defined by a closure.
pub struct FnSchema<T, F> {
    validate: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> FnSchema<T, F>
where
    F: Fn(&Value) -> Result<T, ValidationError> + Send + Sync,
{
    /// Wraps `validate` as a [`Schema`].
    pub fn new(validate: F) -> Self {
        Self {
            validate,
            _marker: PhantomData,
        }
    }
}

impl<T, F> fmt::Debug for FnSchema<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSchema")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T, F> Schema for FnSchema<T, F>
where
    T: Serialize + Clone + Send + Sync,
    F: Fn(&Value) -> Result<T, ValidationError> + Send + Sync,
{
    type Output = T;

    fn validate(&self, value: &Value) -> Result<T, ValidationError> {
        (self.validate)(value)
    }
}
