//! Normalized field errors and the aggregated validation failure.
//!
//! This module provides [`FieldError`] for single field-level problems,
//! [`FieldErrors`] for a non-empty ordered list of them, and
//! [`ValidationFailure`], the value a failed validation run raises.

use std::fmt::{self, Display};

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::{json, Value};
use stillwater::prelude::*;

/// Kind tag carried by every [`ValidationFailure`].
pub const VALIDATION_ERROR_KIND: &str = "ValidationError";

/// Status code carried by every [`ValidationFailure`].
pub const VALIDATION_ERROR_CODE: u16 = 422;

/// A single normalized error: the rule path and its user-facing message.
///
/// # Example
///
/// ```rust
/// use triage::FieldError;
///
/// let error = FieldError::new("email", "must be a valid email");
/// assert_eq!(error.to_string(), "email: must be a valid email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    /// The dotted path the rule addressed.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A non-empty, ordered collection of field errors.
///
/// `FieldErrors` wraps a `NonEmptyVec<FieldError>`: a failed run or a matched
/// handler always produces at least one entry, so an empty list is never a
/// possible outcome. Order follows the rule list that produced the errors.
///
/// # Combining Errors
///
/// ```rust
/// use triage::{FieldError, FieldErrors};
/// use stillwater::prelude::*;
///
/// let name = FieldErrors::single(FieldError::new("name", "required"));
/// let email = FieldErrors::single(FieldError::new("email", "invalid"));
///
/// let combined = name.combine(email);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().path, "name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(NonEmptyVec<FieldError>);

impl FieldErrors {
    /// Creates a collection containing a single error.
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a vec, or `None` if the vec is empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors in rule order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the first error.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Returns all errors reported for the given path.
    pub fn at_path(&self, path: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.path == path).collect()
    }

    /// Converts this collection into a `Vec<FieldError>`.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }

    /// Returns the errors as a JSON array of `{path, message}` objects.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.iter()
                .map(|e| json!({"path": e.path, "message": e.message}))
                .collect(),
        )
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        FieldErrors(self.0.combine(other.0))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for error in self.iter() {
            seq.serialize_element(error)?;
        }
        seq.end()
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = Box<dyn Iterator<Item = &'a FieldError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

/// The aggregated failure raised when one or more validation rules fail.
///
/// Carries the complete, ordered list of field errors from one run, the fixed
/// kind tag `"ValidationError"` and the fixed status code 422. It is
/// immutable once constructed.
///
/// # Example
///
/// ```rust
/// use triage::{FieldError, FieldErrors, ValidationFailure};
///
/// let failure = ValidationFailure::new(FieldErrors::single(
///     FieldError::new("name", "must be present"),
/// ));
///
/// assert_eq!(failure.code(), 422);
/// assert_eq!(failure.kind(), "ValidationError");
/// assert_eq!(failure.errors().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    errors: FieldErrors,
}

impl ValidationFailure {
    /// Creates a failure from a non-empty error list.
    pub fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// Returns the field errors in rule order.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consumes the failure, returning its field errors.
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    /// Returns the kind tag, always `"ValidationError"`.
    pub fn kind(&self) -> &'static str {
        VALIDATION_ERROR_KIND
    }

    /// Returns the status code, always 422.
    pub fn code(&self) -> u16 {
        VALIDATION_ERROR_CODE
    }

    /// Renders the failure as a response body.
    ///
    /// ```rust
    /// use triage::{FieldError, FieldErrors, ValidationFailure};
    /// use serde_json::json;
    ///
    /// let failure = ValidationFailure::new(FieldErrors::single(
    ///     FieldError::new("name", "required"),
    /// ));
    ///
    /// assert_eq!(failure.to_body(), json!({
    ///     "kind": "ValidationError",
    ///     "code": 422,
    ///     "errors": [{"path": "name", "message": "required"}]
    /// }));
    /// ```
    pub fn to_body(&self) -> Value {
        json!({
            "kind": self.kind(),
            "code": self.code(),
            "errors": self.errors.to_json(),
        })
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validation failed with {} error(s): {}",
            self.errors.len(),
            self.errors
        )
    }
}

impl std::error::Error for ValidationFailure {}

impl From<FieldErrors> for ValidationFailure {
    fn from(errors: FieldErrors) -> Self {
        Self::new(errors)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationFailure>();
    assert_sync::<ValidationFailure>();
};
