//! Error classification by kind tag and optional code.
//!
//! Handler rules never inspect concrete error types. Every error that can be
//! handed to the handler engine implements [`Classify`], exposing an explicit
//! kind tag plus an optional machine-readable code.

use std::fmt::{self, Display};

use serde_json::Value;

use super::field_error::{ValidationFailure, VALIDATION_ERROR_CODE, VALIDATION_ERROR_KIND};

/// An error that exposes a kind tag and an optional code.
///
/// # Example
///
/// ```rust
/// use triage::{AppError, Classify};
/// use serde_json::json;
///
/// let err = AppError::new("MongoError", "duplicate key").with_code(json!(11000));
/// assert_eq!(err.kind(), "MongoError");
/// assert_eq!(err.code(), Some(json!(11000)));
/// ```
pub trait Classify: std::error::Error + Send + Sync {
    /// The symbolic kind tag handler rules match on.
    fn kind(&self) -> &str;

    /// Optional code compared against a rule's `code` option.
    fn code(&self) -> Option<Value> {
        None
    }

    /// Returns the aggregated validation failure this error is or carries.
    fn validation_failure(&self) -> Option<&ValidationFailure> {
        None
    }
}

impl Classify for ValidationFailure {
    fn kind(&self) -> &str {
        VALIDATION_ERROR_KIND
    }

    fn code(&self) -> Option<Value> {
        Some(Value::from(VALIDATION_ERROR_CODE))
    }

    fn validation_failure(&self) -> Option<&ValidationFailure> {
        Some(self)
    }
}

impl Classify for std::io::Error {
    fn kind(&self) -> &str {
        "IoError"
    }

    fn code(&self) -> Option<Value> {
        self.raw_os_error().map(Value::from)
    }
}

/// Compares a handler rule's code with an error's code.
///
/// Numbers compare by numeric value, so `11000` equals `11000.0`. Any other
/// pair compares by JSON equality.
///
/// ```rust
/// use triage::error::codes_equal;
/// use serde_json::json;
///
/// assert!(codes_equal(&json!(11000), &json!(11000.0)));
/// assert!(!codes_equal(&json!(11000), &json!("11000")));
/// ```
pub fn codes_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            a.as_f64() == b.as_f64()
        }
        _ => expected == actual,
    }
}

/// A symbolic error-kind tag used by handler rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ErrorKind(String);

impl ErrorKind {
    /// Creates a kind tag.
    pub fn new(tag: impl Into<String>) -> Self {
        ErrorKind(tag.into())
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `err` is classified under this tag.
    pub fn matches(&self, err: &dyn Classify) -> bool {
        err.kind() == self.0
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ErrorKind {
    fn from(tag: &str) -> Self {
        ErrorKind::new(tag)
    }
}

impl From<String> for ErrorKind {
    fn from(tag: String) -> Self {
        ErrorKind(tag)
    }
}

/// A general-purpose classified runtime error.
///
/// Application code that does not have its own error type can raise an
/// `AppError` to participate in handler matching.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The kind tag.
    pub kind: String,
    /// Human-readable description.
    pub message: String,
    /// Optional code, e.g. a driver error number.
    pub code: Option<Value>,
}

impl AppError {
    /// Creates an error with the given kind tag and message.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Sets the code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<Value>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl Classify for AppError {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn code(&self) -> Option<Value> {
        self.code.clone()
    }
}
