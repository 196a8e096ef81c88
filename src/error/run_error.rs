//! Errors returned by the validation and handler engines.

use serde_json::Value;

use super::classify::Classify;
use super::field_error::ValidationFailure;
use super::BoxError;

/// Errors produced by a validation run.
///
/// Only [`ValidateError::Invalid`] is an expected outcome; the other variants
/// are programmer or collaborator errors and end the run immediately.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// One or more rules failed.
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    /// A rule named a validator the registry does not hold.
    #[error("unknown validator '{0}'")]
    UnknownValidator(String),

    /// A rule has an empty path or message.
    #[error("rule {index} is malformed: {reason}")]
    InvalidRule {
        /// Position of the rule in its list.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A predicate returned an error instead of a verdict.
    #[error("validator '{validator}' failed on '{path}': {source}")]
    Predicate {
        /// The validator name.
        validator: String,
        /// The rule path.
        path: String,
        /// The error the predicate returned.
        #[source]
        source: BoxError,
    },
}

impl ValidateError {
    /// Returns true if this is an ordinary validation failure.
    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidateError::Invalid(_))
    }

    /// Returns the aggregated failure, if this is one.
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            ValidateError::Invalid(failure) => Some(failure),
            _ => None,
        }
    }

    /// Converts into the aggregated failure, returning other variants unchanged.
    pub fn into_failure(self) -> Result<ValidationFailure, Self> {
        match self {
            ValidateError::Invalid(failure) => Ok(failure),
            other => Err(other),
        }
    }
}

impl Classify for ValidateError {
    fn kind(&self) -> &str {
        match self {
            ValidateError::Invalid(failure) => failure.kind(),
            ValidateError::UnknownValidator(_) => "UnknownValidatorError",
            ValidateError::InvalidRule { .. } => "InvalidRuleError",
            ValidateError::Predicate { .. } => "PredicateError",
        }
    }

    fn code(&self) -> Option<Value> {
        self.failure().and_then(Classify::code)
    }

    fn validation_failure(&self) -> Option<&ValidationFailure> {
        self.failure()
    }
}

/// Errors produced by the handler engine.
///
/// "No rule matched" is not an error; see [`Handled::Unhandled`](crate::Handled).
/// Both variants end the scan immediately.
#[derive(Debug, thiserror::Error)]
pub enum HandleError {
    /// A handler block returned an error instead of a verdict.
    #[error("handler block for '{path}' failed: {source}")]
    Block {
        /// The path of the handler rule whose block failed.
        path: String,
        /// The error the block returned.
        #[source]
        source: BoxError,
    },

    /// A handler rule has an empty path, kind or message.
    #[error("handler rule {index} is malformed: {reason}")]
    InvalidRule {
        /// Position of the rule in its list.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },
}
