//! Error types for validation runs and error handling.
//!
//! This module provides the normalized [`FieldError`] shape, the aggregated
//! [`ValidationFailure`], the [`Classify`] trait handler rules match against,
//! and the engine errors.

mod classify;
mod field_error;
mod run_error;

pub use classify::{codes_equal, AppError, Classify, ErrorKind};
pub use field_error::{
    FieldError, FieldErrors, ValidationFailure, VALIDATION_ERROR_CODE, VALIDATION_ERROR_KIND,
};
pub use run_error::{HandleError, ValidateError};

/// Boxed error returned by failing predicates and blocks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
