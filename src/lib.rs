//! # Triage
//!
//! Declarative, rule-based input validation and error normalization.
//!
//! ## Overview
//!
//! Triage runs two kinds of ordered rule lists and turns both into the same
//! uniform shape: a non-empty list of `{path, message}` field errors.
//!
//! - **Validation rules** name a field by dotted path, a validator by
//!   registry name, validator options and a message. Every rule is evaluated
//!   before anything is raised, so a failed run reports all of its problems
//!   at once, wrapped in a single [`ValidationFailure`] (kind
//!   `"ValidationError"`, code 422).
//! - **Handler rules** map an arbitrary runtime error, classified by kind
//!   tag and optional code, to one field error. The first matching rule wins;
//!   an error nothing matches comes back as [`Handled::Unhandled`] for the
//!   caller to re-raise.
//!
//! ## Core Types
//!
//! - [`Engine`]: runs validation and handler rule lists
//! - [`ValidatorRegistry`]: the name to predicate map, preloaded with built-ins
//! - [`ValidationRule`] / [`HandlerRule`]: the declarative rules
//! - [`FieldError`] / [`FieldErrors`]: the normalized output
//! - [`Classify`]: the kind/code view of an error handler rules match on
//! - [`RunContext`]: key/value state shared by every predicate of one run
//!
//! ## Example
//!
//! ```rust
//! use triage::{AppError, Engine, HandlerRule, RunContext, ValidationRule};
//! use serde_json::json;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let engine = Engine::new();
//! let context = RunContext::new();
//!
//! let rules = vec![
//!     ValidationRule::new("name", "isLength", "name must be 3 to 5 characters")
//!         .options(json!({"min": 3, "max": 5})),
//! ];
//! assert!(engine.validate_input(&json!({"name": "John"}), &rules, &context).await.is_ok());
//!
//! let err = engine
//!     .validate_input(&json!({"name": "John Smith"}), &rules, &context)
//!     .await
//!     .unwrap_err();
//! assert_eq!(err.failure().unwrap().code(), 422);
//!
//! let handlers = vec![
//!     HandlerRule::new("email", "MongoError", "email already taken").code(11000),
//! ];
//! let duplicate = AppError::new("MongoError", "E11000 duplicate key").with_code(11000);
//! let handled = engine.handle_error(&duplicate, &handlers, &context).await.unwrap();
//! assert_eq!(handled.errors().unwrap().first().path, "email");
//! # });
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod path;
pub mod registry;
pub mod rule;
pub mod validators;

pub use context::RunContext;
pub use engine::{handle_error, Engine, Handled};
pub use error::{
    AppError, BoxError, Classify, ErrorKind, FieldError, FieldErrors, HandleError,
    ValidateError, ValidationFailure,
};
pub use path::{FieldPath, PathSegment};
pub use registry::{RegistryError, ValidatorRegistry};
pub use rule::{
    ErrorBlock, Filter, HandlerOptions, HandlerRule, PredicateResult, RuleOptions, RuleSet,
    RuleSetError, ValidationRule, ValueBlock, Validator,
};
