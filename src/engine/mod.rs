//! Validation and handler engines.
//!
//! An [`Engine`] owns a [`ValidatorRegistry`] and runs two kinds of rule
//! lists:
//!
//! - validation rules, through [`Engine::validate_input`], which evaluates
//!   every rule and raises one aggregated [`ValidationFailure`] listing each
//!   failed rule in order;
//! - handler rules, through [`Engine::handle_error`], which maps an arbitrary
//!   classified error to a single field error, or reports it unhandled.
//!
//! Both engines evaluate strictly in list order and await each predicate
//! before moving to the next rule.
//!
//! # Example
//!
//! ```rust
//! use triage::{Engine, RunContext, ValidationRule};
//! use serde_json::json;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let engine = Engine::new();
//! let rules = vec![
//!     ValidationRule::new("name", "isPresent", "must be present"),
//!     ValidationRule::new("email", "isEmail", "must be a valid email"),
//! ];
//!
//! let err = engine
//!     .validate_input(&json!({"email": "nope"}), &rules, &RunContext::new())
//!     .await
//!     .unwrap_err();
//!
//! let failure = err.failure().unwrap();
//! assert_eq!(failure.errors().len(), 2);
//! assert_eq!(failure.errors().first().message, "must be present");
//! # });
//! ```
//!
//! [`ValidationFailure`]: crate::ValidationFailure

mod handle;
mod validate;

pub use handle::{handle_error, Handled};

use serde_json::Value;

use crate::context::RunContext;
use crate::error::{Classify, HandleError, ValidateError};
use crate::registry::ValidatorRegistry;
use crate::rule::{HandlerRule, RuleOptions, RuleSet, ValidationRule};

/// Runs validation and handler rule lists against one validator registry.
///
/// Cloning an engine shares its registry.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    registry: ValidatorRegistry,
}

impl Engine {
    /// Creates an engine over a fresh registry holding the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine over an existing registry.
    pub fn with_registry(registry: ValidatorRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry this engine resolves validator names against.
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Validates `input` against `rules`.
    ///
    /// Every rule is evaluated, in order, before anything is raised. Returns
    /// `Ok(())` when every predicate resolves true.
    ///
    /// # Errors
    ///
    /// - [`ValidateError::Invalid`] listing one `{path, message}` entry per
    ///   failed rule, in rule order.
    /// - [`ValidateError::UnknownValidator`] as soon as a rule names a
    ///   validator the registry does not hold.
    /// - [`ValidateError::InvalidRule`] for a rule with an empty path or
    ///   message.
    /// - [`ValidateError::Predicate`] when a predicate returns an error.
    pub async fn validate_input(
        &self,
        input: &Value,
        rules: &[ValidationRule],
        context: &RunContext,
    ) -> Result<(), ValidateError> {
        validate::run(&self.registry, input, rules, context).await
    }

    /// Validates `input` against the validation rules of a loaded rule set.
    pub async fn validate_rule_set(
        &self,
        input: &Value,
        set: &RuleSet,
        context: &RunContext,
    ) -> Result<(), ValidateError> {
        self.validate_input(input, &set.rules, context).await
    }

    /// Evaluates one named validator against a value, outside of any rule.
    ///
    /// ```rust
    /// use triage::{Engine, RuleOptions};
    /// use serde_json::json;
    ///
    /// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// # rt.block_on(async {
    /// let engine = Engine::new();
    /// let options = RuleOptions::new().with("min", 3);
    /// assert!(engine.check("isLength", &json!("John"), &options).await.unwrap());
    /// assert!(!engine.check("isLength", &json!("Jo"), &options).await.unwrap());
    /// # });
    /// ```
    pub async fn check(
        &self,
        name: &str,
        value: &Value,
        options: &RuleOptions,
    ) -> Result<bool, ValidateError> {
        validate::check_one(&self.registry, name, value, options, &RunContext::new()).await
    }

    /// Maps `err` to a field error using the first matching handler rule.
    ///
    /// See [`handle_error`].
    pub async fn handle_error(
        &self,
        err: &dyn Classify,
        handlers: &[HandlerRule],
        context: &RunContext,
    ) -> Result<Handled, HandleError> {
        handle_error(err, handlers, context).await
    }
}
