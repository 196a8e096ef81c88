//! The validation run.

use serde_json::Value;

use crate::context::RunContext;
use crate::error::{FieldError, FieldErrors, ValidateError, ValidationFailure};
use crate::path;
use crate::registry::ValidatorRegistry;
use crate::rule::{RuleOptions, ValidationRule, Validator};

pub(super) async fn run(
    registry: &ValidatorRegistry,
    input: &Value,
    rules: &[ValidationRule],
    context: &RunContext,
) -> Result<(), ValidateError> {
    let mut errors = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        if let Some(reason) = rule.defect() {
            return Err(ValidateError::InvalidRule { index, reason });
        }

        let validator = resolve(registry, &rule.validator)?;

        let mut value = path::get(input, &rule.path, Value::Null);
        if let Some(filter) = &rule.filter {
            value = filter.apply(value);
        }

        tracing::trace!(path = %rule.path, validator = %rule.validator, "evaluating rule");

        let passed = validator
            .check(&value, &rule.options, context)
            .await
            .map_err(|source| ValidateError::Predicate {
                validator: rule.validator.clone(),
                path: rule.path.clone(),
                source,
            })?;

        if !passed {
            tracing::debug!(path = %rule.path, validator = %rule.validator, "rule failed");
            errors.push(FieldError::new(rule.path.clone(), rule.message.clone()));
        }
    }

    match FieldErrors::from_vec(errors) {
        None => Ok(()),
        Some(errors) => Err(ValidationFailure::new(errors).into()),
    }
}

pub(super) async fn check_one(
    registry: &ValidatorRegistry,
    name: &str,
    value: &Value,
    options: &RuleOptions,
    context: &RunContext,
) -> Result<bool, ValidateError> {
    let validator = resolve(registry, name)?;
    validator
        .check(value, options, context)
        .await
        .map_err(|source| ValidateError::Predicate {
            validator: name.to_string(),
            path: String::new(),
            source,
        })
}

// The handle is cloned out so no registry lock is held across the await.
fn resolve(registry: &ValidatorRegistry, name: &str) -> Result<Validator, ValidateError> {
    registry.lookup(name).ok_or_else(|| {
        tracing::warn!(validator = %name, "unknown validator");
        ValidateError::UnknownValidator(name.to_string())
    })
}
