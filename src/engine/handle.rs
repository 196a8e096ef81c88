//! The handler run.

use crate::context::RunContext;
use crate::error::{codes_equal, Classify, FieldError, FieldErrors, HandleError};
use crate::rule::HandlerRule;

/// The outcome of a handler run.
#[derive(Debug, Clone, PartialEq)]
pub enum Handled {
    /// The error was mapped to field errors.
    Errors(FieldErrors),
    /// No handler rule matched; the caller must re-raise the error.
    Unhandled,
}

impl Handled {
    /// Returns true if no rule matched.
    pub fn is_unhandled(&self) -> bool {
        matches!(self, Handled::Unhandled)
    }

    /// Returns the field errors, if any rule matched.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Handled::Errors(errors) => Some(errors),
            Handled::Unhandled => None,
        }
    }

    /// Returns the field errors, or gives `err` back for re-raising.
    ///
    /// ```rust
    /// use triage::{AppError, Handled};
    ///
    /// let err = AppError::new("TypeError", "boom");
    /// let raised = Handled::Unhandled.or_raise(err.clone());
    /// assert_eq!(raised.unwrap_err(), err);
    /// ```
    pub fn or_raise<E>(self, err: E) -> Result<FieldErrors, E> {
        match self {
            Handled::Errors(errors) => Ok(errors),
            Handled::Unhandled => Err(err),
        }
    }
}

/// Maps `err` to a field error using the first matching handler rule.
///
/// An error that is or carries a [`ValidationFailure`] bypasses the rules
/// and yields its own errors unchanged. Otherwise a rule matches when its
/// kind tag equals the error's kind, its code (if set) equals the error's
/// code, and its block (if set) resolves true. The first match wins and
/// produces a single `{path, message}` entry; if nothing matches the result
/// is [`Handled::Unhandled`].
///
/// # Errors
///
/// - [`HandleError::InvalidRule`] as soon as the scan reaches a rule with an
///   empty path, kind or message.
/// - [`HandleError::Block`] if a block returns an error.
///
/// # Example
///
/// ```rust
/// use triage::{handle_error, AppError, Handled, HandlerRule, RunContext};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let handlers = vec![HandlerRule::new("system", "Error", "fake error")];
/// let err = AppError::new("Error", "x");
///
/// let handled = handle_error(&err, &handlers, &RunContext::new()).await.unwrap();
/// let errors = handled.errors().unwrap();
/// assert_eq!(errors.first().path, "system");
/// assert_eq!(errors.first().message, "fake error");
/// # });
/// ```
///
/// [`ValidationFailure`]: crate::ValidationFailure
pub async fn handle_error(
    err: &dyn Classify,
    handlers: &[HandlerRule],
    context: &RunContext,
) -> Result<Handled, HandleError> {
    if let Some(failure) = err.validation_failure() {
        tracing::debug!(errors = failure.errors().len(), "passing validation failure through");
        return Ok(Handled::Errors(failure.errors().clone()));
    }

    let code = err.code();

    for (index, handler) in handlers.iter().enumerate() {
        if let Some(reason) = handler.defect() {
            return Err(HandleError::InvalidRule { index, reason });
        }
        if !handler.error.matches(err) {
            continue;
        }
        if let Some(expected) = &handler.options.code {
            if !code.as_ref().is_some_and(|actual| codes_equal(expected, actual)) {
                continue;
            }
        }
        if let Some(block) = &handler.options.block {
            let accepted = block
                .call(err, context)
                .await
                .map_err(|source| HandleError::Block {
                    path: handler.path.clone(),
                    source,
                })?;
            if !accepted {
                continue;
            }
        }

        tracing::debug!(kind = %err.kind(), path = %handler.path, "handler matched");
        return Ok(Handled::Errors(FieldErrors::single(FieldError::new(
            handler.path.clone(),
            handler.message.clone(),
        ))));
    }

    tracing::debug!(kind = %err.kind(), "no handler matched");
    Ok(Handled::Unhandled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_or_raise() {
        let errors = FieldErrors::single(FieldError::new("a", "b"));
        assert_eq!(
            Handled::Errors(errors.clone()).or_raise("ignored"),
            Ok(errors)
        );
        assert_eq!(Handled::Unhandled.or_raise("raised"), Err("raised"));
    }

    #[tokio::test]
    async fn test_empty_handler_list_is_unhandled() {
        let err = AppError::new("Error", "x");
        let handled = handle_error(&err, &[], &RunContext::new()).await.unwrap();
        assert!(handled.is_unhandled());
        assert!(handled.errors().is_none());
    }
}
