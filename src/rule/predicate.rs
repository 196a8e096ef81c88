//! Function values stored in registries and rules.
//!
//! Every predicate is stored as a function returning a boxed future. Sync
//! closures are wrapped in a ready future, so the engines always await
//! exactly once per invocation whatever the predicate's flavor.

use std::fmt;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use crate::context::RunContext;
use crate::error::{BoxError, Classify};

use super::options::RuleOptions;

/// The verdict of a predicate: pass/fail, or an error that ends the run.
pub type PredicateResult = Result<bool, BoxError>;

type ValidatorFn = dyn for<'a> Fn(
        &'a Value,
        &'a RuleOptions,
        &'a RunContext,
    ) -> BoxFuture<'a, PredicateResult>
    + Send
    + Sync;

type ValueBlockFn =
    dyn for<'a> Fn(&'a Value, &'a RunContext) -> BoxFuture<'a, PredicateResult> + Send + Sync;

type ErrorBlockFn =
    dyn for<'a> Fn(&'a dyn Classify, &'a RunContext) -> BoxFuture<'a, PredicateResult>
        + Send
        + Sync;

type FilterFn = dyn Fn(Value) -> Value + Send + Sync;

/// A named-validator predicate: `(value, options, context) -> bool`.
///
/// # Example
///
/// ```rust
/// use triage::Validator;
/// use futures_util::FutureExt;
///
/// // Synchronous
/// let is_even = Validator::from_fn(|value, _options, _context| {
///     value.as_i64().map_or(false, |n| n % 2 == 0)
/// });
///
/// // Asynchronous
/// let is_known = Validator::new(|value, _options, context| {
///     async move {
///         let known = context.get("known").unwrap_or_default();
///         Ok(known.as_array().map_or(false, |list| list.contains(value)))
///     }
///     .boxed()
/// });
/// ```
#[derive(Clone)]
pub struct Validator(Arc<ValidatorFn>);

impl Validator {
    /// Creates a validator from a function returning a boxed future.
    pub fn new<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a Value, &'a RuleOptions, &'a RunContext) -> BoxFuture<'a, PredicateResult>
            + Send
            + Sync
            + 'static,
    {
        Validator(Arc::new(f))
    }

    /// Creates a validator from a synchronous, infallible function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &RuleOptions, &RunContext) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value, options, context| {
            future::ready(Ok(f(value, options, context))).boxed()
        })
    }

    /// Creates a validator from a synchronous function that may fail.
    pub fn try_from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &RuleOptions, &RunContext) -> PredicateResult + Send + Sync + 'static,
    {
        Self::new(move |value, options, context| future::ready(f(value, options, context)).boxed())
    }

    /// Invokes the predicate.
    pub fn check<'a>(
        &'a self,
        value: &'a Value,
        options: &'a RuleOptions,
        context: &'a RunContext,
    ) -> BoxFuture<'a, PredicateResult> {
        (self.0)(value, options, context)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// A caller-supplied value block: `(value, context) -> bool`.
///
/// Used by the `isValid` validator through [`RuleOptions::with_block`].
#[derive(Clone)]
pub struct ValueBlock(Arc<ValueBlockFn>);

impl ValueBlock {
    /// Creates a block from a function returning a boxed future.
    pub fn new<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a Value, &'a RunContext) -> BoxFuture<'a, PredicateResult>
            + Send
            + Sync
            + 'static,
    {
        ValueBlock(Arc::new(f))
    }

    /// Creates a block from a synchronous, infallible function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &RunContext) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value, context| future::ready(Ok(f(value, context))).boxed())
    }

    /// Invokes the block.
    pub fn call<'a>(
        &'a self,
        value: &'a Value,
        context: &'a RunContext,
    ) -> BoxFuture<'a, PredicateResult> {
        (self.0)(value, context)
    }
}

impl fmt::Debug for ValueBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueBlock(..)")
    }
}

/// A handler-rule block: `(err, context) -> bool`.
///
/// # Example
///
/// ```rust
/// use triage::{Classify, ErrorBlock};
///
/// let mentions_email = ErrorBlock::from_fn(|err, _context| err.to_string().contains("email"));
/// ```
#[derive(Clone)]
pub struct ErrorBlock(Arc<ErrorBlockFn>);

impl ErrorBlock {
    /// Creates a block from a function returning a boxed future.
    pub fn new<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a dyn Classify, &'a RunContext) -> BoxFuture<'a, PredicateResult>
            + Send
            + Sync
            + 'static,
    {
        ErrorBlock(Arc::new(f))
    }

    /// Creates a block from a synchronous, infallible function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&dyn Classify, &RunContext) -> bool + Send + Sync + 'static,
    {
        Self::new(move |err, context| future::ready(Ok(f(err, context))).boxed())
    }

    /// Invokes the block.
    pub fn call<'a>(
        &'a self,
        err: &'a dyn Classify,
        context: &'a RunContext,
    ) -> BoxFuture<'a, PredicateResult> {
        (self.0)(err, context)
    }
}

impl fmt::Debug for ErrorBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorBlock(..)")
    }
}

/// A value transform applied before a rule's predicate runs.
///
/// ```rust
/// use triage::Filter;
/// use serde_json::{json, Value};
///
/// let trim = Filter::new(|value| match value {
///     Value::String(s) => Value::String(s.trim().to_string()),
///     other => other,
/// });
/// assert_eq!(trim.apply(json!("  ann ")), json!("ann"));
/// ```
#[derive(Clone)]
pub struct Filter(Arc<FilterFn>);

impl Filter {
    /// Creates a filter from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Filter(Arc::new(f))
    }

    /// Applies the filter.
    pub fn apply(&self, value: Value) -> Value {
        (self.0)(value)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}
