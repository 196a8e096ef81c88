//! The `isValid` escape hatch.

use serde_json::Value;

use crate::context::RunContext;
use crate::rule::{PredicateResult, RuleOptions};

/// Delegates to the block attached to the rule's options.
///
/// A rule without a block fails.
pub async fn is_valid(
    value: &Value,
    options: &RuleOptions,
    context: &RunContext,
) -> PredicateResult {
    match options.block() {
        Some(block) => block.call(value, context).await,
        None => Ok(false),
    }
}
