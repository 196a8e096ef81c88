//! Rule definitions and the function values they carry.
//!
//! This module provides [`ValidationRule`] and [`HandlerRule`], their
//! options, the predicate/block/filter function values, and [`RuleSet`] for
//! loading rule lists from JSON.

mod handler_rule;
mod options;
mod predicate;
mod set;
mod validation_rule;

pub use handler_rule::HandlerRule;
pub use options::{HandlerOptions, RuleOptions};
pub use predicate::{ErrorBlock, Filter, PredicateResult, ValueBlock, Validator};
pub use set::{RuleSet, RuleSetError};
pub use validation_rule::ValidationRule;
