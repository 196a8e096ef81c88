//! Rule documents loaded from JSON configuration.
//!
//! A document holds an ordered `rules` list and an ordered `handlers` list,
//! both optional:
//!
//! ```json
//! {
//!   "rules": [
//!     {"path": "name", "validator": "isLength", "options": {"min": 3}, "message": "too short"}
//!   ],
//!   "handlers": [
//!     {"path": "email", "error": "MongoError", "options": {"code": 11000}, "message": "taken"}
//!   ]
//! }
//! ```
//!
//! Blocks and filters cannot be expressed in JSON; attach them after loading.

use serde_json::Value;

use super::handler_rule::HandlerRule;
use super::predicate::{ErrorBlock, Filter, ValueBlock};
use super::validation_rule::ValidationRule;

/// Errors that can occur while loading a rule document.
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("malformed rule document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A validation rule has an empty path or message.
    #[error("validation rule {index} is malformed: {reason}")]
    InvalidRule {
        /// Position in `rules`.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A handler rule has an empty path, kind or message.
    #[error("handler rule {index} is malformed: {reason}")]
    InvalidHandler {
        /// Position in `handlers`.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// An ordered pair of validation and handler rule lists.
///
/// # Example
///
/// ```rust
/// use triage::RuleSet;
///
/// let set = RuleSet::from_json_str(r#"{
///     "rules": [{"path": "name", "validator": "isPresent", "message": "required"}]
/// }"#).unwrap();
///
/// assert_eq!(set.rules.len(), 1);
/// assert!(set.handlers.is_empty());
/// ```
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RuleSet {
    /// Validation rules, in evaluation order.
    #[serde(default)]
    pub rules: Vec<ValidationRule>,
    /// Handler rules, in priority order.
    #[serde(default)]
    pub handlers: Vec<HandlerRule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and checks a JSON document.
    pub fn from_json_str(document: &str) -> Result<Self, RuleSetError> {
        let set: RuleSet = serde_json::from_str(document)?;
        set.checked()
    }

    /// Converts and checks an already-parsed JSON document.
    pub fn from_value(document: Value) -> Result<Self, RuleSetError> {
        let set: RuleSet = serde_json::from_value(document)?;
        set.checked()
    }

    /// Appends a validation rule.
    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends a handler rule.
    pub fn handler(mut self, handler: HandlerRule) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Attaches `filter` to every validation rule addressing `path`.
    pub fn with_filter(mut self, path: &str, filter: Filter) -> Self {
        for rule in self.rules.iter_mut().filter(|r| r.path == path) {
            rule.filter = Some(filter.clone());
        }
        self
    }

    /// Attaches `block` to every validation rule addressing `path`.
    pub fn with_value_block(mut self, path: &str, block: ValueBlock) -> Self {
        for rule in self.rules.iter_mut().filter(|r| r.path == path) {
            rule.options.set_block(block.clone());
        }
        self
    }

    /// Attaches `block` to every handler rule reporting `path`.
    pub fn with_error_block(mut self, path: &str, block: ErrorBlock) -> Self {
        for handler in self.handlers.iter_mut().filter(|h| h.path == path) {
            handler.options.block = Some(block.clone());
        }
        self
    }

    fn checked(self) -> Result<Self, RuleSetError> {
        if let Some((index, reason)) = self
            .rules
            .iter()
            .enumerate()
            .find_map(|(i, r)| r.defect().map(|reason| (i, reason)))
        {
            return Err(RuleSetError::InvalidRule { index, reason });
        }
        if let Some((index, reason)) = self
            .handlers
            .iter()
            .enumerate()
            .find_map(|(i, h)| h.defect().map(|reason| (i, reason)))
        {
            return Err(RuleSetError::InvalidHandler { index, reason });
        }
        Ok(self)
    }
}
