//! Validation rule definition.

use serde_json::Value;

use super::options::RuleOptions;
use super::predicate::{Filter, ValueBlock};

/// A declarative validation rule: which field, which validator, which message.
///
/// # Example
///
/// ```rust
/// use triage::ValidationRule;
/// use serde_json::json;
///
/// let rule = ValidationRule::new("name", "isLength", "name must be 3 to 5 characters")
///     .options(json!({"min": 3, "max": 5}));
///
/// assert_eq!(rule.path, "name");
/// assert_eq!(rule.options.get_u64("max"), Some(5));
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationRule {
    /// Dotted path of the field to check.
    pub path: String,
    /// Registry name of the validator.
    pub validator: String,
    /// Options handed to the validator.
    #[serde(default)]
    pub options: RuleOptions,
    /// Message reported when the validator fails.
    pub message: String,
    /// Transform applied to the field value before the validator runs.
    #[serde(skip)]
    pub filter: Option<Filter>,
}

impl ValidationRule {
    /// Creates a rule with empty options and no filter.
    pub fn new(
        path: impl Into<String>,
        validator: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            validator: validator.into(),
            options: RuleOptions::default(),
            message: message.into(),
            filter: None,
        }
    }

    /// Replaces the JSON parameters, keeping any attached block.
    pub fn options(mut self, params: Value) -> Self {
        let block = self.options.block().cloned();
        self.options = RuleOptions::from(params);
        if let Some(block) = block {
            self.options.set_block(block);
        }
        self
    }

    /// Replaces the options wholesale.
    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    /// Attaches a value block (used by `isValid`).
    pub fn block(mut self, block: ValueBlock) -> Self {
        self.options.set_block(block);
        self
    }

    /// Attaches a filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Returns a reason if the rule is malformed.
    pub(crate) fn defect(&self) -> Option<&'static str> {
        if self.path.is_empty() {
            Some("path must not be empty")
        } else if self.message.is_empty() {
            Some("message must not be empty")
        } else {
            None
        }
    }
}
