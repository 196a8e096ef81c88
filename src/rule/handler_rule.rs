//! Handler rule definition.

use serde_json::Value;

use crate::error::ErrorKind;

use super::options::HandlerOptions;
use super::predicate::ErrorBlock;

/// A priority-ordered rule mapping an error's shape to a field error.
///
/// # Example
///
/// ```rust
/// use triage::HandlerRule;
/// use serde_json::json;
///
/// let rule = HandlerRule::new("email", "MongoError", "email already taken")
///     .code(json!(11000));
///
/// assert_eq!(rule.error.as_str(), "MongoError");
/// assert_eq!(rule.options.code, Some(json!(11000)));
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HandlerRule {
    /// Path reported in the resulting field error.
    pub path: String,
    /// Kind tag the error must carry.
    pub error: ErrorKind,
    /// Optional code and block constraints.
    #[serde(default)]
    pub options: HandlerOptions,
    /// Message reported when the rule matches.
    pub message: String,
}

impl HandlerRule {
    /// Creates a rule matching on kind only.
    pub fn new(
        path: impl Into<String>,
        error: impl Into<ErrorKind>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            error: error.into(),
            options: HandlerOptions::default(),
            message: message.into(),
        }
    }

    /// Requires the error's code to equal `code`.
    pub fn code(mut self, code: impl Into<Value>) -> Self {
        self.options.code = Some(code.into());
        self
    }

    /// Requires `block` to resolve true.
    pub fn block(mut self, block: ErrorBlock) -> Self {
        self.options.block = Some(block);
        self
    }

    pub(crate) fn defect(&self) -> Option<&'static str> {
        if self.path.is_empty() {
            Some("path must not be empty")
        } else if self.message.is_empty() {
            Some("message must not be empty")
        } else if self.error.as_str().is_empty() {
            Some("error kind must not be empty")
        } else {
            None
        }
    }
}
