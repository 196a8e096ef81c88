//! Rule options: JSON parameters plus optional code-only blocks.

use serde_json::{Map, Value};

use super::predicate::{ErrorBlock, ValueBlock};

/// Options handed to a validator alongside the value.
///
/// Parameters are plain JSON (`{"min": 3, "max": 5}`) so rule lists can be
/// loaded from configuration. The optional block is code-only and is skipped
/// by serde.
///
/// # Example
///
/// ```rust
/// use triage::RuleOptions;
/// use serde_json::json;
///
/// let options = RuleOptions::from(json!({"min": 3, "max": 5}));
/// assert_eq!(options.get_u64("min"), Some(3));
/// assert_eq!(options.get_u64("missing"), None);
/// ```
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RuleOptions {
    #[serde(flatten)]
    params: Map<String, Value>,
    #[serde(skip)]
    block: Option<ValueBlock>,
}

impl RuleOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter and returns self for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets the block and returns self for chaining.
    pub fn with_block(mut self, block: ValueBlock) -> Self {
        self.block = Some(block);
        self
    }

    /// Replaces the block.
    pub fn set_block(&mut self, block: ValueBlock) {
        self.block = Some(block);
    }

    /// Returns the raw parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Returns a string parameter.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns a non-negative integer parameter.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    /// Returns a signed integer parameter.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Returns a boolean parameter.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Returns an array parameter.
    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Returns the block, if one is attached.
    pub fn block(&self) -> Option<&ValueBlock> {
        self.block.as_ref()
    }

    /// Returns every parameter.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }
}

/// Builds options from a JSON object; any other value yields empty options.
impl From<Value> for RuleOptions {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(params) => Self::from(params),
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for RuleOptions {
    fn from(params: Map<String, Value>) -> Self {
        Self {
            params,
            block: None,
        }
    }
}

/// Options of a handler rule: an optional code and an optional block.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct HandlerOptions {
    /// When set, the error's code must equal it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    /// When set, must resolve true for the rule to match.
    #[serde(skip)]
    pub block: Option<ErrorBlock>,
}

impl HandlerOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if neither a code nor a block is set.
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.block.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_non_object_is_empty() {
        assert!(RuleOptions::from(json!([1, 2])).params().is_empty());
        assert!(RuleOptions::from(Value::Null).params().is_empty());
    }

    #[test]
    fn test_typed_getters() {
        let options = RuleOptions::new()
            .with("min", 3)
            .with("strict", true)
            .with("seed", "abc")
            .with("values", json!(["a", "b"]))
            .with("offset", -2);

        assert_eq!(options.get_u64("min"), Some(3));
        assert_eq!(options.get_bool("strict"), Some(true));
        assert_eq!(options.get_str("seed"), Some("abc"));
        assert_eq!(options.get_array("values").map(Vec::len), Some(2));
        assert_eq!(options.get_i64("offset"), Some(-2));
        assert_eq!(options.get_u64("offset"), None);
        assert!(options.block().is_none());
    }

    #[test]
    fn test_deserialize_flattens_params() {
        let options: RuleOptions = serde_json::from_value(json!({"min": 1, "max": 9})).unwrap();
        assert_eq!(options.get_u64("max"), Some(9));
        assert_eq!(serde_json::to_value(&options).unwrap(), json!({"min": 1, "max": 9}));
    }

    #[test]
    fn test_handler_options_code() {
        let options: HandlerOptions = serde_json::from_value(json!({"code": 11000})).unwrap();
        assert_eq!(options.code, Some(json!(11000)));
        assert!(!options.is_empty());
        assert!(HandlerOptions::new().is_empty());
    }
}
