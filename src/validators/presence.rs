//! Presence checks.

use serde_json::Value;

use crate::rule::RuleOptions;

/// True unless the value is `null` (missing fields read as `null`).
pub fn is_present(value: &Value, _options: &RuleOptions) -> bool {
    !value.is_null()
}

/// True only for `null` or a missing field.
pub fn is_absent(value: &Value, _options: &RuleOptions) -> bool {
    value.is_null()
}

/// True for a non-empty string, array or object.
pub fn is_not_empty(value: &Value, _options: &RuleOptions) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence() {
        let options = RuleOptions::new();
        assert!(is_present(&json!(""), &options));
        assert!(is_present(&json!(0), &options));
        assert!(is_present(&json!(false), &options));
        assert!(!is_present(&Value::Null, &options));

        assert!(is_absent(&Value::Null, &options));
        assert!(!is_absent(&json!("x"), &options));
    }

    #[test]
    fn test_not_empty() {
        let options = RuleOptions::new();
        assert!(is_not_empty(&json!("x"), &options));
        assert!(is_not_empty(&json!([1]), &options));
        assert!(is_not_empty(&json!({"a": 1}), &options));
        assert!(!is_not_empty(&json!(""), &options));
        assert!(!is_not_empty(&json!([]), &options));
        assert!(!is_not_empty(&json!(42), &options));
        assert!(!is_not_empty(&Value::Null, &options));
    }
}
