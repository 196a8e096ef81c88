//! Set membership and substring checks.
//!
//! Scalars are compared by their text form, so `"1"` is in `[1]` and `true`
//! is in `["true"]`.

use std::borrow::Cow;

use serde_json::{Number, Value};

use crate::error::BoxError;
use crate::rule::RuleOptions;

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// True if the value's text form equals one of the `values` option.
///
/// # Errors
///
/// Fails if `values` is not an array.
pub fn is_in(value: &Value, options: &RuleOptions) -> Result<bool, BoxError> {
    let values = allowed_values(options, "isIn")?;
    Ok(scalar_text(value)
        .is_some_and(|text| values.iter().filter_map(scalar_text).any(|v| v == text)))
}

/// True if the value is a scalar whose text form is not in `values`.
///
/// # Errors
///
/// Fails if `values` is not an array.
pub fn is_not_in(value: &Value, options: &RuleOptions) -> Result<bool, BoxError> {
    let values = allowed_values(options, "isNotIn")?;
    Ok(scalar_text(value)
        .is_some_and(|text| !values.iter().filter_map(scalar_text).any(|v| v == text)))
}

/// True if the string contains the `seed` option.
///
/// Options: `ignoreCase` (default false).
///
/// # Errors
///
/// Fails if `seed` is missing or not a scalar.
pub fn contains(value: &Value, options: &RuleOptions) -> Result<bool, BoxError> {
    let seed = options
        .get("seed")
        .and_then(scalar_text)
        .ok_or("contains requires a scalar `seed` option")?;
    let Some(s) = value.as_str() else {
        return Ok(false);
    };
    if options.get_bool("ignoreCase").unwrap_or(false) {
        Ok(s.to_lowercase().contains(&seed.to_lowercase()))
    } else {
        Ok(s.contains(&*seed))
    }
}

fn allowed_values<'o>(options: &'o RuleOptions, name: &str) -> Result<&'o Vec<Value>, BoxError> {
    options
        .get_array("values")
        .ok_or_else(|| format!("{} requires an array `values` option", name).into())
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

// Integral floats print like integers so `1.0` and `1` share a text form.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(list: Value) -> RuleOptions {
        RuleOptions::new().with("values", list)
    }

    #[test]
    fn test_is_in() {
        let options = values(json!(["admin", "user", 1]));
        assert!(is_in(&json!("admin"), &options).unwrap());
        assert!(is_in(&json!("1"), &options).unwrap());
        assert!(is_in(&json!(1), &options).unwrap());
        assert!(!is_in(&json!("guest"), &options).unwrap());
        assert!(!is_in(&json!(null), &options).unwrap());
        assert!(!is_in(&json!(["admin"]), &options).unwrap());
    }

    #[test]
    fn test_integral_floats_match_integers() {
        let options = values(json!([1, 2.5]));
        assert!(is_in(&json!(1.0), &options).unwrap());
        assert!(is_in(&json!("1"), &options).unwrap());
        assert!(is_in(&json!(2.5), &options).unwrap());
        assert!(!is_in(&json!(2), &options).unwrap());

        let floats = values(json!([3.0]));
        assert!(is_in(&json!(3), &floats).unwrap());
        assert!(!is_not_in(&json!(3), &floats).unwrap());
    }

    #[test]
    fn test_is_not_in() {
        let options = values(json!(["root"]));
        assert!(is_not_in(&json!("ann"), &options).unwrap());
        assert!(!is_not_in(&json!("root"), &options).unwrap());
        assert!(!is_not_in(&json!({"a": 1}), &options).unwrap());
    }

    #[test]
    fn test_missing_values_is_an_error() {
        assert!(is_in(&json!("x"), &RuleOptions::new()).is_err());
        assert!(is_not_in(&json!("x"), &values(json!("x"))).is_err());
    }

    #[test]
    fn test_contains() {
        let options = RuleOptions::new().with("seed", "foo");
        assert!(contains(&json!("xfooy"), &options).unwrap());
        assert!(!contains(&json!("xFOOy"), &options).unwrap());
        assert!(!contains(&json!(42), &options).unwrap());

        let loose = options.with("ignoreCase", true);
        assert!(contains(&json!("xFOOy"), &loose).unwrap());

        assert!(contains(&json!("x"), &RuleOptions::new()).is_err());
    }
}
