//! Built-in validators installed in every new registry.
//!
//! Each built-in is also exported as a plain function so it can be tested or
//! composed on its own. Every built-in returns `false` rather than an error
//! when handed a value of the wrong basic type; only missing or malformed
//! options (for example a `matches` rule without a `pattern`) are reported as
//! errors.
//!
//! # Example
//!
//! ```rust
//! use triage::validators::format::is_email;
//! use triage::RuleOptions;
//! use serde_json::json;
//!
//! assert!(is_email(&json!("ann@example.com"), &RuleOptions::new()));
//! assert!(!is_email(&json!(42), &RuleOptions::new()));
//! ```

pub mod custom;
pub mod format;
pub mod length;
pub mod membership;
pub mod presence;
pub mod text;

use futures_util::FutureExt;
use serde_json::Value;

use crate::rule::{PredicateResult, RuleOptions, Validator};

type PlainCheck = fn(&Value, &RuleOptions) -> bool;
type FallibleCheck = fn(&Value, &RuleOptions) -> PredicateResult;

/// Returns every built-in validator with its registry name.
pub fn builtins() -> Vec<(&'static str, Validator)> {
    let plain: [(&'static str, PlainCheck); 27] = [
        ("isPresent", presence::is_present),
        ("isAbsent", presence::is_absent),
        ("isNotEmpty", presence::is_not_empty),
        ("isLength", length::is_length),
        ("isByteLength", length::is_byte_length),
        ("isEmail", format::is_email),
        ("isURL", format::is_url),
        ("isFQDN", format::is_fqdn),
        ("isUUID", format::is_uuid),
        ("isISBN", format::is_isbn),
        ("isISIN", format::is_isin),
        ("isHexadecimal", format::is_hexadecimal),
        ("isHexColor", format::is_hex_color),
        ("isMACAddress", format::is_mac_address),
        ("isCreditCard", format::is_credit_card),
        ("isDate", format::is_date),
        ("isJSON", format::is_json),
        ("isBase64", format::is_base64),
        ("isMongoId", format::is_mongo_id),
        ("isIP", format::is_ip),
        ("isUppercase", text::is_uppercase),
        ("isLowercase", text::is_lowercase),
        ("isAlpha", text::is_alpha),
        ("isAlphanumeric", text::is_alphanumeric),
        ("isAscii", text::is_ascii),
        ("isNumeric", text::is_numeric),
        ("isInt", text::is_int),
    ];
    let fallible: [(&'static str, FallibleCheck); 4] = [
        ("isIn", membership::is_in),
        ("isNotIn", membership::is_not_in),
        ("contains", membership::contains),
        ("matches", text::matches),
    ];

    let mut all: Vec<(&'static str, Validator)> = plain
        .into_iter()
        .map(|(name, check)| {
            (
                name,
                Validator::from_fn(move |value, options, _| check(value, options)),
            )
        })
        .collect();
    all.extend(fallible.into_iter().map(|(name, check)| {
        (
            name,
            Validator::try_from_fn(move |value, options, _| check(value, options)),
        )
    }));
    all.push((
        "isValid",
        Validator::new(|value, options, context| custom::is_valid(value, options, context).boxed()),
    ));
    all
}

/// Reads a `version` option given as a number or a numeric string.
pub(crate) fn version_option(options: &RuleOptions) -> Option<u64> {
    match options.get("version")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_names_are_unique() {
        let mut names: Vec<_> = builtins().into_iter().map(|(name, _)| name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_version_option() {
        assert_eq!(version_option(&RuleOptions::new().with("version", 4)), Some(4));
        assert_eq!(version_option(&RuleOptions::new().with("version", "6")), Some(6));
        assert_eq!(version_option(&RuleOptions::new().with("version", "all")), None);
        assert_eq!(version_option(&RuleOptions::from(json!({}))), None);
    }
}
