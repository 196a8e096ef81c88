//! Length bounds on strings.
//!
//! Both validators read `min` (default 0) and an optional `max` from options.
//! `isLength` counts Unicode scalar values, `isByteLength` counts UTF-8 bytes.

use serde_json::Value;

use crate::rule::RuleOptions;

/// True if the string's character count lies within `[min, max]`.
pub fn is_length(value: &Value, options: &RuleOptions) -> bool {
    value
        .as_str()
        .is_some_and(|s| within_bounds(s.chars().count(), options))
}

/// True if the string's UTF-8 byte count lies within `[min, max]`.
pub fn is_byte_length(value: &Value, options: &RuleOptions) -> bool {
    value
        .as_str()
        .is_some_and(|s| within_bounds(s.len(), options))
}

fn within_bounds(len: usize, options: &RuleOptions) -> bool {
    let len = len as u64;
    let min = options.get_u64("min").unwrap_or(0);
    let max = options.get_u64("max");
    len >= min && max.map_or(true, |max| len <= max)
}
