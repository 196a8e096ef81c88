//! Character-class, case and pattern checks on strings.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::error::BoxError;
use crate::rule::RuleOptions;

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?([0-9]*\.)?[0-9]+$").expect("numeric regex"));
static INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(0|[1-9][0-9]*)$").expect("int regex"));

/// Most compiled `matches` patterns kept at once; the oldest is evicted first.
const PATTERN_CACHE_CAPACITY: usize = 256;

static PATTERNS: Lazy<Mutex<IndexMap<(String, String), Regex>>> =
    Lazy::new(|| Mutex::new(IndexMap::new()));

/// True if the string has no lowercase letters.
pub fn is_uppercase(value: &Value, _options: &RuleOptions) -> bool {
    value.as_str().is_some_and(|s| s == s.to_uppercase())
}

/// True if the string has no uppercase letters.
pub fn is_lowercase(value: &Value, _options: &RuleOptions) -> bool {
    value.as_str().is_some_and(|s| s == s.to_lowercase())
}

/// True for a non-empty string of ASCII letters.
pub fn is_alpha(value: &Value, _options: &RuleOptions) -> bool {
    non_empty_all(value, |c| c.is_ascii_alphabetic())
}

/// True for a non-empty string of ASCII letters and digits.
pub fn is_alphanumeric(value: &Value, _options: &RuleOptions) -> bool {
    non_empty_all(value, |c| c.is_ascii_alphanumeric())
}

/// True for a non-empty ASCII string.
pub fn is_ascii(value: &Value, _options: &RuleOptions) -> bool {
    non_empty_all(value, |c| c.is_ascii())
}

/// True for a signed decimal number written as a string, e.g. `-1.5`.
pub fn is_numeric(value: &Value, _options: &RuleOptions) -> bool {
    value.as_str().is_some_and(|s| NUMERIC.is_match(s))
}

/// True for an integer, given as a JSON number or a decimal string.
///
/// Options: `min`, `max` (inclusive).
pub fn is_int(value: &Value, options: &RuleOptions) -> bool {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) if INT.is_match(s) => s.parse::<i64>().ok(),
        _ => None,
    };
    let Some(n) = parsed else {
        return false;
    };
    options.get_i64("min").map_or(true, |min| n >= min)
        && options.get_i64("max").map_or(true, |max| n <= max)
}

/// True if the string matches the `pattern` option.
///
/// `modifiers` maps to regex flags: `i` case-insensitive, `m` multi-line,
/// `s` dot matches newline, `x` ignore whitespace, `U` swap greed. `g` is
/// accepted and ignored.
///
/// # Errors
///
/// Fails if `pattern` is missing, a modifier is unknown, or the pattern does
/// not compile.
pub fn matches(value: &Value, options: &RuleOptions) -> Result<bool, BoxError> {
    let Some(s) = value.as_str() else {
        return Ok(false);
    };
    let pattern = options
        .get_str("pattern")
        .ok_or("matches requires a string `pattern` option")?;
    let regex = cached_regex(pattern, options.get_str("modifiers").unwrap_or(""))?;
    Ok(regex.is_match(s))
}

// Compiled patterns are shared across rules and runs. The lock is released
// before matching.
fn cached_regex(pattern: &str, modifiers: &str) -> Result<Regex, BoxError> {
    let key = (pattern.to_string(), modifiers.to_string());
    if let Some(regex) = PATTERNS.lock().get(&key) {
        return Ok(regex.clone());
    }

    let regex = build_regex(pattern, modifiers)?;
    let mut patterns = PATTERNS.lock();
    if patterns.len() >= PATTERN_CACHE_CAPACITY {
        patterns.shift_remove_index(0);
    }
    patterns.insert(key, regex.clone());
    Ok(regex)
}

fn build_regex(pattern: &str, modifiers: &str) -> Result<Regex, BoxError> {
    let mut builder = RegexBuilder::new(pattern);
    for modifier in modifiers.chars() {
        match modifier {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'U' => builder.swap_greed(true),
            'g' => continue,
            other => return Err(format!("unknown regex modifier '{}'", other).into()),
        };
    }
    Ok(builder.build()?)
}

fn non_empty_all(value: &Value, pred: impl Fn(char) -> bool) -> bool {
    value
        .as_str()
        .is_some_and(|s| !s.is_empty() && s.chars().all(pred))
}
