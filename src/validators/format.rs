//! Format checks on strings.
//!
//! Every check returns `false` for non-string values.

use std::net::{Ipv4Addr, Ipv6Addr};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::{Host, Url};
use uuid::Uuid;

use crate::rule::RuleOptions;

use super::version_option;

static EMAIL_LOCAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("email local-part regex")
});
static FQDN_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("fqdn label regex")
});
static TLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{2,63}|xn--[A-Za-z0-9-]{2,59})$").expect("tld regex"));
static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid regex")
});
static ISIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9A-Z]{9}[0-9]$").expect("isin regex"));
static HEXADECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[xXhH])?[0-9a-fA-F]+$").expect("hexadecimal regex"));
static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color regex")
});
static MONGO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("mongo id regex"));

const DEFAULT_URL_PROTOCOLS: [&str; 3] = ["http", "https", "ftp"];

/// True for an address of the form `local@domain.tld`.
pub fn is_email(value: &Value, _options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    if s.len() > 254 {
        return false;
    }
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    local.len() <= 64 && EMAIL_LOCAL.is_match(local) && fqdn(domain, true)
}

/// True for an absolute URL with an allowed protocol and a valid host.
///
/// Options: `protocols` (array, default `["http", "https", "ftp"]`),
/// `requireProtocol` (default true), `requireTld` (default true).
pub fn is_url(value: &Value, options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    if s.is_empty() || s.len() > 2083 || s.chars().any(char::is_whitespace) {
        return false;
    }

    let require_protocol = options.get_bool("requireProtocol").unwrap_or(true);
    // Without a required protocol, `example.com:8080` parses with the host
    // as its scheme; a scheme containing a dot is retried as a bare host.
    let parsed = match Url::parse(s) {
        Ok(url) if require_protocol || !url.scheme().contains('.') => url,
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) if !require_protocol => {
            match Url::parse(&format!("http://{}", s)) {
                Ok(url) => url,
                Err(_) => return false,
            }
        }
        _ => return false,
    };

    let protocol_allowed = match options.get_array("protocols") {
        Some(protocols) => protocols
            .iter()
            .filter_map(Value::as_str)
            .any(|p| p.eq_ignore_ascii_case(parsed.scheme())),
        None => DEFAULT_URL_PROTOCOLS.contains(&parsed.scheme()),
    };
    if !protocol_allowed {
        return false;
    }

    let require_tld = options.get_bool("requireTld").unwrap_or(true);
    match parsed.host() {
        Some(Host::Domain(domain)) => fqdn(domain, require_tld),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// True for a fully qualified domain name.
///
/// Options: `requireTld` (default true).
pub fn is_fqdn(value: &Value, options: &RuleOptions) -> bool {
    value
        .as_str()
        .is_some_and(|s| fqdn(s, options.get_bool("requireTld").unwrap_or(true)))
}

fn fqdn(s: &str, require_tld: bool) -> bool {
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() || s.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = s.split('.').collect();
    if !labels.iter().all(|label| FQDN_LABEL.is_match(label)) {
        return false;
    }
    if require_tld {
        return labels.len() >= 2 && labels.last().is_some_and(|tld| TLD.is_match(tld));
    }
    true
}

/// True for a hyphenated UUID.
///
/// Options: `version` (1-5; absent or `"all"` accepts any version).
pub fn is_uuid(value: &Value, options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    if !UUID.is_match(s) {
        return false;
    }
    let Ok(uuid) = Uuid::parse_str(s) else {
        return false;
    };
    match version_option(options) {
        Some(version) => {
            uuid.get_version_num() as u64 == version
                && uuid.get_variant() == uuid::Variant::RFC4122
        }
        None => true,
    }
}

/// True for an ISBN-10 or ISBN-13 with a valid check digit.
///
/// Hyphens and spaces are ignored. Options: `version` (10 or 13).
pub fn is_isbn(value: &Value, options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    let compact: String = s.chars().filter(|c| *c != '-' && *c != ' ').collect();
    match version_option(options) {
        Some(10) => isbn10(&compact),
        Some(13) => isbn13(&compact),
        Some(_) => false,
        None => isbn10(&compact) || isbn13(&compact),
    }
}

fn isbn10(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    let mut sum = 0u32;
    for (i, b) in bytes.iter().enumerate() {
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'X' | b'x' if i == 9 => 10,
            _ => return false,
        };
        sum += (10 - i as u32) * digit;
    }
    sum % 11 == 0
}

fn isbn13(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 13 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let sum: u32 = bytes
        .iter()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    sum % 10 == 0
}

/// True for an ISIN with a valid check digit.
pub fn is_isin(value: &Value, _options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    if !ISIN.is_match(s) {
        return false;
    }
    let digits: String = s
        .chars()
        .filter_map(|c| c.to_digit(36))
        .map(|d| d.to_string())
        .collect();
    luhn(&digits)
}

/// True for a hexadecimal string, optionally prefixed with `0x` or `0h`.
pub fn is_hexadecimal(value: &Value, _options: &RuleOptions) -> bool {
    value.as_str().is_some_and(|s| HEXADECIMAL.is_match(s))
}

/// True for a 3, 4, 6 or 8 digit hex color, optionally prefixed with `#`.
pub fn is_hex_color(value: &Value, _options: &RuleOptions) -> bool {
    value.as_str().is_some_and(|s| HEX_COLOR.is_match(s))
}

/// True for a MAC address: six hex pairs joined by one consistent `:` or
/// `-` separator, or twelve bare hex digits.
pub fn is_mac_address(value: &Value, _options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    let is_pair = |part: &str| part.len() == 2 && part.chars().all(|c| c.is_ascii_hexdigit());
    if s.len() == 12 {
        return s.chars().all(|c| c.is_ascii_hexdigit());
    }
    [':', '-'].iter().any(|sep| {
        let parts: Vec<&str> = s.split(*sep).collect();
        parts.len() == 6 && parts.iter().copied().all(is_pair)
    })
}

/// True for a 13-19 digit card number passing the Luhn check.
///
/// Spaces and hyphens are ignored.
pub fn is_credit_card(value: &Value, _options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    let digits: String = s.chars().filter(|c| *c != ' ' && *c != '-').collect();
    (13..=19).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && luhn(&digits)
}

fn luhn(digits: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut n) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            n *= 2;
            if n > 9 {
                n -= 9;
            }
        }
        sum += n;
    }
    !digits.is_empty() && sum % 10 == 0
}

/// True for a parseable date.
///
/// With a `format` option the string must match that chrono format (as a
/// date or a date-time). Without one, RFC 3339 date-times and `YYYY-MM-DD`
/// dates are accepted.
pub fn is_date(value: &Value, options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    match options.get_str("format") {
        Some(format) => {
            NaiveDateTime::parse_from_str(s, format).is_ok()
                || NaiveDate::parse_from_str(s, format).is_ok()
        }
        None => {
            DateTime::parse_from_rfc3339(s).is_ok()
                || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        }
    }
}

/// True for a string holding a JSON object or array.
///
/// Options: `allowPrimitives` (default false) also accepts JSON scalars.
pub fn is_json(value: &Value, options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Object(_)) | Ok(Value::Array(_)) => true,
        Ok(_) => options.get_bool("allowPrimitives").unwrap_or(false),
        Err(_) => false,
    }
}

/// True for a non-empty, padded, standard-alphabet base64 string.
pub fn is_base64(value: &Value, _options: &RuleOptions) -> bool {
    value
        .as_str()
        .is_some_and(|s| !s.is_empty() && STANDARD.decode(s).is_ok())
}

/// True for a 24 character hex object id.
pub fn is_mongo_id(value: &Value, _options: &RuleOptions) -> bool {
    value.as_str().is_some_and(|s| MONGO_ID.is_match(s))
}

/// True for an IP address.
///
/// Options: `version` (4 or 6; absent accepts either).
pub fn is_ip(value: &Value, options: &RuleOptions) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    match version_option(options) {
        Some(4) => s.parse::<Ipv4Addr>().is_ok(),
        Some(6) => s.parse::<Ipv6Addr>().is_ok(),
        Some(_) => false,
        None => s.parse::<Ipv4Addr>().is_ok() || s.parse::<Ipv6Addr>().is_ok(),
    }
}
