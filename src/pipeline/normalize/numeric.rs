//! Lenient numeric coercion for values of unknown shape.
//!
//! Upstream figures arrive as JSON numbers or as display strings such as
//! `"£325,000"` or `" 12 500.50 "`. Strings are reduced to their digits,
//! `.` and `-` characters and the longest leading decimal is parsed, so
//! currency symbols, separators and whitespace never need a locale-aware
//! parser.

use serde_json::Value;

/// Coerce a raw value to a finite number, or `None` when it carries no
/// numeric content.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_lenient(s),
        _ => None,
    }
}

/// Strip everything except `0-9`, `.` and `-`, then parse the leading decimal.
pub fn parse_lenient(text: &str) -> Option<f64> {
    let clean: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_leading_decimal(&clean)
}

/// Parse the longest `-?digits[.digits]` prefix, ignoring any trailing text.
fn parse_leading_decimal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
