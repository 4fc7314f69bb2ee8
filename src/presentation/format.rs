use serde_json::Value;

use crate::constants::MISSING_VALUE;

/// Pound sterling with en-GB grouping and no pence; zero and missing render
/// as a dash.
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(amount) if amount.is_finite() && amount != 0.0 => {
            let rounded = amount.abs().round();
            let sign = if amount < 0.0 && rounded != 0.0 { "-" } else { "" };
            format!("{sign}£{}", group_thousands(&format!("{rounded:.0}")))
        }
        _ => MISSING_VALUE.to_string(),
    }
}

/// Display text for a cell: dash for null or empty, en-GB numbers, strings as-is.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => MISSING_VALUE.to_string(),
        Value::String(s) if s.is_empty() => MISSING_VALUE.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

/// en-GB number formatting: grouped thousands, at most three decimals.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return MISSING_VALUE.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
