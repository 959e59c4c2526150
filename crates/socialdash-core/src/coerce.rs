//! Lenient numeric coercion for scraped count fields.
//!
//! Counts arrive as JSON numbers, as strings with thousands separators
//! (`"1,234,567"`), occasionally as floats, and for Instagram comments as the
//! comment list itself. Every shape maps to a non-negative integer; nothing
//! here ever yields NaN or an error.

use serde_json::Value;

/// Coerces a resolved JSON value into a count.
///
/// - numbers are truncated toward zero; negative or non-finite values become 0
/// - strings are read like JavaScript `parseInt` after stripping separators
/// - arrays count as their length
/// - booleans, objects, and `null` become 0
#[must_use]
pub fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v
            } else if n.as_i64().is_some() {
                // Only negative integers fail `as_u64` but pass `as_i64`.
                0
            } else {
                n.as_f64().map_or(0, float_to_count)
            }
        }
        Value::String(s) => parse_count_str(s),
        Value::Array(items) => items.len() as u64,
        Value::Bool(_) | Value::Object(_) | Value::Null => 0,
    }
}

/// Parses a count from free text, `parseInt`-style.
///
/// Thousands separators are removed first, then an optional sign and the
/// leading run of ASCII digits are read. Trailing text is ignored, so
/// `"12.7k"` reads as 12. Non-numeric and negative input yields 0.
#[must_use]
pub fn parse_count_str(raw: &str) -> u64 {
    let cleaned: String = raw.chars().filter(|c| !is_separator(*c)).collect();
    let trimmed = cleaned.trim();

    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value = 0u64;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
    }

    if negative {
        0
    } else {
        value
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | '_' | ' ' | '\u{00A0}' | '\u{202F}')
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_count(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        // `as` saturates at u64::MAX for out-of-range floats.
        v.trunc() as u64
    } else {
        0
    }
}
