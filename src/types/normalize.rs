//! Numeric normalization of API responses.
//!
//! EXMO sends most numbers as JSON strings (`"price": "57.5"`). The
//! normalizer re-types every string leaf that parses as a number, leaving
//! the shape of the tree untouched.

use crate::types::Value;

/// Convert numeric string leaves into integers or floats, recursively.
///
/// - objects and arrays are rebuilt with normalized children, keys unchanged;
/// - `Null`, `Bool`, `Int` and `Float` pass through;
/// - strings become `Int` if they parse as `i64`, else `Float` if they parse
///   as a finite `f64`, else stay strings.
///
/// Integer parsing comes first, so `"5"` becomes `5` and not `5.0`.
/// Surrounding whitespace is ignored when parsing. Integer strings too large
/// for `i64` stay strings so that no digits are lost.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, normalize(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::String(s) => normalize_str(s),
        other => other,
    }
}

fn normalize_str(s: String) -> Value {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }
    if is_integer_literal(trimmed) {
        return Value::String(s);
    }
    match trimmed.parse::<f64>() {
        // "inf" and "NaN" parse as floats but are names, not amounts.
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => Value::String(s),
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
