//! Value coercion for decoded field tokens.
//!
//! A raw value token is interpreted by trying a fixed sequence of typed parses,
//! first success wins:
//!
//! 1. full JSON (nested objects, arrays, quoted strings, `true`/`null`, numbers)
//! 2. comma-separated list of bare strings
//! 3. ASCII-digit-only integer
//! 4. finite float
//! 5. the raw string
//!
//! List elements stay strings even when they look numeric. The encoder writes
//! typed elements, so `[1,2]` encodes as `1,2` and decodes as `["1","2"]`.

use serde_json::{Number, Value};

/// The outcome of [`coerce_value`], tagged by which step of the chain matched.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Json(Value),
    List(Vec<String>),
    Integer(u64),
    Float(f64),
    Text(String),
}

impl Coerced {
    /// Convert into the structured value stored in the decoded mapping.
    pub fn into_value(self) -> Value {
        match self {
            Coerced::Json(value) => value,
            Coerced::List(items) => Value::Array(items.into_iter().map(Value::String).collect()),
            Coerced::Integer(n) => Value::Number(Number::from(n)),
            // `try_float` only admits finite values, which always convert.
            Coerced::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            Coerced::Text(s) => Value::String(s),
        }
    }
}

/// Interpret a trimmed value token.
///
/// ```
/// use persona_toon::{coerce_value, Coerced};
/// use serde_json::json;
///
/// assert_eq!(coerce_value("{\"a\":1}"), Coerced::Json(json!({"a": 1})));
/// assert_eq!(coerce_value("a,b"), Coerced::List(vec!["a".into(), "b".into()]));
/// assert_eq!(coerce_value("007"), Coerced::Integer(7));
/// assert_eq!(coerce_value("Alice"), Coerced::Text("Alice".into()));
/// ```
pub fn coerce_value(raw: &str) -> Coerced {
    if let Some(value) = try_json(raw) {
        return Coerced::Json(value);
    }
    if let Some(items) = try_list(raw) {
        return Coerced::List(items);
    }
    if let Some(n) = try_integer(raw) {
        return Coerced::Integer(n);
    }
    if let Some(f) = try_float(raw) {
        return Coerced::Float(f);
    }
    Coerced::Text(raw.to_string())
}

fn try_json(raw: &str) -> Option<Value> {
    serde_json::from_str(raw).ok()
}

/// Split on every comma. Elements are kept verbatim, not trimmed.
fn try_list(raw: &str) -> Option<Vec<String>> {
    if !raw.contains(',') {
        return None;
    }
    Some(raw.split(',').map(str::to_string).collect())
}

/// Digit-only tokens that JSON rejects, e.g. `007`. Overflow falls through.
fn try_integer(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Float forms JSON rejects (`.5`, `+3`, `1.`). NaN and infinities stay text.
fn try_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|f| f.is_finite())
}
