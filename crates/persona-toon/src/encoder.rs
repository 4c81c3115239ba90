//! Flat TOON encoder: a top-level mapping becomes one `key=value|key=value` line.
//!
//! Each field is encoded by the shape of its value:
//!
//! - **Sequence**: elements joined with `,` (`tags=a,b,c`). Elements are not
//!   re-encoded; nested structures inside a sequence are written as compact JSON.
//! - **Mapping**: a compact JSON island (`head={"shape":"oval"}`), recovered by
//!   the decoder's JSON-first coercion.
//! - **Scalar**: its textual form (`age=7`, `name=Alice`, `ok=true`).
//!
//! Nothing is escaped. A scalar string containing `|`, `=` or `,` will not
//! survive a round trip; stored prompts depend on this exact output, so the
//! behavior is kept as is.
//!
//! # Example
//! ```
//! use persona_toon::encode;
//! let toon = encode(r#"{"name":"Alice","tags":["a","b"],"head":{"shape":"oval"}}"#).unwrap();
//! assert_eq!(toon, r#"name=Alice|tags=a,b|head={"shape":"oval"}"#);
//! ```

use crate::error::{Result, ToonError};
use serde_json::{Map, Value};

/// Field separator written between `key=value` fragments.
pub const FIELD_SEPARATOR: char = '|';
/// Delimiter written between a key and its value.
pub const KEY_DELIMITER: char = '=';
/// Separator written between sequence elements.
pub const LIST_SEPARATOR: char = ',';

/// Encode a JSON string into flat TOON.
///
/// Fails if the input is not valid JSON or its top level is not an object.
pub fn encode(json: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json)?;
    encode_value(&value)
}

/// Encode a structured value into flat TOON.
///
/// Only mappings are accepted at the top level; anything else is a contract
/// violation reported as [`ToonError::Encode`].
pub fn encode_value(value: &Value) -> Result<String> {
    match value {
        Value::Object(map) => Ok(encode_map(map)),
        other => Err(ToonError::Encode(format!(
            "top-level value must be an object, got {}",
            type_name(other)
        ))),
    }
}

/// Encode a mapping in insertion order. Relies on `serde_json`'s
/// `preserve_order` feature for the iteration order.
pub fn encode_map(map: &Map<String, Value>) -> String {
    let mut out = String::new();
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push(FIELD_SEPARATOR);
        }
        out.push_str(key);
        out.push(KEY_DELIMITER);
        encode_field_value(value, &mut out);
    }
    out
}

fn encode_field_value(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(LIST_SEPARATOR);
                }
                push_text(item, out);
            }
        }
        // serde_json's compact writer inserts no whitespace around separators.
        Value::Object(_) => out.push_str(&value.to_string()),
        scalar => push_text(scalar, out),
    }
}

/// Default textual form: strings bare, everything else as compact JSON.
fn push_text(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        other => out.push_str(&other.to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
