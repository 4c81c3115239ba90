//! Best-effort flat TOON decoder.
//!
//! The text being decoded usually comes from a language model, not from
//! [`crate::encode`], so the decoder accepts more than the encoder writes:
//!
//! - an optional markdown fence around the whole blob (` ```toon `, ` ```json `, ` ``` `)
//! - fields separated by `|` or, when no `|` occurs anywhere, by newlines
//! - `=` or `:` between key and value
//!
//! Decoding never fails. Tokens without a delimiter are dropped, values that
//! parse as nothing in particular stay strings, and a later duplicate key
//! overwrites an earlier one. Pass a [`Diagnostics`] to
//! [`decode_with_diagnostics`] to see what was dropped.

use crate::coerce::coerce_value;
use crate::fence::{strip_fence, Fence};
use serde_json::{Map, Value};

/// How a decode call split its input into fields. Chosen once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMode {
    /// The input contained at least one `|`.
    Pipe,
    /// No `|` anywhere; one field per line.
    #[default]
    Newline,
}

/// What a decode call saw and discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Trimmed tokens that had neither `=` nor `:`, in input order.
    pub skipped: Vec<String>,
    /// Keys that appeared more than once; the last occurrence was kept.
    pub overwritten: Vec<String>,
    /// The fence stripped from around the input, if any.
    pub fence: Option<Fence>,
    /// Field splitting mode. `None` for empty input.
    pub mode: Option<FieldMode>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every non-empty token became a field.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Decode TOON text into a mapping.
///
/// ```
/// use persona_toon::decode;
/// use serde_json::json;
///
/// let map = decode("```toon\nname=Alice|age=7\n```");
/// assert_eq!(serde_json::Value::Object(map), json!({"name": "Alice", "age": 7}));
/// ```
pub fn decode(text: &str) -> Map<String, Value> {
    decode_with_diagnostics(text, &mut Diagnostics::new())
}

/// Decode TOON text, recording skipped tokens and parsing decisions.
pub fn decode_with_diagnostics(text: &str, diagnostics: &mut Diagnostics) -> Map<String, Value> {
    let mut out = Map::new();
    if text.trim().is_empty() {
        return out;
    }

    let (body, fence) = strip_fence(text);
    diagnostics.fence = fence;

    let mode = if body.contains('|') {
        FieldMode::Pipe
    } else {
        FieldMode::Newline
    };
    diagnostics.mode = Some(mode);

    for token in tokenize(body, mode) {
        let Some((key, raw)) = split_field(token) else {
            diagnostics.skipped.push(token.to_string());
            continue;
        };
        let value = coerce_value(raw).into_value();
        if out.insert(key.to_string(), value).is_some() {
            diagnostics.overwritten.push(key.to_string());
        }
    }

    if !diagnostics.skipped.is_empty() {
        tracing::debug!(
            skipped = diagnostics.skipped.len(),
            kept = out.len(),
            "dropped TOON tokens without a delimiter"
        );
    }
    out
}

/// Split the body into trimmed, non-empty field tokens.
fn tokenize(body: &str, mode: FieldMode) -> Vec<&str> {
    let pieces: Vec<&str> = match mode {
        FieldMode::Pipe => body.split('|').collect(),
        FieldMode::Newline => body.split(is_line_break).collect(),
    };
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Every character that ends a line in newline mode.
///
/// `\r\n` splits twice, which only leaves an empty piece for the filter.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split a token at the first `=`, or failing that the first `:`.
///
/// Only the chosen delimiter's first occurrence counts, so values may contain
/// further `=` or `:` (embedded JSON, URLs, timestamps).
fn split_field(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once('=').or_else(|| token.split_once(':'))?;
    Some((key.trim(), value.trim()))
}
