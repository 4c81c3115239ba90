//! Recovery of a structured record from a free-text model reply.
//!
//! The model is asked for a particular layout but is not bound to it. A reply
//! is tried against these states in order, first success wins:
//!
//! 1. [`RecoveryPath::DirectJson`]: drop every ` ```json ` / ` ``` ` marker and
//!    parse the remainder as a JSON object.
//! 2. [`RecoveryPath::EmbeddedJson`]: parse the span from the first `{` to the
//!    last `}` as a JSON object.
//! 3. [`RecoveryPath::Toon`]: run the TOON decoder over the raw reply and keep
//!    the result only if at least one expected top-level key is present.
//!
//! When all three fail the caller gets [`ToonError::Unrecoverable`] carrying
//! the reply verbatim.

use crate::decoder::decode;
use crate::error::{Result, ToonError};
use serde_json::{Map, Value};

/// Which recovery state produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPath {
    DirectJson,
    EmbeddedJson,
    Toon,
}

/// A record recovered from a model reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub record: Map<String, Value>,
    pub path: RecoveryPath,
}

/// Recover a record from `text`, using [`decode`] for the TOON state.
///
/// ```
/// use persona_toon::{recover, RecoveryPath};
///
/// let recovered = recover("meta=photo|general=adult", &["meta", "general"]).unwrap();
/// assert_eq!(recovered.path, RecoveryPath::Toon);
/// assert_eq!(recovered.record["general"], "adult");
/// ```
pub fn recover(text: &str, expected_keys: &[&str]) -> Result<Recovered> {
    recover_with(text, expected_keys, decode)
}

/// Recover a record from `text` with a caller-supplied TOON decoder.
///
/// The decoder is only invoked when both JSON states have failed.
pub fn recover_with<F>(text: &str, expected_keys: &[&str], mut decoder: F) -> Result<Recovered>
where
    F: FnMut(&str) -> Map<String, Value>,
{
    if let Some(record) = direct_json(text) {
        return Ok(found(record, RecoveryPath::DirectJson));
    }
    if let Some(record) = embedded_json(text) {
        return Ok(found(record, RecoveryPath::EmbeddedJson));
    }

    let record = decoder(text);
    if record.keys().any(|k| expected_keys.contains(&k.as_str())) {
        return Ok(found(record, RecoveryPath::Toon));
    }

    tracing::warn!(
        decoded_keys = record.len(),
        reply_len = text.len(),
        "model reply matched no recovery state"
    );
    Err(ToonError::Unrecoverable {
        raw: text.to_string(),
    })
}

fn found(record: Map<String, Value>, path: RecoveryPath) -> Recovered {
    tracing::debug!(?path, fields = record.len(), "recovered record from model reply");
    Recovered { record, path }
}

fn direct_json(text: &str) -> Option<Map<String, Value>> {
    let stripped = text.trim().replace("```json", "").replace("```", "");
    parse_object(&stripped)
}

fn embedded_json(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    parse_object(&text[start..=end])
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
