//! # persona-toon
//!
//! Flat **TOON (Token-Oriented Object Notation)** codec for structured
//! character records exchanged with a vision-language model.
//!
//! A record is a JSON object. Its top-level fields are written as
//! `key=value` fragments joined by `|`, which costs fewer tokens than the
//! equivalent JSON when embedded in a prompt. Nested objects travel as
//! compact JSON islands, sequences as comma-joined lists.
//!
//! The decoder is deliberately forgiving: it reads whatever a model sends
//! back (fenced blocks, newline-separated fields, `:` instead of `=`) and
//! never fails. [`recover`] wraps it in the full reply-recovery policy
//! (plain JSON, then embedded JSON, then TOON).
//!
//! ## Quick start
//!
//! ```rust
//! use persona_toon::{decode, encode};
//! use serde_json::json;
//!
//! let toon = encode(r#"{"name":"Alice","age":7,"tags":["a","b"]}"#).unwrap();
//! assert_eq!(toon, "name=Alice|age=7|tags=a,b");
//!
//! let back = serde_json::Value::Object(decode(&toon));
//! assert_eq!(back, json!({"name": "Alice", "age": 7, "tags": ["a", "b"]}));
//! ```
//!
//! ## Modules
//!
//! - [`encoder`]: mapping → flat TOON line
//! - [`decoder`]: TOON text → mapping, with optional [`Diagnostics`]
//! - [`coerce`]: typed interpretation of a single value token
//! - [`fence`]: markdown fence stripping
//! - [`recovery`]: model reply → record, with the state that produced it
//! - [`error`]: error types for encode and recovery failures

pub mod coerce;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fence;
pub mod recovery;

pub use coerce::{coerce_value, Coerced};
pub use decoder::{decode, decode_with_diagnostics, Diagnostics, FieldMode};
pub use encoder::{encode, encode_map, encode_value};
pub use error::{Result, ToonError};
pub use fence::{strip_fence, Fence};
pub use recovery::{recover, recover_with, Recovered, RecoveryPath};
