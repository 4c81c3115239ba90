//! Error types for TOON encoding and reply recovery.
//!
//! Decoding has no error type: it is total over all text input and reports
//! what it dropped through [`crate::Diagnostics`] instead.

use thiserror::Error;

/// Errors that can occur during TOON encoding or reply recovery.
#[derive(Error, Debug)]
pub enum ToonError {
    /// The input string was not valid JSON (string encoding path).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The value handed to the encoder was not a mapping.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// No recovery state produced a usable record. Carries the reply verbatim.
    #[error("Unrecoverable model reply: {raw}")]
    Unrecoverable { raw: String },
}

/// Convenience alias used throughout persona-toon.
pub type Result<T> = std::result::Result<T, ToonError>;
