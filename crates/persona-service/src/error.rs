//! Error types for configuration and the character pipeline.

use thiserror::Error;

/// Boxed error returned by external collaborators (model client, store driver).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building a [`crate::Config`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option was not supplied.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// An option was supplied but could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Errors raised by [`crate::CharacterService`].
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The vision model call failed.
    #[error("vision model request failed: {0}")]
    Model(#[source] BoxError),

    /// The model reply matched no recovery state. Carries the reply verbatim.
    #[error("error processing model reply: {raw}")]
    Unrecoverable { raw: String },

    /// The recovered record does not satisfy the character record contract.
    #[error("invalid character record: {0}")]
    InvalidRecord(#[source] serde_json::Error),

    /// The record store rejected an operation.
    #[error("record store operation failed: {0}")]
    Store(#[source] BoxError),

    /// Prompt construction failed.
    #[error(transparent)]
    Codec(persona_toon::ToonError),
}

impl From<persona_toon::ToonError> for ServiceError {
    fn from(err: persona_toon::ToonError) -> Self {
        match err {
            persona_toon::ToonError::Unrecoverable { raw } => ServiceError::Unrecoverable { raw },
            other => ServiceError::Codec(other),
        }
    }
}

/// Convenience alias used throughout persona-service.
pub type Result<T> = std::result::Result<T, ServiceError>;
