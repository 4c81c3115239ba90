//! # persona-service
//!
//! Turns an uploaded photo into a stored character record.
//!
//! The vision model and the document store are external collaborators behind
//! the [`VisionModel`] and [`RecordStore`] traits. This crate owns the parts
//! in between: the prompt with its TOON-encoded layout, recovery of a record
//! from whatever the model replied, validation against the record contract,
//! and configuration.
//!
//! ```
//! use persona_service::{BoxError, CharacterService, MemoryStore, PromptTemplate, VisionModel};
//! use serde_json::json;
//!
//! struct Canned;
//!
//! impl VisionModel for Canned {
//!     fn describe(&self, _prompt: &str, _image: &[u8]) -> Result<String, BoxError> {
//!         Ok(r#"meta={"source":"upload"}|hair={"color":"red"}"#.to_string())
//!     }
//! }
//!
//! let prompt = PromptTemplate::new("Describe the person.", &json!({"meta": {}, "hair": {}})).unwrap();
//! let service = CharacterService::new(Canned, MemoryStore::new(), prompt);
//! let stored = service.create_character(b"fake image bytes").unwrap();
//! assert_eq!(stored.record.hair.unwrap()["color"], "red");
//! ```

pub mod character;
pub mod config;
pub mod error;
pub mod model;
pub mod prompt;
pub mod record;
pub mod store;

pub use character::{CharacterService, StoredCharacter, ID_FIELD};
pub use config::{Config, FromConfig, StoreConfig};
pub use error::{BoxError, ConfigError, Result, ServiceError};
pub use model::VisionModel;
pub use prompt::{PromptTemplate, DEFAULT_INSTRUCTIONS};
pub use record::{unknown_keys, CharacterRecord, RECORD_KEYS};
pub use store::{Document, MemoryStore, RecordStore};
