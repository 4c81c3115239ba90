//! The character description pipeline.
//!
//! image → prompt → model reply → recovered record → validated record → store

use crate::config::{Config, FromConfig};
use crate::error::{Result, ServiceError};
use crate::model::VisionModel;
use crate::prompt::PromptTemplate;
use crate::record::{unknown_keys, CharacterRecord, RECORD_KEYS};
use crate::store::{Document, RecordStore};
use persona_toon::{recover, RecoveryPath};
use serde_json::Value;

/// Field carrying the store identifier in returned documents.
pub const ID_FIELD: &str = "_id";

/// A persisted character as returned to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCharacter {
    pub id: String,
    pub record: CharacterRecord,
    /// Which recovery state produced the record.
    pub path: RecoveryPath,
}

impl StoredCharacter {
    /// The stored document with its identifier under `_id`.
    pub fn to_document(&self) -> Document {
        let mut doc = self.record.to_document();
        doc.insert(ID_FIELD.to_string(), Value::String(self.id.clone()));
        doc
    }
}

/// Orchestrates the model and the store for character records.
pub struct CharacterService<M, S> {
    model: M,
    store: S,
    prompt: PromptTemplate,
}

impl<M: VisionModel, S: RecordStore> CharacterService<M, S> {
    pub fn new(model: M, store: S, prompt: PromptTemplate) -> Self {
        Self {
            model,
            store,
            prompt,
        }
    }

    /// Build the model client and the store from deployment settings.
    pub fn from_config(config: &Config, prompt: PromptTemplate) -> Result<Self>
    where
        M: FromConfig,
        S: FromConfig,
    {
        let model = M::from_config(config).map_err(ServiceError::Model)?;
        let store = S::from_config(config).map_err(ServiceError::Store)?;
        tracing::debug!(model = %config.model, database = %config.store.database, "service configured");
        Ok(Self::new(model, store, prompt))
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Describe the person in `image` and persist the resulting record.
    pub fn create_character(&self, image: &[u8]) -> Result<StoredCharacter> {
        let reply = self
            .model
            .describe(&self.prompt.render(), image)
            .map_err(ServiceError::Model)?;

        let recovered = recover(&reply, &RECORD_KEYS)?;
        // Every path must yield at least one record section. A JSON island
        // lifted out of a single TOON value often yields none.
        if !recovered
            .record
            .keys()
            .any(|key| RECORD_KEYS.contains(&key.as_str()))
        {
            tracing::warn!(path = ?recovered.path, "recovered mapping has no record sections");
            return Err(ServiceError::Unrecoverable { raw: reply });
        }
        let extra = unknown_keys(&recovered.record);
        if !extra.is_empty() {
            tracing::warn!(keys = ?extra, "ignoring unknown record sections");
        }

        let record =
            CharacterRecord::from_mapping(recovered.record).map_err(ServiceError::InvalidRecord)?;
        let id = self
            .store
            .insert(record.to_document())
            .map_err(ServiceError::Store)?;

        tracing::info!(%id, path = ?recovered.path, image_bytes = image.len(), "stored character");
        Ok(StoredCharacter {
            id,
            record,
            path: recovered.path,
        })
    }

    /// Fetch a stored character document, with `_id` set.
    pub fn get_character(&self, id: &str) -> Result<Option<Document>> {
        let found = self.store.find(id).map_err(ServiceError::Store)?;
        Ok(found.map(|mut doc| {
            doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
            doc
        }))
    }

    /// Delete a stored character. Returns whether it existed.
    pub fn delete_character(&self, id: &str) -> Result<bool> {
        let deleted = self.store.delete(id).map_err(ServiceError::Store)?;
        tracing::debug!(%id, deleted, "delete character");
        Ok(deleted)
    }
}
