//! Seam for the document store, plus an in-memory implementation.

use crate::config::{Config, FromConfig};
use crate::error::BoxError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Persistence keyed by store-generated identifiers.
pub trait RecordStore {
    /// Insert a document and return its new identifier.
    fn insert(&self, document: Document) -> Result<String, BoxError>;
    fn find(&self, id: &str) -> Result<Option<Document>, BoxError>;
    /// Remove a document. Returns whether it existed.
    fn delete(&self, id: &str) -> Result<bool, BoxError>;
}

/// Process-local store with UUID identifiers. Safe to share across threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    database: String,
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the database this store stands in for. Empty unless built
    /// from a [`Config`].
    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn len(&self) -> Result<usize, BoxError> {
        Ok(self.documents.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, BoxError> {
        Ok(self.len()? == 0)
    }
}

impl FromConfig for MemoryStore {
    fn from_config(config: &Config) -> Result<Self, BoxError> {
        tracing::info!(
            database = %config.store.database,
            uri = %config.store.uri,
            "using in-memory store"
        );
        Ok(Self {
            database: config.store.database.clone(),
            ..Self::default()
        })
    }
}

fn poisoned<T>(_: T) -> BoxError {
    "memory store lock poisoned".into()
}

impl RecordStore for MemoryStore {
    fn insert(&self, document: Document) -> Result<String, BoxError> {
        let id = Uuid::new_v4().simple().to_string();
        self.documents
            .write()
            .map_err(poisoned)?
            .insert(id.clone(), document);
        Ok(id)
    }

    fn find(&self, id: &str) -> Result<Option<Document>, BoxError> {
        Ok(self.documents.read().map_err(poisoned)?.get(id).cloned())
    }

    fn delete(&self, id: &str) -> Result<bool, BoxError> {
        Ok(self.documents.write().map_err(poisoned)?.remove(id).is_some())
    }
}
