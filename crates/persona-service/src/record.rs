//! The character record contract.
//!
//! A record is a JSON object with a fixed set of legal top-level sections.
//! Every section is optional; sections other than `annotations` are objects,
//! `annotations` is a list of objects. Unknown top-level keys are dropped
//! during validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level keys of a character record, in schema order.
pub const RECORD_KEYS: [&str; 10] = [
    "meta",
    "general",
    "head",
    "hair",
    "skin",
    "face",
    "measurements_and_proportions",
    "pose_and_landmarks",
    "clothing_and_accessories",
    "annotations",
];

type Section = Option<Map<String, Value>>;

/// A validated character description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements_and_proportions: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose_and_landmarks: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing_and_accessories: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Map<String, Value>>>,
}

impl CharacterRecord {
    /// Validate a decoded mapping against the record contract.
    ///
    /// An explicit `null` section is treated the same as an absent one.
    pub fn from_mapping(map: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(map))
    }

    /// The document to persist: only the sections that were set.
    pub fn to_document(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct of maps always serializes to an object.
            _ => Map::new(),
        }
    }
}

/// Keys of `map` that are not part of the record contract.
pub fn unknown_keys(map: &Map<String, Value>) -> Vec<&str> {
    map.keys()
        .map(String::as_str)
        .filter(|k| !RECORD_KEYS.contains(k))
        .collect()
}
