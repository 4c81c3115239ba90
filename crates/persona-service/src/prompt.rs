//! Prompt construction with a TOON-encoded response layout.

use persona_toon::{encode_value, Result};
use serde_json::Value;

/// Instructions sent when none are configured.
pub const DEFAULT_INSTRUCTIONS: &str = "Describe the person in this image as a structured \
character record. Fill every section you can observe and omit the rest.";

/// Text placed between the instructions and the encoded layout.
const LAYOUT_HEADER: &str = "Respond with one line of key=value fields separated by |. \
Nested sections are compact JSON objects. Use exactly these top-level keys:";

/// Instructions plus a JSON schema whose top level is embedded as TOON.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    instructions: String,
    layout: String,
}

impl PromptTemplate {
    /// Build a template from instructions and a JSON-schema object.
    ///
    /// When the schema has a `properties` object, that is what gets encoded;
    /// otherwise the schema itself is. Fails if the chosen value is not an
    /// object.
    pub fn new(instructions: impl Into<String>, schema: &Value) -> Result<Self> {
        let layout_source = match schema.get("properties") {
            Some(properties @ Value::Object(_)) => properties,
            _ => schema,
        };
        Ok(Self {
            instructions: instructions.into(),
            layout: encode_value(layout_source)?,
        })
    }

    /// The TOON line describing the expected reply.
    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// The full prompt text sent to the model.
    pub fn render(&self) -> String {
        format!(
            "{}\n\n{}\n{}",
            self.instructions.trim_end(),
            LAYOUT_HEADER,
            self.layout
        )
    }
}
