use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Draft declaration stamped on every generated document.
pub const SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// One generated JSON Schema document.
///
/// Member order in the serialized output follows the declaration order
/// here: `$schema`, `$id`, `title`, `description`, then either `enum`
/// (for enum types) or `type` + `properties` (for classes and
/// interfaces). A document carrying none of the optional members is a
/// header-only document, emitted when a source file contains no usable
/// declaration for its registry name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(rename = "$schema")]
    pub schema: String,

    /// Path-derived identifier, also used as the `$ref` target string
    /// by sibling documents.
    #[serde(rename = "$id")]
    pub id: String,

    /// Bare type name, without any namespace prefix.
    pub title: String,

    pub description: String,

    /// Constant names in declaration order. Only present for enums.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    /// Always `"object"` when present. Only present for classes and
    /// interfaces.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    /// Field name → property fragment, in flattening order (ancestor
    /// fields first, then the type's own).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl SchemaDocument {
    /// Create a header-only document for the named type.
    pub fn new(type_name: &str, schema_id: &str) -> Self {
        let title = type_name.rsplit('.').next().unwrap_or(type_name);
        Self {
            schema: SCHEMA_DRAFT.to_string(),
            id: schema_id.to_string(),
            title: title.to_string(),
            description: format!("Schema for {type_name}"),
            enum_values: None,
            document_type: None,
            properties: None,
        }
    }
}
