use serde_json::{json, Value};
use tracing::debug;

use crate::registry::TypeRegistry;

/// Fixed conversion table from Java scalar and wrapper type names to
/// JSON Schema primitive type names. Declared type names missing from
/// this table fall through to the cross-reference / unknown path.
pub const TYPE_CONVERSIONS: &[(&str, &str)] = &[
    ("boolean", "boolean"),
    ("Boolean", "boolean"),
    ("byte", "integer"),
    ("Byte", "integer"),
    ("short", "integer"),
    ("Short", "integer"),
    ("int", "integer"),
    ("Integer", "integer"),
    ("long", "integer"),
    ("Long", "integer"),
    ("BigInteger", "integer"),
    ("float", "number"),
    ("Float", "number"),
    ("double", "number"),
    ("Double", "number"),
    ("BigDecimal", "number"),
    ("char", "string"),
    ("Character", "string"),
    ("String", "string"),
];

/// Look up the JSON Schema primitive for a declared type name.
pub fn primitive_conversion(declared: &str) -> Option<&'static str> {
    TYPE_CONVERSIONS
        .iter()
        .find(|(java, _)| *java == declared)
        .map(|(_, json_type)| *json_type)
}

/// Resolve a declared field type into a property fragment.
///
/// Resolution is total; no branch errors:
/// 1. conversion-table hit → `{"type": <mapped>}`
/// 2. registered type → `{"$ref": <schema-id>}`
/// 3. otherwise → `{"type": "unknown", "comment": <declared>}`
pub fn resolve_field_type(declared: &str, registry: &TypeRegistry) -> Value {
    if let Some(mapped) = primitive_conversion(declared) {
        debug!(declared, mapped, "primitive conversion");
        return json!({ "type": mapped });
    }
    if let Some(id) = registry.id_of(declared) {
        return json!({ "$ref": id });
    }
    json!({ "type": "unknown", "comment": declared })
}
