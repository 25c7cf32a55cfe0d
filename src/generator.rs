pub mod flatten;
pub mod resolve;

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::GenerateError;
use crate::parser::{self, Declaration, DeclarationKind};
use crate::registry::{schema_id, TypeRegistry};
use crate::schema::SchemaDocument;

use flatten::flatten_fields;
use resolve::resolve_field_type;

/// Generation settings shared across a whole batch.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Field names removed from every generated `properties` object,
    /// regardless of type. Bookkeeping and audit fields that are
    /// irrelevant to the schema's consumer.
    pub excluded_fields: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            excluded_fields: [
                "collection",
                "visited",
                "complexObjects",
                "objMapper",
                "uuid",
                "createdById",
                "updatedById",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Counts reported after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub failed: usize,
}

/// Build the schema document for a single registered type.
///
/// Loads the type's source, finds the top-level declaration matching
/// the registry name, and dispatches on its kind: enums get an `enum`
/// member, classes and interfaces get `type: "object"` plus flattened,
/// resolved, exclusion-filtered `properties`. A source with no
/// matching declaration, or one of an unmodeled kind, yields a
/// header-only document rather than an error, so one odd file cannot
/// block its dependents.
///
/// # Errors
///
/// - [`GenerateError::DeclarationNotFound`] if the registry has no
///   entry for `type_name` or its source fails to parse.
/// - [`GenerateError::InheritanceCycle`] if the supertype chain
///   revisits a type.
pub fn build_schema(
    registry: &TypeRegistry,
    type_name: &str,
    config: &GeneratorConfig,
) -> Result<SchemaDocument, GenerateError> {
    let relative = registry
        .get(type_name)
        .ok_or_else(|| GenerateError::DeclarationNotFound {
            type_name: type_name.to_string(),
            source: None,
        })?;
    let id = schema_id(relative);
    let absolute = registry.root().join(relative);
    let declarations =
        parser::load(&absolute).map_err(|source| GenerateError::DeclarationNotFound {
            type_name: type_name.to_string(),
            source: Some(source),
        })?;

    let mut document = SchemaDocument::new(type_name, &id);
    match declarations.iter().find(|d| d.name == type_name) {
        None => {
            warn!(type_name, "no matching declaration in source; emitting header-only schema");
        }
        Some(declaration) => match declaration.kind {
            DeclarationKind::Enum => {
                document.enum_values = Some(declaration.enum_constants.clone());
            }
            DeclarationKind::Class | DeclarationKind::Interface => {
                document.document_type = Some("object".to_string());
                document.properties = Some(object_properties(declaration, registry, config)?);
            }
            DeclarationKind::Other => {
                warn!(type_name, "unrecognized declaration kind; emitting header-only schema");
            }
        },
    }
    Ok(document)
}

/// Flatten, resolve and filter the property set of a class or
/// interface declaration.
fn object_properties(
    declaration: &Declaration,
    registry: &TypeRegistry,
    config: &GeneratorConfig,
) -> Result<Map<String, Value>, GenerateError> {
    let mut visited = Vec::new();
    let flattened = flatten_fields(declaration, registry, &mut visited)?;

    let mut properties = Map::new();
    for (field, declared) in &flattened {
        if config.excluded_fields.iter().any(|excluded| excluded == field) {
            continue;
        }
        properties.insert(field.clone(), resolve_field_type(declared, registry));
    }
    Ok(properties)
}

/// Generate and persist a schema document for every registered type.
///
/// Documents are written to `out_dir`, one file per schema, named
/// exactly by the schema identifier, as indented JSON. Types are
/// processed in registry order; a failure building one type is logged
/// and counted, and the batch continues with the next.
///
/// # Errors
///
/// Only environmental failures abort the batch: the output directory
/// cannot be created, a document cannot be written, or serialization
/// fails.
pub fn generate_all(
    registry: &TypeRegistry,
    out_dir: &Path,
    config: &GeneratorConfig,
) -> Result<Summary, GenerateError> {
    fs::create_dir_all(out_dir)?;

    let mut summary = Summary::default();
    for type_name in registry.names() {
        match build_schema(registry, type_name, config) {
            Ok(document) => {
                let target = out_dir.join(&document.id);
                fs::write(&target, serde_json::to_string_pretty(&document)?)?;
                info!(type_name, id = %document.id, "schema written");
                summary.written += 1;
            }
            Err(error) => {
                warn!(type_name, %error, "skipping type");
                summary.failed += 1;
            }
        }
    }

    info!(
        written = summary.written,
        failed = summary.failed,
        "generation finished"
    );
    Ok(summary)
}
