//! # java2jsonschema
//!
//! Generate [JSON Schema](https://json-schema.org/) documents from a
//! Java class model — one document per declared type, with `$ref`
//! cross-references mirroring the source type references.
//!
//! ## Features
//!
//! - Indexes a source tree into a [`registry::TypeRegistry`] (basename → path)
//! - Classifies declarations as enum or structured object
//! - Maps Java scalar and wrapper types to JSON Schema primitives
//! - Flattens inherited fields from the supertype chain (descendant
//!   wins on name collision), with cycle detection
//! - Derives stable, path-based schema identifiers shared between a
//!   document's `$id` and sibling `$ref` targets
//! - Per-type failure isolation: one bad type never aborts the batch
//! - CLI tool `java2jsonschema` for batch generation
//!
//! ## Example (Programmatic Usage)
//!
//! ```no_run
//! use java2jsonschema::generator::{build_schema, GeneratorConfig};
//! use java2jsonschema::registry::TypeRegistry;
//!
//! let registry = TypeRegistry::scan("model/src/main/java").unwrap();
//! let config = GeneratorConfig::default();
//!
//! let document = build_schema(&registry, "Customer", &config).unwrap();
//! println!("{}", serde_json::to_string_pretty(&document).unwrap());
//! ```
//!
//! ## Example (CLI)
//!
//! ```bash
//! java2jsonschema model/src/main/java schemas
//! ```
//!
//! ## Crate Layout
//!
//! - [`schema`] — Output data model (`SchemaDocument`, draft constant)
//! - [`registry`] — Source tree scan and schema identifier derivation
//! - [`parser`] — Shallow Java declaration reader
//! - [`generator`] — Type resolution, inheritance flattening, schema
//!   assembly, batch driver
//! - [`error`] — Typed failure kinds
//!
//! The CLI binary is enabled with the `cli` feature.
pub mod error;
pub mod generator;
pub mod parser;
pub mod registry;
pub mod schema;
