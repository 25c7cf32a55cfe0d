use std::fs;
use std::path::Path;

use rstest::rstest;
use serde_json::{json, Value};
use tempfile::tempdir;

use java2jsonschema::error::GenerateError;
use java2jsonschema::generator::{build_schema, generate_all, resolve, GeneratorConfig};
use java2jsonschema::registry::TypeRegistry;
use java2jsonschema::schema::SCHEMA_DRAFT;

fn write_source(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn document_json(registry: &TypeRegistry, name: &str) -> Value {
    let document = build_schema(registry, name, &GeneratorConfig::default()).unwrap();
    serde_json::to_value(&document).unwrap()
}

fn property_keys(document: &Value) -> Vec<String> {
    document["properties"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect()
}

#[test]
fn enum_document_lists_constants_in_order() {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "Status.java",
        "public enum Status { OPEN, IN_PROGRESS, CLOSED; }",
    );

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let document = document_json(&registry, "Status");

    assert_eq!(document["$schema"], SCHEMA_DRAFT);
    assert_eq!(document["$id"], "Status");
    assert_eq!(document["title"], "Status");
    assert_eq!(document["description"], "Schema for Status");
    assert_eq!(document["enum"], json!(["OPEN", "IN_PROGRESS", "CLOSED"]));
    assert!(document.get("type").is_none());
    assert!(document.get("properties").is_none());
}

#[test]
fn class_without_supertype_maps_declared_fields() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "Foo.java", "class Foo { int count; }");

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let document = document_json(&registry, "Foo");

    assert_eq!(document["$id"], "Foo");
    assert_eq!(document["type"], "object");
    assert_eq!(
        document["properties"],
        json!({ "count": { "type": "integer" } })
    );
}

#[test]
fn subclass_inherits_ancestor_fields_beneath_its_own() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "Foo.java", "class Foo { int count; }");
    write_source(
        dir.path(),
        "Bar.java",
        "public class Bar extends Foo { String name; }",
    );

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let document = document_json(&registry, "Bar");

    assert_eq!(
        document["properties"],
        json!({
            "count": { "type": "integer" },
            "name": { "type": "string" }
        })
    );
    // ancestor fields come first
    assert_eq!(property_keys(&document), vec!["count", "name"]);
}

#[test]
fn override_uses_descendant_declared_type_in_ancestor_position() {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "Parent.java",
        "class Parent { String shared; int size; }",
    );
    write_source(
        dir.path(),
        "Child.java",
        "class Child extends Parent { int shared; }",
    );

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let document = document_json(&registry, "Child");

    assert_eq!(document["properties"]["shared"], json!({ "type": "integer" }));
    assert_eq!(property_keys(&document), vec!["shared", "size"]);
}

#[test]
fn registered_field_type_becomes_reference() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "sub/Baz.java", "class Baz { long id; }");
    write_source(dir.path(), "Qux.java", "class Qux { Baz item; }");

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let qux = document_json(&registry, "Qux");
    let baz = document_json(&registry, "Baz");

    // reference round-trip: the $ref equals the target's own $id
    assert_eq!(qux["properties"]["item"], json!({ "$ref": "sub.Baz" }));
    assert_eq!(baz["$id"], "sub.Baz");
}

#[test]
fn unregistered_unconverted_type_falls_back_to_unknown() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "Holder.java", "class Holder { Widget gadget; }");

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let document = document_json(&registry, "Holder");

    assert_eq!(
        document["properties"]["gadget"],
        json!({ "type": "unknown", "comment": "Widget" })
    );
}

#[test]
fn missing_supertype_is_skipped_without_error() {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "Orphan.java",
        "class Orphan extends Missing { int id; }",
    );

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let document = document_json(&registry, "Orphan");

    assert_eq!(
        document["properties"],
        json!({ "id": { "type": "integer" } })
    );
}

#[test]
fn excluded_fields_are_removed_from_properties() {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "Audited.java",
        "class Audited { String uuid; String createdById; String name; }",
    );

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let document = document_json(&registry, "Audited");

    assert_eq!(
        document["properties"],
        json!({ "name": { "type": "string" } })
    );
}

#[test]
fn exclusion_set_is_configurable() {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "Audited.java",
        "class Audited { String uuid; String name; }",
    );

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let config = GeneratorConfig {
        excluded_fields: vec!["name".to_string()],
    };
    let document = build_schema(&registry, "Audited", &config).unwrap();
    let document = serde_json::to_value(&document).unwrap();

    assert_eq!(
        document["properties"],
        json!({ "uuid": { "type": "string" } })
    );
}

#[test]
fn inheritance_cycle_fails_fast() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "A.java", "class A extends B { int a; }");
    write_source(dir.path(), "B.java", "class B extends A { int b; }");

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let error = build_schema(&registry, "A", &GeneratorConfig::default()).unwrap_err();

    assert!(matches!(error, GenerateError::InheritanceCycle { .. }));
}

#[test]
fn batch_continues_past_failing_types() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "A.java", "class A extends B { int a; }");
    write_source(dir.path(), "B.java", "class B extends A { int b; }");
    write_source(dir.path(), "Good.java", "class Good { int ok; }");

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let out = tempdir().unwrap();
    let summary =
        generate_all(&registry, out.path(), &GeneratorConfig::default()).unwrap();

    assert_eq!(summary.written, 1);
    assert_eq!(summary.failed, 2);
    assert!(out.path().join("Good").is_file());
    assert!(!out.path().join("A").exists());
}

#[test]
fn unparseable_source_fails_only_its_own_type() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "Broken.java", "class Broken { int x; ");
    write_source(dir.path(), "Fine.java", "class Fine { int y; }");

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let error = build_schema(&registry, "Broken", &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(
        error,
        GenerateError::DeclarationNotFound { .. }
    ));

    let out = tempdir().unwrap();
    let summary =
        generate_all(&registry, out.path(), &GeneratorConfig::default()).unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(summary.failed, 1);
}

#[test]
fn unknown_type_name_is_declaration_not_found() {
    let dir = tempdir().unwrap();
    let registry = TypeRegistry::scan(dir.path()).unwrap();

    let error =
        build_schema(&registry, "Nowhere", &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(
        error,
        GenerateError::DeclarationNotFound { .. }
    ));
}

#[test]
fn record_declaration_yields_header_only_document() {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "Point.java",
        "public record Point(int x, int y) { }",
    );

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let document = document_json(&registry, "Point");

    assert_eq!(document["title"], "Point");
    assert!(document.get("enum").is_none());
    assert!(document.get("type").is_none());
    assert!(document.get("properties").is_none());
}

#[test]
fn duplicate_basenames_keep_first_match() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "a/Dup.java", "class Dup { int first; }");
    write_source(dir.path(), "b/Dup.java", "class Dup { int second; }");

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    assert_eq!(registry.len(), 1);

    let document = document_json(&registry, "Dup");
    assert_eq!(document["$id"], "a.Dup");
    assert_eq!(
        document["properties"],
        json!({ "first": { "type": "integer" } })
    );
}

#[test]
fn generation_is_idempotent() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "Foo.java", "class Foo { int count; }");
    write_source(
        dir.path(),
        "Bar.java",
        "class Bar extends Foo { String name; Foo parent; }",
    );

    let registry = TypeRegistry::scan(dir.path()).unwrap();
    let config = GeneratorConfig::default();

    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    generate_all(&registry, first.path(), &config).unwrap();
    generate_all(&registry, second.path(), &config).unwrap();

    for name in ["Foo", "Bar"] {
        let a = fs::read(first.path().join(name)).unwrap();
        let b = fs::read(second.path().join(name)).unwrap();
        assert_eq!(a, b, "output for {name} differs between runs");
    }
}

#[test]
fn missing_root_aborts_before_generation() {
    let dir = tempdir().unwrap();
    let error = TypeRegistry::scan(dir.path().join("no-such-root")).unwrap_err();
    assert!(matches!(error, GenerateError::RegistryBuild(_)));
}

#[rstest]
#[case("int", "integer")]
#[case("long", "integer")]
#[case("short", "integer")]
#[case("byte", "integer")]
#[case("Integer", "integer")]
#[case("BigInteger", "integer")]
#[case("float", "number")]
#[case("double", "number")]
#[case("BigDecimal", "number")]
#[case("boolean", "boolean")]
#[case("Boolean", "boolean")]
#[case("String", "string")]
#[case("char", "string")]
fn primitive_conversions(#[case] declared: &str, #[case] json_type: &str) {
    let dir = tempdir().unwrap();
    let registry = TypeRegistry::scan(dir.path()).unwrap();

    assert_eq!(
        resolve::resolve_field_type(declared, &registry),
        json!({ "type": json_type })
    );
}
