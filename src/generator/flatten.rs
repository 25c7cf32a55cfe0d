use indexmap::IndexMap;
use tracing::debug;

use crate::error::GenerateError;
use crate::parser::{self, Declaration};
use crate::registry::TypeRegistry;

/// Outcome of resolving a declaration's supertype.
///
/// `Unavailable` names every recoverable case in one branch: the
/// declaration has no supertype, the supertype is not registered, its
/// source fails to parse, or the source contains no declaration with
/// that name. All of them flatten to "no ancestor fields". Inheritance
/// cycles are not recoverable and propagate as errors instead.
enum AncestorFields {
    Resolved(IndexMap<String, String>),
    Unavailable,
}

/// Merge a declaration's ancestor fields beneath its own.
///
/// Ancestor fields are inserted first, then the declaration's own
/// fields overlay them: a field name declared in both resolves to the
/// descendant's declared type, while keeping the first-seen position
/// in the map.
///
/// `visited` carries the type names already on the supertype chain of
/// this flatten call; a revisit fails fast with
/// [`GenerateError::InheritanceCycle`].
pub fn flatten_fields(
    declaration: &Declaration,
    registry: &TypeRegistry,
    visited: &mut Vec<String>,
) -> Result<IndexMap<String, String>, GenerateError> {
    if visited.iter().any(|seen| seen == &declaration.name) {
        return Err(GenerateError::InheritanceCycle {
            type_name: declaration.name.clone(),
            chain: visited.join(" -> "),
        });
    }
    visited.push(declaration.name.clone());

    let mut fields = match ancestor_fields(declaration, registry, visited)? {
        AncestorFields::Resolved(base) => base,
        AncestorFields::Unavailable => IndexMap::new(),
    };
    for (name, declared) in &declaration.fields {
        fields.insert(name.clone(), declared.clone());
    }
    Ok(fields)
}

fn ancestor_fields(
    declaration: &Declaration,
    registry: &TypeRegistry,
    visited: &mut Vec<String>,
) -> Result<AncestorFields, GenerateError> {
    let Some(supertype) = &declaration.supertype else {
        return Ok(AncestorFields::Unavailable);
    };
    let Some(path) = registry.absolute_path(supertype) else {
        debug!(supertype, "supertype not registered; skipping ancestors");
        return Ok(AncestorFields::Unavailable);
    };
    let declarations = match parser::load(&path) {
        Ok(declarations) => declarations,
        Err(error) => {
            debug!(supertype, %error, "supertype failed to parse; skipping ancestors");
            return Ok(AncestorFields::Unavailable);
        }
    };
    let Some(parent) = declarations.into_iter().find(|d| &d.name == supertype) else {
        debug!(supertype, "supertype source has no matching declaration; skipping ancestors");
        return Ok(AncestorFields::Unavailable);
    };
    flatten_fields(&parent, registry, visited).map(AncestorFields::Resolved)
}
