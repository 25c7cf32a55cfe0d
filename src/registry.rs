use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::GenerateError;

/// File extension of the scanned source files.
pub const SOURCE_EXTENSION: &str = "java";

/// Mapping from type name to the source file declaring it.
///
/// Built once by recursively scanning a source root; read-only after
/// construction. Names are derived from file basenames, so two files
/// with the same basename in different subdirectories collide: the
/// first match in scan order wins and the duplicate is reported with a
/// warning. Scan order is lexicographic by file name, so registry
/// iteration (and therefore batch output) is deterministic.
#[derive(Debug)]
pub struct TypeRegistry {
    root: PathBuf,
    entries: IndexMap<String, PathBuf>,
}

impl TypeRegistry {
    /// Scan `root` recursively for source files and index them by
    /// basename.
    ///
    /// Fails with [`GenerateError::RegistryBuild`] if the root is not
    /// an existing directory.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self, GenerateError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(GenerateError::RegistryBuild(root.to_path_buf()));
        }

        let mut entries = IndexMap::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            if entries.contains_key(name) {
                warn!(name, path = %path.display(), "duplicate basename; keeping first match");
                continue;
            }
            entries.insert(name.to_string(), relative.to_path_buf());
        }

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// The scanned source root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source path of a registered type, relative to the root.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Absolute source path of a registered type.
    pub fn absolute_path(&self, name: &str) -> Option<PathBuf> {
        self.entries.get(name).map(|relative| self.root.join(relative))
    }

    /// Schema identifier of a registered type.
    pub fn id_of(&self, name: &str) -> Option<String> {
        self.entries.get(name).map(|relative| schema_id(relative))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered type names, in scan order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derive the schema identifier for a root-relative source path.
///
/// Path separators become `.` and the source extension is stripped:
/// `sub/Baz.java` → `sub.Baz`. The same derivation is used for a
/// document's own `$id` and for `$ref` targets pointing at it, so
/// references always resolve.
pub fn schema_id(relative: &Path) -> String {
    let stem = relative.with_extension("");
    stem.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(".")
}
