use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading one Java source file into declarations.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The body of a declaration never closes.
    #[error("unbalanced braces in declaration `{0}`")]
    UnbalancedBraces(String),

    /// A type keyword was found but no `{` follows it.
    #[error("declaration `{0}` has no body")]
    MissingBody(String),
}

/// Failure during schema generation.
///
/// Only `RegistryBuild` is fatal to a whole run; the batch driver
/// reports per-type errors and continues with the remaining types.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configured source root does not exist.
    #[error("source root `{0}` does not exist")]
    RegistryBuild(PathBuf),

    /// A requested type has no registry entry, or its source failed to parse.
    #[error("declaration for `{type_name}` could not be loaded")]
    DeclarationNotFound {
        type_name: String,
        #[source]
        source: Option<ParseError>,
    },

    /// The supertype chain of a declaration revisits a type.
    #[error("inheritance cycle through `{type_name}`: {chain}")]
    InheritanceCycle { type_name: String, chain: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize schema document: {0}")]
    Serialize(#[from] serde_json::Error),
}
