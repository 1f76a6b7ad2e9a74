//! Error types for model indexing, tree materialization, export and document I/O.
//!
//! Each stage has its own enum so callers can match on exactly the failures
//! that stage can produce. None of these are transient: nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while building a [`RelationIndex`](crate::index::RelationIndex).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("{element} element at position {position} appears before any Class element")]
    MalformedInput {
        element: &'static str,
        position: usize,
    },
}

/// Failures while materializing the nested class tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Root class '{0}' is not present in the model")]
    UnknownRoot(String),
}

/// Malformed multiplicity token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultiplicityError {
    #[error("empty multiplicity")]
    Empty,

    #[error("'{0}' has an empty bound")]
    EmptyBound(String),

    #[error("'{0}' has more than one range separator")]
    ExtraSeparator(String),
}

/// Failures while exporting per-class metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Class '{class}' has no multiplicity information")]
    MissingCardinality { class: String },

    #[error("Class '{class}' has more than one multiplicity token: {}", .tokens.join(", "))]
    AmbiguousCardinality { class: String, tokens: Vec<String> },

    #[error("Class '{class}' has malformed multiplicity token '{token}': {reason}")]
    InvalidMultiplicity {
        class: String,
        token: String,
        #[source]
        reason: MultiplicityError,
    },

    #[error("Class '{class}' is referenced by an Aggregation but never declared")]
    UndeclaredClass { class: String },
}

/// Failures at the file boundary: reading models, reading and writing documents.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML attribute: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("<{element}> element is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object at the top level of {path}")]
    NotAnObject { path: PathBuf },

    #[error("Invalid delta document {path}: {source}")]
    InvalidDelta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type IndexResult<T> = Result<T, IndexError>;
pub type TreeResult<T> = Result<T, TreeError>;
pub type ExportResult<T> = Result<T, ExportError>;
pub type DocumentResult<T> = Result<T, DocumentError>;
