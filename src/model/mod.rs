//! Typed records of the flat model description.
//!
//! A model is an ordered stream of [`ModelElement`]s. Class elements open a
//! context, Attribute elements attach to the most recent class, and Aggregation
//! elements relate two classes by name.

mod multiplicity;

pub use multiplicity::Multiplicity;

use serde::{Deserialize, Serialize};

/// A declared class of the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub documentation: String,
    /// Kept as the literal `"true"`/`"false"` token from the input.
    #[serde(rename = "isRoot")]
    pub is_root: String,
}

impl ClassRecord {
    pub fn new(
        name: impl Into<String>,
        documentation: impl Into<String>,
        is_root: bool,
    ) -> Self {
        Self {
            name: name.into(),
            documentation: documentation.into(),
            is_root: is_root.to_string(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.is_root == "true"
    }
}

/// A typed field declared on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl AttributeRecord {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Declares that `source` nests inside `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge {
    pub source: String,
    pub target: String,
    pub source_multiplicity: String,
    pub target_multiplicity: String,
}

impl RelationEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        source_multiplicity: impl Into<String>,
        target_multiplicity: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_multiplicity: source_multiplicity.into(),
            target_multiplicity: target_multiplicity.into(),
        }
    }
}

/// One element of the flat input stream. Order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelElement {
    Class(ClassRecord),
    Attribute(AttributeRecord),
    Aggregation(RelationEdge),
}

impl ModelElement {
    /// Element tag as it appears in the source document.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Class(_) => "Class",
            Self::Attribute(_) => "Attribute",
            Self::Aggregation(_) => "Aggregation",
        }
    }
}
