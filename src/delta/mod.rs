//! Three-way delta between flat key/value documents.
//!
//! [`diff`] classifies every key of two documents and records additions,
//! deletions and value updates. [`Patcher`] rebuilds a document from a delta.

mod diff;
mod patch;

pub use diff::{KeyClass, classify, diff, values_equal};
pub use patch::{PatchMode, Patcher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Single-level key to value mapping. Values are opaque and compared structurally.
pub type FlatDocument = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addition {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub key: String,
    pub from: Value,
    pub to: Value,
}

/// Edit description between a base and a patched document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaDocument {
    #[serde(default)]
    pub additions: Vec<Addition>,
    #[serde(default)]
    pub deletions: Vec<String>,
    #[serde(default)]
    pub updates: Vec<Update>,
}

impl DeltaDocument {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty() && self.updates.is_empty()
    }

    /// Total number of recorded edits.
    pub fn len(&self) -> usize {
        self.additions.len() + self.deletions.len() + self.updates.len()
    }
}
