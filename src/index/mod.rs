//! Per-class index built from the flat model stream.
//!
//! The index is populated in a single pass and is read-only afterwards. Entries
//! keep population order, which is also the export order.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::error::{IndexError, IndexResult};
use crate::model::{AttributeRecord, ClassRecord, ModelElement, RelationEdge};

/// Everything known about one class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassIndexEntry {
    pub name: String,
    /// `None` for placeholders created by an Aggregation that names an undeclared class.
    pub record: Option<ClassRecord>,
    /// Declaration order.
    pub attributes: Vec<AttributeRecord>,
    /// Classes nested under this one, in the order their edges were seen.
    pub children: Vec<String>,
    /// Tokens observed for this class on either end of an edge.
    pub multiplicities: BTreeSet<String>,
}

impl ClassIndexEntry {
    fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            record: None,
            attributes: Vec::new(),
            children: Vec::new(),
            multiplicities: BTreeSet::new(),
        }
    }

    pub fn is_declared(&self) -> bool {
        self.record.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.record.as_ref().is_some_and(ClassRecord::is_root)
    }
}

/// Class name to [`ClassIndexEntry`], in population order.
#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    classes: IndexMap<String, ClassIndexEntry>,
    edge_count: usize,
}

impl RelationIndex {
    /// Build the index from an ordered element stream.
    ///
    /// Attribute and Aggregation elements seen before the first Class element
    /// have no context to attach to and fail the whole build.
    pub fn build<I>(elements: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = ModelElement>,
    {
        let mut index = Self::default();
        let mut cursor: Option<String> = None;

        for (position, element) in elements.into_iter().enumerate() {
            match element {
                ModelElement::Class(record) => {
                    cursor = Some(record.name.clone());
                    index.declare(record);
                }
                ModelElement::Attribute(attribute) => {
                    let current = require_context(cursor.as_deref(), "Attribute", position)?;
                    index.entry_mut(current).attributes.push(attribute);
                }
                ModelElement::Aggregation(edge) => {
                    require_context(cursor.as_deref(), "Aggregation", position)?;
                    index.relate(edge);
                }
            }
        }

        tracing::debug!(
            "[index] built {} classes from {} aggregations",
            index.classes.len(),
            index.edge_count
        );
        Ok(index)
    }

    fn declare(&mut self, record: ClassRecord) {
        let entry = self.entry_mut(&record.name);
        if entry.is_declared() {
            tracing::warn!(
                "[index] class '{}' declared again, replacing its record and attributes",
                record.name
            );
            entry.attributes.clear();
        }
        entry.record = Some(record);
    }

    fn relate(&mut self, edge: RelationEdge) {
        self.entry_mut(&edge.source)
            .multiplicities
            .insert(edge.source_multiplicity);

        let target = self.entry_mut(&edge.target);
        target.multiplicities.insert(edge.target_multiplicity);
        target.children.push(edge.source);

        self.edge_count += 1;
    }

    fn entry_mut(&mut self, name: &str) -> &mut ClassIndexEntry {
        if !self.classes.contains_key(name) {
            tracing::debug!("[index] registering '{name}'");
        }
        self.classes
            .entry(name.to_string())
            .or_insert_with(|| ClassIndexEntry::placeholder(name))
    }

    pub fn get(&self, name: &str) -> Option<&ClassIndexEntry> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Entries in population order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassIndexEntry> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Names of the declared classes flagged as root.
    pub fn roots(&self) -> Vec<&str> {
        self.iter()
            .filter(|entry| entry.is_root())
            .map(|entry| entry.name.as_str())
            .collect()
    }
}

fn require_context<'c>(
    cursor: Option<&'c str>,
    element: &'static str,
    position: usize,
) -> IndexResult<&'c str> {
    cursor.ok_or(IndexError::MalformedInput { element, position })
}
