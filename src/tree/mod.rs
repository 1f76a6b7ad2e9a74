//! Materializes the relation graph into a single rooted tree.
//!
//! Traversal is depth-first from the root along `children`. Each class is
//! rendered at most once: the first visit wins and later references are
//! dropped, which also cuts every cycle.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{TreeError, TreeResult};
use crate::index::RelationIndex;

/// Leaf field of a node: attribute name and its type text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// One class in the materialized tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    /// Attribute fields in declaration order.
    pub fields: Vec<Field>,
    /// Nested classes, rendered after the fields.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.children.is_empty()
    }

    /// Number of class nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Class names in depth-first pre-order.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.name);
        for child in &self.children {
            child.collect_names(out);
        }
    }

    pub fn find(&self, name: &str) -> Option<&TreeNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

/// Builds [`TreeNode`]s from a finished [`RelationIndex`].
pub struct TreeBuilder<'a> {
    index: &'a RelationIndex,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(index: &'a RelationIndex) -> Self {
        Self { index }
    }

    /// Materialize the tree rooted at `root`.
    pub fn build(&self, root: &str) -> TreeResult<TreeNode> {
        if !self.index.contains(root) {
            return Err(TreeError::UnknownRoot(root.to_string()));
        }

        let mut visited = HashSet::new();
        let tree = self
            .visit(root, &mut visited)
            .ok_or_else(|| TreeError::UnknownRoot(root.to_string()))?;

        tracing::debug!(
            "[tree] materialized {} of {} classes under '{root}'",
            visited.len(),
            self.index.len()
        );
        Ok(tree)
    }

    fn visit<'n>(&self, name: &'n str, visited: &mut HashSet<&'n str>) -> Option<TreeNode>
    where
        'a: 'n,
    {
        if !visited.insert(name) {
            tracing::debug!("[tree] '{name}' already rendered, skipping");
            return None;
        }
        let entry = self.index.get(name)?;

        let fields = entry
            .attributes
            .iter()
            .map(|attribute| Field {
                name: attribute.name.clone(),
                value: attribute.type_name.clone(),
            })
            .collect();

        let children = entry
            .children
            .iter()
            .filter_map(|child| self.visit(child.as_str(), visited))
            .collect();

        Some(TreeNode {
            name: entry.name.clone(),
            fields,
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeRecord, ClassRecord, ModelElement, RelationEdge};

    fn class(name: &str, root: bool) -> ModelElement {
        ModelElement::Class(ClassRecord::new(name, "", root))
    }

    fn attr(name: &str, type_name: &str) -> ModelElement {
        ModelElement::Attribute(AttributeRecord::new(name, type_name))
    }

    fn agg(source: &str, target: &str) -> ModelElement {
        ModelElement::Aggregation(RelationEdge::new(source, target, "0..*", "1"))
    }

    fn index(elements: Vec<ModelElement>) -> RelationIndex {
        RelationIndex::build(elements).unwrap()
    }

    #[test]
    fn test_fields_precede_children_in_declaration_order() {
        let idx = index(vec![
            class("Root", true),
            attr("id", "int"),
            attr("name", "string"),
            class("Cell", false),
            attr("power", "float"),
            agg("Cell", "Root"),
        ]);

        let tree = TreeBuilder::new(&idx).build("Root").unwrap();
        assert_eq!(
            tree.fields,
            vec![
                Field { name: "id".into(), value: "int".into() },
                Field { name: "name".into(), value: "string".into() },
            ]
        );
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "Cell");
        assert_eq!(tree.children[0].fields[0].value, "float");
    }

    #[test]
    fn test_unknown_root() {
        let idx = index(vec![class("Root", true)]);
        let err = TreeBuilder::new(&idx).build("Missing").unwrap_err();
        assert_eq!(err, TreeError::UnknownRoot("Missing".to_string()));
    }

    #[test]
    fn test_cycle_terminates_and_each_class_once() {
        // Root <- A <- B <- A (cycle between A and B)
        let idx = index(vec![
            class("Root", true),
            class("A", false),
            class("B", false),
            agg("A", "Root"),
            agg("B", "A"),
            agg("A", "B"),
        ]);

        let tree = TreeBuilder::new(&idx).build("Root").unwrap();
        assert_eq!(tree.class_names(), vec!["Root", "A", "B"]);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_shared_child_rendered_at_first_visit() {
        // Root has X and Y; both X and Y contain Shared.
        let idx = index(vec![
            class("Root", true),
            class("X", false),
            class("Y", false),
            class("Shared", false),
            agg("X", "Root"),
            agg("Y", "Root"),
            agg("Shared", "X"),
            agg("Shared", "Y"),
        ]);

        let tree = TreeBuilder::new(&idx).build("Root").unwrap();
        assert_eq!(tree.class_names(), vec!["Root", "X", "Shared", "Y"]);
        assert!(tree.find("Y").unwrap().children.is_empty());
    }

    #[test]
    fn test_unreachable_classes_are_left_out() {
        let idx = index(vec![
            class("Root", true),
            class("Child", false),
            class("Orphan", false),
            class("OrphanChild", false),
            agg("Child", "Root"),
            agg("OrphanChild", "Orphan"),
        ]);

        let tree = TreeBuilder::new(&idx).build("Root").unwrap();
        assert!(tree.find("Orphan").is_none());
        assert!(tree.find("OrphanChild").is_none());
        assert!(tree.find("Child").unwrap().is_empty());
    }

    #[test]
    fn test_self_loop() {
        let idx = index(vec![class("Root", true), agg("Root", "Root")]);
        let tree = TreeBuilder::new(&idx).build("Root").unwrap();
        assert!(tree.is_empty());
    }
}
