//! Flat per-class metadata export.
//!
//! Every indexed class becomes one [`MetadataRecord`]: its declared attributes
//! followed by a synthetic `class`-typed parameter per nested class, plus the
//! min/max resolved from its multiplicity tokens. Root classes carry no min/max.

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::index::{ClassIndexEntry, RelationIndex};
use crate::model::Multiplicity;

/// Type recorded for synthetic parameters that reference a nested class.
pub const CLASS_PARAMETER_TYPE: &str = "class";

/// How to pick a class's own token when more than one was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardinalityPolicy {
    /// Take the lexicographically smallest token.
    ///
    /// Tokens recorded while the class is the parent side of an aggregation
    /// compete too, so a class seen as `"1..4"` (nested) and `"1"` (parent)
    /// resolves to `"1"`.
    #[default]
    Smallest,
    /// Fail with [`ExportError::AmbiguousCardinality`] unless exactly one token exists.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub class: String,
    pub documentation: String,
    #[serde(rename = "isRoot")]
    pub is_root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    pub parameters: Vec<Parameter>,
}

pub struct MetadataExporter<'a> {
    index: &'a RelationIndex,
    policy: CardinalityPolicy,
}

impl<'a> MetadataExporter<'a> {
    pub fn new(index: &'a RelationIndex) -> Self {
        Self {
            index,
            policy: CardinalityPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CardinalityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Export every class in index population order.
    ///
    /// Fails on the first class that cannot be exported; no partial output is returned.
    pub fn export(&self) -> ExportResult<Vec<MetadataRecord>> {
        let records = self
            .index
            .iter()
            .map(|entry| self.export_entry(entry))
            .collect::<ExportResult<Vec<_>>>()?;

        tracing::debug!("[export] {} metadata records", records.len());
        Ok(records)
    }

    fn export_entry(&self, entry: &ClassIndexEntry) -> ExportResult<MetadataRecord> {
        let Some(record) = entry.record.as_ref() else {
            return Err(ExportError::UndeclaredClass {
                class: entry.name.clone(),
            });
        };

        let root = record.is_root();
        let cardinality = self.resolve_cardinality(entry, root)?;

        let parameters = entry
            .attributes
            .iter()
            .map(|attribute| Parameter {
                name: attribute.name.clone(),
                type_name: attribute.type_name.clone(),
            })
            .chain(entry.children.iter().map(|child| Parameter {
                name: child.clone(),
                type_name: CLASS_PARAMETER_TYPE.to_string(),
            }))
            .collect();

        let (min, max) = if root {
            (None, None)
        } else {
            (Some(cardinality.min), Some(cardinality.max))
        };

        Ok(MetadataRecord {
            class: record.name.clone(),
            documentation: record.documentation.clone(),
            is_root: record.is_root.clone(),
            max,
            min,
            parameters,
        })
    }

    /// Pick and parse the class's own multiplicity token.
    ///
    /// Roots still need at least one token, but ambiguity is not checked for
    /// them since their bounds are never emitted.
    fn resolve_cardinality(
        &self,
        entry: &ClassIndexEntry,
        root: bool,
    ) -> ExportResult<Multiplicity> {
        let Some(token) = entry.multiplicities.first() else {
            return Err(ExportError::MissingCardinality {
                class: entry.name.clone(),
            });
        };

        if entry.multiplicities.len() > 1 && !root {
            match self.policy {
                CardinalityPolicy::Strict => {
                    return Err(ExportError::AmbiguousCardinality {
                        class: entry.name.clone(),
                        tokens: entry.multiplicities.iter().cloned().collect(),
                    });
                }
                CardinalityPolicy::Smallest => {
                    tracing::debug!(
                        "[export] '{}' has tokens {:?}, using '{token}'",
                        entry.name,
                        entry.multiplicities
                    );
                }
            }
        }

        token
            .parse::<Multiplicity>()
            .map_err(|reason| ExportError::InvalidMultiplicity {
                class: entry.name.clone(),
                token: token.clone(),
                reason,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MultiplicityError;
    use crate::model::{AttributeRecord, ClassRecord, ModelElement, RelationEdge};

    fn class(name: &str, root: bool) -> ModelElement {
        ModelElement::Class(ClassRecord::new(name, format!("about {name}"), root))
    }

    fn attr(name: &str, type_name: &str) -> ModelElement {
        ModelElement::Attribute(AttributeRecord::new(name, type_name))
    }

    fn agg(source: &str, target: &str, sm: &str, tm: &str) -> ModelElement {
        ModelElement::Aggregation(RelationEdge::new(source, target, sm, tm))
    }

    fn export(elements: Vec<ModelElement>) -> ExportResult<Vec<MetadataRecord>> {
        let index = RelationIndex::build(elements).unwrap();
        MetadataExporter::new(&index).export()
    }

    #[test]
    fn test_root_has_no_bounds() {
        let records = export(vec![
            class("Root", true),
            class("Cell", false),
            agg("Cell", "Root", "0..*", "1"),
        ])
        .unwrap();

        let root = &records[0];
        assert_eq!(root.class, "Root");
        assert_eq!(root.is_root, "true");
        assert!(root.min.is_none() && root.max.is_none());

        let json = serde_json::to_value(root).unwrap();
        assert!(json.get("min").is_none());
        assert!(json.get("max").is_none());
    }

    #[test]
    fn test_range_and_exact_tokens() {
        let records = export(vec![
            class("Root", true),
            class("Cell", false),
            class("Antenna", false),
            agg("Cell", "Root", "0..*", "1"),
            agg("Antenna", "Root", "1", "1"),
        ])
        .unwrap();

        assert_eq!(records[1].min.as_deref(), Some("0"));
        assert_eq!(records[1].max.as_deref(), Some("*"));
        assert_eq!(records[2].min.as_deref(), Some("1"));
        assert_eq!(records[2].max.as_deref(), Some("1"));
    }

    #[test]
    fn test_synthetic_class_parameters_follow_attributes() {
        let records = export(vec![
            class("Root", true),
            attr("count", "int"),
            class("A", false),
            class("B", false),
            agg("A", "Root", "1", "1"),
            agg("B", "Root", "1", "1"),
        ])
        .unwrap();

        let parameters = serde_json::to_value(&records[0].parameters).unwrap();
        assert_eq!(
            parameters,
            serde_json::json!([
                {"name": "count", "type": "int"},
                {"name": "A", "type": "class"},
                {"name": "B", "type": "class"}
            ])
        );
    }

    #[test]
    fn test_missing_cardinality() {
        let err = export(vec![class("Root", true), class("Lonely", false)]).unwrap_err();
        assert_eq!(
            err,
            ExportError::MissingCardinality {
                class: "Root".to_string()
            }
        );
    }

    #[test]
    fn test_undeclared_class_cannot_be_exported() {
        let err = export(vec![class("Root", true), agg("Ghost", "Root", "1", "1")]).unwrap_err();
        assert_eq!(
            err,
            ExportError::UndeclaredClass {
                class: "Ghost".to_string()
            }
        );
    }

    #[test]
    fn test_smallest_token_wins_by_default() {
        // Mid is nested in Root ("0..*") and contains Leaf (target token "1").
        let records = export(vec![
            class("Root", true),
            class("Mid", false),
            class("Leaf", false),
            agg("Mid", "Root", "0..*", "1"),
            agg("Leaf", "Mid", "1..4", "1"),
        ])
        .unwrap();

        let mid = records.iter().find(|r| r.class == "Mid").unwrap();
        assert_eq!(mid.min.as_deref(), Some("0"));
        assert_eq!(mid.max.as_deref(), Some("*"));
    }

    #[test]
    fn test_strict_policy_rejects_ambiguity() {
        let index = RelationIndex::build(vec![
            class("Root", true),
            class("Mid", false),
            class("Leaf", false),
            agg("Mid", "Root", "0..*", "1"),
            agg("Leaf", "Mid", "1..4", "1"),
        ])
        .unwrap();

        let err = MetadataExporter::new(&index)
            .with_policy(CardinalityPolicy::Strict)
            .export()
            .unwrap_err();
        assert_eq!(
            err,
            ExportError::AmbiguousCardinality {
                class: "Mid".to_string(),
                tokens: vec!["0..*".to_string(), "1".to_string()],
            }
        );
    }

    #[test]
    fn test_strict_policy_ignores_root_ambiguity() {
        let index = RelationIndex::build(vec![
            class("Root", true),
            class("A", false),
            class("B", false),
            agg("A", "Root", "1", "1"),
            agg("B", "Root", "1", "0..1"),
        ])
        .unwrap();

        let records = MetadataExporter::new(&index)
            .with_policy(CardinalityPolicy::Strict)
            .export()
            .unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_invalid_token() {
        let err = export(vec![
            class("Root", true),
            class("Cell", false),
            agg("Cell", "Root", "0..1..2", "1"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ExportError::InvalidMultiplicity {
                class: "Cell".to_string(),
                token: "0..1..2".to_string(),
                reason: MultiplicityError::ExtraSeparator("0..1..2".to_string()),
            }
        );
    }

    #[test]
    fn test_export_is_deterministic() {
        let elements = vec![
            class("Root", true),
            class("Mid", false),
            class("Leaf", false),
            agg("Mid", "Root", "0..*", "1"),
            agg("Leaf", "Mid", "1..4", "1"),
        ];
        let first = serde_json::to_string(&export(elements.clone()).unwrap()).unwrap();
        let second = serde_json::to_string(&export(elements).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
