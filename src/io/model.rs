//! Reads the flat model description from XML.
//!
//! `Class`, `Attribute` and `Aggregation` elements are collected in document
//! order at any depth. Everything else is ignored.

use std::path::Path;

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{DocumentError, DocumentResult};
use crate::model::{AttributeRecord, ClassRecord, ModelElement, RelationEdge};

pub fn load_model(path: &Path) -> DocumentResult<Vec<ModelElement>> {
    let xml = super::read_to_string(path)?;
    let elements = parse_model(&xml)?;
    tracing::debug!(
        "[io] read {} model elements from {}",
        elements.len(),
        path.display()
    );
    Ok(elements)
}

pub fn parse_model(xml: &str) -> DocumentResult<Vec<ModelElement>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut elements = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                if let Some(element) = to_element(&e)? {
                    elements.push(element);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(elements)
}

fn to_element(e: &BytesStart<'_>) -> DocumentResult<Option<ModelElement>> {
    let element = match e.local_name().as_ref() {
        b"Class" => {
            let mut attrs = collect_attributes(e)?;
            ModelElement::Class(ClassRecord {
                name: take(&mut attrs, "Class", "name")?,
                documentation: attrs.shift_remove("documentation").unwrap_or_default(),
                is_root: attrs
                    .shift_remove("isRoot")
                    .unwrap_or_else(|| "false".to_string()),
            })
        }
        b"Attribute" => {
            let mut attrs = collect_attributes(e)?;
            ModelElement::Attribute(AttributeRecord {
                name: take(&mut attrs, "Attribute", "name")?,
                type_name: take(&mut attrs, "Attribute", "type")?,
            })
        }
        b"Aggregation" => {
            let mut attrs = collect_attributes(e)?;
            ModelElement::Aggregation(RelationEdge {
                source: take(&mut attrs, "Aggregation", "source")?,
                target: take(&mut attrs, "Aggregation", "target")?,
                source_multiplicity: take(&mut attrs, "Aggregation", "sourceMultiplicity")?,
                target_multiplicity: take(&mut attrs, "Aggregation", "targetMultiplicity")?,
            })
        }
        _ => return Ok(None),
    };
    Ok(Some(element))
}

fn collect_attributes(e: &BytesStart<'_>) -> DocumentResult<IndexMap<String, String>> {
    let mut attrs = IndexMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn take(
    attrs: &mut IndexMap<String, String>,
    element: &'static str,
    attribute: &'static str,
) -> DocumentResult<String> {
    attrs
        .shift_remove(attribute)
        .ok_or(DocumentError::MissingAttribute { element, attribute })
}
