//! Serializes a [`TreeNode`] as indented XML.
//!
//! Each class becomes an element named after it, attributes become leaf
//! elements carrying their type as text. Empty classes are written as an
//! open/close pair, never self-closing.

use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, DocumentResult};
use crate::tree::TreeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlOptions {
    /// Spaces per nesting level; 0 writes everything on one line.
    pub indent: usize,
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            declaration: true,
        }
    }
}

pub fn render_tree(tree: &TreeNode, options: &XmlOptions) -> DocumentResult<String> {
    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };

    if options.declaration {
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
        )?;
    }
    write_node(&mut writer, tree)?;

    let mut xml = String::from_utf8(writer.into_inner())
        .map_err(|e| DocumentError::Serialization(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

pub fn write_tree(tree: &TreeNode, path: &Path, options: &XmlOptions) -> DocumentResult<()> {
    let xml = render_tree(tree, options)?;
    super::write_string(path, &xml)?;
    tracing::info!(
        "[io] wrote {} classes to {}",
        tree.node_count(),
        path.display()
    );
    Ok(())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &TreeNode) -> DocumentResult<()> {
    emit(writer, Event::Start(BytesStart::new(node.name.as_str())))?;

    for field in &node.fields {
        emit(writer, Event::Start(BytesStart::new(field.name.as_str())))?;
        emit(writer, Event::Text(BytesText::new(&field.value)))?;
        emit(writer, Event::End(BytesEnd::new(field.name.as_str())))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }

    emit(writer, Event::End(BytesEnd::new(node.name.as_str())))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> DocumentResult<()> {
    writer
        .write_event(event)
        .map_err(|e| DocumentError::Serialization(e.to_string()))
}
