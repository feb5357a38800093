//! Serde view of the document tree.
//!
//! A [`NodeView`] borrows from its document and serializes to a nested
//! `{type, tagName, attributes, content, children}` shape; fields a node
//! kind does not carry are skipped rather than emitted as null, and an
//! empty child list is skipped too.

use serde::Serialize;
use vellum_dom::{AttributesMap, Document, NodeId, NodeType};

/// One node of the serializable tree view.
///
/// Build one with [`document_view`] or [`subtree_view`] and hand it to any
/// `serde` serializer. Attribute order is preserved because the underlying
/// map is insertion-ordered.
#[derive(Debug, Serialize)]
pub struct NodeView<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "tagName", skip_serializing_if = "Option::is_none")]
    tag_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes: Option<&'a AttributesMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeView<'a>>,
}

/// View of the whole document, rooted at the Document node.
#[must_use]
pub fn document_view(doc: &Document) -> NodeView<'_> {
    subtree_view(doc, NodeId::ROOT).unwrap_or_else(|| NodeView {
        kind: "document",
        tag_name: None,
        attributes: None,
        content: None,
        children: Vec::new(),
    })
}

/// View of the subtree rooted at `id`, or `None` for an unknown id.
#[must_use]
pub fn subtree_view(doc: &Document, id: NodeId) -> Option<NodeView<'_>> {
    let node = doc.get(id)?;
    let children: Vec<NodeView<'_>> = doc
        .children(id)
        .iter()
        .filter_map(|&child| subtree_view(doc, child))
        .collect();

    let view = match &node.node_type {
        NodeType::Document => NodeView {
            kind: "document",
            tag_name: None,
            attributes: None,
            content: None,
            children,
        },
        NodeType::Element(data) => NodeView {
            kind: "element",
            tag_name: Some(data.tag_name.as_str()),
            attributes: Some(&data.attrs),
            content: None,
            children,
        },
        NodeType::Text(data) => NodeView {
            kind: "text",
            tag_name: None,
            attributes: None,
            content: Some(data.as_str()),
            children,
        },
        NodeType::Comment(data) => NodeView {
            kind: "comment",
            tag_name: None,
            attributes: None,
            content: Some(data.as_str()),
            children,
        },
    };
    Some(view)
}
