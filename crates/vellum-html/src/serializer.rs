//! HTML serialization.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Tag names serialize lowercase, attributes in insertion order with
//! entity-encoded values, and void elements without children or a closing
//! tag. Every non-void element gets an explicit closing tag regardless of
//! how the source markup wrote it, so serialized output re-parses to a
//! structurally equivalent tree.

use vellum_dom::{Document, NodeId, NodeType};

use crate::tokenizer::entities;
use crate::tokenizer::is_void_element;

/// Serialize a node and its entire subtree to markup.
///
/// For the Document node this is the concatenation over its children
/// (comments included), yielding a full-document serialization. A missing
/// node serializes as the empty string.
#[must_use]
pub fn outer_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    serialize_node(doc, id, &mut out);
    out
}

/// Serialize a node's direct children — the `innerHTML` getter.
#[must_use]
pub fn inner_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    for &child in doc.children(id) {
        serialize_node(doc, child, &mut out);
    }
    out
}

fn serialize_node(doc: &Document, id: NodeId, out: &mut String) {
    let Some(node) = doc.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {
            for &child in doc.children(id) {
                serialize_node(doc, child, out);
            }
        }
        NodeType::Element(data) => {
            let name = data.tag_name.to_ascii_lowercase();
            out.push('<');
            out.push_str(&name);
            for (attr_name, attr_value) in &data.attrs {
                out.push(' ');
                out.push_str(attr_name);
                // An empty value serializes as the bare name; re-parsing
                // restores the same present-with-empty-value state.
                if !attr_value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&entities::encode(attr_value));
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(&name) {
                return;
            }
            for &child in doc.children(id) {
                serialize_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&name);
            out.push('>');
        }
        NodeType::Text(data) => {
            out.push_str(&entities::encode(data));
        }
        NodeType::Comment(data) => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        }
    }
}
