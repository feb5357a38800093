//! Indented terminal dump of a document tree.

use vellum_dom::{Document, NodeId, NodeType};

/// Print a document subtree as an indented outline.
///
/// Tag names print in their stored (uppercase) form. Text data is quoted
/// with newlines shown as `\n` and spaces as middle dots so stray
/// whitespace nodes stay visible.
pub fn print_tree(doc: &Document, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = doc.get(id) {
        match &node.node_type {
            NodeType::Document => {
                println!("{prefix}Document");
            }
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
            NodeType::Comment(data) => {
                println!("{prefix}<!-- {data} -->");
            }
        }
        for &child_id in doc.children(id) {
            print_tree(doc, child_id, indent + 1);
        }
    }
}
