//! DOM tree implementation for the Vellum HTML engine.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. The
//! [`Document`] owns every node it ever allocated; detaching a node removes it
//! from the tree structure but keeps its slot alive, so the caller can hold on
//! to the [`NodeId`] and re-attach the node elsewhere.

use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

/// Map of attribute names to values for an element.
///
/// Insertion order is preserved and names are case-sensitive, so namespaced
/// attributes (`wow:attr`) and custom data attributes keep their exact
/// spelling and their original position during serialization.
pub type AttributesMap = IndexMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// NodeId provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Numeric node type discriminants.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "const unsigned short ELEMENT_NODE = 1; ... TEXT_NODE = 3; ...
/// COMMENT_NODE = 8; DOCUMENT_NODE = 9;"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `Node.ELEMENT_NODE`
    Element = 1,
    /// `Node.TEXT_NODE`
    Text = 3,
    /// `Node.COMMENT_NODE`
    Comment = 8,
    /// `Node.DOCUMENT_NODE`
    Document = 9,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
/// "Each node has an associated node document... and parent (null or an element)."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    /// "An object A's next sibling is the object immediately following A
    /// in the children of A's parent."
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    /// "An object A's previous sibling is the object immediately preceding A
    /// in the children of A's parent."
    pub prev_sibling: Option<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    /// "A document whose type is "html" is known as an HTML document."
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    /// "Comment nodes are known as comments."
    Comment(String),
}

impl NodeType {
    /// The numeric discriminant for this node type.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            NodeType::Document => NodeKind::Document,
            NodeType::Element(_) => NodeKind::Element,
            NodeType::Text(_) => NodeKind::Text,
            NodeType::Comment(_) => NodeKind::Comment,
        }
    }
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// - "Elements have an associated namespace, namespace prefix, local name, custom element state,
///    custom element definition, is value."
/// - "When an element is created, its local name is always given."
///
/// Tag names are stored uppercase regardless of source casing, including
/// namespaced (`WOW:ZZ`) and custom (`DR-WOW`) names; the serializer lowers
/// them again on output. Attribute names are kept exactly as written.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's tag name, always uppercase.
    pub tag_name: String,
    /// "An element has an associated attribute list" (insertion-ordered).
    pub attrs: AttributesMap,
    /// Programmatic checked state; `None` until set, at which point it
    /// overrides the `checked`/`selected` attribute fallback.
    checked: Option<bool>,
}

impl ElementData {
    /// Create element data for the given tag, normalizing the name to uppercase.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        ElementData {
            tag_name: tag_name.to_ascii_uppercase(),
            attrs: AttributesMap::new(),
            checked: None,
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Returns the raw class attribute value if present.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.attrs.get("class").map(String::as_str)
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.attrs.get("class") {
            Some(classlist) => classlist.split_ascii_whitespace().collect(),
            None => HashSet::new(),
        }
    }

    /// Get the value of an attribute by its exact (case-sensitive) name.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Set an attribute, keeping its position if it already exists and
    /// appending it otherwise.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let _ = self.attrs.insert(name.to_string(), value.to_string());
    }

    /// Remove an attribute. Later attributes keep their relative order.
    pub fn remove_attribute(&mut self, name: &str) {
        let _ = self.attrs.shift_remove(name);
    }

    /// Whether the attribute is present at all.
    ///
    /// A boolean-style attribute (`disabled`) is present with an empty-string
    /// value, so `has_attribute` and `get_attribute` always agree.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Set the programmatic checked state, overriding the attribute fallback.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = Some(checked);
    }

    /// The effective checked state: the programmatic value when set,
    /// otherwise the presence of a `checked` or `selected` attribute.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
            .unwrap_or_else(|| self.has_attribute("checked") || self.has_attribute("selected"))
    }
}

/// Errors raised by the mutation primitives.
///
/// Every mutation method is all-or-nothing: when one of these is returned
/// the tree has not been modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomError {
    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    /// "If node is a host-including inclusive ancestor of parent, then throw
    /// a HierarchyRequestError."
    ///
    /// Raised when an insertion would create a cycle, when the Document node
    /// itself is inserted under a parent, or when the parent cannot hold
    /// children (Text and Comment nodes are always leaves).
    #[error("hierarchy error: insertion would create a cycle or an invalid parent")]
    Hierarchy,

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    /// "If child is non-null and its parent is not parent, then throw a
    /// NotFoundError."
    #[error("not found: node is not a child of the context node")]
    NotFound,
}

/// Arena-based DOM document with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. One `Document` is created per parse call and
/// exclusively owns its node tree; callers serialize access themselves
/// (`&mut` is required for mutation, no internal locking exists).
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes in the tree, indexed by NodeId.
    /// The Document node is always at index 0 (NodeId::ROOT).
    nodes: Vec<Node>,
    /// The element holding programmatic focus, if any.
    focused: Option<NodeId>,
}

impl Document {
    /// Create a new document with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        Document {
            nodes: vec![document],
            focused: None,
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes ever allocated, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (never true: the Document node is always present).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// "The createElement(localName) method steps are..."
    ///
    /// Allocates a detached element; the tag name is normalized to uppercase.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name)))
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    /// "The createTextNode(data) method steps are to return a new Text node..."
    pub fn create_text_node(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#dom-document-createcomment)
    /// "The createComment(data) method steps are to return a new Comment node..."
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    /// The numeric node type discriminant of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.node_type.kind())
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get comment data if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get an attribute value from an element node.
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.get_attribute(name))
    }

    /// Set an attribute on an element node. Non-elements are left untouched.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.as_element_mut(id) {
            element.set_attribute(name, value);
        }
    }

    /// Remove an attribute from an element node.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.as_element_mut(id) {
            element.remove_attribute(name);
        }
    }

    /// Whether an element node carries the attribute.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.as_element(id).is_some_and(|e| e.has_attribute(name))
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, every node kind mixed.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over the element children only, skipping text and comments.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.as_element(child).is_some())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Iterate over all descendants of a node in pre-order document order.
    /// The start node itself is not yielded.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        DescendantIterator { tree: self, stack }
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`, detaching it from any
    /// prior parent first.
    ///
    /// # Errors
    ///
    /// [`DomError::Hierarchy`] if the insertion would create a cycle, if
    /// `child` is the Document node, if `parent` cannot hold children, or if
    /// either ID is not a node of this document.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.validate_insertion(parent, child)?;
        self.detach(child);
        self.attach_last(parent, child);
        Ok(())
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// "To pre-insert a node into a parent before a child: ... If child is
    /// non-null and its parent is not parent, then throw a NotFoundError."
    ///
    /// Inserts `node` as a child of `parent`, immediately before `reference`.
    /// Inserting a node before itself is a validated no-op.
    ///
    /// # Errors
    ///
    /// [`DomError::Hierarchy`] under the same conditions as [`Self::append_child`];
    /// [`DomError::NotFound`] if `reference` is not currently a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        self.validate_insertion(parent, node)?;
        if self.parent(reference) != Some(parent) {
            return Err(DomError::NotFound);
        }
        if node == reference {
            return Ok(());
        }
        self.detach(node);
        // Position lookup happens after the detach: when `node` was an
        // earlier sibling, the reference index has shifted down by one.
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.attach_at(parent, node, index);
        Ok(())
    }

    /// [§ 4.2.2 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// "To remove a node, with an optional suppress observers flag..."
    ///
    /// Detaches `child` from `parent` and returns its ID; ownership of the
    /// subtree passes to the caller, who may re-attach it elsewhere or let it
    /// become unreachable.
    ///
    /// # Errors
    ///
    /// [`DomError::NotFound`] if `child` is not currently a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotFound);
        }
        self.detach(child);
        Ok(child)
    }

    /// [§ 4.2.3 Replace](https://dom.spec.whatwg.org/#concept-node-replace)
    ///
    /// "To replace a child with node within a parent..."
    ///
    /// Swaps `old_node` for `new_node` in place and returns the detached
    /// `old_node`. Replacing a node with itself is a validated no-op.
    ///
    /// # Errors
    ///
    /// [`DomError::Hierarchy`] under the same conditions as [`Self::append_child`];
    /// [`DomError::NotFound`] if `old_node` is not currently a child of `parent`.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_node: NodeId,
        old_node: NodeId,
    ) -> Result<NodeId, DomError> {
        self.validate_insertion(parent, new_node)?;
        if self.parent(old_node) != Some(parent) {
            return Err(DomError::NotFound);
        }
        if new_node == old_node {
            return Ok(old_node);
        }
        self.detach(new_node);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == old_node)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.detach(old_node);
        self.attach_at(parent, new_node, index);
        Ok(old_node)
    }

    /// Detach every child of `parent` in one pass and return their IDs in
    /// their former order. The children stay allocated and re-attachable.
    pub fn detach_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get_mut(parent.0) else {
            return Vec::new();
        };
        let detached = std::mem::take(&mut node.children);
        for &child in &detached {
            let child_node = &mut self.nodes[child.0];
            child_node.parent = None;
            child_node.next_sibling = None;
            child_node.prev_sibling = None;
        }
        detached
    }

    /// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#dom-node-clonenode)
    ///
    /// "The cloneNode(deep) method steps are... clone a node... with
    /// subtree set to deep."
    ///
    /// Produces a new, detached node identity with a copied attribute map.
    /// With `deep`, every descendant is cloned recursively; no node of the
    /// clone is identity-equal to any node of the source, and later mutation
    /// of either subtree never affects the other. Programmatic checked state
    /// is not carried over (only attributes are cloned).
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> NodeId {
        let mut node_type = self.nodes[id.0].node_type.clone();
        if let NodeType::Element(data) = &mut node_type {
            data.checked = None;
        }
        let clone = self.alloc(node_type);
        if deep {
            let source_children = self.nodes[id.0].children.clone();
            for child in source_children {
                let child_clone = self.clone_node(child, true);
                self.attach_last(clone, child_clone);
            }
        }
        clone
    }

    /// Deep-copy a subtree from another document's arena into this one,
    /// returning the detached root of the copy.
    ///
    /// This is the splice primitive behind fragment parsing: the fragment is
    /// built in its own scratch document and then imported node by node.
    pub fn import_subtree(&mut self, source: &Document, id: NodeId) -> NodeId {
        let mut node_type = source.nodes[id.0].node_type.clone();
        if let NodeType::Element(data) = &mut node_type {
            data.checked = None;
        }
        let imported = self.alloc(node_type);
        for &child in source.children(id) {
            let child_copy = self.import_subtree(source, child);
            self.attach_last(imported, child_copy);
        }
        imported
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "The textContent getter steps are... the descendant text content of
    /// this" for elements and documents, or the node's own data for text and
    /// comment nodes. Descendant text is concatenated in document order;
    /// comment data never leaks into an element's text content.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(data) | NodeType::Comment(data)) => data.clone(),
            Some(NodeType::Element(_) | NodeType::Document) => {
                let mut out = String::new();
                for descendant in self.descendants(id) {
                    if let Some(text) = self.as_text(descendant) {
                        out.push_str(text);
                    }
                }
                out
            }
            None => String::new(),
        }
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "Otherwise... set the value of the first argument..." The setter
    /// replaces all children of an element or document with exactly one Text
    /// node, and overwrites the data of a text or comment node directly.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        match self.get_mut(id).map(|n| &mut n.node_type) {
            Some(NodeType::Text(data) | NodeType::Comment(data)) => {
                text.clone_into(data);
            }
            Some(NodeType::Element(_) | NodeType::Document) => {
                let _ = self.detach_children(id);
                let text_node = self.create_text_node(text);
                self.attach_last(id, text_node);
            }
            None => {}
        }
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    ///
    /// In practice for HTML documents, this is the `<html>` element.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 4.2.5 The head element](https://html.spec.whatwg.org/multipage/dom.html#the-head-element-2)
    ///
    /// "The head element of a document is the first head element that is a
    /// child of the html element, if there is one, or null otherwise."
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| self.as_element(id).is_some_and(|e| e.tag_name == "HEAD"))
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's
    /// children that is either a body element or a frameset element, or null
    /// if there is no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| self.as_element(id).is_some_and(|e| e.tag_name == "BODY"))
            .copied()
    }

    /// [§ 3.2.2 The title element](https://html.spec.whatwg.org/multipage/dom.html#document.title)
    ///
    /// "The title attribute must, on getting, run the following algorithm...
    /// return the child text content of the title element..."
    ///
    /// Returns the empty string when the document has no `<title>`.
    #[must_use]
    pub fn title(&self) -> String {
        self.find_title_element()
            .map(|id| self.text_content(id))
            .unwrap_or_default()
    }

    /// [§ 3.2.2 The title element](https://html.spec.whatwg.org/multipage/dom.html#document.title)
    ///
    /// "On setting... If the title element is null... create an element...
    /// append it to the head element... set the child text content."
    ///
    /// Without a head to hold a new `<title>`, the call does nothing.
    pub fn set_title(&mut self, text: &str) {
        if let Some(title) = self.find_title_element() {
            self.set_text_content(title, text);
        } else if let Some(head) = self.head() {
            let title = self.create_element("title");
            self.attach_last(head, title);
            self.set_text_content(title, text);
        }
    }

    /// [§ 4.2.4 Interface NonElementParentNode](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// "The getElementById(elementId) method steps are to return the first
    /// element, in tree order, within this's descendants, whose ID is
    /// elementId; otherwise, if there is no such element, null."
    ///
    /// Duplicate IDs are not validated; the first match in document order
    /// wins. The empty string never matches.
    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        if element_id.is_empty() {
            return None;
        }
        self.descendants(NodeId::ROOT)
            .find(|&id| self.as_element(id).is_some_and(|e| e.id() == Some(element_id)))
    }

    /// The element holding programmatic focus, if any.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Give an element programmatic focus. Non-element IDs are ignored.
    pub fn set_focus(&mut self, id: NodeId) {
        if self.as_element(id).is_some() {
            self.focused = Some(id);
        }
    }

    /// Clear programmatic focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Set the programmatic checked state of an element node.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        if let Some(element) = self.as_element_mut(id) {
            element.set_checked(checked);
        }
    }

    fn find_title_element(&self) -> Option<NodeId> {
        self.descendants(NodeId::ROOT)
            .find(|&id| self.as_element(id).is_some_and(|e| e.tag_name == "TITLE"))
    }

    /// Checks every precondition of an insertion without touching the tree,
    /// so failed mutations leave no partially-applied state behind.
    fn validate_insertion(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_kind = self.kind(parent).ok_or(DomError::Hierarchy)?;
        let child_kind = self.kind(child).ok_or(DomError::Hierarchy)?;
        if !matches!(parent_kind, NodeKind::Document | NodeKind::Element) {
            return Err(DomError::Hierarchy);
        }
        if child_kind == NodeKind::Document {
            return Err(DomError::Hierarchy);
        }
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(DomError::Hierarchy);
        }
        Ok(())
    }

    /// Unlink a node from its parent and siblings. The node and its subtree
    /// stay allocated; only the upward and sideways links change.
    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0].parent else {
            return;
        };
        let prev = self.nodes[node.0].prev_sibling;
        let next = self.nodes[node.0].next_sibling;

        self.nodes[parent.0].children.retain(|&c| c != node);
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }

        let detached = &mut self.nodes[node.0];
        detached.parent = None;
        detached.prev_sibling = None;
        detached.next_sibling = None;
    }

    /// Append an already-detached node as the last child of `parent`,
    /// wiring the sibling links.
    fn attach_last(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Insert an already-detached node at `index` within `parent`'s children,
    /// wiring the sibling links on both sides.
    fn attach_at(&mut self, parent: NodeId, child: NodeId, index: usize) {
        let children = &self.nodes[parent.0].children;
        let prev = index.checked_sub(1).and_then(|i| children.get(i)).copied();
        let next = children.get(index).copied();

        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].prev_sibling = prev;
        self.nodes[child.0].next_sibling = next;

        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = Some(child);
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = Some(child);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}

/// Iterator over the descendants of a node in pre-order document order.
pub struct DescendantIterator<'a> {
    tree: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = self.tree.children(id);
        for &child in children.iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
