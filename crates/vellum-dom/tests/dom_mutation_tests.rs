//! Tests for DOM tree mutation methods: append_child, insert_before,
//! remove_child, replace_child, and their error contracts.

use vellum_dom::{Document, DomError, NodeId};

/// Helper to create an element node and return its NodeId.
fn alloc_element(doc: &mut Document, tag: &str) -> NodeId {
    doc.create_element(tag)
}

// ========== append_child ==========

#[test]
fn test_append_child_builds_sibling_links() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    doc.append_child(parent, a).unwrap();
    doc.append_child(parent, b).unwrap();

    assert_eq!(doc.children(parent), &[a, b]);
    assert_eq!(doc.parent(a), Some(parent));
    assert_eq!(doc.next_sibling(a), Some(b));
    assert_eq!(doc.prev_sibling(b), Some(a));
    assert_eq!(doc.prev_sibling(a), None);
    assert_eq!(doc.next_sibling(b), None);
}

#[test]
fn test_append_child_detaches_from_prior_parent() {
    let mut doc = Document::new();
    let first = alloc_element(&mut doc, "div");
    let second = alloc_element(&mut doc, "section");
    doc.append_child(NodeId::ROOT, first).unwrap();
    doc.append_child(NodeId::ROOT, second).unwrap();

    let child = alloc_element(&mut doc, "p");
    doc.append_child(first, child).unwrap();
    doc.append_child(second, child).unwrap();

    assert_eq!(doc.children(first).len(), 0);
    assert_eq!(doc.children(second), &[child]);
    assert_eq!(doc.parent(child), Some(second));
}

#[test]
fn test_append_child_to_own_descendant_is_rejected() {
    let mut doc = Document::new();
    let outer = alloc_element(&mut doc, "div");
    let inner = alloc_element(&mut doc, "span");
    doc.append_child(NodeId::ROOT, outer).unwrap();
    doc.append_child(outer, inner).unwrap();

    assert_eq!(doc.append_child(inner, outer), Err(DomError::Hierarchy));
    assert_eq!(doc.append_child(outer, outer), Err(DomError::Hierarchy));

    // Tree unmodified after the failed calls.
    assert_eq!(doc.children(outer), &[inner]);
    assert_eq!(doc.parent(outer), Some(NodeId::ROOT));
}

#[test]
fn test_append_document_node_is_rejected() {
    let mut doc = Document::new();
    let div = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, div).unwrap();

    assert_eq!(doc.append_child(div, NodeId::ROOT), Err(DomError::Hierarchy));
}

#[test]
fn test_text_node_cannot_hold_children() {
    let mut doc = Document::new();
    let text = doc.create_text_node("hello");
    doc.append_child(NodeId::ROOT, text).unwrap();

    let div = alloc_element(&mut doc, "div");
    assert_eq!(doc.append_child(text, div), Err(DomError::Hierarchy));
    assert_eq!(doc.children(text).len(), 0);
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let existing = alloc_element(&mut doc, "b");
    doc.append_child(parent, existing).unwrap();

    let new_child = alloc_element(&mut doc, "a");
    doc.insert_before(parent, new_child, existing).unwrap();

    // new_child should be first, existing second
    assert_eq!(doc.children(parent), &[new_child, existing]);
    assert_eq!(doc.parent(new_child), Some(parent));
    assert_eq!(doc.next_sibling(new_child), Some(existing));
    assert_eq!(doc.prev_sibling(new_child), None);
    assert_eq!(doc.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let a = alloc_element(&mut doc, "a");
    let c = alloc_element(&mut doc, "c");
    doc.append_child(parent, a).unwrap();
    doc.append_child(parent, c).unwrap();

    let b = alloc_element(&mut doc, "b");
    doc.insert_before(parent, b, c).unwrap();

    assert_eq!(doc.children(parent), &[a, b, c]);
    assert_eq!(doc.next_sibling(a), Some(b));
    assert_eq!(doc.prev_sibling(b), Some(a));
    assert_eq!(doc.next_sibling(b), Some(c));
    assert_eq!(doc.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_before_moves_earlier_sibling() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    let c = alloc_element(&mut doc, "c");
    doc.append_child(parent, a).unwrap();
    doc.append_child(parent, b).unwrap();
    doc.append_child(parent, c).unwrap();

    // Move a from the front to just before c.
    doc.insert_before(parent, a, c).unwrap();

    assert_eq!(doc.children(parent), &[b, a, c]);
    assert_eq!(doc.prev_sibling(b), None);
    assert_eq!(doc.next_sibling(b), Some(a));
    assert_eq!(doc.prev_sibling(a), Some(b));
    assert_eq!(doc.next_sibling(a), Some(c));
}

#[test]
fn test_insert_before_itself_is_a_no_op() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    doc.append_child(parent, a).unwrap();
    doc.append_child(parent, b).unwrap();

    doc.insert_before(parent, a, a).unwrap();

    assert_eq!(doc.children(parent), &[a, b]);
}

#[test]
fn test_insert_before_unrelated_reference_is_not_found() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    let other = alloc_element(&mut doc, "section");
    doc.append_child(NodeId::ROOT, parent).unwrap();
    doc.append_child(NodeId::ROOT, other).unwrap();

    let stranger = alloc_element(&mut doc, "b");
    doc.append_child(other, stranger).unwrap();

    let node = alloc_element(&mut doc, "a");
    assert_eq!(
        doc.insert_before(parent, node, stranger),
        Err(DomError::NotFound)
    );
    assert_eq!(doc.children(parent).len(), 0);
    assert_eq!(doc.parent(node), None);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let child = alloc_element(&mut doc, "p");
    doc.append_child(parent, child).unwrap();

    assert_eq!(doc.children(parent).len(), 1);

    let removed = doc.remove_child(parent, child).unwrap();

    assert_eq!(removed, child);
    assert_eq!(doc.children(parent).len(), 0);
    assert_eq!(doc.parent(child), None);
    assert_eq!(doc.prev_sibling(child), None);
    assert_eq!(doc.next_sibling(child), None);
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    let c = alloc_element(&mut doc, "c");
    doc.append_child(parent, a).unwrap();
    doc.append_child(parent, b).unwrap();
    doc.append_child(parent, c).unwrap();

    let _ = doc.remove_child(parent, b).unwrap();

    // a and c are siblings now
    assert_eq!(doc.children(parent), &[a, c]);
    assert_eq!(doc.next_sibling(a), Some(c));
    assert_eq!(doc.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_not_a_child_is_not_found() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    let other = alloc_element(&mut doc, "section");
    doc.append_child(NodeId::ROOT, parent).unwrap();
    doc.append_child(NodeId::ROOT, other).unwrap();

    assert_eq!(doc.remove_child(parent, other), Err(DomError::NotFound));
    assert_eq!(doc.parent(other), Some(NodeId::ROOT));
}

#[test]
fn test_removed_node_can_be_reattached() {
    let mut doc = Document::new();
    let first = alloc_element(&mut doc, "div");
    let second = alloc_element(&mut doc, "section");
    doc.append_child(NodeId::ROOT, first).unwrap();
    doc.append_child(NodeId::ROOT, second).unwrap();

    let child = alloc_element(&mut doc, "p");
    doc.append_child(first, child).unwrap();

    let detached = doc.remove_child(first, child).unwrap();
    assert_eq!(doc.parent(detached), None);

    doc.append_child(second, detached).unwrap();
    assert_eq!(doc.children(second), &[detached]);
    assert_eq!(doc.parent(detached), Some(second));
}

// ========== replace_child ==========

#[test]
fn test_replace_child_keeps_position_and_links() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    let c = alloc_element(&mut doc, "c");
    doc.append_child(parent, a).unwrap();
    doc.append_child(parent, b).unwrap();
    doc.append_child(parent, c).unwrap();

    let replacement = alloc_element(&mut doc, "x");
    let old = doc.replace_child(parent, replacement, b).unwrap();

    assert_eq!(old, b);
    assert_eq!(doc.children(parent), &[a, replacement, c]);
    assert_eq!(doc.next_sibling(a), Some(replacement));
    assert_eq!(doc.prev_sibling(replacement), Some(a));
    assert_eq!(doc.next_sibling(replacement), Some(c));
    assert_eq!(doc.prev_sibling(c), Some(replacement));
    assert_eq!(doc.parent(b), None);
    assert_eq!(doc.next_sibling(b), None);
}

#[test]
fn test_replace_child_with_itself_is_a_no_op() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let a = alloc_element(&mut doc, "a");
    doc.append_child(parent, a).unwrap();

    let old = doc.replace_child(parent, a, a).unwrap();
    assert_eq!(old, a);
    assert_eq!(doc.children(parent), &[a]);
    assert_eq!(doc.parent(a), Some(parent));
}

#[test]
fn test_replace_child_cycle_is_rejected() {
    let mut doc = Document::new();
    let outer = alloc_element(&mut doc, "div");
    let inner = alloc_element(&mut doc, "span");
    doc.append_child(NodeId::ROOT, outer).unwrap();
    doc.append_child(outer, inner).unwrap();

    // Replacing inner with its own ancestor would make outer its own descendant.
    assert_eq!(
        doc.replace_child(outer, outer, inner),
        Err(DomError::Hierarchy)
    );
    assert_eq!(doc.children(outer), &[inner]);
}

#[test]
fn test_replace_child_missing_old_node_is_not_found() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let unrelated = alloc_element(&mut doc, "b");
    let replacement = alloc_element(&mut doc, "x");

    assert_eq!(
        doc.replace_child(parent, replacement, unrelated),
        Err(DomError::NotFound)
    );
    assert_eq!(doc.children(parent).len(), 0);
}

// ========== mixed child kinds ==========

#[test]
fn test_untouched_comment_and_text_siblings_keep_order() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let leading = doc.create_comment("lead");
    let target = alloc_element(&mut doc, "span");
    let middle = doc.create_text_node("middle");
    let trailing = doc.create_comment("trail");
    doc.append_child(parent, leading).unwrap();
    doc.append_child(parent, target).unwrap();
    doc.append_child(parent, middle).unwrap();
    doc.append_child(parent, trailing).unwrap();

    let _ = doc.remove_child(parent, target).unwrap();

    assert_eq!(doc.children(parent), &[leading, middle, trailing]);
    assert_eq!(doc.next_sibling(leading), Some(middle));
    assert_eq!(doc.next_sibling(middle), Some(trailing));
}

#[test]
fn test_detach_children_clears_all_links() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    doc.append_child(NodeId::ROOT, parent).unwrap();

    let a = alloc_element(&mut doc, "a");
    let text = doc.create_text_node("x");
    doc.append_child(parent, a).unwrap();
    doc.append_child(parent, text).unwrap();

    let detached = doc.detach_children(parent);

    assert_eq!(detached, vec![a, text]);
    assert_eq!(doc.children(parent).len(), 0);
    assert_eq!(doc.parent(a), None);
    assert_eq!(doc.parent(text), None);
    assert_eq!(doc.next_sibling(a), None);
    assert_eq!(doc.prev_sibling(text), None);
}
