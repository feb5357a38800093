use strum_macros::Display;

use vellum_common::warning::warn_once;

use vellum_dom::{AttributesMap, Document, DomError, ElementData, NodeId, NodeKind, NodeType};

use crate::tokenizer::{Attribute, Token, Tokenizer, is_void_element};

/// Tags that live inside `<head>`.
const HEAD_RESIDENT: [&str; 7] = [
    "title", "meta", "link", "base", "style", "script", "noscript",
];

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
///
/// This builder collapses the spec's mode set down to three: `BeforeHtml`
/// covers everything before the `html` element exists, `InHead` covers the
/// span from `html` until the body opens, and `InBody` everything after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
}

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// A recovered parse error. "The handling of parse errors is well-defined" —
/// every issue here was recovered from and parsing continued.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// Description of what was recovered from.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Consumes the token stream and builds a [`Document`]. The output always
/// holds exactly one `html` element containing exactly one `head` and one
/// `body`, synthesized when the input omits them.
pub struct TreeBuilder {
    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    insertion_mode: InsertionMode,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena. The current insertion point is the
    /// topmost entry.
    open_elements: Vec<NodeId>,

    /// The singleton `html` element, once created.
    html_element: Option<NodeId>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    head_element: Option<NodeId>,

    /// The singleton `body` element, once created.
    body_element: Option<NodeId>,

    /// The document under construction. `NodeId::ROOT` is the Document node.
    doc: Document,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in the token stream.
    token_index: usize,

    /// Recovered parse issues encountered during building.
    issues: Vec<ParseIssue>,
}

impl TreeBuilder {
    /// Create a builder for a full document parse.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            insertion_mode: InsertionMode::BeforeHtml,
            open_elements: Vec::new(),
            html_element: None,
            head_element: None,
            body_element: None,
            doc: Document::new(),
            tokens,
            token_index: 0,
            issues: Vec::new(),
        }
    }

    /// Create a builder for a content-fragment parse (the `innerHTML`
    /// engine).
    ///
    /// The html/head/body envelope is pre-synthesized and the builder starts
    /// directly in [`InsertionMode::InBody`], so head-resident tags in the
    /// fragment stay where they were written. The fragment's content is the
    /// synthesized body's child list.
    #[must_use]
    pub fn new_fragment(tokens: Vec<Token>) -> Self {
        let mut builder = Self::new(tokens);
        let html = builder.doc.create_element("html");
        let head = builder.doc.create_element("head");
        let body = builder.doc.create_element("body");
        let _ = builder.doc.append_child(NodeId::ROOT, html);
        let _ = builder.doc.append_child(html, head);
        let _ = builder.doc.append_child(html, body);
        builder.html_element = Some(html);
        builder.head_element = Some(head);
        builder.body_element = Some(body);
        builder.open_elements.push(html);
        builder.open_elements.push(body);
        builder.insertion_mode = InsertionMode::InBody;
        builder
    }

    /// Run the builder and return the document.
    #[must_use]
    pub fn run(self) -> Document {
        self.run_with_issues().0
    }

    /// Run the builder and return both the document and any recovered parse
    /// issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (Document, Vec<ParseIssue>) {
        while self.token_index < self.tokens.len() {
            let token = self.tokens[self.token_index].clone();
            self.process_token(&token);
            self.token_index += 1;
        }
        self.finish();
        let issues = std::mem::take(&mut self.issues);
        (self.doc, issues)
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    fn process_token(&mut self, token: &Token) {
        match self.insertion_mode {
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
        }
    }

    /// "Reprocess the token" — process the same token again after an
    /// insertion mode switch.
    fn reprocess_token(&mut self, token: &Token) {
        self.process_token(token);
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    fn current_node(&self) -> Option<NodeId> {
        self.open_elements.last().copied()
    }

    /// Whether the head element exists and is still on the open stack.
    fn head_is_open(&self) -> bool {
        self.head_element
            .is_some_and(|head| self.open_elements.contains(&head))
    }

    /// Record a recovered parse issue, logging it through the warn-once
    /// channel with the current insertion mode.
    fn parse_warning(&mut self, message: &str) {
        let mode = self.insertion_mode;
        warn_once("HTML Parser", &format!("{mode}: {message}"));
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index: self.token_index,
        });
    }

    /// Convert token attributes to the `AttributesMap` used by `ElementData`.
    /// The tokenizer already dropped duplicate names, so insertion order is
    /// the written order.
    fn attributes_to_map(attributes: &[Attribute]) -> AttributesMap {
        attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect()
    }

    /// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// "Create an element for a token." Allocates into the arena without
    /// attaching it; attribute values arrive already entity-decoded.
    fn create_element(&mut self, tag_name: &str, attributes: &[Attribute]) -> NodeId {
        let mut data = ElementData::new(tag_name);
        data.attrs = Self::attributes_to_map(attributes);
        self.doc.alloc(NodeType::Element(data))
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// Insert an element for a start tag token at the current insertion
    /// point. Void and self-closing tags never open an insertion frame.
    ///
    /// # Panics
    ///
    /// Panics if called with a non-`StartTag` token, indicating a builder bug.
    fn insert_element_for(&mut self, token: &Token) -> NodeId {
        if let Token::StartTag {
            name,
            self_closing,
            attributes,
        } = token
        {
            let element = self.create_element(name, attributes);
            let parent = self.current_node().unwrap_or(NodeId::ROOT);
            let _ = self.doc.append_child(parent, element);
            if !*self_closing && !is_void_element(name) {
                self.open_elements.push(element);
            }
            element
        } else {
            panic!("insert_element_for called with non-StartTag token");
        }
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data." Otherwise a new
    /// Text node is created.
    fn insert_text(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        let parent = self.current_node().unwrap_or(NodeId::ROOT);
        if let Some(last) = self.doc.last_child(parent)
            && let Some(node) = self.doc.get_mut(last)
            && let NodeType::Text(existing) = &mut node.node_type
        {
            existing.push_str(data);
            return;
        }
        let text = self.doc.create_text_node(data);
        let _ = self.doc.append_child(parent, text);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    fn insert_comment(&mut self, data: &str) {
        let parent = self.current_node().unwrap_or(NodeId::ROOT);
        let comment = self.doc.create_comment(data);
        let _ = self.doc.append_child(parent, comment);
    }

    /// Insert a comment as the last child of the Document node. Used for
    /// comments that appear before `<html>`.
    fn insert_comment_to_document(&mut self, data: &str) {
        let comment = self.doc.create_comment(data);
        let _ = self.doc.append_child(NodeId::ROOT, comment);
    }

    /// Whether the open element holds the given (lowercase) tag name.
    fn tag_matches(&self, id: NodeId, name: &str) -> bool {
        self.doc
            .as_element(id)
            .is_some_and(|data| data.tag_name.eq_ignore_ascii_case(name))
    }

    /// The number of leading stack entries that are the html/head/body
    /// singletons. Frames at or below this depth are never closed by
    /// generic end-tag matching.
    fn protected_depth(&self) -> usize {
        self.open_elements
            .iter()
            .take_while(|&&id| {
                Some(id) == self.html_element
                    || Some(id) == self.head_element
                    || Some(id) == self.body_element
            })
            .count()
    }

    /// Generic end-tag handling: find the nearest open frame with a matching
    /// tag name and implicitly close every frame above it, and it. Returns
    /// false when no frame matches (the token is then ignored).
    fn close_matching_frame(&mut self, name: &str) -> bool {
        let floor = self.protected_depth();
        let matched = self.open_elements[floor..]
            .iter()
            .rposition(|&id| self.tag_matches(id, name));
        if let Some(offset) = matched {
            self.open_elements.truncate(floor + offset);
            true
        } else {
            false
        }
    }

    /// Open the head element under `html` and make it the insertion point.
    fn open_head(&mut self, attributes: &[Attribute]) {
        let head = self.create_element("head", attributes);
        let parent = self.current_node().unwrap_or(NodeId::ROOT);
        let _ = self.doc.append_child(parent, head);
        self.open_elements.push(head);
        self.head_element = Some(head);
    }

    /// Close the head frame (and anything open inside it), if open.
    fn close_head(&mut self) {
        if let Some(head) = self.head_element
            && let Some(pos) = self.open_elements.iter().position(|&id| id == head)
        {
            self.open_elements.truncate(pos);
        }
    }

    /// Close the head if open, open the body element, and switch to
    /// [`InsertionMode::InBody`].
    fn open_body(&mut self, attributes: &[Attribute]) {
        self.close_head();
        let body = self.create_element("body", attributes);
        let parent = self.current_node().unwrap_or(NodeId::ROOT);
        let _ = self.doc.append_child(parent, body);
        self.open_elements.push(body);
        self.body_element = Some(body);
        self.insertion_mode = InsertionMode::InBody;
    }

    /// Pop every frame above the body; the body itself stays the insertion
    /// point for any trailing tokens.
    fn pop_to_body(&mut self) {
        if let Some(body) = self.body_element
            && let Some(pos) = self.open_elements.iter().position(|&id| id == body)
        {
            self.open_elements.truncate(pos + 1);
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // A doctype token is consumed without producing a node.
            Token::Doctype { .. } => {}

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                self.insert_comment_to_document(data);
            }

            // Whitespace-only character data before <html> is dropped.
            Token::Text { data } if data.chars().all(Self::is_whitespace) => {}

            // "A start tag whose tag name is "html""
            // "Create an element for the token... Append it to the Document
            // object. Put this element in the stack of open elements."
            Token::StartTag {
                name, attributes, ..
            } if name == "html" => {
                let html = self.create_element("html", attributes);
                let _ = self.doc.append_child(NodeId::ROOT, html);
                self.open_elements.push(html);
                self.html_element = Some(html);
                self.insertion_mode = InsertionMode::InHead;
            }

            // An end tag before any frame is open has nothing to match.
            Token::EndTag { .. } => {}

            // "Anything else"
            _ => {
                self.handle_before_html_anything_else(token);
            }
        }
    }

    /// "Anything else":
    /// "Create an html element whose node document is the Document object.
    /// Append it to the Document object. Put this element in the stack of
    /// open elements... then reprocess the token."
    fn handle_before_html_anything_else(&mut self, token: &Token) {
        let html = self.create_element("html", &[]);
        let _ = self.doc.append_child(NodeId::ROOT, html);
        self.open_elements.push(html);
        self.html_element = Some(html);
        self.insertion_mode = InsertionMode::InHead;
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    ///
    /// Covers the span between `<html>` and the opening of the body,
    /// synthesizing the head on demand.
    fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token" — "Parse error. Ignore the token."
            Token::Doctype { .. } => {}

            // "A comment token" — "Insert a comment."
            Token::Comment { data } => {
                self.insert_comment(data);
            }

            Token::Text { data } => {
                let only_whitespace = data.chars().all(Self::is_whitespace);
                if self.head_is_open()
                    && (self.current_node() != self.head_element || only_whitespace)
                {
                    // Whitespace directly in the head is preserved; any text
                    // in a deeper open frame (<title> text) is content.
                    self.insert_text(data);
                } else if !only_whitespace {
                    self.handle_in_head_anything_else(token);
                }
                // Whitespace outside an open head is dropped.
            }

            // The html element already exists; the repeat is ignored.
            Token::StartTag { name, .. } if name == "html" => {
                self.parse_warning("duplicate <html> start tag ignored");
            }

            Token::StartTag {
                name, attributes, ..
            } if name == "head" => {
                if self.head_element.is_none() {
                    self.open_head(attributes);
                } else {
                    self.parse_warning("duplicate <head> start tag ignored");
                }
            }

            Token::StartTag {
                name, attributes, ..
            } if name == "body" => {
                self.open_body(attributes);
            }

            // Head-resident tags go into the head, synthesizing it on
            // demand. Once the head has been closed they fall through to
            // the body instead.
            Token::StartTag { name, .. } if HEAD_RESIDENT.contains(&name.as_str()) => {
                if self.head_element.is_none() {
                    self.open_head(&[]);
                }
                if self.head_is_open() {
                    let _ = self.insert_element_for(token);
                } else {
                    self.handle_in_head_anything_else(token);
                }
            }

            // "An end tag whose tag name is "head""
            Token::EndTag { name } if name == "head" => {
                self.close_head();
            }

            // No body frame exists yet, so there is nothing to close.
            Token::EndTag { name } if name == "html" || name == "body" => {}

            // Generic end tags close frames open inside the head (</title>).
            Token::EndTag { name } => {
                if !self.close_matching_frame(name) {
                    self.parse_warning(&format!("ignored unmatched end tag </{name}>"));
                }
            }

            // "Anything else" — body content starts here.
            _ => {
                self.handle_in_head_anything_else(token);
            }
        }
    }

    /// "Anything else": close the head, open the body, and reprocess.
    fn handle_in_head_anything_else(&mut self, token: &Token) {
        self.open_body(&[]);
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token" — "Parse error. Ignore the token."
            Token::Doctype { .. } => {}

            // "A comment token" — "Insert a comment."
            Token::Comment { data } => {
                self.insert_comment(data);
            }

            Token::Text { data } => {
                self.insert_text(data);
            }

            // The singletons already exist; repeats are ignored.
            Token::StartTag { name, .. }
                if matches!(name.as_str(), "html" | "head" | "body") =>
            {
                self.parse_warning(&format!("duplicate <{name}> start tag ignored"));
            }

            // "Any other start tag" — "Insert an HTML element for the token."
            Token::StartTag { .. } => {
                let _ = self.insert_element_for(token);
            }

            // "An end tag whose tag name is "body"" / ""html"" — everything
            // above the body closes, but the body remains the insertion
            // point for trailing tokens.
            Token::EndTag { name } if name == "body" || name == "html" => {
                self.pop_to_body();
            }

            // "Any other end tag": close up to and including the nearest
            // matching frame, or ignore the token when nothing matches.
            Token::EndTag { name } => {
                if !self.close_matching_frame(name) {
                    self.parse_warning(&format!("ignored unmatched end tag </{name}>"));
                }
            }
        }
    }

    /// End of input: close all open frames and synthesize any of
    /// html/head/body still missing, so the three-singleton guarantee holds
    /// for every input including the empty string.
    fn finish(&mut self) {
        self.open_elements.clear();

        let html = if let Some(id) = self.doc.document_element() {
            id
        } else {
            let id = self.doc.create_element("html");
            let _ = self.doc.append_child(NodeId::ROOT, id);
            id
        };

        if self.doc.head().is_none() {
            let head = self.doc.create_element("head");
            if let Some(first) = self.doc.first_child(html) {
                let _ = self.doc.insert_before(html, head, first);
            } else {
                let _ = self.doc.append_child(html, head);
            }
        }

        if self.doc.body().is_none() {
            let body = self.doc.create_element("body");
            let _ = self.doc.append_child(html, body);
        }
    }
}

/// Parse markup into a complete document.
///
/// Parsing is deliberately permissive: it never fails, and the resulting
/// document always has exactly one `html`, one `head`, and one `body`.
#[must_use]
pub fn parse_document(html: &str) -> Document {
    let tokens = Tokenizer::new(html).run();
    TreeBuilder::new(tokens).run()
}

/// Parse markup as a content fragment.
///
/// The returned document's body holds the fragment's nodes; head-resident
/// tags written in the fragment stay in the fragment content rather than
/// moving to the head.
#[must_use]
pub fn parse_fragment(html: &str) -> Document {
    let tokens = Tokenizer::new(html).run();
    TreeBuilder::new_fragment(tokens).run()
}

/// Replace `target`'s children with the result of a fragment parse — the
/// `innerHTML` setter.
///
/// The previous children are detached, not destroyed; they remain
/// re-attachable. The new markup runs through the same tokenizer and tree
/// builder as a full parse and the resulting nodes are imported into
/// `target`'s arena.
///
/// # Errors
///
/// Returns [`DomError::NotFound`] when `target` is not in the document and
/// [`DomError::Hierarchy`] when it is a Text or Comment node (which cannot
/// hold children).
pub fn set_inner_html(doc: &mut Document, target: NodeId, html: &str) -> Result<(), DomError> {
    match doc.kind(target) {
        None => return Err(DomError::NotFound),
        Some(NodeKind::Text | NodeKind::Comment) => return Err(DomError::Hierarchy),
        Some(NodeKind::Element | NodeKind::Document) => {}
    }
    let fragment = parse_fragment(html);
    let _ = doc.detach_children(target);
    if let Some(body) = fragment.body() {
        for &child in fragment.children(body) {
            let imported = doc.import_subtree(&fragment, child);
            doc.append_child(target, imported)?;
        }
    }
    Ok(())
}
