//! CSS selector parsing and matching
//!
//! This module implements the query subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/): compound
//! selectors evaluated against single elements, grouped into
//! comma-separated selector lists. Combinators are not supported — a
//! selector list compiles to an OR over compounds, and each compound to an
//! AND over its simple selectors.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use vellum_dom::{Document, ElementData, NodeId};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    /// Tag names compare ASCII case-insensitively.
    ///
    /// Examples: `div`, `p`, `dr-option`
    Tag(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    ///
    /// Examples: `#main`, `#nav-bar`
    Id(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.highlight`, `.btn`
    Class(String),

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    /// A condition on an element attribute's presence or value.
    ///
    /// Examples: `[href]`, `[type="text"]`, `[value^="a"]`
    Attribute(AttributeSelector),

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    /// A condition on element state beyond the attribute map.
    ///
    /// Examples: `:checked`, `:focus`, `:contains("text")`
    PseudoClass(PseudoClass),
}

/// Attribute selectors per [§ 6.4](https://www.w3.org/TR/selectors-4/#attribute-selectors).
///
/// Attribute names and values compare case-sensitively, matching the
/// case-preserving attribute store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// [§ 6.4] `[attr]` — "Represents an element with the att attribute."
    ///
    /// Example: `[disabled]` — matches any element carrying `disabled`
    Exists(String),

    /// [§ 6.4] `[attr=value]` — "Represents an element with the att
    /// attribute whose value is exactly 'val'."
    ///
    /// Example: `[type="text"]` — matches `<input type="text">`
    Equals(String, String),

    /// [§ 6.4] `[attr^=value]` — "Represents an element with the att
    /// attribute whose value begins with the prefix 'val'."
    ///
    /// Example: `[value^="a"]` — matches `<input value="admin">`
    PrefixMatch(String, String),

    /// [§ 6.4] `[attr$=value]` — "Represents an element with the att
    /// attribute whose value ends with the suffix 'val'."
    ///
    /// Example: `[value$="n"]` — matches `<input value="admin">`
    SuffixMatch(String, String),

    /// [§ 6.4] `[attr*=value]` — "Represents an element with the att
    /// attribute whose value contains at least one instance of the
    /// substring 'val'."
    ///
    /// Example: `[value*="admin"]` — matches `<input value="superadmin2">`
    SubstringMatch(String, String),
}

/// The supported pseudo-classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    /// [§ 13.2 :checked](https://www.w3.org/TR/selectors-4/#checked)
    /// "Radio and checkbox elements can be toggled by the user."
    ///
    /// Matches elements carrying a `checked` or `selected` attribute, or
    /// whose runtime checked state was set programmatically.
    Checked,

    /// [§ 9.4 :focus](https://www.w3.org/TR/selectors-4/#the-focus-pseudo)
    /// "The :focus pseudo-class applies while an element has the focus."
    ///
    /// Matches the element holding programmatic focus, or one carrying
    /// `autofocus` while nothing has received focus.
    Focus,

    /// `:contains("text")` — case-sensitive substring containment within
    /// the element's `textContent`. Inherited from the Selectors Level 3
    /// drafts; long dropped from the standard but kept here as the query
    /// API's text filter.
    Contains(String),
}

/// A compound selector: an implicit AND over simple selectors.
///
/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simple selectors that must all match.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// A selector list: an OR over compound selectors.
///
/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// "A selector list is a comma-separated list of selectors... An element
/// is said to match a selector list when the element matches any (at least
/// one) of the selectors in that selector list."
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorList {
    /// The compiled compounds; empty when the source was blank.
    pub compounds: Vec<CompoundSelector>,
}

/// A selector string that cannot be compiled.
///
/// Raised by [`parse_selector_list`] before any tree traversal begins;
/// a query with a malformed selector never touches the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorSyntaxError {
    /// An attribute selector was opened with `[` but never closed.
    #[error("unmatched '[' in attribute selector")]
    UnmatchedBracket,

    /// A `:contains(` argument was never closed with `)`.
    #[error("unmatched '(' in pseudo-class argument")]
    UnmatchedParenthesis,

    /// A quoted string ran to the end of the selector.
    #[error("unterminated string in selector")]
    UnterminatedString,

    /// A list item between commas was empty.
    #[error("empty selector in selector list")]
    EmptySelector,

    /// `#`, `.`, `:`, or `[` was not followed by an identifier.
    #[error("expected an identifier after '{0}'")]
    ExpectedIdentifier(char),

    /// A pseudo-class outside the supported set.
    #[error("unknown pseudo-class ':{0}'")]
    UnknownPseudoClass(String),

    /// `:contains` was written without its parenthesized argument.
    #[error("pseudo-class ':{0}' requires an argument")]
    MissingArgument(String),

    /// Whitespace inside a list item; descendant combinators are not
    /// part of the grammar.
    #[error("combinators are not supported")]
    UnsupportedCombinator,

    /// A character with no meaning at its position.
    #[error("unexpected character '{0}' in selector")]
    UnexpectedChar(char),
}

/// Check if a character can start an identifier.
/// [§ 4.3.10 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Check if a character can continue an identifier.
/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|&ch| ch.is_ascii_whitespace()) {
        let _ = chars.next();
    }
}

fn collect_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&ch) = chars.peek() {
        if !is_ident_char(ch) {
            break;
        }
        ident.push(ch);
        let _ = chars.next();
    }
    ident
}

/// Split a selector list on top-level commas.
///
/// Commas inside quoted strings, attribute brackets, or pseudo-class
/// arguments do not separate list items.
fn split_list_items(input: &str) -> Result<Vec<String>, SelectorSyntaxError> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0_usize;
    for c in input.chars() {
        match c {
            _ if quote.is_some() => {
                if Some(c) == quote {
                    quote = None;
                }
                current.push(c);
            }
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '[' | '(' => {
                depth += 1;
                current.push(c);
            }
            ']' | ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if quote.is_some() {
        return Err(SelectorSyntaxError::UnterminatedString);
    }
    items.push(current);
    Ok(items)
}

/// Parse an attribute value inside `[attr=value]`.
/// Handles quoted (`"val"`, `'val'`) and unquoted ident values.
fn parse_attr_value(chars: &mut Peekable<Chars<'_>>) -> Result<String, SelectorSyntaxError> {
    skip_whitespace(chars);
    match chars.peek() {
        Some(&q @ ('"' | '\'')) => {
            let _ = chars.next();
            let mut value = String::new();
            for ch in chars.by_ref() {
                if ch == q {
                    return Ok(value);
                }
                value.push(ch);
            }
            Err(SelectorSyntaxError::UnterminatedString)
        }
        Some(_) => {
            let mut value = String::new();
            while let Some(&ch) = chars.peek() {
                if !is_ident_char(ch) && ch != '.' {
                    break;
                }
                value.push(ch);
                let _ = chars.next();
            }
            if value.is_empty() {
                Err(SelectorSyntaxError::ExpectedIdentifier('='))
            } else {
                Ok(value)
            }
        }
        None => Err(SelectorSyntaxError::UnmatchedBracket),
    }
}

/// Parse an attribute selector; the position is just past `[`.
fn parse_attribute(
    chars: &mut Peekable<Chars<'_>>,
) -> Result<AttributeSelector, SelectorSyntaxError> {
    skip_whitespace(chars);
    let name = collect_ident(chars);
    if name.is_empty() {
        return Err(SelectorSyntaxError::ExpectedIdentifier('['));
    }
    skip_whitespace(chars);
    match chars.next() {
        // [§ 6.4] [attr] — presence
        Some(']') => Ok(AttributeSelector::Exists(name)),
        // [§ 6.4] [attr=value] — exact match
        Some('=') => {
            let value = parse_attr_value(chars)?;
            expect_close_bracket(chars)?;
            Ok(AttributeSelector::Equals(name, value))
        }
        // [§ 6.4] [attr^=], [attr$=], [attr*=]
        Some(op @ ('^' | '$' | '*')) => {
            if chars.next() != Some('=') {
                return Err(SelectorSyntaxError::UnexpectedChar(op));
            }
            let value = parse_attr_value(chars)?;
            expect_close_bracket(chars)?;
            Ok(match op {
                '^' => AttributeSelector::PrefixMatch(name, value),
                '$' => AttributeSelector::SuffixMatch(name, value),
                _ => AttributeSelector::SubstringMatch(name, value),
            })
        }
        Some(other) => Err(SelectorSyntaxError::UnexpectedChar(other)),
        None => Err(SelectorSyntaxError::UnmatchedBracket),
    }
}

fn expect_close_bracket(chars: &mut Peekable<Chars<'_>>) -> Result<(), SelectorSyntaxError> {
    skip_whitespace(chars);
    match chars.next() {
        Some(']') => Ok(()),
        Some(other) => Err(SelectorSyntaxError::UnexpectedChar(other)),
        None => Err(SelectorSyntaxError::UnmatchedBracket),
    }
}

/// Parse a pseudo-class; the position is just past `:`.
/// Pseudo-class names compare ASCII case-insensitively.
fn parse_pseudo_class(chars: &mut Peekable<Chars<'_>>) -> Result<PseudoClass, SelectorSyntaxError> {
    let name = collect_ident(chars);
    if name.is_empty() {
        return Err(SelectorSyntaxError::ExpectedIdentifier(':'));
    }
    match name.to_ascii_lowercase().as_str() {
        "checked" => Ok(PseudoClass::Checked),
        "focus" => Ok(PseudoClass::Focus),
        "contains" => {
            if chars.peek() != Some(&'(') {
                return Err(SelectorSyntaxError::MissingArgument(name));
            }
            let _ = chars.next();
            Ok(PseudoClass::Contains(parse_contains_argument(chars)?))
        }
        _ => Err(SelectorSyntaxError::UnknownPseudoClass(name)),
    }
}

/// Parse the argument of `:contains(...)`; the position is just past `(`.
/// The argument may be quoted (taken verbatim) or bare (trimmed).
fn parse_contains_argument(chars: &mut Peekable<Chars<'_>>) -> Result<String, SelectorSyntaxError> {
    skip_whitespace(chars);
    if let Some(&q @ ('"' | '\'')) = chars.peek() {
        let _ = chars.next();
        let mut text = String::new();
        let mut closed = false;
        for ch in chars.by_ref() {
            if ch == q {
                closed = true;
                break;
            }
            text.push(ch);
        }
        if !closed {
            return Err(SelectorSyntaxError::UnterminatedString);
        }
        skip_whitespace(chars);
        match chars.next() {
            Some(')') => Ok(text),
            Some(other) => Err(SelectorSyntaxError::UnexpectedChar(other)),
            None => Err(SelectorSyntaxError::UnmatchedParenthesis),
        }
    } else {
        let mut text = String::new();
        let mut closed = false;
        for ch in chars.by_ref() {
            if ch == ')' {
                closed = true;
                break;
            }
            text.push(ch);
        }
        if closed {
            Ok(text.trim().to_string())
        } else {
            Err(SelectorSyntaxError::UnmatchedParenthesis)
        }
    }
}

/// Parse one compound selector (one list item, already trimmed).
fn parse_compound(item: &str) -> Result<CompoundSelector, SelectorSyntaxError> {
    /// Flush the pending identifier as a type selector.
    fn flush_ident(ident: &mut String, simple_selectors: &mut Vec<SimpleSelector>) {
        if !ident.is_empty() {
            simple_selectors.push(SimpleSelector::Tag(std::mem::take(ident)));
        }
    }

    let mut simple_selectors = Vec::new();
    let mut ident = String::new();
    let mut chars = item.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
            // "An ID selector is a hash (#, U+0023) immediately followed by
            // the ID value."
            '#' => {
                flush_ident(&mut ident, &mut simple_selectors);
                let name = collect_ident(&mut chars);
                if name.is_empty() {
                    return Err(SelectorSyntaxError::ExpectedIdentifier('#'));
                }
                simple_selectors.push(SimpleSelector::Id(name));
            }

            // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
            // "The class selector is given as a full stop (. U+002E)
            // immediately followed by an identifier."
            '.' => {
                flush_ident(&mut ident, &mut simple_selectors);
                let name = collect_ident(&mut chars);
                if name.is_empty() {
                    return Err(SelectorSyntaxError::ExpectedIdentifier('.'));
                }
                simple_selectors.push(SimpleSelector::Class(name));
            }

            // [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
            '[' => {
                flush_ident(&mut ident, &mut simple_selectors);
                simple_selectors.push(SimpleSelector::Attribute(parse_attribute(&mut chars)?));
            }

            // [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
            ':' => {
                flush_ident(&mut ident, &mut simple_selectors);
                simple_selectors.push(SimpleSelector::PseudoClass(parse_pseudo_class(&mut chars)?));
            }

            // Interior whitespace would be a descendant combinator.
            c if c.is_ascii_whitespace() => {
                return Err(SelectorSyntaxError::UnsupportedCombinator);
            }

            // [§ 4.3.9-10 ident code points](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
            c if ident.is_empty() && (is_ident_start_char(c) || c == '-') => {
                ident.push(c);
            }
            c if !ident.is_empty() && is_ident_char(c) => {
                ident.push(c);
            }

            _ => return Err(SelectorSyntaxError::UnexpectedChar(c)),
        }
    }

    flush_ident(&mut ident, &mut simple_selectors);
    Ok(CompoundSelector { simple_selectors })
}

/// Compile a selector list.
///
/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// Whitespace around commas and at each list item's edges is trimmed
/// before compilation. A string that is empty after trimming compiles to
/// an empty list, which matches nothing.
///
/// # Errors
///
/// [`SelectorSyntaxError`] when any list item cannot be compiled; the
/// variants pinpoint unmatched brackets, unterminated strings, unknown
/// pseudo-classes, and unsupported combinator syntax.
pub fn parse_selector_list(raw: &str) -> Result<SelectorList, SelectorSyntaxError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(SelectorList::default());
    }
    let mut compounds = Vec::new();
    for item in split_list_items(trimmed)? {
        let item = item.trim();
        if item.is_empty() {
            return Err(SelectorSyntaxError::EmptySelector);
        }
        compounds.push(parse_compound(item)?);
    }
    Ok(SelectorList { compounds })
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, doc: &Document, id: NodeId, element: &ElementData) -> bool {
        match self {
            // [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
            // Tag names compare ASCII case-insensitively against the
            // uppercase `tagName` store.
            Self::Tag(name) => element.tag_name.eq_ignore_ascii_case(name),

            // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
            Self::Id(id_value) => element.id() == Some(id_value.as_str()),

            // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
            Self::Class(class_name) => element.classes().contains(class_name.as_str()),

            Self::Attribute(attribute) => attribute.matches(element),

            Self::PseudoClass(pseudo) => pseudo.matches(doc, id, element),
        }
    }
}

impl AttributeSelector {
    /// Check if this attribute condition holds for the given element.
    /// Names and values compare case-sensitively.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Exists(name) => element.attrs.contains_key(name.as_str()),
            Self::Equals(name, value) => {
                element.attrs.get(name.as_str()).is_some_and(|v| v == value)
            }
            Self::PrefixMatch(name, value) => element
                .attrs
                .get(name.as_str())
                .is_some_and(|v| v.starts_with(value.as_str())),
            Self::SuffixMatch(name, value) => element
                .attrs
                .get(name.as_str())
                .is_some_and(|v| v.ends_with(value.as_str())),
            Self::SubstringMatch(name, value) => element
                .attrs
                .get(name.as_str())
                .is_some_and(|v| v.contains(value.as_str())),
        }
    }
}

impl PseudoClass {
    /// Check if this pseudo-class holds for the given element.
    #[must_use]
    pub fn matches(&self, doc: &Document, id: NodeId, element: &ElementData) -> bool {
        match self {
            // Attribute-declared or programmatically set checked state.
            Self::Checked => element.is_checked(),

            // Programmatic focus wins; `autofocus` stands in only while
            // nothing holds focus.
            Self::Focus => match doc.focused() {
                Some(focused) => focused == id,
                None => element.attrs.contains_key("autofocus"),
            },

            // Case-sensitive substring of the subtree's text content.
            Self::Contains(text) => doc.text_content(id).contains(text.as_str()),
        }
    }
}

impl CompoundSelector {
    /// Check if every simple selector in this compound matches the node.
    /// Non-element nodes never match.
    #[must_use]
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(element) = doc.as_element(id) else {
            return false;
        };
        self.simple_selectors
            .iter()
            .all(|simple| simple.matches(doc, id, element))
    }
}

impl SelectorList {
    /// Check if any compound in this list matches the node.
    ///
    /// "An element is said to match a selector list when the element
    /// matches any (at least one) of the selectors in that selector list."
    #[must_use]
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        self.compounds.iter().any(|compound| compound.matches(doc, id))
    }
}

/// [§ 4.2.6 Mixin ParentNode: querySelector](https://dom.spec.whatwg.org/#dom-parentnode-queryselector)
///
/// "Return the first result of running scope-match a selectors string
/// selectors against this, if the result is not an empty list; otherwise
/// null."
///
/// The subtree below `context` is searched in pre-order document order;
/// the context node itself is never a candidate.
///
/// # Errors
///
/// [`SelectorSyntaxError`] when the selector string cannot be compiled.
/// The error is raised before any traversal begins.
pub fn query_selector(
    doc: &Document,
    context: NodeId,
    selectors: &str,
) -> Result<Option<NodeId>, SelectorSyntaxError> {
    let list = parse_selector_list(selectors)?;
    Ok(doc.descendants(context).find(|&id| list.matches(doc, id)))
}

/// [§ 4.2.6 Mixin ParentNode: querySelectorAll](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
///
/// "Return the static result of running scope-match a selectors string
/// selectors against this."
///
/// The returned list is an independent snapshot in document order; later
/// tree mutations do not update it.
///
/// # Errors
///
/// [`SelectorSyntaxError`] when the selector string cannot be compiled.
/// The error is raised before any traversal begins.
pub fn query_selector_all(
    doc: &Document,
    context: NodeId,
    selectors: &str,
) -> Result<Vec<NodeId>, SelectorSyntaxError> {
    let list = parse_selector_list(selectors)?;
    Ok(doc
        .descendants(context)
        .filter(|&id| list.matches(doc, id))
        .collect())
}

/// [§ 4.9 Interface Element: matches](https://dom.spec.whatwg.org/#dom-element-matches)
///
/// "Return true if the result of match a selectors string against this is
/// success; otherwise false."
///
/// # Errors
///
/// [`SelectorSyntaxError`] when the selector string cannot be compiled.
pub fn matches(doc: &Document, id: NodeId, selectors: &str) -> Result<bool, SelectorSyntaxError> {
    let list = parse_selector_list(selectors)?;
    Ok(list.matches(doc, id))
}
