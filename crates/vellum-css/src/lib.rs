//! CSS selector compilation and matching for the Vellum document model.
//!
//! # Scope
//!
//! This crate implements the query subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/):
//! - Type, class, and ID selectors
//! - Attribute selectors: `[attr]`, `[attr=v]`, `[attr^=v]`, `[attr$=v]`, `[attr*=v]`
//! - Pseudo-classes: `:checked`, `:focus`, `:contains("text")`
//! - Compound selectors (implicit AND) and selector lists (comma, OR)
//! - `querySelector` / `querySelectorAll` evaluation in document order
//!
//! # Not Implemented
//!
//! - Combinators (descendant, child, sibling) — a compound selector always
//!   constrains a single element
//! - The universal selector, `:not()`, `:nth-child()`, and the wider
//!   structural pseudo-class family
//! - Specificity and the cascade — matching is boolean, there is no
//!   style system behind it

/// Selector parsing and matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;

pub use selector::{
    AttributeSelector, CompoundSelector, PseudoClass, SelectorList, SelectorSyntaxError,
    SimpleSelector, matches, parse_selector_list, query_selector, query_selector_all,
};
