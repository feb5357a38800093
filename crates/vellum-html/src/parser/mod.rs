//! HTML parsing and tree construction.

/// Tree builder implementation.
pub mod core;

pub use self::core::{
    InsertionMode, ParseIssue, TreeBuilder, parse_document, parse_fragment, set_inner_html,
};
