//! Top-level document API for the Vellum HTML engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Parse entry points** - [`parse`] and [`parse_with_options`] wrap a
//!   parsed document in a [`Window`] shell with its `location`
//! - **Debug display** - an indented tree dump for terminal inspection
//! - **JSON export** - a `serde`-serializable borrowed view of the tree
//!
//! # Not Implemented
//!
//! - Network requests (hrefs are split into location parts, never fetched)
//! - Scripting and event dispatch
//! - Style computation, layout, and paint

pub use vellum_css as css;
pub use vellum_dom as dom;
pub use vellum_html as html;

/// Terminal tree dump.
pub mod display;
/// Serializable document views.
pub mod json;
/// Window and location shell around a parsed document.
pub mod window;

pub use display::print_tree;
pub use json::{NodeView, document_view, subtree_view};
pub use window::{Location, ParseOptions, Window, parse, parse_with_options};
