//! HTML tokenizer, tree builder, and serializer for the Vellum document model.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer**: a permissive scanner producing doctype, comment, tag, and
//!   text tokens, with entity decoding and literal-text recovery for
//!   malformed markup
//! - **Tree Builder**: insertion modes `BeforeHtml`, `InHead`, `InBody`; the
//!   output document always holds exactly one `html`, `head`, and `body`
//! - **Fragment parsing**: the engine behind the `innerHTML` setter
//! - **Serializer**: `outer_html`/`inner_html` with entity encoding and
//!   void-element handling
//!
//! # Not Implemented
//!
//! - RCDATA/RAWTEXT tokenizer states (script/style content is scanned like
//!   any other markup)
//! - Table insertion modes and foster parenting
//! - The adoption agency algorithm

/// Tree construction from the token stream.
pub mod parser;
/// Markup serialization back to HTML text.
pub mod serializer;
/// Scanner converting raw markup into tokens.
pub mod tokenizer;

pub use parser::{
    InsertionMode, ParseIssue, TreeBuilder, parse_document, parse_fragment, set_inner_html,
};
pub use serializer::{inner_html, outer_html};
pub use tokenizer::{Attribute, Token, Tokenizer, is_void_element};
