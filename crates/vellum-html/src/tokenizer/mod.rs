//! HTML tokenizer module.
//!
//! Implements a permissive version of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Scanner producing the token stream.
pub mod core;
/// Character reference decoding and encoding.
pub mod entities;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{Tokenizer, is_void_element};
pub use token::{Attribute, Token};
