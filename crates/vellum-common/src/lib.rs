//! Common utilities for the Vellum HTML engine.
//!
//! This crate provides shared infrastructure used by the parser components:
//! - **Warning System** - deduplicated terminal output for recovered parse errors
//! - **URL Splitting** - pathname/search/hash extraction for the window location

pub mod url;
pub mod warning;
