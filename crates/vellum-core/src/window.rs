//! Window shell owning a parsed document and its location.
//!
//! [§ 7.2 The Window object](https://html.spec.whatwg.org/multipage/nav-history-apis.html#the-window-object)
//!
//! "The document attribute... returns the Window object's associated
//! Document."
//!
//! There is no navigation here. A window is created once per parse call,
//! owns its document outright, and its location is derived by splitting the
//! caller-supplied href string.

use vellum_common::url::split_href;
use vellum_dom::Document;
use vellum_html::parse_document;

/// The window shell returned by [`parse`].
///
/// [§ 7.2 The Window object](https://html.spec.whatwg.org/multipage/nav-history-apis.html#the-window-object)
///
/// "A Window object has an associated Document, which is a Document object."
#[derive(Debug, Clone)]
pub struct Window {
    /// The parsed document tree.
    pub document: Document,
    /// The split representation of the document's href.
    pub location: Location,
}

/// [§ 7.10 The Location interface](https://html.spec.whatwg.org/multipage/nav-history-apis.html#the-location-interface)
///
/// "Location objects provide a representation of the URL of the active
/// document."
///
/// Only the components the split can produce are kept; there is no origin
/// and no assign/replace navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// "Returns the Location object's URL's path." Defaults to `/`.
    pub pathname: String,
    /// "Returns the Location object's URL's query (includes leading "?" if
    /// non-empty)." Empty when the href carries no query.
    pub search: String,
    /// "Returns the Location object's URL's fragment (includes leading "#"
    /// if non-empty)." Empty when the href carries no fragment.
    pub hash: String,
}

impl Location {
    /// Build a location from an href string.
    ///
    /// The href is split, not resolved: scheme and authority are skipped,
    /// the fragment is cut before the query, and an empty path becomes `/`.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        let parts = split_href(href);
        Location {
            pathname: parts.pathname,
            search: parts.search,
            hash: parts.hash,
        }
    }
}

impl Default for Location {
    /// The location of a document parsed without an href: `/` with no query
    /// or fragment.
    fn default() -> Self {
        Location {
            pathname: String::from("/"),
            search: String::new(),
            hash: String::new(),
        }
    }
}

/// Options accepted by [`parse_with_options`].
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// The href the window's location is derived from.
    pub href: Option<String>,
}

/// Parse a complete HTML document into a window shell.
///
/// Parsing never fails: malformed markup is recovered as literal text and
/// the document always carries exactly one `html`, `head`, and `body`.
/// The location is the [`Location::default`] of a document with no href.
#[must_use]
pub fn parse(html: &str) -> Window {
    parse_with_options(html, ParseOptions::default())
}

/// Parse a complete HTML document, deriving the location from `options`.
#[must_use]
pub fn parse_with_options(html: &str, options: ParseOptions) -> Window {
    let ParseOptions { href } = options;
    let document = parse_document(html);
    let location = href
        .as_deref()
        .map_or_else(Location::default, Location::from_href);
    Window { document, location }
}
