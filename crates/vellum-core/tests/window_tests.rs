//! Tests for the window shell: parse entry points and location splitting.

use vellum_core::{Location, ParseOptions, parse, parse_with_options};

fn located(href: &str) -> Location {
    let options = ParseOptions {
        href: Some(href.to_string()),
    };
    parse_with_options("<p>hi</p>", options).location
}

// ========== location defaults ==========

#[test]
fn test_parse_without_href_defaults_location() {
    let window = parse("<p>hi</p>");
    assert_eq!(window.location.pathname, "/");
    assert_eq!(window.location.search, "");
    assert_eq!(window.location.hash, "");
}

#[test]
fn test_options_without_href_match_plain_parse() {
    let window = parse_with_options("<p>hi</p>", ParseOptions::default());
    assert_eq!(window.location, Location::default());
}

// ========== href splitting ==========

#[test]
fn test_full_href_splits_into_three_parts() {
    let location = located("https://example.com/a/b?q=1#frag");
    assert_eq!(location.pathname, "/a/b");
    assert_eq!(location.search, "?q=1");
    assert_eq!(location.hash, "#frag");
}

#[test]
fn test_bare_origin_pathname_defaults_to_slash() {
    let location = located("https://example.com");
    assert_eq!(location.pathname, "/");
    assert_eq!(location.search, "");
    assert_eq!(location.hash, "");
}

#[test]
fn test_relative_href_is_split_verbatim() {
    let location = located("/admin?tab=2");
    assert_eq!(location.pathname, "/admin");
    assert_eq!(location.search, "?tab=2");
    assert_eq!(location.hash, "");
}

#[test]
fn test_question_mark_inside_fragment_stays_in_hash() {
    let location = located("https://example.com/x#section?not-a-query");
    assert_eq!(location.pathname, "/x");
    assert_eq!(location.search, "");
    assert_eq!(location.hash, "#section?not-a-query");
}

#[test]
fn test_location_from_href_matches_parse_with_options() {
    let href = "http://example.com/docs?page=3#top";
    assert_eq!(Location::from_href(href), located(href));
}

// ========== document shell ==========

#[test]
fn test_parse_always_builds_the_envelope() {
    let window = parse("just some text");
    let doc = &window.document;

    let html = doc.document_element().unwrap();
    let head = doc.head().unwrap();
    let body = doc.body().unwrap();
    assert_eq!(doc.children(html), &[head, body]);
}

#[test]
fn test_parsed_document_is_queryable_by_id() {
    let window = parse(r#"<div id="app">content</div>"#);
    let app = window.document.get_element_by_id("app").unwrap();
    assert_eq!(window.document.text_content(app), "content");
}

#[test]
fn test_cloned_window_documents_are_independent() {
    let window = parse(r#"<div id="app"></div>"#);
    let mut copy = window.clone();

    let app = copy.document.get_element_by_id("app").unwrap();
    copy.document.set_attribute(app, "data-mark", "1");

    let original = window.document.get_element_by_id("app").unwrap();
    assert_eq!(window.document.get_attribute(original, "data-mark"), None);
    assert_eq!(copy.document.get_attribute(app, "data-mark"), Some("1"));
}
