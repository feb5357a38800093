//! Integration tests for the HTML tokenizer.

use vellum_html::{Token, Tokenizer};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).run()
}

// ========== basic tokens ==========

#[test]
fn test_plain_text_is_one_token() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "Hello"));
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::Doctype { name } => {
            assert_eq!(name.as_deref(), Some("html"));
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_is_case_insensitive() {
    let tokens = tokenize("<!DoCtYpE HtMl>");
    match &tokens[0] {
        Token::Doctype { name } => {
            assert_eq!(name.as_deref(), Some("html"));
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::EndTag { name } => {
            assert_eq!(name, "div");
        }
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, " hello ");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_unterminated_comment_runs_to_end_of_input() {
    let tokens = tokenize("<!-- no terminator");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, " no terminator");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_tag_text_tag_sequence() {
    let tokens = tokenize("<div>hi</div>");
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "div"));
    assert!(matches!(&tokens[1], Token::Text { data } if data == "hi"));
    assert!(matches!(&tokens[2], Token::EndTag { name } if name == "div"));
}

// ========== names ==========

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DIV><Span>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "div"));
    assert!(matches!(&tokens[1], Token::StartTag { name, .. } if name == "span"));
}

#[test]
fn test_custom_and_namespaced_tag_names() {
    let tokens = tokenize("<dr-wow></dr-wow><wow:zz/>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "dr-wow"));
    assert!(matches!(&tokens[1], Token::EndTag { name } if name == "dr-wow"));
    assert!(matches!(&tokens[2], Token::StartTag { name, self_closing, .. }
        if name == "wow:zz" && *self_closing));
}

// ========== attributes ==========

#[test]
fn test_attribute_quoting_forms() {
    let tokens = tokenize(r#"<a one="1" two='2' three=3 four>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 4);
            assert_eq!(attributes[0].name, "one");
            assert_eq!(attributes[0].value, "1");
            assert_eq!(attributes[1].name, "two");
            assert_eq!(attributes[1].value, "2");
            assert_eq!(attributes[2].name, "three");
            assert_eq!(attributes[2].value, "3");
            assert_eq!(attributes[3].name, "four");
            assert_eq!(attributes[3].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_values_are_entity_decoded() {
    let tokens = tokenize(r#"<div wow="wow&quot;wow&quot;">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "wow\"wow\"");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_names_keep_original_case() {
    let tokens = tokenize("<div Foo=1 foo=2 xml:lang=en>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].name, "Foo");
            assert_eq!(attributes[1].name, "foo");
            assert_eq!(attributes[2].name, "xml:lang");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let tokens = tokenize(r#"<div id="first" id="second">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "id");
            assert_eq!(attributes[0].value, "first");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag_attributes_are_dropped() {
    let tokens = tokenize(r#"</div class="x">"#);
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::EndTag { name } if name == "div"));
}

// ========== entity decoding in text ==========

#[test]
fn test_text_entities_are_decoded() {
    let tokens = tokenize("Fish &amp; Chips &#39;to go&#x27;");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "Fish & Chips 'to go'"));
}

#[test]
fn test_decoded_angle_brackets_do_not_become_markup() {
    let tokens = tokenize("&lt;b&gt;not bold&lt;/b&gt;");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "<b>not bold</b>"));
}

// ========== malformed markup recovery ==========

#[test]
fn test_lone_angle_bracket_is_literal_text() {
    let tokens = tokenize("a < b > c");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "a < b > c"));
}

#[test]
fn test_recovery_still_finds_inner_tags() {
    let tokens = tokenize("1 < 2 <b>bold</b>");
    assert_eq!(tokens.len(), 4);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "1 < 2 "));
    assert!(matches!(&tokens[1], Token::StartTag { name, .. } if name == "b"));
    assert!(matches!(&tokens[2], Token::Text { data } if data == "bold"));
    assert!(matches!(&tokens[3], Token::EndTag { name } if name == "b"));
}

#[test]
fn test_unterminated_tag_degrades_to_text() {
    let tokens = tokenize("<div class=");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "<div class="));
}

#[test]
fn test_empty_end_tag_is_literal_text() {
    let tokens = tokenize("</> fine");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "</> fine"));
}

#[test]
fn test_unknown_markup_declaration_is_literal_text() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "<![CDATA[x]]>"));
}

#[test]
fn test_garbage_inside_tag_degrades_whole_range() {
    // The '=' cannot start an attribute, so the construct is not a tag;
    // the inner <span> is still recognized on rescan.
    let tokens = tokenize("<div =bad <span>");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "<div =bad "));
    assert!(matches!(&tokens[1], Token::StartTag { name, .. } if name == "span"));
}
