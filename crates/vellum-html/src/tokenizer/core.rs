use vellum_common::warning::warn_once;

use super::entities;
use super::token::{Attribute, Token};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// param, source, track, wbr"
///
/// A void element never requires or expects a matching close tag.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    const VOID_ELEMENTS: [&str; 14] = [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ];
    VOID_ELEMENTS.iter().any(|v| name.eq_ignore_ascii_case(v))
}

/// A permissive scanning tokenizer.
///
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// Rather than the spec's full state machine, this tokenizer scans for
/// markup constructs directly and falls back to literal text whenever a
/// construct is malformed: the `<` that opened it is emitted as character
/// data and scanning resumes one character later, so well-formed markup
/// deeper in the input is still found. Tokenization therefore never fails
/// and never consumes more input than the malformed range.
pub struct Tokenizer {
    /// The input, decoded to characters for positional scanning.
    chars: Vec<char>,
    /// Current scan position.
    pos: usize,
    /// Completed tokens.
    tokens: Vec<Token>,
    /// Pending character data, entity-decoded when the run is flushed.
    text: String,
}

impl Tokenizer {
    /// Create a tokenizer over the given markup.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
            text: String::new(),
        }
    }

    /// Scan the whole input and return the token stream.
    #[must_use]
    pub fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.peek() {
            if c == '<' {
                if let Some(token) = self.scan_markup() {
                    self.flush_text();
                    self.tokens.push(token);
                } else {
                    // Recovery: the range starting here is not valid markup.
                    // Keep the '<' as literal text and rescan from the next
                    // character.
                    self.text.push('<');
                    self.pos += 1;
                }
            } else {
                self.text.push(c);
                self.pos += 1;
            }
        }
        self.flush_text();
        self.tokens
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    /// Tag names start with an ASCII letter.
    const fn is_name_start(c: char) -> bool {
        c.is_ascii_alphabetic()
    }

    /// Tag and attribute names accept letters, digits, hyphens, colons,
    /// and underscores (covers custom elements and namespaced names).
    const fn is_name_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_')
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn eat_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !Self::is_whitespace(c) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Consume `keyword` case-insensitively if it is next in the input.
    fn matches_ci(&mut self, keyword: &str) -> bool {
        let end = self.pos + keyword.len();
        if end > self.chars.len() {
            return false;
        }
        let candidate: String = self.chars[self.pos..end].iter().collect();
        if candidate.eq_ignore_ascii_case(keyword) {
            self.pos = end;
            true
        } else {
            false
        }
    }

    /// Emit the pending text run, if any, decoding entities once per run.
    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.text);
        self.tokens.push(Token::Text {
            data: entities::decode(&raw),
        });
    }

    /// Scan one markup construct starting at a `<`.
    ///
    /// On success the position is just past the construct. On failure the
    /// position is restored to the `<` so the caller can degrade it to
    /// literal text.
    fn scan_markup(&mut self) -> Option<Token> {
        let start = self.pos;
        let token = self.try_scan_markup();
        if token.is_none() {
            self.pos = start;
        }
        token
    }

    fn try_scan_markup(&mut self) -> Option<Token> {
        self.pos += 1; // consume '<'
        match self.peek()? {
            '!' => {
                self.pos += 1;
                if self.peek() == Some('-') && self.peek_at(1) == Some('-') {
                    self.pos += 2;
                    Some(self.scan_comment())
                } else if self.matches_ci("doctype") {
                    Some(self.scan_doctype())
                } else {
                    // Any other markup declaration degrades to literal text.
                    None
                }
            }
            '/' => {
                self.pos += 1;
                self.scan_end_tag()
            }
            c if Self::is_name_start(c) => self.scan_start_tag(),
            _ => None,
        }
    }

    /// Scan comment data; the position is just past `<!--`.
    ///
    /// "Comment and character tokens have data." Comment data is captured
    /// verbatim — no entity decoding.
    fn scan_comment(&mut self) -> Token {
        let mut data = String::new();
        loop {
            if self.pos >= self.chars.len() {
                // An unterminated comment runs to end of input.
                warn_once("HTML Tokenizer", "unterminated comment runs to end of input");
                break;
            }
            if self.peek() == Some('-')
                && self.peek_at(1) == Some('-')
                && self.peek_at(2) == Some('>')
            {
                self.pos += 3;
                break;
            }
            data.push(self.chars[self.pos]);
            self.pos += 1;
        }
        Token::Comment { data }
    }

    /// Scan the doctype name; the position is just past the `doctype`
    /// keyword. Legacy public/system identifiers are skipped.
    fn scan_doctype(&mut self) -> Token {
        self.eat_whitespace();
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if Self::is_whitespace(c) || c == '>' {
                break;
            }
            name.push(c.to_ascii_lowercase());
            self.pos += 1;
        }
        let mut terminated = false;
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == '>' {
                terminated = true;
                break;
            }
        }
        if !terminated {
            warn_once("HTML Tokenizer", "unterminated doctype runs to end of input");
        }
        Token::Doctype {
            name: if name.is_empty() { None } else { Some(name) },
        }
    }

    /// Scan an end tag; the position is just past `</`.
    fn scan_end_tag(&mut self) -> Option<Token> {
        if !Self::is_name_start(self.peek()?) {
            // "</>" and "</ div>" are not end tags.
            return None;
        }
        let name = self.scan_tag_name();
        self.eat_whitespace();
        // "end-tag-with-attributes parse error" — only the name survives.
        let mut dropped = false;
        loop {
            match self.peek() {
                None => return None, // unterminated, degrade to text
                Some('>') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    dropped = true;
                    self.pos += 1;
                }
            }
        }
        if dropped {
            warn_once(
                "HTML Tokenizer",
                &format!("attributes on an end tag are dropped: </{name}>"),
            );
        }
        Some(Token::EndTag { name })
    }

    /// Scan a start tag; the position is at the first name character.
    fn scan_start_tag(&mut self) -> Option<Token> {
        let name = self.scan_tag_name();
        let (attributes, self_closing) = self.scan_attributes()?;
        Some(Token::StartTag {
            name,
            self_closing,
            attributes,
        })
    }

    /// Scan a tag name, lowercasing it. The tree builder compares token
    /// names in lowercase; the element store uppercases for `tagName`.
    fn scan_tag_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !Self::is_name_char(c) {
                break;
            }
            name.push(c.to_ascii_lowercase());
            self.pos += 1;
        }
        name
    }

    /// Scan an attribute name with its original casing.
    fn scan_attr_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !Self::is_name_char(c) {
                break;
            }
            name.push(c);
            self.pos += 1;
        }
        name
    }

    /// Scan the attribute list of a start tag through the closing `>`.
    ///
    /// Returns the attributes and the self-closing flag, or `None` when the
    /// tag is unterminated or contains a character that cannot appear in a
    /// tag (the whole construct then degrades to literal text).
    fn scan_attributes(&mut self) -> Option<(Vec<Attribute>, bool)> {
        let mut attributes: Vec<Attribute> = Vec::new();
        loop {
            self.eat_whitespace();
            match self.peek()? {
                '>' => {
                    self.pos += 1;
                    return Some((attributes, false));
                }
                '/' => {
                    if self.peek_at(1) == Some('>') {
                        self.pos += 2;
                        return Some((attributes, true));
                    }
                    // "Unexpected solidus in tag" — skip it.
                    warn_once("HTML Tokenizer", "stray '/' inside a tag ignored");
                    self.pos += 1;
                }
                c if Self::is_name_char(c) => {
                    let name = self.scan_attr_name();
                    self.eat_whitespace();
                    let value = if self.peek() == Some('=') {
                        self.pos += 1;
                        self.eat_whitespace();
                        self.scan_attr_value()?
                    } else {
                        String::new()
                    };
                    // "If there is already an attribute on the token with the
                    // exact same name... the new attribute must be removed."
                    if attributes.iter().any(|attr| attr.name == name) {
                        warn_once(
                            "HTML Tokenizer",
                            &format!("duplicate attribute '{name}' dropped"),
                        );
                    } else {
                        attributes.push(Attribute::new(name, value));
                    }
                }
                _ => return None,
            }
        }
    }

    /// Scan one attribute value: double-quoted, single-quoted, or unquoted.
    /// Values are entity-decoded here, once, at tokenization time.
    fn scan_attr_value(&mut self) -> Option<String> {
        let quote = self.peek()?;
        let mut raw = String::new();
        if quote == '"' || quote == '\'' {
            self.pos += 1;
            loop {
                let c = self.peek()?; // EOF before the closing quote
                self.pos += 1;
                if c == quote {
                    break;
                }
                raw.push(c);
            }
        } else {
            // [§ 13.2.5.38 Attribute value (unquoted) state]: only
            // whitespace and '>' terminate; '/' is part of the value.
            while let Some(c) = self.peek() {
                if Self::is_whitespace(c) || c == '>' {
                    break;
                }
                raw.push(c);
                self.pos += 1;
            }
        }
        Some(entities::decode(&raw))
    }
}
