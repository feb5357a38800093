//! Character reference codec.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The full spec defines 2,231 named entities; this table covers the common
//! ones. A reference decodes only when it is `;`-terminated: a bare `&name`
//! or `&#10` without the semicolon passes through as literal text.

use std::collections::HashMap;
use std::sync::LazyLock;

/// The named character reference table.
/// Maps entity names (without the leading `&` or trailing `;`) to their
/// replacement strings.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Markup-significant (required for round-tripping serialized output)
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", "\u{00A0}"),
        // Common punctuation and symbols
        ("copy", "\u{00A9}"),   // ©
        ("reg", "\u{00AE}"),    // ®
        ("trade", "\u{2122}"),  // ™
        ("mdash", "\u{2014}"),  // —
        ("ndash", "\u{2013}"),  // –
        ("hellip", "\u{2026}"), // …
        ("bull", "\u{2022}"),   // •
        ("middot", "\u{00B7}"), // ·
        ("dagger", "\u{2020}"), // †
        ("sect", "\u{00A7}"),   // §
        ("para", "\u{00B6}"),   // ¶
        ("lsquo", "\u{2018}"),  // '
        ("rsquo", "\u{2019}"),  // '
        ("ldquo", "\u{201C}"),  // "
        ("rdquo", "\u{201D}"),  // "
        ("laquo", "\u{00AB}"),  // «
        ("raquo", "\u{00BB}"),  // »
        // Currency
        ("cent", "\u{00A2}"),   // ¢
        ("pound", "\u{00A3}"),  // £
        ("euro", "\u{20AC}"),   // €
        ("yen", "\u{00A5}"),    // ¥
        ("curren", "\u{00A4}"), // ¤
        // Math symbols
        ("times", "\u{00D7}"),  // ×
        ("divide", "\u{00F7}"), // ÷
        ("plusmn", "\u{00B1}"), // ±
        ("deg", "\u{00B0}"),    // °
        // Arrows
        ("larr", "\u{2190}"), // ←
        ("rarr", "\u{2192}"), // →
        ("uarr", "\u{2191}"), // ↑
        ("darr", "\u{2193}"), // ↓
        // Greek letters (commonly used)
        ("alpha", "\u{03B1}"),
        ("beta", "\u{03B2}"),
        ("gamma", "\u{03B3}"),
        ("delta", "\u{03B4}"),
        ("pi", "\u{03C0}"),
        ("sigma", "\u{03C3}"),
        ("omega", "\u{03C9}"),
    ])
});

/// Look up a named character reference.
///
/// Returns the replacement string if found.
/// The `name` should include neither the leading `&` nor the trailing `;`.
///
/// # Example
/// ```ignore
/// lookup_entity("amp")  // Returns Some("&")
/// lookup_entity("xyz")  // Returns None
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Replace named and numeric character references with their literal
/// characters.
///
/// Unknown names, references without a terminating `;`, and numeric values
/// outside Unicode scalar range pass through unchanged; decoding never
/// fails on malformed input.
#[must_use]
pub fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        if let Some((replacement, consumed)) = scan_reference(after) {
            out.push_str(&replacement);
            rest = &after[consumed..];
        } else {
            out.push('&');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

/// Escape the characters that are markup-significant in serialized HTML:
/// `&`, `<`, `>`, and `"`.
///
/// This is the serialization inverse of [`decode`]: for any `s`,
/// `decode(encode(s)) == s`.
#[must_use]
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Try to scan one reference starting just after a `&`.
///
/// Returns the replacement text and the number of bytes consumed
/// (everything through the `;`), or `None` when the range is not a
/// well-formed known reference.
fn scan_reference(after: &str) -> Option<(String, usize)> {
    if let Some(numeric) = after.strip_prefix('#') {
        return scan_numeric_reference(numeric).map(|(s, used)| (s, used + 1));
    }
    let name_len = after.bytes().take_while(u8::is_ascii_alphanumeric).count();
    if name_len == 0 || after.as_bytes().get(name_len) != Some(&b';') {
        return None;
    }
    lookup_entity(&after[..name_len]).map(|replacement| (replacement.to_string(), name_len + 1))
}

/// Scan a numeric reference body (`39;`, `x27;`) just after `&#`.
fn scan_numeric_reference(body: &str) -> Option<(String, usize)> {
    let (radix, digits, prefix_len) = match body.as_bytes().first() {
        Some(b'x' | b'X') => (16, &body[1..], 1),
        _ => (10, body, 0),
    };
    let digit_len = digits
        .bytes()
        .take_while(|b| char::from(*b).is_digit(radix))
        .count();
    if digit_len == 0 || digits.as_bytes().get(digit_len) != Some(&b';') {
        return None;
    }
    let value = u32::from_str_radix(&digits[..digit_len], radix).ok()?;
    let c = char::from_u32(value)?;
    Some((c.to_string(), prefix_len + digit_len + 1))
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};

    #[test]
    fn decodes_named_references() {
        assert_eq!(decode("a &amp; b"), "a & b");
        assert_eq!(decode("&lt;div&gt;"), "<div>");
        assert_eq!(decode("&copy; 2024 &trade;"), "\u{00A9} 2024 \u{2122}");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode("&#39;quoted&#39;"), "'quoted'");
        assert_eq!(decode("&#x27;hex&#X27;"), "'hex'");
        assert_eq!(decode("&#8212;"), "\u{2014}");
    }

    #[test]
    fn semicolon_is_required() {
        assert_eq!(decode("fish &amp chips"), "fish &amp chips");
        assert_eq!(decode("&#39"), "&#39");
    }

    #[test]
    fn unknown_and_malformed_pass_through() {
        assert_eq!(decode("&bogus;"), "&bogus;");
        assert_eq!(decode("& loose"), "& loose");
        assert_eq!(decode("&&amp;"), "&&");
        assert_eq!(decode("&#;"), "&#;");
        assert_eq!(decode("&#xg;"), "&#xg;");
    }

    #[test]
    fn out_of_range_numeric_passes_through() {
        // Beyond Unicode scalar range, and a surrogate half.
        assert_eq!(decode("&#1114112;"), "&#1114112;");
        assert_eq!(decode("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn encode_escapes_markup_characters() {
        assert_eq!(encode("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(encode("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn decode_is_the_inverse_of_encode() {
        for s in ["", "plain", "a<b>&\"c\"", "&amp; already encoded", "mixed <&> ends"] {
            assert_eq!(decode(&encode(s)), s);
        }
    }
}
