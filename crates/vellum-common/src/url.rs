//! URL splitting utilities.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! The window location only needs the pathname/search/hash components of an
//! href, so this module splits rather than fully parses.

/// The location-relevant components of an href.
///
/// [URL Standard § 6.3](https://url.spec.whatwg.org/#api-url-components)
/// "pathname... search... hash..."
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlParts {
    /// Path component; `/` when the href carries no path.
    pub pathname: String,
    /// Query component including the leading `?`, or empty.
    pub search: String,
    /// Fragment component including the leading `#`, or empty.
    pub hash: String,
}

/// Split an href into pathname, search, and hash.
///
/// # Algorithm
///
/// [URL Standard § 4.3](https://url.spec.whatwg.org/#url-parsing)
///
/// STEP 1: If the href is absolute (`scheme://authority...`), skip the
/// scheme and authority; the authority ends at the first `/`, `?`, or `#`.
///
/// STEP 2: Split off the fragment at the first `#` (a fragment may itself
/// contain `?`, so this happens before the query split).
///
/// STEP 3: Split off the query at the first `?` of what remains.
///
/// STEP 4: Whatever is left is the pathname; an empty pathname becomes `/`,
/// matching the serialization of a URL with no path.
///
/// NOTE: This is a splitter, not a resolver. Relative hrefs are split
/// as-is; no base URL resolution or percent-decoding is performed.
#[must_use]
pub fn split_href(href: &str) -> UrlParts {
    // STEP 1: Skip "scheme://authority".
    //
    // [URL Standard § 4.3](https://url.spec.whatwg.org/#url-parsing)
    // "An absolute-URL string is a URL-scheme string, followed by U+003A (:),
    // followed by a scheme-specific part."
    let rest = match href.find("://") {
        Some(scheme_end) => {
            let after_authority = &href[scheme_end + 3..];
            match after_authority.find(['/', '?', '#']) {
                Some(i) => &after_authority[i..],
                None => "",
            }
        }
        None => href,
    };

    // STEP 2: Fragment first.
    let (before_hash, hash) = match rest.find('#') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };

    // STEP 3: Query.
    let (path, search) = match before_hash.find('?') {
        Some(i) => (&before_hash[..i], &before_hash[i..]),
        None => (before_hash, ""),
    };

    // STEP 4: Default pathname.
    let pathname = if path.is_empty() {
        String::from("/")
    } else {
        path.to_string()
    };

    UrlParts {
        pathname,
        search: search.to_string(),
        hash: hash.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::split_href;

    #[test]
    fn splits_full_absolute_url() {
        let parts = split_href("https://example.com/a/b?q=1#frag");
        assert_eq!(parts.pathname, "/a/b");
        assert_eq!(parts.search, "?q=1");
        assert_eq!(parts.hash, "#frag");
    }

    #[test]
    fn bare_origin_defaults_pathname() {
        let parts = split_href("https://example.com");
        assert_eq!(parts.pathname, "/");
        assert_eq!(parts.search, "");
        assert_eq!(parts.hash, "");
    }

    #[test]
    fn relative_path_with_query() {
        let parts = split_href("/admin?tab=2");
        assert_eq!(parts.pathname, "/admin");
        assert_eq!(parts.search, "?tab=2");
        assert_eq!(parts.hash, "");
    }

    #[test]
    fn question_mark_inside_fragment_stays_in_hash() {
        let parts = split_href("https://example.com/x#frag?not-a-query");
        assert_eq!(parts.pathname, "/x");
        assert_eq!(parts.search, "");
        assert_eq!(parts.hash, "#frag?not-a-query");
    }

    #[test]
    fn query_directly_after_authority() {
        let parts = split_href("http://example.com?q=2");
        assert_eq!(parts.pathname, "/");
        assert_eq!(parts.search, "?q=2");
        assert_eq!(parts.hash, "");
    }
}
