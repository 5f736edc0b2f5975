//! Wikilink extractor: `[[Note]]`, `[[Note|Display]]`, `[[id:<id>]]`
//!
//! A span is a literal `[[`, one or more characters that are not `]`, and a
//! literal `]]`. Anything else (unmatched `[[`, empty `[[]]`) is plain text.

use gardenlink_core::LinkOccurrence;
use regex::Regex;
use std::sync::LazyLock;

/// Matches [[...]] pattern
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("wikilink pattern is valid"));

/// Lazy iterator over the link occurrences of a text body, left to right.
pub struct Wikilinks<'t> {
    inner: regex::CaptureMatches<'static, 't>,
}

impl Iterator for Wikilinks<'_> {
    type Item = LinkOccurrence;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.inner.next()?;
        let full_match = caps.get(0)?;
        let inner = caps.get(1).map_or("", |m| m.as_str());

        Some(LinkOccurrence {
            raw_text: full_match.as_str().to_string(),
            inner_text: inner.trim().to_string(),
            start_offset: full_match.start(),
        })
    }
}

/// Iterate lazily over every `[[...]]` occurrence in `content`.
///
/// # Example
/// ```
/// use gardenlink_parser::wikilinks;
///
/// let inner: Vec<String> = wikilinks("[[A]] then [[ B | b ]]")
///     .map(|occ| occ.inner_text)
///     .collect();
/// assert_eq!(inner, vec!["A", "B | b"]);
/// ```
pub fn wikilinks(content: &str) -> Wikilinks<'_> {
    Wikilinks {
        inner: WIKILINK_PATTERN.captures_iter(content),
    }
}

/// Extract every `[[...]]` occurrence in `content`.
///
/// Absent content is the caller's empty string; it yields no occurrences.
pub fn extract_links(content: &str) -> Vec<LinkOccurrence> {
    if !content.contains("[[") {
        return Vec::new();
    }
    wikilinks(content).collect()
}
