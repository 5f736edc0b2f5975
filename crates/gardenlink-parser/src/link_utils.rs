//! Shared utilities for classifying the inner text of a wikilink.
//!
//! One inner text can carry several candidate readings at once
//! (`[[id:x|Shown]]` is both an id candidate and an alias candidate); the
//! resolver decides which reading wins, so classification records all of them.

/// Case-insensitive prefix marking an explicit id reference
const ID_PREFIX: &str = "id:";

/// Left and right halves of `Title|Display`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasParts<'a> {
    /// Lookup key, trimmed
    pub title: &'a str,
    /// Literal text to render, trimmed
    pub display: &'a str,
}

/// Candidate readings of a link's inner text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSyntax<'a> {
    /// The full inner text
    pub text: &'a str,
    /// Token after `id:` when the text has that form
    pub id: Option<&'a str>,
    /// Title/display split when the text contains `|`
    pub alias: Option<AliasParts<'a>>,
}

/// Split a wikilink's inner text into its candidate readings.
///
/// # Examples
///
/// ```
/// use gardenlink_parser::link_utils::classify_link;
///
/// assert_eq!(classify_link("id:42").id, Some("42"));
/// assert_eq!(classify_link("ID: abc ").id, Some("abc"));
///
/// let alias = classify_link("Python Basics | intro").alias.unwrap();
/// assert_eq!(alias.title, "Python Basics");
/// assert_eq!(alias.display, "intro");
///
/// let bare = classify_link("Python Loops");
/// assert!(bare.id.is_none() && bare.alias.is_none());
/// ```
pub fn classify_link(inner: &str) -> LinkSyntax<'_> {
    LinkSyntax {
        text: inner,
        id: id_token(inner),
        alias: alias_parts(inner),
    }
}

/// Token of an `id:<token>` reference, trimmed; `None` if absent or empty.
pub fn id_token(inner: &str) -> Option<&str> {
    let prefix = inner.get(..ID_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(ID_PREFIX) {
        return None;
    }
    let token = inner[ID_PREFIX.len()..].trim();
    (!token.is_empty()).then_some(token)
}

/// Title and display halves of `Title|Display`.
///
/// Only the first two `|`-separated segments are used; any further
/// segments are ignored. A missing display half is the empty string.
pub fn alias_parts(inner: &str) -> Option<AliasParts<'_>> {
    if !inner.contains('|') {
        return None;
    }
    let mut parts = inner.split('|');
    let title = parts.next().unwrap_or_default().trim();
    let display = parts.next().unwrap_or_default().trim();
    Some(AliasParts { title, display })
}

/// Render the canonical markup for a link to `target`.
///
/// Titles containing `]` cannot be linked and yield `None`.
pub fn format_link(target: &str, display: Option<&str>) -> Option<String> {
    if target.contains(']') || display.is_some_and(|d| d.contains(']')) {
        return None;
    }
    Some(match display {
        Some(display) => format!("[[{}|{}]]", target, display),
        None => format!("[[{}]]", target),
    })
}

/// Render an `[[id:<id>]]` link.
pub fn format_id_link(id: &str) -> Option<String> {
    (!id.contains(']')).then(|| format!("[[{}{}]]", ID_PREFIX, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_links;

    #[test]
    fn test_id_token() {
        assert_eq!(id_token("id:42"), Some("42"));
        assert_eq!(id_token("Id:  n-7 "), Some("n-7"));
        assert_eq!(id_token("id:"), None);
        assert_eq!(id_token("identity"), None);
        assert_eq!(id_token("i"), None);
    }

    #[test]
    fn test_id_prefix_does_not_split_multibyte() {
        // byte 3 falls inside 'é'; must not panic
        assert_eq!(id_token("idé:x"), None);
    }

    #[test]
    fn test_alias_parts() {
        let parts = alias_parts("Target|Display Text").unwrap();
        assert_eq!(parts.title, "Target");
        assert_eq!(parts.display, "Display Text");

        let parts = alias_parts("a|b|c").unwrap();
        assert_eq!(parts.title, "a");
        assert_eq!(parts.display, "b");

        let parts = alias_parts("Only|").unwrap();
        assert_eq!(parts.display, "");

        assert!(alias_parts("No pipe").is_none());
    }

    #[test]
    fn test_id_and_alias_can_coexist() {
        let syntax = classify_link("id:7|Seven");
        assert_eq!(syntax.id, Some("7|Seven"));
        assert_eq!(syntax.alias.unwrap().title, "id:7");
    }

    #[test]
    fn test_format_link_survives_extraction() {
        let forms = [
            format_link("Target", None).unwrap(),
            format_link("Target", Some("Display Text")).unwrap(),
            format_id_link("abc-123").unwrap(),
        ];
        let content = forms.join(" ");
        let links = extract_links(&content);

        assert_eq!(links.len(), 3);
        for (link, form) in links.iter().zip(forms.iter()) {
            assert_eq!(&link.raw_text, form);
        }
    }

    #[test]
    fn test_format_link_rejects_closing_bracket() {
        assert!(format_link("a]]b", None).is_none());
        assert!(format_link("ok", Some("bad]")).is_none());
        assert!(format_id_link("x]").is_none());
    }
}
