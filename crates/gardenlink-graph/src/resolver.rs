//! Link resolution: map each `[[...]]` occurrence to a note, or to nothing.
//!
//! Rules are tried in strict priority order and the first hit wins:
//!
//! 1. `id:<token>` naming an existing note id → [`LinkKind::Id`]
//! 2. `Title|Display` whose title half is a known title → [`LinkKind::Alias`]
//! 3. the whole inner text is a known title → [`LinkKind::Title`]
//! 4. first note (snapshot order) whose title contains the inner text, or is
//!    contained by it → [`LinkKind::Fuzzy`]
//! 5. otherwise → [`LinkKind::Unresolved`]
//!
//! All comparisons are on lower-cased text. Every occurrence yields exactly
//! one [`ResolvedLink`].

use crate::index::TitleIndex;
use gardenlink_core::{LinkKind, LinkOccurrence, Note, NoteId, NoteSnapshot, ResolvedLink};
use gardenlink_parser::{classify_link, extract_links};

/// Resolves link occurrences against one snapshot.
pub struct LinkResolver<'a> {
    snapshot: &'a NoteSnapshot,
    index: TitleIndex<'a>,
    fuzzy_fallback: bool,
}

impl<'a> LinkResolver<'a> {
    /// Build a resolver, indexing the snapshot
    pub fn new(snapshot: &'a NoteSnapshot) -> Self {
        Self {
            snapshot,
            index: TitleIndex::build(snapshot),
            fuzzy_fallback: true,
        }
    }

    /// Enable or disable the substring fallback (rule 4)
    pub fn with_fuzzy_fallback(mut self, enabled: bool) -> Self {
        self.fuzzy_fallback = enabled;
        self
    }

    pub fn index(&self) -> &TitleIndex<'a> {
        &self.index
    }

    /// Resolve one occurrence found in the note `source`
    pub fn resolve(&self, source: &NoteId, occurrence: &LinkOccurrence) -> ResolvedLink {
        let (kind, target, display) = self.resolve_inner(&occurrence.inner_text);

        ResolvedLink {
            source: source.clone(),
            raw_text: occurrence.raw_text.clone(),
            inner_text: occurrence.inner_text.clone(),
            offset: occurrence.start_offset,
            kind,
            target: target.cloned(),
            display,
        }
    }

    fn resolve_inner(&self, inner: &str) -> (LinkKind, Option<&'a NoteId>, Option<String>) {
        let syntax = classify_link(inner);

        if let Some(target) = syntax.id.and_then(|token| self.index.by_id(token)) {
            return (LinkKind::Id, Some(target), None);
        }

        if let Some(alias) = syntax.alias
            && let Some(target) = self.index.by_title(alias.title)
        {
            return (LinkKind::Alias, Some(target), Some(alias.display.to_string()));
        }

        if let Some(target) = self.index.by_title(inner) {
            return (LinkKind::Title, Some(target), None);
        }

        if self.fuzzy_fallback
            && let Some(target) = self.fuzzy_target(inner)
        {
            return (LinkKind::Fuzzy, Some(target), None);
        }

        (LinkKind::Unresolved, None, None)
    }

    /// Linear scan for bidirectional substring containment.
    ///
    /// The empty string is contained in everything, so a blank link text
    /// or a blank title matches the first note it meets.
    fn fuzzy_target(&self, inner: &str) -> Option<&'a NoteId> {
        let needle = inner.to_lowercase();

        self.snapshot
            .iter()
            .find(|note| {
                let title = note.title.to_lowercase();
                title.contains(&needle) || needle.contains(&title)
            })
            .map(|note| &note.id)
    }

    /// Extract and resolve every link in one note
    pub fn resolve_note(&self, note: &Note) -> Vec<ResolvedLink> {
        extract_links(&note.content)
            .iter()
            .map(|occurrence| self.resolve(&note.id, occurrence))
            .collect()
    }

    /// Resolve every link in the snapshot, in snapshot then content order
    pub fn resolve_all(&self) -> Vec<ResolvedLink> {
        let links: Vec<ResolvedLink> = self
            .snapshot
            .iter()
            .flat_map(|note| self.resolve_note(note))
            .collect();

        let unresolved = links.iter().filter(|l| !l.kind.is_resolved()).count();
        log::debug!(
            "Resolved {} links across {} notes ({} unresolved)",
            links.len(),
            self.snapshot.len(),
            unresolved
        );

        links
    }
}

/// Resolve the links of a free-standing text body against a snapshot.
///
/// Used for drafts that are not yet part of the snapshot.
pub fn resolve_content(source: &NoteId, content: &str, snapshot: &NoteSnapshot) -> Vec<ResolvedLink> {
    let resolver = LinkResolver::new(snapshot);
    extract_links(content)
        .iter()
        .map(|occurrence| resolver.resolve(source, occurrence))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(notes: Vec<Note>) -> NoteSnapshot {
        NoteSnapshot::new(notes).unwrap()
    }

    fn resolve_one(snapshot: &NoteSnapshot, content: &str) -> ResolvedLink {
        let links = resolve_content(&NoteId::from("src"), content, snapshot);
        assert_eq!(links.len(), 1, "expected exactly one link in {:?}", content);
        links.into_iter().next().unwrap()
    }

    #[test]
    fn test_exact_title() {
        let snap = snapshot(vec![
            Note::new("1", "Python Basics", "See [[Python Loops]]"),
            Note::new("2", "Python Loops", ""),
        ]);
        let link = resolve_one(&snap, "See [[python loops]]");
        assert_eq!(link.kind, LinkKind::Title);
        assert_eq!(link.target, Some(NoteId::from("2")));
        assert_eq!(link.display, None);
    }

    #[test]
    fn test_id_beats_literal_title() {
        let snap = snapshot(vec![
            Note::new("foo-1", "Foo", ""),
            Note::new("2", "id:foo-1", ""),
        ]);
        let link = resolve_one(&snap, "[[id:foo-1]]");
        assert_eq!(link.kind, LinkKind::Id);
        assert_eq!(link.target, Some(NoteId::from("foo-1")));
        assert_eq!(link.display, None);
    }

    #[test]
    fn test_unknown_id_falls_through_to_title() {
        let snap = snapshot(vec![Note::new("1", "id:ghost", "")]);
        let link = resolve_one(&snap, "[[id:ghost]]");
        assert_eq!(link.kind, LinkKind::Title);
        assert_eq!(link.target, Some(NoteId::from("1")));
    }

    #[test]
    fn test_alias_carries_display_text() {
        let snap = snapshot(vec![Note::new("1", "Python Basics", "")]);
        let link = resolve_one(&snap, "[[Python Basics|intro]]");
        assert_eq!(link.kind, LinkKind::Alias);
        assert_eq!(link.target, Some(NoteId::from("1")));
        assert_eq!(link.display.as_deref(), Some("intro"));
    }

    #[test]
    fn test_alias_display_is_unchanged() {
        let snap = snapshot(vec![Note::new("1", "Target", "")]);
        let link = resolve_one(&snap, "[[ target |  Some Display Text ]]");
        assert_eq!(link.kind, LinkKind::Alias);
        assert_eq!(link.display.as_deref(), Some("Some Display Text"));
    }

    #[test]
    fn test_unmatched_alias_falls_through_to_fuzzy() {
        let snap = snapshot(vec![Note::new("1", "Gardening", "")]);
        let link = resolve_one(&snap, "[[Nothing|Gardening tips]]");
        assert_eq!(link.kind, LinkKind::Fuzzy);
        assert_eq!(link.target, Some(NoteId::from("1")));
        assert_eq!(link.display, None);
    }

    #[test]
    fn test_fuzzy_both_directions() {
        let snap = snapshot(vec![
            Note::new("1", "Rust Ownership Rules", ""),
            Note::new("2", "Async", ""),
        ]);
        // inner text inside a title
        let link = resolve_one(&snap, "[[ownership]]");
        assert_eq!(link.kind, LinkKind::Fuzzy);
        assert_eq!(link.target, Some(NoteId::from("1")));

        // title inside the inner text
        let link = resolve_one(&snap, "[[Async await in depth]]");
        assert_eq!(link.kind, LinkKind::Fuzzy);
        assert_eq!(link.target, Some(NoteId::from("2")));
    }

    #[test]
    fn test_fuzzy_takes_first_in_snapshot_order() {
        let snap = snapshot(vec![
            Note::new("1", "AI Ethics", ""),
            Note::new("2", "AI", ""),
        ]);
        let link = resolve_one(&snap, "[[ethics of ai]]");
        // "ai" is contained in the needle; note 1 is not, note 2 is
        assert_eq!(link.target, Some(NoteId::from("2")));

        let link = resolve_one(&snap, "[[ai e]]");
        assert_eq!(link.target, Some(NoteId::from("1")));
    }

    #[test]
    fn test_unresolved() {
        let snap = snapshot(vec![Note::new("1", "Python", "")]);
        let link = resolve_one(&snap, "[[Nonexistent Note]]");
        assert_eq!(link.kind, LinkKind::Unresolved);
        assert_eq!(link.target, None);
        assert_eq!(link.display, None);
        assert_eq!(link.inner_text, "Nonexistent Note");
    }

    #[test]
    fn test_fuzzy_fallback_can_be_disabled() {
        let snap = snapshot(vec![Note::new("1", "Rust Ownership Rules", "")]);
        let resolver = LinkResolver::new(&snap).with_fuzzy_fallback(false);
        let occurrence = extract_links("[[ownership]]").remove(0);
        let link = resolver.resolve(&NoteId::from("x"), &occurrence);
        assert_eq!(link.kind, LinkKind::Unresolved);
    }

    #[test]
    fn test_blank_title_matches_any_link_text() {
        let snap = snapshot(vec![Note::new("1", "", ""), Note::new("2", "Other", "")]);
        let link = resolve_one(&snap, "[[Missing]]");
        assert_eq!(link.kind, LinkKind::Fuzzy);
        assert_eq!(link.target, Some(NoteId::from("1")));
    }

    #[test]
    fn test_blank_link_text_matches_first_note() {
        let snap = snapshot(vec![Note::new("1", "First", ""), Note::new("2", "Second", "")]);
        let link = resolve_one(&snap, "[[   ]]");
        assert_eq!(link.kind, LinkKind::Fuzzy);
        assert_eq!(link.target, Some(NoteId::from("1")));
        assert_eq!(link.inner_text, "");
    }

    #[test]
    fn test_resolution_is_total() {
        let snap = snapshot(vec![
            Note::new("1", "A", "[[B]] [[id:2]] [[A|self]] [[zzz]] [[   ]]"),
            Note::new("2", "B", ""),
        ]);
        let resolver = LinkResolver::new(&snap);
        let links = resolver.resolve_all();

        assert_eq!(links.len(), 5);
        for link in &links {
            assert_eq!(link.target.is_some(), link.kind.is_resolved());
            assert_eq!(link.display.is_some(), link.kind == LinkKind::Alias);
        }
        assert!(links[2].is_self_link());
        assert_eq!(links[4].kind, LinkKind::Fuzzy);
        assert_eq!(links[4].target, Some(NoteId::from("1")));
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first() {
        let snap = snapshot(vec![
            Note::new("first", "Inbox", ""),
            Note::new("second", "Inbox", ""),
        ]);
        let link = resolve_one(&snap, "[[Inbox]]");
        assert_eq!(link.target, Some(NoteId::from("first")));
    }
}
