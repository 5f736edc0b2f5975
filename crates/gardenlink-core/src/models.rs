//! Core data models for notes and the links between them.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Read-only inputs**: Notes are owned by an external store; the engine never mutates them
//! - **Type-Safe**: Enums replace magic strings for link kinds
//!
//! Loose note shapes (missing or `null` content and tags) are normalized once,
//! when a [`NoteSnapshot`] is built, so downstream code never re-checks them.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Opaque, stable note identifier. Unique within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NoteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A freeform text note as supplied by the note store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Primary human-facing link key. Not guaranteed unique.
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Display order is preserved; matching ignores it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Create a note with no tags or timestamps
    pub fn new(id: impl Into<NoteId>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder-style tag setter
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style timestamp setter
    pub fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = updated_at;
        self
    }

    /// Last modification time, falling back to creation time
    pub fn last_touched(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }

    /// Number of whitespace-separated words in the content
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// An ordered, validated collection of notes.
///
/// Snapshot order is significant: duplicate titles and fuzzy fallbacks are
/// resolved in favour of the earliest note.
#[derive(Debug, Clone, Default)]
pub struct NoteSnapshot {
    notes: Vec<Note>,
    positions: HashMap<NoteId, usize>,
}

impl NoteSnapshot {
    /// Build a snapshot, rejecting duplicate note ids
    pub fn new(notes: Vec<Note>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(notes.len());
        for (idx, note) in notes.iter().enumerate() {
            if positions.insert(note.id.clone(), idx).is_some() {
                return Err(Error::validation_error(format!(
                    "duplicate note id: {}",
                    note.id
                )));
            }
        }
        Ok(Self { notes, positions })
    }

    /// Decode a JSON array of notes
    pub fn from_json(json: &str) -> Result<Self> {
        let notes: Vec<Note> = serde_json::from_str(json)
            .map_err(|e| Error::parse_error(format!("Invalid note snapshot: {}", e)))?;
        Self::new(notes)
    }

    /// Load a JSON array of notes from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        log::debug!(
            "Loaded {} notes from {}",
            snapshot.len(),
            path.display()
        );
        Ok(snapshot)
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.positions.get(id).map(|&idx| &self.notes[idx])
    }

    /// Index of a note in snapshot order
    pub fn position(&self, id: &NoteId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl<'a> IntoIterator for &'a NoteSnapshot {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

/// A raw `[[...]]` span found in note content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkOccurrence {
    /// The full match including brackets, e.g. `[[Target|Shown]]`
    pub raw_text: String,
    /// Text between the brackets, trimmed
    pub inner_text: String,
    /// Byte offset of the opening `[[`
    pub start_offset: usize,
}

/// How a link occurrence was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// `[[id:<token>]]` naming an existing note
    Id,
    /// `[[Title|Display]]` whose title part matched
    Alias,
    /// Exact case-insensitive title match
    Title,
    /// Bidirectional substring containment fallback
    Fuzzy,
    /// Nothing matched; rendered as a broken link
    Unresolved,
}

impl LinkKind {
    pub fn is_resolved(self) -> bool {
        !matches!(self, LinkKind::Unresolved)
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkKind::Id => "id",
            LinkKind::Alias => "alias",
            LinkKind::Title => "title",
            LinkKind::Fuzzy => "fuzzy",
            LinkKind::Unresolved => "unresolved",
        };
        f.write_str(s)
    }
}

/// A link occurrence together with its resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLink {
    pub source: NoteId,
    pub raw_text: String,
    pub inner_text: String,
    pub offset: usize,
    pub kind: LinkKind,
    /// `None` exactly when `kind` is [`LinkKind::Unresolved`]
    pub target: Option<NoteId>,
    /// Only set for [`LinkKind::Alias`]
    pub display: Option<String>,
}

impl ResolvedLink {
    /// A resolved link pointing at its own source note
    pub fn is_self_link(&self) -> bool {
        self.target.as_ref() == Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_rejects_duplicate_ids() {
        let notes = vec![Note::new("1", "A", ""), Note::new("1", "B", "")];
        let err = NoteSnapshot::new(notes).unwrap_err();
        assert!(matches!(err, Error::ValidationError { .. }));
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let snapshot = NoteSnapshot::new(vec![
            Note::new("b", "Second", ""),
            Note::new("a", "First", ""),
        ])
        .unwrap();

        assert_eq!(snapshot.position(&NoteId::from("b")), Some(0));
        assert_eq!(snapshot.position(&NoteId::from("a")), Some(1));
        assert_eq!(snapshot.get(&NoteId::from("a")).unwrap().title, "First");
        assert!(snapshot.get(&NoteId::from("zzz")).is_none());
    }

    #[test]
    fn test_null_content_and_tags_default() {
        let json = r#"[
            {"id": "1", "title": "Loose", "content": null, "tags": null},
            {"id": "2", "title": "Missing"}
        ]"#;
        let snapshot = NoteSnapshot::from_json(json).unwrap();
        for note in &snapshot {
            assert_eq!(note.content, "");
            assert!(note.tags.is_empty());
        }
    }

    #[test]
    fn test_timestamps_parse() {
        let json = r#"[{"id": "1", "title": "T", "createdAt": "2024-03-01T10:00:00Z"}]"#;
        let snapshot = NoteSnapshot::from_json(json).unwrap();
        let note = snapshot.get(&NoteId::from("1")).unwrap();
        assert!(note.created_at.is_some());
        assert_eq!(note.last_touched(), note.created_at);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = NoteSnapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn test_link_kind_serializes_lowercase() {
        let json = serde_json::to_string(&LinkKind::Unresolved).unwrap();
        assert_eq!(json, "\"unresolved\"");
        assert_eq!(LinkKind::Alias.to_string(), "alias");
        assert!(!LinkKind::Unresolved.is_resolved());
    }

    #[test]
    fn test_word_count() {
        let note = Note::new("1", "T", "  one two\nthree  ");
        assert_eq!(note.word_count(), 3);
    }
}
