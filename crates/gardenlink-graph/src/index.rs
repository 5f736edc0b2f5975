//! Title and id lookup tables for one snapshot.

use gardenlink_core::{NoteId, NoteSnapshot};
use std::collections::HashMap;

/// Lookup structures rebuilt from scratch for every resolution pass.
#[derive(Debug, Clone)]
pub struct TitleIndex<'a> {
    /// Lower-cased title to note id; the first note in snapshot order wins
    by_title: HashMap<String, &'a NoteId>,
    /// Id to id, for existence checks on `[[id:...]]` links
    by_id: HashMap<&'a str, &'a NoteId>,
}

impl<'a> TitleIndex<'a> {
    /// Build both tables from the snapshot
    pub fn build(snapshot: &'a NoteSnapshot) -> Self {
        let mut by_title = HashMap::with_capacity(snapshot.len());
        let mut by_id = HashMap::with_capacity(snapshot.len());

        for note in snapshot {
            by_title.entry(note.title.to_lowercase()).or_insert(&note.id);
            by_id.insert(note.id.as_str(), &note.id);
        }

        Self { by_title, by_id }
    }

    /// Case-insensitive title lookup
    pub fn by_title(&self, title: &str) -> Option<&'a NoteId> {
        self.by_title.get(&title.to_lowercase()).copied()
    }

    /// Exact id lookup
    pub fn by_id(&self, id: &str) -> Option<&'a NoteId> {
        self.by_id.get(id).copied()
    }

    /// Number of distinct lower-cased titles
    pub fn title_count(&self) -> usize {
        self.by_title.len()
    }
}
