//! Command-palette ranking and `[[` link autocomplete.

use crate::fuzzy::fuzzy_match;
use gardenlink_core::Note;
use serde::{Deserialize, Serialize};

/// Category used for the per-note "open" commands
pub const NOTES_CATEGORY: &str = "Notes";

/// An entry in the command palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Command {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            tags: Vec::new(),
        }
    }
}

/// A command with its palette score
#[derive(Debug, Clone, Serialize)]
pub struct RankedCommand<'a> {
    pub command: &'a Command,
    pub score: f64,
}

/// One "open note" command per note, in snapshot order.
pub fn note_commands<'a, I>(notes: I) -> Vec<Command>
where
    I: IntoIterator<Item = &'a Note>,
{
    notes
        .into_iter()
        .map(|note| Command {
            id: format!("note-{}", note.id),
            title: note.title.clone(),
            description: format!("Open \"{}\"", note.title),
            category: NOTES_CATEGORY.to_string(),
            tags: note.tags.clone(),
        })
        .collect()
}

/// Rank commands against `query`.
///
/// Score is `max(title × 2, description, category, tags)`; only scores
/// strictly above `min_score` survive. A blank query keeps every command in
/// its original order.
pub fn rank_commands<'a>(commands: &'a [Command], query: &str, min_score: f64) -> Vec<RankedCommand<'a>> {
    if query.trim().is_empty() {
        return commands
            .iter()
            .map(|command| RankedCommand {
                command,
                score: 1.0,
            })
            .collect();
    }

    let mut ranked: Vec<RankedCommand<'a>> = commands
        .iter()
        .map(|command| {
            let tags = if command.tags.is_empty() {
                0.0
            } else {
                fuzzy_match(query, &command.tags.join(" ")).score
            };
            let score = [
                fuzzy_match(query, &command.title).score * 2.0,
                fuzzy_match(query, &command.description).score,
                fuzzy_match(query, &command.category).score,
                tags,
            ]
            .into_iter()
            .fold(0.0, f64::max);

            RankedCommand { command, score }
        })
        .filter(|ranked| ranked.score > min_score)
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Titles offered while typing inside `[[`.
///
/// Notes whose lower-cased title contains the lower-cased query, first
/// `limit` in snapshot order. A blank query offers nothing.
pub fn suggest_titles<'a, I>(notes: I, query: &str, limit: usize) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    notes
        .into_iter()
        .filter(|note| note.title.to_lowercase().contains(&query))
        .take(limit)
        .collect()
}
