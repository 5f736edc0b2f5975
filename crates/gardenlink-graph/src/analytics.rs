//! Derived link views: orphans, broken links and reference counts.
//!
//! Each query is a pure function of the snapshot and its resolved links.

use gardenlink_core::{EngineConfig, Note, NoteId, NoteSnapshot, ResolvedLink};
use gardenlink_search::fuzzy_match;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A link that matched no note
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenLink {
    /// Note containing the link
    pub source: NoteId,
    pub source_title: String,
    /// Trimmed inner text the author wrote
    pub target_title: String,
    /// The full `[[...]]` markup
    pub link_text: String,
    /// Byte offset in the source content
    pub offset: usize,
    /// Existing titles that look close, best first
    pub suggestions: Vec<String>,
}

/// How broken-link suggestions are gathered
#[derive(Debug, Clone, Copy)]
pub struct SuggestionOptions {
    /// Zero disables suggestions
    pub limit: usize,
    pub min_score: f64,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            min_score: 0.3,
        }
    }
}

impl From<&EngineConfig> for SuggestionOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            limit: config.broken_link_suggestions,
            min_score: config.min_suggestion_score,
        }
    }
}

/// Notes that no other note links to.
///
/// A self-link does not count as a reference.
pub fn find_orphans<'a>(snapshot: &'a NoteSnapshot, links: &[ResolvedLink]) -> Vec<&'a Note> {
    let referenced: HashSet<&NoteId> = links
        .iter()
        .filter(|link| !link.is_self_link())
        .filter_map(|link| link.target.as_ref())
        .collect();

    snapshot
        .iter()
        .filter(|note| !referenced.contains(&note.id))
        .collect()
}

/// Every unresolved occurrence, in snapshot then content order
pub fn find_broken_links(
    snapshot: &NoteSnapshot,
    links: &[ResolvedLink],
    options: SuggestionOptions,
) -> Vec<BrokenLink> {
    links
        .iter()
        .filter(|link| !link.kind.is_resolved())
        .map(|link| BrokenLink {
            source: link.source.clone(),
            source_title: snapshot
                .get(&link.source)
                .map(|note| note.title.clone())
                .unwrap_or_default(),
            target_title: link.inner_text.clone(),
            link_text: link.raw_text.clone(),
            offset: link.offset,
            suggestions: suggest_targets(snapshot, &link.inner_text, options),
        })
        .collect()
}

/// Existing titles that fuzzily match a broken target
fn suggest_targets(snapshot: &NoteSnapshot, target: &str, options: SuggestionOptions) -> Vec<String> {
    if options.limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &str)> = snapshot
        .iter()
        .filter(|note| !note.title.trim().is_empty())
        .filter_map(|note| {
            let score = fuzzy_match(target, &note.title).score;
            (score >= options.min_score && score > 0.0).then_some((score, note.title.as_str()))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut seen = HashSet::new();
    scored
        .into_iter()
        .filter(|(_, title)| seen.insert(title.to_lowercase()))
        .take(options.limit)
        .map(|(_, title)| title.to_string())
        .collect()
}

/// Reference count for one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkFrequency {
    pub key: String,
    pub count: usize,
}

/// Raw occurrence counts per written link text (resolved or not).
///
/// Sorted by descending count; ties keep first-appearance order.
pub fn link_frequency(links: &[ResolvedLink]) -> Vec<LinkFrequency> {
    count_by_key(links.iter().map(|link| link.inner_text.clone()))
}

/// Raw occurrence counts per resolved target note id.
///
/// Sorted by descending count; ties keep first-appearance order.
pub fn target_frequency(links: &[ResolvedLink]) -> Vec<LinkFrequency> {
    count_by_key(
        links
            .iter()
            .filter_map(|link| link.target.as_ref())
            .map(|id| id.to_string()),
    )
}

fn count_by_key(keys: impl Iterator<Item = String>) -> Vec<LinkFrequency> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for key in keys {
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    let mut frequencies: Vec<LinkFrequency> = order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            LinkFrequency { key, count }
        })
        .collect();

    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies
}
