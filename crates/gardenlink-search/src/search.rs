//! Note search built on [`fuzzy_match`].
//!
//! Two entry points:
//! - [`search_notes`]: incremental filter over title, content and tags
//! - [`advanced_search`]: fuzzy query plus tag, date and word-count filters

use crate::fuzzy::{FuzzyMatch, fuzzy_match};
use chrono::{DateTime, Utc};
use gardenlink_core::Note;
use serde::Serialize;
use std::cmp::Ordering;

/// Title hits count double against content and tag hits
const TITLE_BOOST: f64 = 2.0;

/// A note with its search score
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub note: &'a Note,
    pub score: f64,
    /// Char positions of a subsequence hit in the searched text, when any
    pub positions: Vec<usize>,
}

/// Rank notes by how well `query` matches them.
///
/// Score is `max(title × 2, content, tags)`; hits below `min_score` are
/// dropped and ties keep snapshot order. A `min_score` of `0.0` keeps
/// notes that do not match at all. A blank query returns every note
/// with score `1.0`.
pub fn search_notes<'a, I>(notes: I, query: &str, min_score: f64) -> Vec<SearchHit<'a>>
where
    I: IntoIterator<Item = &'a Note>,
{
    if query.trim().is_empty() {
        return notes
            .into_iter()
            .map(|note| SearchHit {
                note,
                score: 1.0,
                positions: Vec::new(),
            })
            .collect();
    }

    let mut hits: Vec<SearchHit<'a>> = notes
        .into_iter()
        .filter_map(|note| {
            let title = fuzzy_match(query, &note.title);
            let content = fuzzy_match(query, &note.content);
            let tags = if note.tags.is_empty() {
                FuzzyMatch::none()
            } else {
                fuzzy_match(query, &note.tags.join(" "))
            };

            let title_score = title.score * TITLE_BOOST;
            let (score, positions) = [
                (title_score, title.positions),
                (content.score, content.positions),
                (tags.score, tags.positions),
            ]
            .into_iter()
            .fold((0.0, Vec::new()), |best, candidate| {
                if candidate.0 > best.0 { candidate } else { best }
            });

            (score >= min_score).then_some(SearchHit {
                note,
                score,
                positions,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    log::debug!("search '{}' matched {} notes", query, hits.len());
    hits
}

/// Result ordering for [`advanced_search`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Score descending; newest first when there is no query
    #[default]
    Relevance,
    Newest,
    Oldest,
    Alphabetical,
    WordCount,
}

/// Filters for [`advanced_search`]
#[derive(Debug, Clone)]
pub struct SearchFilters {
    pub query: String,
    /// Keep notes having any tag that contains one of these (case-insensitive)
    pub tags: Vec<String>,
    /// Inclusive bounds on last-touched time
    pub updated_after: Option<DateTime<Utc>>,
    pub updated_before: Option<DateTime<Utc>>,
    pub min_words: usize,
    pub max_words: Option<usize>,
    pub include_title: bool,
    pub include_content: bool,
    pub min_score: f64,
    pub sort_by: SortBy,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            tags: Vec::new(),
            updated_after: None,
            updated_before: None,
            min_words: 0,
            max_words: None,
            include_title: true,
            include_content: true,
            min_score: 0.1,
            sort_by: SortBy::Relevance,
        }
    }
}

impl SearchFilters {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn between(mut self, after: Option<DateTime<Utc>>, before: Option<DateTime<Utc>>) -> Self {
        self.updated_after = after;
        self.updated_before = before;
        self
    }

    pub fn word_range(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_words = min;
        self.max_words = max;
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    fn has_date_range(&self) -> bool {
        self.updated_after.is_some() || self.updated_before.is_some()
    }
}

/// Fuzzy search with structured filters.
///
/// The query is matched against one string built from the title (if
/// enabled), the content (if enabled) and the tags. Hits need a score
/// strictly above `filters.min_score`. Notes without timestamps are dropped
/// whenever a date bound is set.
pub fn advanced_search<'a, I>(notes: I, filters: &SearchFilters) -> Vec<SearchHit<'a>>
where
    I: IntoIterator<Item = &'a Note>,
{
    let has_query = !filters.query.trim().is_empty();

    let mut hits: Vec<SearchHit<'a>> = notes
        .into_iter()
        .filter_map(|note| {
            if !has_query {
                return Some(SearchHit {
                    note,
                    score: 0.0,
                    positions: Vec::new(),
                });
            }
            let m = fuzzy_match(&filters.query, &searchable_text(note, filters));
            (m.score > filters.min_score).then_some(SearchHit {
                note,
                score: m.score,
                positions: m.positions,
            })
        })
        .filter(|hit| matches_tags(hit.note, &filters.tags))
        .filter(|hit| !filters.has_date_range() || within_dates(hit.note, filters))
        .filter(|hit| {
            let words = hit.note.word_count();
            words >= filters.min_words && filters.max_words.is_none_or(|max| words <= max)
        })
        .collect();

    match filters.sort_by {
        SortBy::Relevance if has_query => hits.sort_by(|a, b| b.score.total_cmp(&a.score)),
        SortBy::Relevance | SortBy::Newest => hits.sort_by(|a, b| newest_first(a.note, b.note)),
        SortBy::Oldest => hits.sort_by(|a, b| oldest_first(a.note, b.note)),
        SortBy::Alphabetical => hits.sort_by(|a, b| {
            a.note
                .title
                .to_lowercase()
                .cmp(&b.note.title.to_lowercase())
                .then_with(|| a.note.title.cmp(&b.note.title))
        }),
        SortBy::WordCount => hits.sort_by(|a, b| b.note.word_count().cmp(&a.note.word_count())),
    }

    hits
}

fn searchable_text(note: &Note, filters: &SearchFilters) -> String {
    let mut text = String::new();
    if filters.include_title {
        text.push_str(&note.title);
        text.push(' ');
    }
    if filters.include_content {
        text.push_str(&note.content);
        text.push(' ');
    }
    text.push_str(&note.tags.join(" "));
    text
}

fn matches_tags(note: &Note, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    wanted.iter().any(|tag| {
        let tag = tag.to_lowercase();
        note.tags
            .iter()
            .any(|note_tag| note_tag.to_lowercase().contains(&tag))
    })
}

fn within_dates(note: &Note, filters: &SearchFilters) -> bool {
    let Some(touched) = note.last_touched() else {
        return false;
    };
    filters.updated_after.is_none_or(|start| touched >= start)
        && filters.updated_before.is_none_or(|end| touched <= end)
}

/// Most recently touched first; undated notes sink to the end.
fn newest_first(a: &Note, b: &Note) -> Ordering {
    match (a.last_touched(), b.last_touched()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Earliest created first; undated notes sink to the end.
fn oldest_first(a: &Note, b: &Note) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
