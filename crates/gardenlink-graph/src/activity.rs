//! Dashboard statistics: sizes, creation activity, tags and link popularity.
//!
//! Calendar buckets are computed in UTC against a caller-supplied `now`.

use crate::analytics::{LinkFrequency, link_frequency};
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use gardenlink_core::{Note, NoteId, NoteSnapshot, ResolvedLink};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Longest streak reported, in days
pub const MAX_STREAK_DAYS: usize = 366;

/// A recently touched note
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentNote {
    pub id: NoteId,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate statistics for the whole garden
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenStats {
    pub total_notes: usize,
    pub total_words: usize,
    /// Rounded to the nearest word
    pub average_words: usize,
    pub created_today: usize,
    /// Weeks start on Sunday
    pub created_this_week: usize,
    pub created_this_month: usize,
    pub top_tags: Vec<LinkFrequency>,
    /// Link texts by raw occurrence count
    pub most_linked: Vec<LinkFrequency>,
    pub recent_notes: Vec<RecentNote>,
    /// Consecutive days ending today with at least one note created
    pub writing_streak: usize,
}

impl GardenStats {
    /// Compute statistics; `top_n` bounds every ranked list
    pub fn compute(
        snapshot: &NoteSnapshot,
        links: &[ResolvedLink],
        now: DateTime<Utc>,
        top_n: usize,
    ) -> Self {
        let total_notes = snapshot.len();
        let total_words: usize = snapshot.iter().map(Note::word_count).sum();
        let average_words = if total_notes > 0 {
            (total_words as f64 / total_notes as f64).round() as usize
        } else {
            0
        };

        let today = now.date_naive();
        let week_start = today - TimeDelta::days(i64::from(today.weekday().num_days_from_sunday()));
        let created: Vec<NaiveDate> = snapshot
            .iter()
            .filter_map(|note| note.created_at)
            .map(|at| at.date_naive())
            .filter(|date| *date <= today)
            .collect();

        let created_today = created.iter().filter(|date| **date == today).count();
        let created_this_week = created.iter().filter(|date| **date >= week_start).count();
        let created_this_month = created
            .iter()
            .filter(|date| date.year() == today.year() && date.month() == today.month())
            .count();

        let mut most_linked = link_frequency(links);
        most_linked.truncate(top_n);

        Self {
            total_notes,
            total_words,
            average_words,
            created_today,
            created_this_week,
            created_this_month,
            top_tags: top_tags(snapshot, top_n),
            most_linked,
            recent_notes: recent_notes(snapshot, top_n),
            writing_streak: writing_streak(&created, today),
        }
    }
}

/// Tags by number of notes carrying them; ties keep first appearance
fn top_tags(snapshot: &NoteSnapshot, top_n: usize) -> Vec<LinkFrequency> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for tag in snapshot.iter().flat_map(|note| note.tags.iter()) {
        let count = counts.entry(tag.as_str()).or_insert(0);
        if *count == 0 {
            order.push(tag);
        }
        *count += 1;
    }

    let mut tags: Vec<LinkFrequency> = order
        .into_iter()
        .map(|tag| LinkFrequency {
            key: tag.to_string(),
            count: counts[tag],
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags.truncate(top_n);
    tags
}

/// Most recently updated (or created) notes first
fn recent_notes(snapshot: &NoteSnapshot, top_n: usize) -> Vec<RecentNote> {
    let mut recent: Vec<RecentNote> = snapshot
        .iter()
        .filter_map(|note| {
            note.last_touched().map(|updated_at| RecentNote {
                id: note.id.clone(),
                title: note.title.clone(),
                updated_at,
            })
        })
        .collect();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    recent.truncate(top_n);
    recent
}

fn writing_streak(created: &[NaiveDate], today: NaiveDate) -> usize {
    let days: HashSet<NaiveDate> = created.iter().copied().collect();
    let mut day = today;
    let mut streak = 0;

    while streak < MAX_STREAK_DAYS && days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LinkResolver;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    // Wednesday
    fn now() -> DateTime<Utc> {
        at(2024, 3, 13, 12)
    }

    fn garden() -> NoteSnapshot {
        NoteSnapshot::new(vec![
            Note::new("1", "Today", "one two three [[Week]]")
                .with_tags(["rust", "daily"])
                .with_timestamps(at(2024, 3, 13, 9), None),
            Note::new("2", "Week", "one two")
                .with_tags(["rust"])
                .with_timestamps(at(2024, 3, 12, 8), Some(at(2024, 3, 13, 11))),
            Note::new("3", "Monday", "[[Week]]")
                .with_tags(["daily", "rust"])
                .with_timestamps(at(2024, 3, 11, 8), None),
            Note::new("4", "Saturday", "")
                .with_timestamps(at(2024, 3, 9, 8), None),
            Note::new("5", "February", "words words words words")
                .with_tags(["archive"])
                .with_timestamps(at(2024, 2, 28, 8), None),
            Note::new("6", "Undated", "x"),
        ])
        .unwrap()
    }

    fn stats(top_n: usize) -> GardenStats {
        let snapshot = garden();
        let links = LinkResolver::new(&snapshot).resolve_all();
        GardenStats::compute(&snapshot, &links, now(), top_n)
    }

    #[test]
    fn test_totals() {
        let stats = stats(5);
        assert_eq!(stats.total_notes, 6);
        assert_eq!(stats.total_words, 4 + 2 + 1 + 0 + 4 + 1);
        // 12 / 6
        assert_eq!(stats.average_words, 2);
    }

    #[test]
    fn test_calendar_buckets() {
        let stats = stats(5);
        assert_eq!(stats.created_today, 1);
        // Sunday 10th through Wednesday 13th
        assert_eq!(stats.created_this_week, 3);
        assert_eq!(stats.created_this_month, 4);
    }

    #[test]
    fn test_writing_streak_stops_at_gap() {
        assert_eq!(stats(5).writing_streak, 3);
    }

    #[test]
    fn test_streak_needs_a_note_today() {
        let created = vec![NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()];
        let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        assert_eq!(writing_streak(&created, today), 0);
    }

    #[test]
    fn test_streak_is_capped() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let created: Vec<NaiveDate> = (0..500).map(|n| today - TimeDelta::days(n)).collect();
        assert_eq!(writing_streak(&created, today), MAX_STREAK_DAYS);
    }

    #[test]
    fn test_top_tags_and_most_linked() {
        let stats = stats(2);
        let tags: Vec<(&str, usize)> = stats
            .top_tags
            .iter()
            .map(|t| (t.key.as_str(), t.count))
            .collect();
        assert_eq!(tags, vec![("rust", 3), ("daily", 2)]);

        assert_eq!(stats.most_linked.len(), 1);
        assert_eq!(stats.most_linked[0].key, "Week");
        assert_eq!(stats.most_linked[0].count, 2);
    }

    #[test]
    fn test_recent_notes_use_last_touched() {
        let stats = stats(3);
        let recent: Vec<&str> = stats.recent_notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(recent, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_empty_garden() {
        let snapshot = NoteSnapshot::new(Vec::new()).unwrap();
        let stats = GardenStats::compute(&snapshot, &[], now(), 5);
        assert_eq!(stats.total_notes, 0);
        assert_eq!(stats.average_words, 0);
        assert_eq!(stats.writing_streak, 0);
        assert!(stats.top_tags.is_empty());
    }
}
