//! Whitespace word tokenization shared by similarity ranking and stats.

use gardenlink_core::Note;
use std::collections::HashSet;

/// Lower-cased, whitespace-separated words of `text`, deduplicated.
pub fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Word set over a note's title, content and tags.
pub fn note_word_set(note: &Note) -> HashSet<String> {
    let mut words = word_set(&note.title);
    words.extend(word_set(&note.content));
    for tag in &note.tags {
        words.extend(word_set(tag));
    }
    words
}

/// Jaccard index of two word sets; zero when both are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}
