//! Similar-note ranking by shared tags and word overlap.

use gardenlink_core::{EngineConfig, Note};
use gardenlink_parser::{jaccard, note_word_set};
use serde::Serialize;

/// Ranking parameters
#[derive(Debug, Clone, Copy)]
pub struct SimilarityOptions {
    /// Maximum number of results
    pub limit: usize,
    /// Jaccard score must exceed this to qualify without shared tags
    pub min_similarity: f64,
    /// Only the first `cap` candidates (snapshot order) are scored
    pub candidate_cap: Option<usize>,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            min_similarity: 0.0,
            candidate_cap: None,
        }
    }
}

impl From<&EngineConfig> for SimilarityOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            limit: config.similarity_limit,
            min_similarity: config.min_similarity,
            candidate_cap: config.similarity_candidate_cap,
        }
    }
}

/// A candidate note with its similarity to the target
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarNote<'a> {
    pub note: &'a Note,
    /// Jaccard index over title, content and tag words
    pub similarity: f64,
    /// Number of the target's tags the candidate also carries
    pub common_tags: usize,
}

/// Rank `candidates` by similarity to `target`.
///
/// Ordered by shared-tag count, then Jaccard score, both descending; ties
/// keep candidate order. The target itself is never returned. A target with
/// neither content nor tags has nothing to compare and yields no results.
pub fn similar_notes<'a, I>(target: &Note, candidates: I, options: SimilarityOptions) -> Vec<SimilarNote<'a>>
where
    I: IntoIterator<Item = &'a Note>,
{
    if target.content.is_empty() && target.tags.is_empty() {
        return Vec::new();
    }

    let target_words = note_word_set(target);
    let pool = candidates
        .into_iter()
        .filter(|note| note.id != target.id)
        .take(options.candidate_cap.unwrap_or(usize::MAX));

    let mut ranked: Vec<SimilarNote<'a>> = pool
        .map(|note| {
            let similarity = jaccard(&target_words, &note_word_set(note));
            let common_tags = target
                .tags
                .iter()
                .filter(|tag| note.tags.contains(tag))
                .count();
            SimilarNote {
                note,
                similarity,
                common_tags,
            }
        })
        .filter(|item| item.similarity > options.min_similarity || item.common_tags > 0)
        .collect();

    ranked.sort_by(|a, b| {
        b.common_tags
            .cmp(&a.common_tags)
            .then_with(|| b.similarity.total_cmp(&a.similarity))
    });
    ranked.truncate(options.limit);
    ranked
}
