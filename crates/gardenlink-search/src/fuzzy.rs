//! Approximate substring / subsequence scorer.
//!
//! Scores live in `[0, 1]`:
//! - empty pattern: `1.0`
//! - case-insensitive substring: `0.9`
//! - in-order subsequence: `matched / pattern_len * 0.8`
//! - anything else: `0.0`
//!
//! Case folding is plain Unicode lowercasing, not locale-aware collation.

use serde::Serialize;

/// Fixed score for a literal substring hit
pub const SUBSTRING_SCORE: f64 = 0.9;

/// Multiplier applied to subsequence hits
pub const SUBSEQUENCE_WEIGHT: f64 = 0.8;

/// Result of matching one pattern against one text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub score: f64,
    /// Char indices into the lower-cased text; only filled for subsequence hits
    pub positions: Vec<usize>,
}

impl FuzzyMatch {
    fn scored(score: f64) -> Self {
        Self {
            score,
            positions: Vec::new(),
        }
    }

    /// A non-match
    pub fn none() -> Self {
        Self::scored(0.0)
    }

    pub fn is_match(&self) -> bool {
        self.score > 0.0
    }
}

/// Score `pattern` against `text`.
///
/// # Example
/// ```
/// use gardenlink_search::fuzzy_match;
///
/// assert_eq!(fuzzy_match("", "anything").score, 1.0);
/// assert_eq!(fuzzy_match("abc", "xabcx").score, 0.9);
/// assert_eq!(fuzzy_match("ac", "abc").score, 0.8);
/// assert_eq!(fuzzy_match("xyz", "abc").score, 0.0);
/// ```
pub fn fuzzy_match(pattern: &str, text: &str) -> FuzzyMatch {
    let pattern_lower = pattern.to_lowercase();
    if pattern_lower.is_empty() {
        return FuzzyMatch::scored(1.0);
    }

    let text_lower = text.to_lowercase();
    if text_lower.contains(&pattern_lower) {
        return FuzzyMatch::scored(SUBSTRING_SCORE);
    }

    let needle: Vec<char> = pattern_lower.chars().collect();
    let mut positions = Vec::with_capacity(needle.len());

    for (idx, ch) in text_lower.chars().enumerate() {
        if positions.len() == needle.len() {
            break;
        }
        if ch == needle[positions.len()] {
            positions.push(idx);
        }
    }

    if positions.len() < needle.len() {
        return FuzzyMatch::none();
    }

    FuzzyMatch {
        score: positions.len() as f64 / needle.len() as f64 * SUBSEQUENCE_WEIGHT,
        positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern_matches_everything() {
        let m = fuzzy_match("", "anything");
        assert_eq!(m.score, 1.0);
        assert!(m.positions.is_empty());

        assert_eq!(fuzzy_match("", "").score, 1.0);
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        assert_eq!(fuzzy_match("abc", "xabcx").score, 0.9);
        assert_eq!(fuzzy_match("PYTHON", "learning python").score, 0.9);
        assert!(fuzzy_match("abc", "xABCx").positions.is_empty());
    }

    #[test]
    fn test_subsequence_records_positions() {
        let m = fuzzy_match("ac", "abc");
        assert!((m.score - 0.8).abs() < f64::EPSILON);
        assert_eq!(m.positions, vec![0, 2]);

        let m = fuzzy_match("pbs", "Python Basics");
        assert!((m.score - 0.8).abs() < f64::EPSILON);
        assert_eq!(m.positions, vec![0, 7, 9]);
    }

    #[test]
    fn test_greedy_scan_takes_first_candidate() {
        let m = fuzzy_match("ab", "aXaXb");
        assert_eq!(m.positions, vec![0, 4]);
    }

    #[test]
    fn test_incomplete_subsequence_scores_zero() {
        let m = fuzzy_match("xyz", "abc");
        assert_eq!(m.score, 0.0);
        assert!(m.positions.is_empty());

        let m = fuzzy_match("acz", "abc");
        assert_eq!(m.score, 0.0);
        assert!(m.positions.is_empty());
        assert!(!m.is_match());
    }

    #[test]
    fn test_pattern_longer_than_text() {
        assert_eq!(fuzzy_match("abcdef", "abc").score, 0.0);
        assert_eq!(fuzzy_match("a", "").score, 0.0);
    }

    #[test]
    fn test_unicode_positions_are_char_indices() {
        let m = fuzzy_match("éz", "éaz");
        assert_eq!(m.positions, vec![0, 2]);
    }

    #[test]
    fn test_score_never_exceeds_one() {
        // 'İ' lower-cases to two chars; the score must still stay in range
        for (pattern, text) in [("İx", "i\u{307}ax"), ("ß", "SS"), ("ǅ", "ǆ")] {
            let score = fuzzy_match(pattern, text).score;
            assert!((0.0..=1.0).contains(&score), "{} vs {}: {}", pattern, text, score);
        }
    }
}
