//! # Gardenlink Search
//!
//! Approximate matching for incremental-filter UIs.
//!
//! Provides:
//! - [`fuzzy_match`]: the shared substring/subsequence scorer
//! - [`search_notes`] and [`advanced_search`]: ranked note lists
//! - [`rank_commands`]: command-palette filtering
//! - [`suggest_titles`]: `[[` link autocomplete
//!
//! Everything here is deterministic and side-effect free; ties always keep
//! the caller's input order.
//!
//! ## Quick Start
//!
//! ```
//! use gardenlink_core::Note;
//! use gardenlink_search::search_notes;
//!
//! let notes = vec![
//!     Note::new("1", "Python Basics", "Intro"),
//!     Note::new("2", "Gardening", "Tomatoes"),
//! ];
//!
//! let hits = search_notes(&notes, "python", 0.3);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].note.title, "Python Basics");
//! ```

pub mod fuzzy;
pub mod palette;
pub mod search;

pub use fuzzy::{FuzzyMatch, fuzzy_match};
pub use palette::{Command, RankedCommand, note_commands, rank_commands, suggest_titles};
pub use search::{SearchFilters, SearchHit, SortBy, advanced_search, search_notes};
