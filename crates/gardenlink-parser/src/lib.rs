//! # Gardenlink Parser
//!
//! Wiki-link extraction for note content.
//!
//! This crate provides:
//! - Extraction of `[[...]]` spans in left-to-right order, with byte offsets
//! - Classification of a span's inner text into its candidate readings
//!   (`id:<token>`, `Title|Display`, bare title)
//! - Canonical link rendering for the three wire forms
//! - Word tokenization used by similarity ranking
//!
//! Extraction is pure and total: malformed markup is plain text, never an error.
//!
//! ## Quick Start
//!
//! ```
//! use gardenlink_parser::{classify_link, extract_links};
//!
//! let links = extract_links("See [[Python Loops]] and [[Python Basics|intro]]");
//! assert_eq!(links.len(), 2);
//!
//! let syntax = classify_link(&links[1].inner_text);
//! assert_eq!(syntax.alias.unwrap().display, "intro");
//! ```
//!
//! ## Wire Format
//!
//! - `[[Target]]`
//! - `[[Target|Display Text]]`
//! - `[[id:<id>]]`
//!
//! There is no escape for `]]`; titles containing `]` cannot be linked.

pub mod link_utils;
pub mod wikilinks;
pub mod words;

pub use link_utils::{AliasParts, LinkSyntax, classify_link, format_id_link, format_link};
pub use wikilinks::{Wikilinks, extract_links, wikilinks};
pub use words::{jaccard, note_word_set, word_set};

// Re-export core types for consumers
pub use gardenlink_core::LinkOccurrence;
