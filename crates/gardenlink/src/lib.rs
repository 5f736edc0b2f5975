//! # Gardenlink
//!
//! Wiki-link resolution and knowledge-graph engine for a personal garden of
//! notes. [`GardenEngine`] is a configured facade over the parser, search and
//! graph crates.
//!
//! ## Quick Start
//!
//! ```
//! use gardenlink::prelude::*;
//!
//! let snapshot = NoteSnapshot::new(vec![
//!     Note::new("1", "Python Basics", "See [[Python Loops]]"),
//!     Note::new("2", "Python Loops", ""),
//! ])
//! .unwrap();
//!
//! let engine = GardenEngine::default();
//! let backlinks = engine.backlinks(&snapshot, &NoteId::from("2")).unwrap();
//! assert_eq!(backlinks, vec![NoteId::from("1")]);
//!
//! let orphans = engine.orphans(&snapshot);
//! assert_eq!(orphans[0].title, "Python Basics");
//! ```

pub mod engine;

pub use engine::GardenEngine;
pub use gardenlink_core::{ConfigProfile, EngineConfig, Error, Result};

pub mod prelude {
    pub use crate::engine::GardenEngine;
    pub use gardenlink_graph::prelude::*;
    pub use gardenlink_search::{Command, SearchFilters, SortBy, note_commands};
}
