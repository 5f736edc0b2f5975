//! # Gardenlink Graph
//!
//! Link resolution and graph analysis for a garden of notes, using petgraph.
//!
//! Provides:
//! - Title and id lookup ([`TitleIndex`])
//! - Link resolution by id, alias, title and fuzzy fallback ([`LinkResolver`])
//! - Directed link graph with backlink queries ([`LinkGraph`])
//! - Orphan and broken-link detection, link frequency
//! - Similar-note ranking
//! - Garden health and activity statistics
//!
//! ## Quick Start
//!
//! ```
//! use gardenlink_core::{Note, NoteId, NoteSnapshot};
//! use gardenlink_graph::LinkGraph;
//!
//! let snapshot = NoteSnapshot::new(vec![
//!     Note::new("1", "Python Basics", "See [[Python Loops]]"),
//!     Note::new("2", "Python Loops", ""),
//! ])
//! .unwrap();
//!
//! let graph = LinkGraph::build(&snapshot);
//! assert_eq!(graph.backlinks(&NoteId::from("2")), vec![NoteId::from("1")]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: one per note, in snapshot order
//! - **Edges**: one per resolved link occurrence, so duplicates are counted
//! - **Neighbours**: de-duplicated and ordered by snapshot position
//!
//! Unresolved links never become edges; they are kept on the graph for the
//! broken-link report.
//!
//! ## Modules
//!
//! - [`index`] - Title and id tables
//! - [`resolver`] - Link resolution rules
//! - [`graph`] - LinkGraph implementation
//! - [`analytics`] - Orphans, broken links, frequencies
//! - [`similarity`] - Similar-note ranking
//! - [`health`] - Garden health report
//! - [`activity`] - Dashboard statistics

pub mod activity;
pub mod analytics;
pub mod graph;
pub mod health;
pub mod index;
pub mod resolver;
pub mod similarity;

pub use activity::{GardenStats, RecentNote};
pub use analytics::{
    BrokenLink, LinkFrequency, SuggestionOptions, find_broken_links, find_orphans, link_frequency,
    target_frequency,
};
pub use graph::{Adjacency, GraphEdge, GraphNode, GraphStats, GraphView, LinkGraph};
pub use health::{HealthAnalyzer, HealthReport, HubNote};
pub use index::TitleIndex;
pub use resolver::{LinkResolver, resolve_content};
pub use similarity::{SimilarNote, SimilarityOptions, similar_notes};

pub mod prelude {
    pub use crate::analytics::{BrokenLink, LinkFrequency, SuggestionOptions};
    pub use crate::graph::{GraphStats, GraphView, LinkGraph};
    pub use crate::health::{HealthAnalyzer, HealthReport};
    pub use crate::resolver::LinkResolver;
    pub use crate::similarity::{SimilarNote, SimilarityOptions};
    pub use gardenlink_core::prelude::*;
}
