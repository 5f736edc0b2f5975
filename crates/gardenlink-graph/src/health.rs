//! Garden health analysis.
//!
//! Summarizes link hygiene (broken links, orphans, dead ends) and the most
//! connected notes, and folds the ratios into a single 0-100 score.

use crate::analytics::{BrokenLink, SuggestionOptions, find_broken_links, find_orphans};
use crate::graph::LinkGraph;
use gardenlink_core::{NoteId, NoteSnapshot};
use serde::Serialize;

/// A highly connected note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubNote {
    pub id: NoteId,
    pub title: String,
    /// Distinct notes linked to or from, self excluded
    pub connections: usize,
}

/// Health analysis report for the garden
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Total number of notes
    pub total_notes: usize,
    /// Total number of link occurrences, unresolved ones included
    pub total_links: usize,
    /// Broken links found
    pub broken_links: Vec<BrokenLink>,
    /// Notes no other note links to
    pub orphaned_notes: Vec<NoteId>,
    /// Notes that are linked to but link nowhere
    pub dead_end_notes: Vec<NoteId>,
    /// Hub notes (highly connected nodes)
    pub hub_notes: Vec<HubNote>,
    /// Overall health score (0-100)
    pub health_score: u8,
}

impl HealthReport {
    /// Create a new empty health report
    pub fn new() -> Self {
        Self {
            total_notes: 0,
            total_links: 0,
            broken_links: Vec::new(),
            orphaned_notes: Vec::new(),
            dead_end_notes: Vec::new(),
            hub_notes: Vec::new(),
            health_score: 100,
        }
    }

    /// Calculate health score based on issues
    pub fn calculate_score(&mut self) {
        if self.total_notes == 0 {
            self.health_score = 0;
            return;
        }

        let notes = self.total_notes as f64;
        let mut score: u8 = 100;

        // Broken links cost up to 30 points
        let broken_ratio = self.broken_links.len() as f64 / self.total_links.max(1) as f64;
        score = score.saturating_sub((broken_ratio * 30.0) as u8);

        // Orphans up to 20
        let orphaned_ratio = self.orphaned_notes.len() as f64 / notes;
        score = score.saturating_sub((orphaned_ratio * 20.0) as u8);

        // Dead ends up to 10
        let dead_end_ratio = self.dead_end_notes.len() as f64 / notes;
        score = score.saturating_sub((dead_end_ratio * 10.0) as u8);

        self.health_score = score;
    }

    /// Check if the garden is healthy (score >= 80)
    pub fn is_healthy(&self) -> bool {
        self.health_score >= 80
    }
}

impl Default for HealthReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Garden health analyzer
pub struct HealthAnalyzer<'a> {
    snapshot: &'a NoteSnapshot,
    graph: &'a LinkGraph,
}

impl<'a> HealthAnalyzer<'a> {
    /// Create a new health analyzer over a snapshot and its graph
    pub fn new(snapshot: &'a NoteSnapshot, graph: &'a LinkGraph) -> Self {
        Self { snapshot, graph }
    }

    /// Run a full health analysis
    pub fn analyze(&self, top_n: usize, suggestions: SuggestionOptions) -> HealthReport {
        let links = self.graph.links();

        let mut report = HealthReport {
            total_notes: self.snapshot.len(),
            total_links: links.len(),
            broken_links: find_broken_links(self.snapshot, links, suggestions),
            orphaned_notes: find_orphans(self.snapshot, links)
                .into_iter()
                .map(|note| note.id.clone())
                .collect(),
            dead_end_notes: self.find_dead_end_notes(),
            hub_notes: self.find_hub_notes(top_n),
            ..HealthReport::new()
        };
        report.calculate_score();

        log::debug!(
            "Health: score {} ({} broken, {} orphaned, {} dead ends)",
            report.health_score,
            report.broken_links.len(),
            report.orphaned_notes.len(),
            report.dead_end_notes.len()
        );

        report
    }

    /// Notes with incoming links from elsewhere but no outgoing links
    fn find_dead_end_notes(&self) -> Vec<NoteId> {
        self.snapshot
            .iter()
            .map(|note| &note.id)
            .filter(|id| {
                let outgoing = self.foreign(self.graph.outgoing(id), id);
                let incoming = self.foreign(self.graph.incoming(id), id);
                outgoing == 0 && incoming > 0
            })
            .cloned()
            .collect()
    }

    /// Find hub notes (notes with many connections)
    fn find_hub_notes(&self, limit: usize) -> Vec<HubNote> {
        let mut hubs: Vec<HubNote> = self
            .snapshot
            .iter()
            .filter_map(|note| {
                let connections = self.foreign(self.graph.incoming(&note.id), &note.id)
                    + self.foreign(self.graph.outgoing(&note.id), &note.id);
                (connections > 0).then(|| HubNote {
                    id: note.id.clone(),
                    title: note.title.clone(),
                    connections,
                })
            })
            .collect();

        // Stable, so equal counts keep snapshot order
        hubs.sort_by(|a, b| b.connections.cmp(&a.connections));
        hubs.truncate(limit);
        hubs
    }

    fn foreign(&self, neighbors: Vec<NoteId>, id: &NoteId) -> usize {
        neighbors.iter().filter(|other| *other != id).count()
    }
}
