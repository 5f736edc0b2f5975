//! Link graph using petgraph for note relationship analysis

use crate::resolver::LinkResolver;
use gardenlink_core::prelude::*;
use petgraph::Direction;
use petgraph::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Node index type for graph
type NodeIndex = petgraph::graph::NodeIndex;

/// Directed multigraph of notes and the resolved links between them.
///
/// Every resolved link is one edge, so duplicate references stay countable;
/// the neighbour queries expose a de-duplicated view. Unresolved links are
/// kept alongside for the broken-link report but never become edges.
pub struct LinkGraph {
    /// Nodes are note ids in snapshot order, edges carry the link kind
    graph: DiGraph<NoteId, LinkKind>,

    /// Map from note id to node index
    node_index: HashMap<NoteId, NodeIndex>,

    /// Every resolved link, including unresolved ones
    links: Vec<ResolvedLink>,
}

impl LinkGraph {
    /// Resolve every link in the snapshot and build the graph
    pub fn build(snapshot: &NoteSnapshot) -> Self {
        let links = LinkResolver::new(snapshot).resolve_all();
        Self::from_links(snapshot, links)
    }

    /// Build the graph from an already-resolved link list
    pub fn from_links(snapshot: &NoteSnapshot, links: Vec<ResolvedLink>) -> Self {
        let mut graph = DiGraph::with_capacity(snapshot.len(), links.len());
        let mut node_index = HashMap::with_capacity(snapshot.len());

        for note in snapshot {
            let idx = graph.add_node(note.id.clone());
            node_index.insert(note.id.clone(), idx);
        }

        for link in &links {
            let Some(target) = &link.target else {
                continue;
            };
            if let (Some(&source_idx), Some(&target_idx)) =
                (node_index.get(&link.source), node_index.get(target))
            {
                graph.add_edge(source_idx, target_idx, link.kind);
            }
        }

        log::debug!(
            "Built link graph: {} notes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Self {
            graph,
            node_index,
            links,
        }
    }

    /// All resolved links, in snapshot then content order
    pub fn links(&self) -> &[ResolvedLink] {
        &self.links
    }

    /// Links that matched no note
    pub fn unresolved_links(&self) -> impl Iterator<Item = &ResolvedLink> {
        self.links.iter().filter(|link| !link.kind.is_resolved())
    }

    fn neighbors_sorted(&self, id: &NoteId, direction: Direction) -> Vec<NoteId> {
        let Some(&idx) = self.node_index.get(id) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(idx, direction)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Notes this note links to, de-duplicated, in snapshot order
    pub fn outgoing(&self, id: &NoteId) -> Vec<NoteId> {
        self.neighbors_sorted(id, Outgoing)
    }

    /// Notes linking to this note, de-duplicated, in snapshot order
    pub fn incoming(&self, id: &NoteId) -> Vec<NoteId> {
        self.neighbors_sorted(id, Incoming)
    }

    /// Alias for [`LinkGraph::incoming`]
    pub fn backlinks(&self, id: &NoteId) -> Vec<NoteId> {
        self.incoming(id)
    }

    /// Every resolved link targeting this note (one per occurrence)
    pub fn incoming_links(&self, id: &NoteId) -> Vec<&ResolvedLink> {
        self.links
            .iter()
            .filter(|link| link.target.as_ref() == Some(id))
            .collect()
    }

    /// Every link written in this note, unresolved ones included
    pub fn outgoing_links(&self, id: &NoteId) -> Vec<&ResolvedLink> {
        self.links.iter().filter(|link| &link.source == id).collect()
    }

    /// Outgoing and incoming sets for every note
    pub fn adjacency(&self) -> HashMap<NoteId, Adjacency> {
        self.graph
            .node_indices()
            .map(|idx| {
                let id = self.graph[idx].clone();
                let adjacency = Adjacency {
                    outgoing: self.outgoing(&id),
                    incoming: self.incoming(&id),
                };
                (id, adjacency)
            })
            .collect()
    }

    /// De-duplicated edges ordered by source then target snapshot position
    pub fn unique_edges(&self) -> Vec<GraphEdge> {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|(source, target)| GraphEdge {
                source: self.graph[source].clone(),
                target: self.graph[target].clone(),
            })
            .collect()
    }

    /// Notes reachable within `max_hops`, following links in both directions.
    ///
    /// Breadth-first; nearer notes come first, ties in snapshot order.
    pub fn related_notes(&self, id: &NoteId, max_hops: usize) -> Vec<NoteId> {
        let Some(&start) = self.node_index.get(id) else {
            return Vec::new();
        };

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);
        let mut related = Vec::new();

        while let Some((idx, hops)) = queue.pop_front() {
            if hops > 0 {
                related.push(self.graph[idx].clone());
            }
            if hops == max_hops {
                continue;
            }

            let neighbors: BTreeSet<NodeIndex> = self
                .graph
                .neighbors_directed(idx, Outgoing)
                .chain(self.graph.neighbors_directed(idx, Incoming))
                .collect();
            for neighbor in neighbors {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, hops + 1));
                }
            }
        }

        related
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let node_count = self.graph.node_count();
        let edge_count = self.graph.edge_count();

        let orphaned_notes = self
            .graph
            .node_indices()
            .filter(|&idx| !self.has_foreign_backlink(idx))
            .count();

        let average_links_per_note = if node_count > 0 {
            edge_count as f64 / node_count as f64
        } else {
            0.0
        };

        GraphStats {
            total_notes: node_count,
            total_links: edge_count,
            unique_links: self.unique_edges().len(),
            unresolved_links: self.unresolved_links().count(),
            orphaned_notes,
            average_links_per_note,
        }
    }

    /// True if some note other than this one links to it
    fn has_foreign_backlink(&self, idx: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(idx, Incoming)
            .any(|source| source != idx)
    }

    /// Visualization payload: sized nodes and de-duplicated edges
    pub fn view(&self, snapshot: &NoteSnapshot) -> GraphView {
        let nodes = snapshot
            .iter()
            .map(|note| GraphNode {
                id: note.id.clone(),
                title: note.title.clone(),
                weight: node_weight(&note.content),
            })
            .collect();

        GraphView {
            nodes,
            edges: self.unique_edges(),
        }
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count (one per resolved link occurrence)
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Size hint for a node: content length / 200 chars, clamped to `[1, 3]`
fn node_weight(content: &str) -> f64 {
    (content.chars().count() as f64 / 200.0).clamp(1.0, 3.0)
}

/// Outgoing and incoming neighbour sets of one note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Adjacency {
    pub outgoing: Vec<NoteId>,
    pub incoming: Vec<NoteId>,
}

/// A directed edge between two notes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    pub source: NoteId,
    pub target: NoteId,
}

/// A node in the visualization payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NoteId,
    pub title: String,
    pub weight: f64,
}

/// Node list and de-duplicated edge list for graph drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Statistics about the graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub total_notes: usize,
    pub total_links: usize,
    pub unique_links: usize,
    pub unresolved_links: usize,
    pub orphaned_notes: usize,
    pub average_links_per_note: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(notes: Vec<Note>) -> (NoteSnapshot, LinkGraph) {
        let snapshot = NoteSnapshot::new(notes).unwrap();
        let graph = LinkGraph::build(&snapshot);
        (snapshot, graph)
    }

    fn ids(raw: &[&str]) -> Vec<NoteId> {
        raw.iter().map(|s| NoteId::from(*s)).collect()
    }

    #[test]
    fn test_backlinks_scenario() {
        let (_, graph) = build(vec![
            Note::new("1", "Python Basics", "See [[Python Loops]]"),
            Note::new("2", "Python Loops", ""),
        ]);

        assert_eq!(graph.backlinks(&NoteId::from("2")), ids(&["1"]));
        assert_eq!(graph.outgoing(&NoteId::from("1")), ids(&["2"]));
        assert!(graph.backlinks(&NoteId::from("1")).is_empty());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_links_are_multiset_edges() {
        let (_, graph) = build(vec![
            Note::new("1", "A", "[[B]] and again [[b]]"),
            Note::new("2", "B", ""),
        ]);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.unique_edges().len(), 1);
        assert_eq!(graph.incoming(&NoteId::from("2")), ids(&["1"]));
        assert_eq!(graph.incoming_links(&NoteId::from("2")).len(), 2);
    }

    #[test]
    fn test_self_links_are_recorded_both_ways() {
        let (_, graph) = build(vec![Note::new("1", "Loop", "I point at [[Loop]]")]);
        let id = NoteId::from("1");

        assert_eq!(graph.outgoing(&id), ids(&["1"]));
        assert_eq!(graph.incoming(&id), ids(&["1"]));
        assert_eq!(graph.stats().orphaned_notes, 1);
    }

    #[test]
    fn test_unresolved_links_are_not_edges() {
        let (_, graph) = build(vec![Note::new("1", "A", "[[Nowhere]]")]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.unresolved_links().count(), 1);
        assert_eq!(graph.outgoing_links(&NoteId::from("1")).len(), 1);
    }

    #[test]
    fn test_adjacency_is_consistent() {
        let (snapshot, graph) = build(vec![
            Note::new("1", "A", "[[B]] [[C]]"),
            Note::new("2", "B", "[[A]]"),
            Note::new("3", "C", "[[B]]"),
        ]);
        let adjacency = graph.adjacency();
        assert_eq!(adjacency.len(), snapshot.len());

        for (source, adj) in &adjacency {
            for target in &adj.outgoing {
                assert!(adjacency[target].incoming.contains(source));
            }
            for origin in &adj.incoming {
                assert!(adjacency[origin].outgoing.contains(source));
            }
        }
        assert_eq!(adjacency[&NoteId::from("2")].incoming, ids(&["1", "3"]));
    }

    #[test]
    fn test_unique_edges_order() {
        let (_, graph) = build(vec![
            Note::new("1", "A", "[[C]] [[B]]"),
            Note::new("2", "B", "[[A]]"),
            Note::new("3", "C", ""),
        ]);
        let edges: Vec<_> = graph
            .unique_edges()
            .into_iter()
            .map(|e| (e.source.to_string(), e.target.to_string()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("1".to_string(), "2".to_string()),
                ("1".to_string(), "3".to_string()),
                ("2".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_related_notes_bfs() {
        let (_, graph) = build(vec![
            Note::new("1", "A", "[[B]]"),
            Note::new("2", "B", "[[C]]"),
            Note::new("3", "C", ""),
            Note::new("4", "D", "[[A]]"),
        ]);
        let a = NoteId::from("1");

        assert_eq!(graph.related_notes(&a, 1), ids(&["2", "4"]));
        assert_eq!(graph.related_notes(&a, 2), ids(&["2", "4", "3"]));
        assert!(graph.related_notes(&NoteId::from("zzz"), 3).is_empty());
    }

    #[test]
    fn test_view_weights() {
        let (snapshot, graph) = build(vec![
            Note::new("1", "Short", "tiny [[Long]]"),
            Note::new("2", "Long", "x".repeat(500)),
            Note::new("3", "Huge", "y".repeat(5000)),
        ]);
        let view = graph.view(&snapshot);

        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.nodes[0].weight, 1.0);
        assert_eq!(view.nodes[1].weight, 2.5);
        assert_eq!(view.nodes[2].weight, 3.0);
        assert_eq!(view.edges.len(), 1);
    }

    #[test]
    fn test_graph_stats() {
        let (_, graph) = build(vec![
            Note::new("1", "A", "[[B]] [[B]] [[Missing]]"),
            Note::new("2", "B", ""),
        ]);
        let stats = graph.stats();
        assert_eq!(stats.total_notes, 2);
        assert_eq!(stats.total_links, 2);
        assert_eq!(stats.unique_links, 1);
        assert_eq!(stats.unresolved_links, 1);
        assert_eq!(stats.orphaned_notes, 1);
        assert_eq!(stats.average_links_per_note, 1.0);
    }
}
