//! The engine facade: one configured entry point for every garden query.
//!
//! The engine holds configuration only. Each call takes the snapshot it
//! should answer for, so callers re-run queries whenever their notes change.

use chrono::{DateTime, Utc};
use gardenlink_core::{ConfigProfile, EngineConfig, Error, Note, NoteId, NoteSnapshot, ResolvedLink, Result};
use gardenlink_graph::{
    BrokenLink, GardenStats, GraphView, HealthAnalyzer, HealthReport, LinkFrequency, LinkGraph,
    LinkResolver, SimilarNote, SimilarityOptions, SuggestionOptions, find_broken_links,
    find_orphans, link_frequency, similar_notes,
};
use gardenlink_parser::extract_links;
use gardenlink_search::{
    Command, RankedCommand, SearchFilters, SearchHit, advanced_search, rank_commands, search_notes,
    suggest_titles,
};

/// Configured entry point for resolution, graph and analytics queries
#[derive(Debug, Clone, Default)]
pub struct GardenEngine {
    config: EngineConfig,
}

impl GardenEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an engine from a preset profile
    pub fn from_profile(profile: ConfigProfile) -> Self {
        Self {
            config: profile.create_config(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn resolver<'a>(&self, snapshot: &'a NoteSnapshot) -> LinkResolver<'a> {
        LinkResolver::new(snapshot).with_fuzzy_fallback(self.config.fuzzy_fallback)
    }

    fn require<'a>(&self, snapshot: &'a NoteSnapshot, id: &NoteId) -> Result<&'a Note> {
        snapshot
            .get(id)
            .ok_or_else(|| Error::not_found(format!("note {}", id)))
    }

    /// Resolve every link in the snapshot
    pub fn resolve(&self, snapshot: &NoteSnapshot) -> Vec<ResolvedLink> {
        self.resolver(snapshot).resolve_all()
    }

    /// Resolve the links of text that is not (yet) part of the snapshot
    pub fn resolve_draft(&self, snapshot: &NoteSnapshot, source: &NoteId, content: &str) -> Vec<ResolvedLink> {
        let resolver = self.resolver(snapshot);
        extract_links(content)
            .iter()
            .map(|occurrence| resolver.resolve(source, occurrence))
            .collect()
    }

    /// Build the link graph
    pub fn graph(&self, snapshot: &NoteSnapshot) -> LinkGraph {
        LinkGraph::from_links(snapshot, self.resolve(snapshot))
    }

    /// Notes linking to `id`, in snapshot order
    pub fn backlinks(&self, snapshot: &NoteSnapshot, id: &NoteId) -> Result<Vec<NoteId>> {
        self.require(snapshot, id)?;
        Ok(self.graph(snapshot).backlinks(id))
    }

    /// Notes `id` links to, in snapshot order
    pub fn outgoing(&self, snapshot: &NoteSnapshot, id: &NoteId) -> Result<Vec<NoteId>> {
        self.require(snapshot, id)?;
        Ok(self.graph(snapshot).outgoing(id))
    }

    pub fn orphans<'a>(&self, snapshot: &'a NoteSnapshot) -> Vec<&'a Note> {
        find_orphans(snapshot, &self.resolve(snapshot))
    }

    pub fn broken_links(&self, snapshot: &NoteSnapshot) -> Vec<BrokenLink> {
        find_broken_links(
            snapshot,
            &self.resolve(snapshot),
            SuggestionOptions::from(&self.config),
        )
    }

    /// Link texts by raw occurrence count
    pub fn frequency(&self, snapshot: &NoteSnapshot) -> Vec<LinkFrequency> {
        link_frequency(&self.resolve(snapshot))
    }

    /// Notes most similar to `id`
    pub fn similar<'a>(&self, snapshot: &'a NoteSnapshot, id: &NoteId) -> Result<Vec<SimilarNote<'a>>> {
        let target = self.require(snapshot, id)?;
        Ok(similar_notes(
            target,
            snapshot,
            SimilarityOptions::from(&self.config),
        ))
    }

    /// Incremental note search
    pub fn search<'a>(&self, snapshot: &'a NoteSnapshot, query: &str) -> Vec<SearchHit<'a>> {
        search_notes(snapshot, query, self.config.search_min_score)
    }

    /// Filters for [`GardenEngine::advanced_search`] seeded with the configured threshold
    pub fn search_filters(&self, query: impl Into<String>) -> SearchFilters {
        SearchFilters {
            min_score: self.config.advanced_search_min_score,
            ..SearchFilters::query(query)
        }
    }

    pub fn advanced_search<'a>(&self, snapshot: &'a NoteSnapshot, filters: &SearchFilters) -> Vec<SearchHit<'a>> {
        advanced_search(snapshot, filters)
    }

    /// Rank palette commands against `query`
    pub fn palette<'c>(&self, commands: &'c [Command], query: &str) -> Vec<RankedCommand<'c>> {
        rank_commands(commands, query, self.config.palette_min_score)
    }

    /// Titles to offer while the user types inside `[[`
    pub fn suggest_links<'a>(&self, snapshot: &'a NoteSnapshot, query: &str) -> Vec<&'a Note> {
        suggest_titles(snapshot, query, self.config.suggestion_limit)
    }

    /// Nodes and de-duplicated edges for drawing
    pub fn view(&self, snapshot: &NoteSnapshot) -> GraphView {
        self.graph(snapshot).view(snapshot)
    }

    pub fn health(&self, snapshot: &NoteSnapshot) -> HealthReport {
        let graph = self.graph(snapshot);
        HealthAnalyzer::new(snapshot, &graph).analyze(self.config.top_n, SuggestionOptions::from(&self.config))
    }

    /// Dashboard statistics as of `now`
    pub fn stats(&self, snapshot: &NoteSnapshot, now: DateTime<Utc>) -> GardenStats {
        GardenStats::compute(snapshot, &self.resolve(snapshot), now, self.config.top_n)
    }
}
