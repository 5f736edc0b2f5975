//! Configuration for the link engine.
//!
//! Every tunable is passed explicitly to the engine; nothing is read from
//! ambient global state. Follows a builder pattern with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine-wide tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Similarity ranking
    pub similarity_limit: usize,
    pub min_similarity: f64,
    pub similarity_candidate_cap: Option<usize>,

    // Link resolution
    pub fuzzy_fallback: bool,

    // Search thresholds
    pub search_min_score: f64,
    pub advanced_search_min_score: f64,
    pub palette_min_score: f64,

    // Suggestions
    pub suggestion_limit: usize,
    pub broken_link_suggestions: usize,
    pub min_suggestion_score: f64,

    // Dashboard lists (most linked, top tags, hubs, recent notes)
    pub top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_limit: 5,
            min_similarity: 0.0,
            similarity_candidate_cap: None,
            fuzzy_fallback: true,
            search_min_score: 0.3,
            advanced_search_min_score: 0.1,
            palette_min_score: 0.2,
            suggestion_limit: 8,
            broken_link_suggestions: 5,
            min_suggestion_score: 0.3,
            top_n: 5,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.similarity_limit == 0 {
            return Err(Error::config_error("similarity_limit must be at least 1"));
        }
        if self.top_n == 0 {
            return Err(Error::config_error("top_n must be at least 1"));
        }
        if self.similarity_candidate_cap == Some(0) {
            return Err(Error::config_error(
                "similarity_candidate_cap must be at least 1 when set",
            ));
        }

        let scores = [
            ("min_similarity", self.min_similarity),
            ("search_min_score", self.search_min_score),
            ("advanced_search_min_score", self.advanced_search_min_score),
            ("palette_min_score", self.palette_min_score),
            ("min_suggestion_score", self.min_suggestion_score),
        ];
        for (name, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config_error(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!(
                "Failed to load config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid engine configuration: {}", e)))?;
        config.validate()?;

        log::debug!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration as YAML
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, yaml).map_err(|e| {
            Error::config_error(format!(
                "Failed to save config to {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn similarity_limit(mut self, limit: usize) -> Self {
        self.config.similarity_limit = limit;
        self
    }

    pub fn min_similarity(mut self, score: f64) -> Self {
        self.config.min_similarity = score;
        self
    }

    pub fn similarity_candidate_cap(mut self, cap: Option<usize>) -> Self {
        self.config.similarity_candidate_cap = cap;
        self
    }

    pub fn fuzzy_fallback(mut self, enabled: bool) -> Self {
        self.config.fuzzy_fallback = enabled;
        self
    }

    pub fn search_min_score(mut self, score: f64) -> Self {
        self.config.search_min_score = score;
        self
    }

    pub fn palette_min_score(mut self, score: f64) -> Self {
        self.config.palette_min_score = score;
        self
    }

    pub fn suggestion_limit(mut self, limit: usize) -> Self {
        self.config.suggestion_limit = limit;
        self
    }

    pub fn broken_link_suggestions(mut self, limit: usize) -> Self {
        self.config.broken_link_suggestions = limit;
        self
    }

    pub fn top_n(mut self, n: usize) -> Self {
        self.config.top_n = n;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
