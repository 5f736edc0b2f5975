//! Pre-configured profiles for different garden sizes
//!
//! - Standard: defaults matching the interactive note app
//! - LargeGarden: caps the similarity candidate pool for thousands of notes
//! - Minimal: exact resolution only, no suggestions

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use std::str::FromStr;

/// Profile selector for pre-configured engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigProfile {
    Standard,
    LargeGarden,
    Minimal,
}

impl ConfigProfile {
    /// Create an EngineConfig from this profile
    pub fn create_config(self) -> EngineConfig {
        let mut config = EngineConfig::new();

        match self {
            Self::Standard => {}

            Self::LargeGarden => {
                config.similarity_candidate_cap = Some(500);
                config.broken_link_suggestions = 3;
                config.top_n = 10;
            }

            Self::Minimal => {
                config.fuzzy_fallback = false;
                config.broken_link_suggestions = 0;
                config.suggestion_limit = 0;
                config.similarity_limit = 3;
            }
        }

        config
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::LargeGarden => "large-garden",
            Self::Minimal => "minimal",
        }
    }
}

impl FromStr for ConfigProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "default" => Ok(Self::Standard),
            "large-garden" | "large" => Ok(Self::LargeGarden),
            "minimal" => Ok(Self::Minimal),
            other => Err(Error::config_error(format!(
                "Unknown profile '{}'. Valid options: standard, large-garden, minimal",
                other
            ))),
        }
    }
}
