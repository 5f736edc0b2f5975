//! # Gardenlink Core
//!
//! Core data models, error types, and configuration for the digital-garden
//! link engine. This crate defines the canonical types that all other crates
//! depend on.
//!
//! ## Architecture Principles
//!
//! - **Snapshot In, Values Out**: Every engine operation is a pure function of a [`NoteSnapshot`]
//! - **Validated Once**: Loose note shapes are normalized when the snapshot is built
//! - **Zero Panic in Libraries**: Fallible boundaries return `Result<T, Error>`
//! - **Explicit Configuration**: Tunables travel in [`EngineConfig`], never in globals
//!
//! ## Core Modules
//!
//! - [`models`] - Notes, snapshots and link records
//! - [`error`] - Error types and Result alias
//! - [`config`] - Engine configuration and builder
//! - [`profiles`] - Preset configurations
//!
//! ## Usage
//!
//! ```
//! use gardenlink_core::prelude::*;
//!
//! let snapshot = NoteSnapshot::new(vec![
//!     Note::new("1", "Python Basics", "See [[Python Loops]]"),
//!     Note::new("2", "Python Loops", ""),
//! ])
//! .unwrap();
//!
//! assert_eq!(snapshot.len(), 2);
//! assert!(snapshot.contains(&NoteId::from("2")));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod profiles;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use error::{Error, Result};
pub use models::*;
pub use profiles::ConfigProfile;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::error::{Error, Result};
    pub use crate::models::{LinkKind, LinkOccurrence, Note, NoteId, NoteSnapshot, ResolvedLink};
    pub use crate::profiles::ConfigProfile;
}
