//! Boundary extract - administrative boundaries from osm-boundaries.com
//! reshaped for a messaging platform's location hierarchy.
//!
//! This library provides the mapping, fetching and export pieces used by the
//! `extract` binary.

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod mapper;
pub mod models;
pub mod pipeline;

pub use config::{AdminLevelSet, AdminMapping};
pub use error::{ConfigError, ExtractError, FetchError, WriteError};
pub use models::{RegionSelector, SourceDocument, TargetDocument};
pub use pipeline::{run, ExtractRequest, LevelTag, RunSummary};
