//! Error types for a single extraction run.
//!
//! Every variant is fatal: the pipeline stops at the first one and nothing
//! further is fetched or written.

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::LevelTag;

/// Failure loading the admin level mapping file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read mapping file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse mapping file: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// `per_country` entries may only set the state and district levels.
    #[error("per_country entry {region} sets admin_level_0; the country level always comes from `default`")]
    CountryOverride { region: String },
}

/// Failure retrieving one admin level from the boundary API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid boundary API url {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("error sending request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("boundary API responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("error decompressing response body: {0}")]
    Decompress(#[source] std::io::Error),
    #[error("error decoding boundary GeoJSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure persisting one output document.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("could not serialize {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top level error for [`crate::pipeline::run`].
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to fetch {level} (admin_level={admin_level}): {source}")]
    Fetch {
        level: LevelTag,
        admin_level: u8,
        #[source]
        source: FetchError,
    },
    #[error("country level (admin_level={admin_level}) returned no features")]
    EmptyCountry { admin_level: u8 },
    #[error("failed to export {level}: {source}")]
    Write {
        level: LevelTag,
        #[source]
        source: WriteError,
    },
}
