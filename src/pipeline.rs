//! Extraction run: resolve levels, fetch and map each level, export.
//!
//! Stages run strictly in order and the first error ends the run. Files are
//! only written once all three levels have been fetched and mapped.

use std::fmt;
use std::path::PathBuf;

use tracing::info;

use crate::config::{AdminLevelSet, AdminMapping};
use crate::error::ExtractError;
use crate::export::Exporter;
use crate::fetch::{BoundaryFetcher, BoundaryQuery};
use crate::mapper::transform;
use crate::models::{to_platform_id, RegionSelector, SourceDocument, TargetDocument};

/// Output level, named after the platform's file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelTag {
    Country,
    State,
    District,
}

impl LevelTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelTag::Country => "admin0",
            LevelTag::State => "admin1",
            LevelTag::District => "admin2",
        }
    }

    /// Raw admin level to request for this tag
    pub fn admin_level(&self, levels: &AdminLevelSet) -> u8 {
        match self {
            LevelTag::Country => levels.country,
            LevelTag::State => levels.state,
            LevelTag::District => levels.district,
        }
    }
}

impl fmt::Display for LevelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `R192798admin1_simplified.json`
pub fn output_filename(platform_country_id: &str, level: LevelTag) -> String {
    format!("{}{}_simplified.json", platform_country_id, level)
}

/// Everything a run needs besides its fetcher and exporter.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub region: RegionSelector,
    pub api_key: String,
    pub database: String,
    pub srid: String,
    pub simplify: String,
    pub mapping_file: PathBuf,
}

/// One fetched level together with its mapped form.
#[derive(Debug, Clone)]
pub struct LevelOutput {
    pub level: LevelTag,
    pub admin_level: u8,
    pub source: SourceDocument,
    pub mapped: TargetDocument,
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub level: LevelTag,
    pub path: PathBuf,
    pub features: usize,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Platform-form ID of the country feature, also the filename prefix
    pub country_id: String,
    pub levels: AdminLevelSet,
    pub files: Vec<ExportedFile>,
}

pub async fn run<F, E>(
    fetcher: &F,
    exporter: &E,
    request: &ExtractRequest,
) -> Result<RunSummary, ExtractError>
where
    F: BoundaryFetcher,
    E: Exporter,
{
    // ResolveLevels
    let mapping = AdminMapping::load_from_file(&request.mapping_file)?;
    let platform_id = request.region.platform_id();
    let levels = mapping.resolve(&platform_id);
    info!(
        "Extracting {}{}: country={}, state={}, district={}",
        platform_id,
        mapping
            .region_name(&platform_id)
            .map(|n| format!(" ({})", n))
            .unwrap_or_default(),
        levels.country,
        levels.state,
        levels.district
    );

    // FetchCountry
    let country = fetch_level(fetcher, request, &levels, LevelTag::Country, None, &[]).await?;
    let country_id = country
        .source
        .features
        .first()
        .map(|f| f.properties.raw_id())
        .ok_or(ExtractError::EmptyCountry {
            admin_level: levels.country,
        })?;

    // FetchState
    let state = fetch_level(
        fetcher,
        request,
        &levels,
        LevelTag::State,
        Some(country_id.as_str()),
        &[],
    )
    .await?;

    // FetchDistrict: district parents list raw IDs, so match on the source form
    let state_ids = state.source.raw_ids();
    let district = fetch_level(
        fetcher,
        request,
        &levels,
        LevelTag::District,
        Some(country_id.as_str()),
        &state_ids,
    )
    .await?;

    // ExportAll
    let prefix = to_platform_id(&country_id);
    let mut files = Vec::with_capacity(3);
    for output in [&country, &state, &district] {
        let filename = output_filename(&prefix, output.level);
        let path = exporter
            .export(&output.mapped, &filename)
            .map_err(|source| ExtractError::Write {
                level: output.level,
                source,
            })?;
        files.push(ExportedFile {
            level: output.level,
            path,
            features: output.mapped.features.len(),
        });
    }

    info!("Extraction of {} complete", prefix);

    Ok(RunSummary {
        country_id: prefix,
        levels,
        files,
    })
}

async fn fetch_level<F: BoundaryFetcher>(
    fetcher: &F,
    request: &ExtractRequest,
    levels: &AdminLevelSet,
    level: LevelTag,
    country_id: Option<&str>,
    state_ids: &[String],
) -> Result<LevelOutput, ExtractError> {
    let admin_level = level.admin_level(levels);
    let osm_id = request.region.boundary_id();
    let query = BoundaryQuery {
        api_key: &request.api_key,
        database: &request.database,
        osm_id: &osm_id,
        admin_level,
        srid: &request.srid,
        simplify: &request.simplify,
    };

    let source = fetcher
        .fetch(&query)
        .await
        .map_err(|source| ExtractError::Fetch {
            level,
            admin_level,
            source,
        })?;

    let mapped = transform(&source, country_id, state_ids);
    info!("{}: mapped {} features", level, mapped.features.len());

    Ok(LevelOutput {
        level,
        admin_level,
        source,
        mapped,
    })
}
