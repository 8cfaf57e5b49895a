//! Admin level mapping.
//!
//! Providers disagree per country on which `admin_level` holds states and
//! districts, so the levels to request come from a YAML file:
//!
//! ```yaml
//! default:
//!   admin_level_0: 2
//!   admin_level_1: 4
//!   admin_level_2: 6
//! per_country:
//!   R192798:
//!     admin_level_1: 4
//!     admin_level_2: 5
//!     meta:
//!       name: Kenya
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Raw admin levels requested for the country, state and district files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminLevelSet {
    pub country: u8,
    pub state: u8,
    pub district: u8,
}

/// State and district levels for one region.
///
/// Has no country field: the country level always comes from `default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOverride {
    pub state: u8,
    pub district: u8,
}

/// Validated mapping file contents.
#[derive(Debug, Clone)]
pub struct AdminMapping {
    default: AdminLevelSet,
    overrides: HashMap<String, LevelOverride>,
    names: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    default: DefaultLevels,
    #[serde(default)]
    per_country: HashMap<String, CountryEntry>,
}

#[derive(Debug, Deserialize)]
struct DefaultLevels {
    admin_level_0: u8,
    admin_level_1: u8,
    admin_level_2: u8,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    admin_level_0: Option<u8>,
    admin_level_1: u8,
    admin_level_2: u8,
    #[serde(default)]
    meta: Option<CountryMeta>,
}

#[derive(Debug, Deserialize)]
struct CountryMeta {
    name: Option<String>,
}

impl AdminMapping {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mapping = Self::from_yaml_str(&content)?;
        info!(
            "Loaded admin mapping from {} ({} country overrides)",
            path.display(),
            mapping.overrides.len()
        );
        Ok(mapping)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: MappingFile = serde_yaml::from_str(content)?;

        let default = AdminLevelSet {
            country: file.default.admin_level_0,
            state: file.default.admin_level_1,
            district: file.default.admin_level_2,
        };

        let mut overrides = HashMap::with_capacity(file.per_country.len());
        let mut names = HashMap::new();
        for (region, entry) in file.per_country {
            if entry.admin_level_0.is_some() {
                return Err(ConfigError::CountryOverride { region });
            }
            if let Some(name) = entry.meta.and_then(|m| m.name) {
                names.insert(region.clone(), name);
            }
            overrides.insert(
                region,
                LevelOverride {
                    state: entry.admin_level_1,
                    district: entry.admin_level_2,
                },
            );
        }

        Ok(Self {
            default,
            overrides,
            names,
        })
    }

    pub fn default_levels(&self) -> AdminLevelSet {
        self.default
    }

    /// Human readable name from `meta.name`, if the file has one
    pub fn region_name(&self, platform_id: &str) -> Option<&str> {
        self.names.get(platform_id).map(String::as_str)
    }

    /// Levels to request for a platform-form region ID.
    ///
    /// Regions without an override get the defaults.
    pub fn resolve(&self, platform_id: &str) -> AdminLevelSet {
        match self.overrides.get(platform_id) {
            Some(o) => {
                debug!(
                    "Using override for {} ({}): state={}, district={}",
                    platform_id,
                    self.region_name(platform_id).unwrap_or("unnamed"),
                    o.state,
                    o.district
                );
                AdminLevelSet {
                    country: self.default.country,
                    state: o.state,
                    district: o.district,
                }
            }
            None => {
                debug!("No override for {}, using default levels", platform_id);
                self.default
            }
        }
    }
}
