//! Region identifier forms.
//!
//! The boundary provider reports OSM relations as negative integers
//! (`-3247585`). The messaging platform expects the same number behind an
//! `R` prefix (`R3247585`).

use std::fmt;
use std::str::FromStr;

/// Prefix used by the platform in place of the provider's minus sign.
pub const PLATFORM_PREFIX: char = 'R';

/// Sentinel written when a feature has no country or state parent.
pub const NO_PARENT: &str = "None";

/// Convert a raw provider ID to platform form.
///
/// Only a leading `-` is replaced. IDs without one pass through unchanged.
pub fn to_platform_id(raw: &str) -> String {
    match raw.strip_prefix('-') {
        Some(digits) => format!("{}{}", PLATFORM_PREFIX, digits),
        None => raw.to_string(),
    }
}

/// The relation a run extracts, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSelector {
    osm_id: String,
}

impl RegionSelector {
    /// Unsigned relation number, e.g. `3247585`
    pub fn osm_id(&self) -> &str {
        &self.osm_id
    }

    /// Form sent to the boundary API (`-3247585`)
    pub fn boundary_id(&self) -> String {
        format!("-{}", self.osm_id)
    }

    /// Form used by the platform and the admin mapping file (`R3247585`)
    pub fn platform_id(&self) -> String {
        format!("{}{}", PLATFORM_PREFIX, self.osm_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid OSM relation id {0:?}: expected digits, optionally prefixed with '-' or 'R'")]
pub struct InvalidRegionId(pub String);

impl FromStr for RegionSelector {
    type Err = InvalidRegionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('-')
            .or_else(|| trimmed.strip_prefix(PLATFORM_PREFIX))
            .unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidRegionId(s.to_string()));
        }

        Ok(Self {
            osm_id: digits.to_string(),
        })
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.osm_id)
    }
}
