//! Conversion from provider GeoJSON to the platform's location schema.
//!
//! Parents are found by ID, not geometry: the provider lists the raw IDs of
//! every enclosing boundary in `parents`, and a feature's state is the first
//! of those that appears in the state-level document.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::{
    to_platform_id, SourceDocument, SourceFeature, TargetDocument, TargetFeature,
    TargetProperties, NO_PARENT,
};

/// Elements of `parents` that are also in `candidates`, in `parents` order.
pub fn intersection<'a>(candidates: &[String], parents: &[&'a str]) -> Vec<&'a str> {
    let lookup: HashSet<&str> = candidates.iter().map(String::as_str).collect();
    parents
        .iter()
        .copied()
        .filter(|p| lookup.contains(p))
        .collect()
}

/// Map a source document into the platform schema.
///
/// `country_id` is the raw ID of the enclosing country, `None` when mapping
/// the country level itself. `state_ids` are raw IDs of the state-level
/// features, empty unless mapping districts.
pub fn transform(
    document: &SourceDocument,
    country_id: Option<&str>,
    state_ids: &[String],
) -> TargetDocument {
    let is_in_country = country_id
        .map(to_platform_id)
        .unwrap_or_else(|| NO_PARENT.to_string());

    let features = document
        .features
        .iter()
        .map(|feature| map_feature(feature, &is_in_country, state_ids))
        .collect();

    TargetDocument {
        kind: document.kind.clone(),
        features,
    }
}

fn map_feature(feature: &SourceFeature, is_in_country: &str, state_ids: &[String]) -> TargetFeature {
    let props = &feature.properties;
    let osm_id = to_platform_id(&props.raw_id());

    if !feature.geometry.is_areal() {
        warn!(
            "{} ({}) has {} geometry, passing through",
            osm_id,
            props.name,
            feature.geometry.kind().unwrap_or("no")
        );
    }

    let is_in_state = intersection(state_ids, &props.parent_ids())
        .first()
        .map(|id| to_platform_id(id))
        .unwrap_or_else(|| NO_PARENT.to_string());

    debug!("{} -> country={}, state={}", osm_id, is_in_country, is_in_state);

    TargetFeature {
        kind: feature.kind.clone(),
        properties: TargetProperties {
            osm_id,
            name: props.local_name.clone(),
            name_en: props.name.clone(),
            is_in_country: is_in_country.to_string(),
            is_in_state,
        },
        geometry: feature.geometry.clone(),
    }
}
