//! Core data models for boundary extraction.

pub mod boundary;
pub mod ids;

pub use boundary::{
    Geometry, SourceDocument, SourceFeature, SourceProperties, TargetDocument, TargetFeature,
    TargetProperties,
};
pub use ids::{to_platform_id, RegionSelector, NO_PARENT, PLATFORM_PREFIX};
