//! Boundary download from osm-boundaries.com.

mod client;

use std::future::Future;

pub use client::{decode_body, BoundaryClient, DEFAULT_API_URL};

use crate::error::FetchError;
use crate::models::SourceDocument;

/// Parameters for a single-level boundary request.
#[derive(Debug, Clone)]
pub struct BoundaryQuery<'a> {
    pub api_key: &'a str,
    pub database: &'a str,
    /// Boundary-form relation ID (`-3247585`)
    pub osm_id: &'a str,
    pub admin_level: u8,
    pub srid: &'a str,
    pub simplify: &'a str,
}

impl BoundaryQuery<'_> {
    /// Query string pairs in the order the API documents them.
    ///
    /// `minAdminLevel` and `maxAdminLevel` are equal so one level comes back.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let level = self.admin_level.to_string();
        vec![
            ("apiKey", self.api_key.to_string()),
            ("db", self.database.to_string()),
            ("osmIds", self.osm_id.to_string()),
            ("minAdminLevel", level.clone()),
            ("maxAdminLevel", level),
            ("format", "GeoJSON".to_string()),
            ("srid", self.srid.to_string()),
            ("simplify", self.simplify.to_string()),
            ("recursive", String::new()),
        ]
    }
}

/// Source of single-level boundary documents.
pub trait BoundaryFetcher {
    fn fetch(
        &self,
        query: &BoundaryQuery<'_>,
    ) -> impl Future<Output = Result<SourceDocument, FetchError>> + Send;
}
