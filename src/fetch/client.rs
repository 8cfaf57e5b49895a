//! reqwest-backed [`BoundaryFetcher`].

use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::{BoundaryFetcher, BoundaryQuery};
use crate::error::FetchError;
use crate::models::SourceDocument;

pub const DEFAULT_API_URL: &str = "https://osm-boundaries.com/Download/Submit";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// HTTP client for the boundary download endpoint
pub struct BoundaryClient {
    client: Client,
    endpoint: String,
}

impl BoundaryClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        Url::parse(endpoint).map_err(|source| FetchError::Url {
            url: endpoint.to_string(),
            source,
        })?;

        let client = Client::builder()
            .user_agent(concat!("boundary-extract/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    fn request_url(&self, query: &BoundaryQuery<'_>) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.endpoint, query.params()).map_err(|source| FetchError::Url {
            url: self.endpoint.clone(),
            source,
        })
    }
}

impl BoundaryFetcher for BoundaryClient {
    async fn fetch(&self, query: &BoundaryQuery<'_>) -> Result<SourceDocument, FetchError> {
        let url = self.request_url(query)?;
        info!(
            "Requesting admin_level={} for {} from {}",
            query.admin_level,
            query.osm_id,
            url.host_str().unwrap_or("?")
        );

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes", body.len());

        let document = decode_body(&body)?;
        info!(
            "admin_level={}: {} features",
            query.admin_level,
            document.features.len()
        );
        Ok(document)
    }
}

/// Decode a response body into a source document.
///
/// The API serves a gzip file. If the transport already inflated it
/// (`Content-Encoding: gzip`) the JSON is parsed as is.
pub fn decode_body(body: &[u8]) -> Result<SourceDocument, FetchError> {
    if body.starts_with(&GZIP_MAGIC) {
        let mut contents = Vec::new();
        GzDecoder::new(body)
            .read_to_end(&mut contents)
            .map_err(FetchError::Decompress)?;
        Ok(serde_json::from_slice(&contents)?)
    } else {
        Ok(serde_json::from_slice(body)?)
    }
}
