use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;

use super::model::MeteoriteRecord;
use super::query::SoqlQuery;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Endpoint and request sizing for the Meteorite Landings dataset.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Row count for the startup listing.
    pub default_limit: u32,
    /// Row cap for a search.
    pub search_limit: u32,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://data.nasa.gov/resource/gh4g-9sfh.json".to_string(),
            default_limit: 10,
            search_limit: 50,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("could not parse response: {0}")]
    Parse(String),
}

// ---------------------------------------------------------------------------
// Source trait + HTTP implementation
// ---------------------------------------------------------------------------

/// Anything that can answer a [`SoqlQuery`] with meteorite records.
pub trait MeteoriteSource: Send + Sync {
    fn fetch(&self, query: &SoqlQuery) -> Result<Vec<MeteoriteRecord>, ApiError>;
}

/// Blocking client for the Socrata endpoint. Meant to be called off the UI
/// thread.
pub struct MeteoriteClient {
    base_url: Url,
    client: Client,
}

impl MeteoriteClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("invalid API URL '{}'", config.base_url))?;
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("building HTTP client")?;
        Ok(Self { base_url, client })
    }

    /// Full request URL for `query`, with the parameters percent-encoded.
    pub fn request_url(&self, query: &SoqlQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().extend_pairs(query.params());
        url
    }
}

impl MeteoriteSource for MeteoriteClient {
    fn fetch(&self, query: &SoqlQuery) -> Result<Vec<MeteoriteRecord>, ApiError> {
        let url = self.request_url(query);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response.json().map_err(|e| ApiError::Parse(e.to_string()))
    }
}
