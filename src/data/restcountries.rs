//! REST Countries upstream client
//!
//! Fetches the full country dataset from the REST Countries API. The fetch
//! is a single attempt: network failures, non-2xx statuses, and empty
//! payloads surface immediately as a [`ProviderError`] with no retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

use super::RawCountry;

/// Base URL for the REST Countries API
const REST_COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Fields requested from the upstream, keeps response payloads bounded
const REQUESTED_FIELDS: &str =
    "name,population,flags,region,currencies,timezones,capital,languages,cca2,cca3";

/// Errors that can occur when fetching country data from the upstream
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    BadStatus(reqwest::StatusCode),

    /// Failed to parse the JSON response
    #[error("Failed to parse upstream response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Upstream answered successfully but with no records
    #[error("Upstream returned an empty dataset")]
    EmptyDataset,
}

/// Source of the raw country dataset.
///
/// The gateway only depends on this trait, so tests substitute an in-memory
/// fake and alternate upstreams or retry policies can be slotted in without
/// touching gateway logic.
#[async_trait]
pub trait CountryProvider: Send + Sync {
    /// Fetches the complete country dataset in one call.
    async fn fetch_all(&self) -> Result<Vec<RawCountry>, ProviderError>;
}

/// Client for fetching country data from the REST Countries API
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl RestCountriesClient {
    /// Creates a new client with the given request timeout.
    ///
    /// # Arguments
    /// * `timeout` - Hard cap on how long any upstream request may block
    ///
    /// # Returns
    /// * `Ok(RestCountriesClient)` on success
    /// * `Err(ProviderError)` if the underlying HTTP client cannot be built
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: REST_COUNTRIES_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL, for pointing at a mirror or a test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CountryProvider for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<RawCountry>, ProviderError> {
        let url = format!("{}/all?fields={}", self.base_url, REQUESTED_FIELDS);
        info!("Fetching country dataset from {url}");

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::BadStatus(response.status()));
        }

        let text = response.text().await?;
        let records: Vec<RawCountry> = serde_json::from_str(&text)?;

        if records.is_empty() {
            return Err(ProviderError::EmptyDataset);
        }

        info!("Fetched {} country records", records.len());
        Ok(records)
    }
}
