//! Country data gateway
//!
//! The gateway owns the cache-or-fetch policy for the upstream country
//! dataset and derives every read view served by the API: paginated
//! listing, lookup by code, listing by region, and multi-field search.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::cache::DatasetCache;
use crate::data::{Country, CountryProvider, ProviderError, RawCountry};

/// Errors surfaced by gateway read operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or missing required input
    #[error("{0}")]
    InvalidArgument(String),

    /// No record matched the request
    #[error("{0}")]
    NotFound(String),

    /// The upstream fetch failed or returned nothing
    #[error("Country data is currently unavailable: {0}")]
    Upstream(#[from] ProviderError),
}

/// Filters accepted by the search operation.
///
/// All fields are optional, but at least one non-empty filter must be
/// supplied. Blank or whitespace-only values count as absent, matching how
/// the query string `?name=` arrives from the frontend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    /// Case-insensitive substring match on the common name
    pub name: Option<String>,
    /// Case-insensitive exact match on the region
    pub region: Option<String>,
    /// Case-insensitive exact match against any capital name
    pub capital: Option<String>,
    /// Case-insensitive, trimmed exact match against any UTC-offset string
    pub timezone: Option<String>,
}

impl SearchFilters {
    /// Returns true when no usable filter value was supplied.
    fn is_empty(&self) -> bool {
        active(&self.name).is_none()
            && active(&self.region).is_none()
            && active(&self.capital).is_none()
            && active(&self.timezone).is_none()
    }
}

/// Treats blank values as absent, returning the trimmed filter otherwise.
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Navigation links for a page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    /// Link to the requested page
    pub current: String,
    /// Link to the following page, if any
    pub next: Option<String>,
    /// Link to the preceding page, if any
    pub prev: Option<String>,
    /// Link to the first page
    pub first: String,
    /// Link to the last page
    pub last: String,
}

/// Pagination descriptor recomputed per request from the result set size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The requested page number
    pub current_page: u64,
    /// Total number of pages at the requested limit
    pub total_pages: u64,
    /// Total number of items in the full result set
    pub total_items: u64,
    /// The requested page size
    pub items_per_page: u64,
    /// Whether a following page exists
    pub has_next_page: bool,
    /// Whether a preceding page exists
    pub has_prev_page: bool,
    /// Navigation links built from the request's own base path
    pub links: PageLinks,
}

impl Pagination {
    /// Builds the descriptor for a page over `total_items` results.
    fn build(page: u64, limit: u64, total_items: u64, base_path: &str) -> Self {
        let total_pages = total_items.div_ceil(limit);
        let has_next_page = page < total_pages;
        let has_prev_page = page > 1;
        let link = |p: u64| format!("{base_path}?page={p}&limit={limit}");

        Pagination {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
            has_next_page,
            has_prev_page,
            links: PageLinks {
                current: link(page),
                next: has_next_page.then(|| link(page + 1)),
                prev: has_prev_page.then(|| link(page - 1)),
                first: link(1),
                last: link(total_pages),
            },
        }
    }
}

/// Serves derived read views over the cached upstream country dataset.
///
/// The cache read, refetch, and store sequence is deliberately not atomic
/// across concurrent callers: simultaneous misses each fetch upstream and
/// overwrite the entry, last write wins. Upstream failure on a miss is a
/// hard failure for that request; expired data is never served.
pub struct CountryGateway {
    /// Upstream source of raw records
    provider: Arc<dyn CountryProvider>,
    /// Single-entry dataset cache
    cache: DatasetCache<Vec<RawCountry>>,
}

impl CountryGateway {
    /// Creates a gateway over the given provider with the given cache TTL.
    pub fn new(provider: Arc<dyn CountryProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            cache: DatasetCache::new(ttl),
        }
    }

    /// Returns the raw dataset, from cache when fresh, otherwise refetched.
    async fn dataset(&self) -> Result<Vec<RawCountry>, GatewayError> {
        if let Some(cached) = self.cache.get(Utc::now()) {
            if !cached.is_expired {
                info!("Serving country dataset from cache");
                return Ok(cached.data);
            }
        }

        info!("Cache miss, fetching country dataset from upstream");
        let records = self.provider.fetch_all().await?;
        self.cache.set(records.clone(), Utc::now());
        Ok(records)
    }

    /// Returns one page of the normalized dataset plus its pagination
    /// descriptor.
    ///
    /// An out-of-range page is an empty success with `has_next_page =
    /// false`, not an error, so infinite-scroll clients need no special
    /// end-of-list handling.
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `limit` - Page size
    /// * `base_path` - Request path used to build the pagination links
    pub async fn list_paged(
        &self,
        page: u64,
        limit: u64,
        base_path: &str,
    ) -> Result<(Vec<Country>, Pagination), GatewayError> {
        if page < 1 {
            return Err(GatewayError::InvalidArgument(
                "page must be a positive integer".to_string(),
            ));
        }
        if limit < 1 {
            return Err(GatewayError::InvalidArgument(
                "limit must be a positive integer".to_string(),
            ));
        }

        let records = self.dataset().await?;
        let total_items = records.len() as u64;
        let skip = (page - 1) * limit;

        let items: Vec<Country> = records
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .map(RawCountry::normalize)
            .collect();

        let pagination = Pagination::build(page, limit, total_items, base_path);
        Ok((items, pagination))
    }

    /// Looks up a single country by its two- or three-letter code,
    /// ignoring case.
    pub async fn get_by_code(&self, code: &str) -> Result<Country, GatewayError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "country code must not be empty".to_string(),
            ));
        }

        let records = self.dataset().await?;
        records
            .iter()
            .find(|c| c.matches_code(code))
            .map(RawCountry::normalize)
            .ok_or_else(|| GatewayError::NotFound(format!("No country found for code '{code}'")))
    }

    /// Lists every country in the given region (case-insensitive exact
    /// match).
    ///
    /// An empty match is reported as `NotFound` so callers get an explicit
    /// "no such region" signal rather than an empty success.
    pub async fn list_by_region(&self, region: &str) -> Result<Vec<Country>, GatewayError> {
        let region = region.trim();
        if region.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "region must not be empty".to_string(),
            ));
        }

        let records = self.dataset().await?;
        let matches: Vec<Country> = records
            .iter()
            .filter(|c| c.region.eq_ignore_ascii_case(region))
            .map(RawCountry::normalize)
            .collect();

        if matches.is_empty() {
            return Err(GatewayError::NotFound(format!(
                "No countries found in region '{region}'"
            )));
        }
        Ok(matches)
    }

    /// Searches the dataset with any combination of the supported filters.
    ///
    /// Every supplied filter narrows the candidate set independently; all
    /// supplied filters must match simultaneously. Absent filters impose no
    /// constraint.
    pub async fn search(&self, filters: &SearchFilters) -> Result<Vec<Country>, GatewayError> {
        if filters.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "at least one of name, region, capital or timezone is required".to_string(),
            ));
        }

        let records = self.dataset().await?;
        let predicates = build_predicates(filters);
        let matches: Vec<Country> = records
            .iter()
            .filter(|c| predicates.iter().all(|p| p(c)))
            .map(RawCountry::normalize)
            .collect();

        if matches.is_empty() {
            return Err(GatewayError::NotFound(
                "No countries matched the given filters".to_string(),
            ));
        }
        Ok(matches)
    }
}

/// A single search constraint over a raw record
type Predicate = Box<dyn Fn(&RawCountry) -> bool>;

/// Builds one predicate per supplied filter; the caller requires all of
/// them to hold.
fn build_predicates(filters: &SearchFilters) -> Vec<Predicate> {
    let mut predicates: Vec<Predicate> = Vec::new();

    if let Some(name) = active(&filters.name) {
        let needle = name.to_lowercase();
        predicates.push(Box::new(move |c| {
            c.name.common.to_lowercase().contains(&needle)
        }));
    }
    if let Some(region) = active(&filters.region) {
        let wanted = region.to_lowercase();
        predicates.push(Box::new(move |c| c.region.to_lowercase() == wanted));
    }
    if let Some(capital) = active(&filters.capital) {
        let wanted = capital.to_lowercase();
        predicates.push(Box::new(move |c| {
            c.capital.iter().any(|cap| cap.to_lowercase() == wanted)
        }));
    }
    if let Some(timezone) = active(&filters.timezone) {
        let wanted = timezone.to_lowercase();
        predicates.push(Box::new(move |c| {
            c.timezones
                .iter()
                .any(|tz| tz.trim().to_lowercase() == wanted)
        }));
    }

    predicates
}
