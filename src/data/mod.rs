//! Core data models for the country gateway
//!
//! This module contains the upstream wire representation of a country record
//! and the reduced, client-facing projection served by the API.

pub mod restcountries;

pub use restcountries::{CountryProvider, ProviderError, RestCountriesClient};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Common and official names as reported by the upstream provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawName {
    /// Name in common usage (e.g. "France")
    pub common: String,
    /// Formal name (e.g. "French Republic"), not always present
    #[serde(default)]
    pub official: Option<String>,
}

/// Flag image URLs by format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFlags {
    /// SVG flag URL
    #[serde(default)]
    pub svg: Option<String>,
    /// PNG flag URL
    #[serde(default)]
    pub png: Option<String>,
}

/// A currency as reported by the upstream provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCurrency {
    /// Currency name (e.g. "Euro")
    #[serde(default)]
    pub name: String,
    /// Currency symbol (e.g. "€"), not present for every currency
    #[serde(default)]
    pub symbol: Option<String>,
}

/// A country record in the upstream provider's shape
///
/// Fields other than `name` default when absent so that partial upstream
/// payloads still deserialize. The currency map uses a `BTreeMap` keyed by
/// ISO code, which keeps the flattened currency list in a deterministic
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCountry {
    /// Country names
    pub name: RawName,
    /// Population count
    #[serde(default)]
    pub population: u64,
    /// Flag image URLs
    #[serde(default)]
    pub flags: RawFlags,
    /// Geographic region (e.g. "Europe")
    #[serde(default)]
    pub region: String,
    /// Currencies keyed by ISO code
    #[serde(default)]
    pub currencies: BTreeMap<String, RawCurrency>,
    /// UTC-offset strings (e.g. "UTC+01:00")
    #[serde(default)]
    pub timezones: Vec<String>,
    /// Capital city names
    #[serde(default)]
    pub capital: Vec<String>,
    /// Languages keyed by language code
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    /// Two-letter country code
    #[serde(default)]
    pub cca2: String,
    /// Three-letter country code
    #[serde(default)]
    pub cca3: String,
}

impl RawCountry {
    /// Returns true if `code` matches the two- or three-letter country code,
    /// ignoring case.
    pub fn matches_code(&self, code: &str) -> bool {
        self.cca2.eq_ignore_ascii_case(code) || self.cca3.eq_ignore_ascii_case(code)
    }

    /// Projects this record to the client-facing [`Country`] shape.
    ///
    /// The flag prefers the SVG URL and falls back to PNG; the currency map
    /// is flattened into a list ordered by ISO code, discarding the keys.
    pub fn normalize(&self) -> Country {
        let flag = self.flags.svg.clone().or_else(|| self.flags.png.clone());

        let currencies = self
            .currencies
            .values()
            .map(|c| Currency {
                name: c.name.clone(),
                symbol: c.symbol.clone(),
            })
            .collect();

        Country {
            name: self.name.common.clone(),
            population: self.population,
            flag,
            region: self.region.clone(),
            currencies,
            timezones: self.timezones.clone(),
        }
    }
}

/// A currency in the normalized projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Currency name (e.g. "Euro")
    pub name: String,
    /// Currency symbol (e.g. "€"), if known
    pub symbol: Option<String>,
}

/// The reduced, client-facing projection of a country record
///
/// Produced deterministically from a [`RawCountry`]; none of the fields
/// reference upstream-specific shapes (the nested flag object becomes a
/// single URL, the keyed currency map becomes a list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Common name
    pub name: String,
    /// Population count
    pub population: u64,
    /// Flag URL (SVG preferred, PNG fallback)
    pub flag: Option<String>,
    /// Geographic region
    pub region: String,
    /// Currencies ordered by ISO code
    pub currencies: Vec<Currency>,
    /// UTC-offset strings
    pub timezones: Vec<String>,
}
