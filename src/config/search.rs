//! Search configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::booking::SearchSettings;

/// Search limits and provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Options shown per list
    #[serde(default = "default_max_offers")]
    pub max_offers: usize,

    /// Offers requested from the provider per flight search
    #[serde(default = "default_provider_max_results")]
    pub provider_max_results: u32,

    /// Hotels from the city list that get an offers lookup
    #[serde(default = "default_hotel_candidates")]
    pub hotel_candidates: usize,

    #[serde(default = "default_hotel_radius_km")]
    pub hotel_radius_km: u32,

    /// Per-call provider timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Currency prices are settled and stored in
    #[serde(default = "default_settlement_currency")]
    pub settlement_currency: String,

    /// Currency for converted display prices, if any
    pub display_currency: Option<String>,

    /// YAML fixture file served by the console provider
    #[serde(default = "default_fixture_path")]
    pub fixture_path: PathBuf,
}

fn default_max_offers() -> usize {
    3
}

fn default_provider_max_results() -> u32 {
    5
}

fn default_hotel_candidates() -> usize {
    5
}

fn default_hotel_radius_km() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_settlement_currency() -> String {
    "MYR".to_string()
}

fn default_fixture_path() -> PathBuf {
    PathBuf::from("fixtures/search.yaml")
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_offers: default_max_offers(),
            provider_max_results: default_provider_max_results(),
            hotel_candidates: default_hotel_candidates(),
            hotel_radius_km: default_hotel_radius_km(),
            timeout_secs: default_timeout_secs(),
            settlement_currency: default_settlement_currency(),
            display_currency: None,
            fixture_path: default_fixture_path(),
        }
    }
}

impl SearchConfig {
    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_limit("search.max_offers", self.max_offers as u64, 10)?;
        check_limit("search.provider_max_results", u64::from(self.provider_max_results), 250)?;
        check_limit("search.hotel_candidates", self.hotel_candidates as u64, 20)?;
        check_limit("search.hotel_radius_km", u64::from(self.hotel_radius_km), 300)?;
        if (self.provider_max_results as usize) < self.max_offers {
            return Err(ValidationError::ProviderResultsBelowShown);
        }
        check_timeout("search.timeout_secs", self.timeout_secs)?;
        check_currency(&self.settlement_currency)?;
        if let Some(display) = &self.display_currency {
            check_currency(display)?;
        }
        Ok(())
    }

    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            max_offers: self.max_offers,
            provider_max_results: self.provider_max_results,
            hotel_candidates: self.hotel_candidates,
            hotel_radius_km: self.hotel_radius_km,
            timeout: Duration::from_secs(self.timeout_secs),
            settlement_currency: self.settlement_currency.to_ascii_uppercase(),
            display_currency: self.display_currency.as_ref().map(|c| c.to_ascii_uppercase()),
        }
    }
}

fn check_limit(field: &'static str, value: u64, max: u64) -> Result<(), ValidationError> {
    if value == 0 || value > max {
        return Err(ValidationError::InvalidLimit { field, max });
    }
    Ok(())
}

pub(super) fn check_timeout(field: &'static str, secs: u64) -> Result<(), ValidationError> {
    if secs == 0 || secs > 300 {
        return Err(ValidationError::InvalidTimeout(field));
    }
    Ok(())
}

fn check_currency(code: &str) -> Result<(), ValidationError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidCurrency(code.to_string()));
    }
    Ok(())
}
