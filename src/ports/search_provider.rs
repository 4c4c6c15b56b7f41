//! Search Provider Port - flight and hotel offer search.
//!
//! Offers come back as the provider's own JSON documents. Shaping them into
//! option records is the search orchestrator's job, so that one malformed
//! offer can be degraded on its own instead of failing the whole batch.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::booking::CabinClass;

/// Port for the external flight and hotel search service.
///
/// # Contract
///
/// - `search_flights` returns offers in the provider's ranking order.
/// - `get_hotel_offers` is called once per candidate hotel; an error there
///   concerns that hotel only.
/// - Implementations never retry; the caller bounds every call with a timeout.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search one-direction flight offers.
    async fn search_flights(
        &self,
        query: &FlightQuery,
    ) -> Result<FlightSearchResponse, SearchProviderError>;

    /// List hotels near a city, optionally filtered by star rating.
    async fn search_hotels_by_city(
        &self,
        query: &HotelCityQuery,
    ) -> Result<Vec<Value>, SearchProviderError>;

    /// Fetch live offers for one hotel and date range.
    ///
    /// Returns the provider's per-hotel document (`hotel` plus `offers`).
    async fn get_hotel_offers(
        &self,
        hotel_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Value, SearchProviderError>;
}

/// One flight leg search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub cabin_class: CabinClass,
    pub max_results: u32,
    pub currency: String,
}

/// Hotel list search around a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelCityQuery {
    pub city_code: String,
    /// Star ratings to include; empty means any.
    pub ratings: Vec<u8>,
    pub radius_km: u32,
}

/// Raw flight offers plus the lookup tables that accompany them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightSearchResponse {
    pub offers: Vec<Value>,
    /// Carrier code to display name.
    #[serde(default)]
    pub carriers: HashMap<String, String>,
    #[serde(default)]
    pub conversion: Option<ConversionTable>,
}

/// Provider-supplied rates into a display currency.
///
/// Only ever used for display; stored prices are never converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionTable {
    pub target: String,
    /// Source currency code to rate.
    pub rates: HashMap<String, f64>,
}

impl ConversionTable {
    pub fn rate_from(&self, currency: &str) -> Option<f64> {
        if currency.eq_ignore_ascii_case(&self.target) {
            return None;
        }
        self.rates.get(&currency.to_ascii_uppercase()).copied()
    }
}

/// Errors reported by a search provider.
#[derive(Debug, Clone, Error)]
pub enum SearchProviderError {
    /// The provider answered with an error.
    #[error("provider error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never got a usable answer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not in the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl SearchProviderError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
