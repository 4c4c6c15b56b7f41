//! Mock search provider for testing.
//!
//! Provides a configurable mock implementation of the SearchProvider port,
//! allowing flow tests to run without a real search API.
//!
//! # Features
//!
//! - Queued flight and hotel-list responses (consumed in order)
//! - Per-hotel offer documents or errors
//! - Simulated delays for timeout testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockSearchProvider::new()
//!     .with_flights(FlightSearchResponse { offers: vec![samples::flight_offer(..)], ..Default::default() })
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    FlightQuery, FlightSearchResponse, HotelCityQuery, SearchProvider, SearchProviderError,
};

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum MockSearchCall {
    Flights(FlightQuery),
    HotelsByCity(HotelCityQuery),
    HotelOffers {
        hotel_id: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

/// Mock search provider.
///
/// An exhausted flight or hotel-list queue answers with an empty result.
/// A hotel with no configured offers answers with a 404 error.
#[derive(Debug, Clone, Default)]
pub struct MockSearchProvider {
    flights: Arc<Mutex<VecDeque<Result<FlightSearchResponse, SearchProviderError>>>>,
    hotel_lists: Arc<Mutex<VecDeque<Result<Vec<Value>, SearchProviderError>>>>,
    hotel_offers: Arc<Mutex<HashMap<String, Result<Value, SearchProviderError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<MockSearchCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful flight search response.
    pub fn with_flights(self, response: FlightSearchResponse) -> Self {
        lock(&self.flights).push_back(Ok(response));
        self
    }

    /// Queues a failing flight search.
    pub fn with_flight_error(self, error: SearchProviderError) -> Self {
        lock(&self.flights).push_back(Err(error));
        self
    }

    /// Queues a hotel list for the next city search.
    pub fn with_hotels(self, hotels: Vec<Value>) -> Self {
        lock(&self.hotel_lists).push_back(Ok(hotels));
        self
    }

    /// Queues a failing city search.
    pub fn with_hotel_list_error(self, error: SearchProviderError) -> Self {
        lock(&self.hotel_lists).push_back(Err(error));
        self
    }

    /// Sets the offers document returned for `hotel_id`.
    pub fn with_hotel_offers(self, hotel_id: impl Into<String>, offers: Value) -> Self {
        lock(&self.hotel_offers).insert(hotel_id.into(), Ok(offers));
        self
    }

    /// Makes offer lookups for `hotel_id` fail.
    pub fn with_hotel_offers_error(
        self,
        hotel_id: impl Into<String>,
        error: SearchProviderError,
    ) -> Self {
        lock(&self.hotel_offers).insert(hotel_id.into(), Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<MockSearchCall> {
        lock(&self.calls).clone()
    }

    /// Returns the recorded flight queries in call order.
    pub fn flight_queries(&self) -> Vec<FlightQuery> {
        lock(&self.calls)
            .iter()
            .filter_map(|c| match c {
                MockSearchCall::Flights(q) => Some(q.clone()),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: MockSearchCall) {
        lock(&self.calls).push(call);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search_flights(
        &self,
        query: &FlightQuery,
    ) -> Result<FlightSearchResponse, SearchProviderError> {
        self.record(MockSearchCall::Flights(query.clone())).await;
        lock(&self.flights)
            .pop_front()
            .unwrap_or_else(|| Ok(FlightSearchResponse::default()))
    }

    async fn search_hotels_by_city(
        &self,
        query: &HotelCityQuery,
    ) -> Result<Vec<Value>, SearchProviderError> {
        self.record(MockSearchCall::HotelsByCity(query.clone())).await;
        lock(&self.hotel_lists)
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_hotel_offers(
        &self,
        hotel_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Value, SearchProviderError> {
        self.record(MockSearchCall::HotelOffers {
            hotel_id: hotel_id.to_string(),
            check_in,
            check_out,
        })
        .await;
        lock(&self.hotel_offers)
            .get(hotel_id)
            .cloned()
            .unwrap_or_else(|| Err(SearchProviderError::api(404, "no offers for hotel")))
    }
}

/// Provider-shaped JSON documents for building test responses.
pub mod samples {
    use serde_json::{json, Value};

    /// A direct flight offer.
    #[allow(clippy::too_many_arguments)]
    pub fn flight_offer(
        carrier: &str,
        number: &str,
        origin: &str,
        destination: &str,
        departure_at: &str,
        arrival_at: &str,
        duration: &str,
        price: &str,
        currency: &str,
    ) -> Value {
        json!({
            "price": { "total": price, "currency": currency },
            "itineraries": [{
                "duration": duration,
                "segments": [{
                    "departure": { "iataCode": origin, "at": departure_at },
                    "arrival": { "iataCode": destination, "at": arrival_at },
                    "carrierCode": carrier,
                    "number": number
                }]
            }],
            "travelerPricings": [{
                "fareDetailsBySegment": [{ "cabin": "ECONOMY" }]
            }]
        })
    }

    /// A simple KUL-SIN direct flight on `date` at `price` MYR.
    pub fn kul_sin(number: &str, date: &str, price: &str) -> Value {
        flight_offer(
            "MH",
            number,
            "KUL",
            "SIN",
            &format!("{date}T08:00:00"),
            &format!("{date}T09:05:00"),
            "PT1H5M",
            price,
            "MYR",
        )
    }

    /// An entry from the hotel list.
    pub fn hotel(hotel_id: &str, name: &str, rating: Option<u8>) -> Value {
        let mut value = json!({ "hotelId": hotel_id, "name": name });
        if let Some(rating) = rating {
            value["rating"] = json!(rating.to_string());
        }
        value
    }

    /// A per-hotel offers document with one room offer.
    pub fn hotel_offers(
        hotel_id: &str,
        name: &str,
        check_in: &str,
        check_out: &str,
        total: &str,
        currency: &str,
    ) -> Value {
        json!({
            "hotel": { "hotelId": hotel_id, "name": name },
            "available": true,
            "offers": [{
                "checkInDate": check_in,
                "checkOutDate": check_out,
                "room": {
                    "typeEstimated": { "category": "STANDARD_ROOM" },
                    "description": { "text": "Standard room, city view" }
                },
                "price": { "currency": currency, "total": total }
            }]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::CabinClass;

    fn query() -> FlightQuery {
        FlightQuery {
            origin: "KUL".into(),
            destination: "SIN".into(),
            departure_date: NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
            cabin_class: CabinClass::Economy,
            max_results: 5,
            currency: "MYR".into(),
        }
    }

    #[tokio::test]
    async fn queued_flight_responses_are_consumed_in_order() {
        let provider = MockSearchProvider::new()
            .with_flights(FlightSearchResponse {
                offers: vec![samples::kul_sin("601", "2030-05-01", "450.00")],
                ..Default::default()
            })
            .with_flight_error(SearchProviderError::transport("reset"));

        assert_eq!(provider.search_flights(&query()).await.unwrap().offers.len(), 1);
        assert!(provider.search_flights(&query()).await.is_err());
        assert!(provider.search_flights(&query()).await.unwrap().offers.is_empty());
        assert_eq!(provider.call_count(), 3);
        assert_eq!(provider.flight_queries()[0], query());
    }

    #[tokio::test]
    async fn unknown_hotel_offers_are_an_error() {
        let provider = MockSearchProvider::new();
        let day = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
        let result = provider.get_hotel_offers("NOPE", day, day).await;
        assert!(matches!(result, Err(SearchProviderError::Api { status: 404, .. })));
    }

    #[test]
    fn sample_hotel_carries_rating_as_text() {
        let hotel = samples::hotel("H1", "Marina Stay", Some(4));
        assert_eq!(hotel["rating"], "4");
    }
}
