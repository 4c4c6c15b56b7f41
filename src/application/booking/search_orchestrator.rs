//! Runs flight and hotel searches and shapes raw offers into option lists.
//!
//! Every provider call is bounded by the configured timeout. A failed or
//! timed-out leg yields an empty list; a single offer that cannot be shaped
//! becomes an `Unformattable` placeholder in its ranked slot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::timeout;

use crate::domain::booking::{
    CabinClass, FlightOption, HotelOption, HotelSearchParams, Layover, Leg, ListedOption,
    SearchError, TravelDuration,
};
use crate::domain::foundation::Money;
use crate::ports::{ConversionTable, FlightQuery, HotelCityQuery, SearchProvider};

/// Limits applied to every search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Options shown per list.
    pub max_offers: usize,
    /// Offers requested from the provider per flight search.
    pub provider_max_results: u32,
    /// Hotels from the city list that get an offers lookup.
    pub hotel_candidates: usize,
    pub hotel_radius_km: u32,
    pub timeout: Duration,
    pub settlement_currency: String,
    /// Currency for converted display prices. Provider rate tables for
    /// any other target are ignored.
    pub display_currency: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_offers: 3,
            provider_max_results: 5,
            hotel_candidates: 5,
            hotel_radius_km: 5,
            timeout: Duration::from_secs(20),
            settlement_currency: "MYR".to_string(),
            display_currency: None,
        }
    }
}

/// One directional flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightLegQuery {
    pub leg: Leg,
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub cabin_class: CabinClass,
}

pub struct SearchOrchestrator {
    provider: Arc<dyn SearchProvider>,
    settings: SearchSettings,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn SearchProvider>, settings: SearchSettings) -> Self {
        Self { provider, settings }
    }

    /// Searches one flight leg. Returns at most `max_offers` entries in the
    /// provider's order; empty on provider failure or timeout.
    pub async fn search_flight_leg(&self, query: &FlightLegQuery) -> Vec<ListedOption<FlightOption>> {
        tracing::info!(
            leg = %query.leg,
            origin = %query.origin,
            destination = %query.destination,
            date = %query.date,
            "searching flights"
        );

        let provider_query = FlightQuery {
            origin: query.origin.clone(),
            destination: query.destination.clone(),
            departure_date: query.date,
            cabin_class: query.cabin_class,
            max_results: self.settings.provider_max_results,
            currency: self.settings.settlement_currency.clone(),
        };

        let response = match timeout(self.settings.timeout, self.provider.search_flights(&provider_query)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                log_search_failure(&SearchError::ProviderFailed {
                    leg: query.leg,
                    reason: e.to_string(),
                });
                return Vec::new();
            }
            Err(_) => {
                log_search_failure(&SearchError::Timeout { leg: query.leg });
                return Vec::new();
            }
        };

        let conversion = response.conversion.as_ref().filter(|table| {
            self.settings
                .display_currency
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(&table.target))
        });

        response
            .offers
            .iter()
            .take(self.settings.max_offers)
            .enumerate()
            .map(|(rank, offer)| {
                match shape_flight(
                    offer,
                    &response.carriers,
                    conversion,
                    query.cabin_class,
                    &self.settings.settlement_currency,
                ) {
                    Ok(option) => ListedOption::available(option),
                    Err(reason) => {
                        tracing::warn!(leg = %query.leg, rank, %reason, "unformattable flight offer");
                        ListedOption::Unformattable { reason }
                    }
                }
            })
            .collect()
    }

    /// Searches hotels in a city and looks up live offers for each candidate.
    ///
    /// A candidate whose lookup fails is skipped; the search goes on with
    /// the rest.
    pub async fn search_hotels(&self, params: &HotelSearchParams) -> Vec<ListedOption<HotelOption>> {
        tracing::info!(
            city = %params.city,
            check_in = %params.check_in,
            check_out = %params.check_out,
            "searching hotels"
        );

        let query = HotelCityQuery {
            city_code: params.city.clone(),
            ratings: params.rating.map(|r| r.provider_filter()).unwrap_or_default(),
            radius_km: self.settings.hotel_radius_km,
        };

        let hotels = match timeout(self.settings.timeout, self.provider.search_hotels_by_city(&query)).await {
            Ok(Ok(hotels)) => hotels,
            Ok(Err(e)) => {
                log_search_failure(&SearchError::ProviderFailed {
                    leg: Leg::Hotel,
                    reason: e.to_string(),
                });
                return Vec::new();
            }
            Err(_) => {
                log_search_failure(&SearchError::Timeout { leg: Leg::Hotel });
                return Vec::new();
            }
        };

        let lookups = hotels
            .iter()
            .take(self.settings.hotel_candidates)
            .map(|candidate| self.hotel_offer(candidate, params));

        join_all(lookups)
            .await
            .into_iter()
            .flatten()
            .take(self.settings.max_offers)
            .collect()
    }

    /// Looks up one candidate's offers. `None` means the hotel is skipped.
    async fn hotel_offer(
        &self,
        candidate: &Value,
        params: &HotelSearchParams,
    ) -> Option<ListedOption<HotelOption>> {
        let Some(hotel_id) = candidate.get("hotelId").and_then(Value::as_str) else {
            tracing::warn!("skipping hotel without an id");
            return None;
        };

        let lookup = self
            .provider
            .get_hotel_offers(hotel_id, params.check_in, params.check_out);
        let document = match timeout(self.settings.timeout, lookup).await {
            Ok(Ok(document)) => document,
            Ok(Err(e)) => {
                tracing::warn!(hotel_id, error = %e, "skipping hotel: offer lookup failed");
                return None;
            }
            Err(_) => {
                tracing::warn!(hotel_id, "skipping hotel: offer lookup timed out");
                return None;
            }
        };

        match shape_hotel(hotel_id, candidate, &document, &self.settings.settlement_currency) {
            Ok(Some(option)) => Some(ListedOption::available(option)),
            Ok(None) => {
                tracing::info!(hotel_id, "skipping hotel: no offers");
                None
            }
            Err(reason) => {
                tracing::warn!(hotel_id, %reason, "unformattable hotel offer");
                Some(ListedOption::Unformattable { reason })
            }
        }
    }
}

fn log_search_failure(error: &SearchError) {
    tracing::warn!(leg = %error.leg(), error = %error, "search failed");
}

// Provider document shapes. Only the fields the options need.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlightOffer {
    price: RawPrice,
    itineraries: Vec<RawItinerary>,
    #[serde(default)]
    traveler_pricings: Vec<RawTravelerPricing>,
}

#[derive(Debug, Deserialize)]
struct RawPrice {
    total: String,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct RawItinerary {
    duration: String,
    segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSegment {
    departure: RawEndpoint,
    arrival: RawEndpoint,
    carrier_code: String,
    number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEndpoint {
    iata_code: String,
    at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTravelerPricing {
    #[serde(default)]
    fare_details_by_segment: Vec<RawFareDetail>,
}

#[derive(Debug, Deserialize)]
struct RawFareDetail {
    cabin: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawHotelDocument {
    #[serde(default)]
    hotel: Option<RawHotel>,
    #[serde(default)]
    offers: Vec<RawHotelOffer>,
}

#[derive(Debug, Deserialize)]
struct RawHotel {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHotelOffer {
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    #[serde(default)]
    room: Option<RawRoom>,
    price: RawPrice,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoom {
    type_estimated: Option<RawRoomType>,
    description: Option<RawText>,
}

#[derive(Debug, Deserialize)]
struct RawRoomType {
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawText {
    text: Option<String>,
}

fn shape_flight(
    offer: &Value,
    carriers: &HashMap<String, String>,
    conversion: Option<&ConversionTable>,
    requested_cabin: CabinClass,
    settlement_currency: &str,
) -> Result<FlightOption, String> {
    let offer = RawFlightOffer::deserialize(offer).map_err(|e| e.to_string())?;
    let itinerary = offer
        .itineraries
        .first()
        .ok_or_else(|| "offer has no itinerary".to_string())?;
    let (first, last) = match (itinerary.segments.first(), itinerary.segments.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err("itinerary has no segments".to_string()),
    };

    let duration: TravelDuration = itinerary.duration.parse().map_err(|e| format!("{}", e))?;
    let price = settled_price(&offer.price, settlement_currency)?;
    let display_price = conversion.and_then(|table| {
        table
            .rate_from(price.currency())
            .and_then(|rate| price.converted(rate, &table.target).ok())
    });

    let layovers = itinerary
        .segments
        .windows(2)
        .map(|pair| Layover {
            airport: pair[0].arrival.iata_code.clone(),
            duration: TravelDuration::from_minutes((pair[1].departure.at - pair[0].arrival.at).num_minutes()),
        })
        .collect();

    let cabin_class = offer
        .traveler_pricings
        .first()
        .and_then(|p| p.fare_details_by_segment.first())
        .and_then(|f| f.cabin.as_deref())
        .and_then(|c| c.parse().ok())
        .unwrap_or(requested_cabin);

    let carrier_code = first.carrier_code.clone();
    let carrier_name = carriers
        .get(&carrier_code)
        .cloned()
        .unwrap_or_else(|| carrier_code.clone());

    Ok(FlightOption {
        carrier_name,
        carrier_code,
        flight_number: first.number.clone(),
        cabin_class,
        origin: first.departure.iata_code.clone(),
        destination: last.arrival.iata_code.clone(),
        departure_at: first.departure.at,
        arrival_at: last.arrival.at,
        duration,
        price,
        display_price,
        layovers,
    })
}

/// Shapes the first offer of a hotel document. `Ok(None)` when the hotel
/// has no offers for the dates.
fn shape_hotel(
    hotel_id: &str,
    candidate: &Value,
    document: &Value,
    settlement_currency: &str,
) -> Result<Option<HotelOption>, String> {
    let document = RawHotelDocument::deserialize(document).map_err(|e| e.to_string())?;
    let Some(offer) = document.offers.first() else {
        return Ok(None);
    };

    let name = document
        .hotel
        .and_then(|h| h.name)
        .or_else(|| candidate.get("name").and_then(Value::as_str).map(str::to_string))
        .ok_or_else(|| "hotel has no name".to_string())?;

    let total_price = settled_price(&offer.price, settlement_currency)?;
    let nights = (offer.check_out_date - offer.check_in_date).num_days();
    let nightly_price = total_price.divided_by(u32::try_from(nights).unwrap_or(0));

    let room = offer.room.as_ref();
    let room_category = room
        .and_then(|r| r.type_estimated.as_ref())
        .and_then(|t| t.category.clone())
        .unwrap_or_else(|| "ROOM".to_string());
    let description = room
        .and_then(|r| r.description.as_ref())
        .and_then(|d| d.text.clone())
        .unwrap_or_default();

    Ok(Some(HotelOption {
        hotel_id: hotel_id.to_string(),
        name,
        room_category,
        check_in: offer.check_in_date,
        check_out: offer.check_out_date,
        nightly_price,
        total_price,
        rating: rating_of(candidate),
        address: candidate
            .pointer("/address/lines/0")
            .and_then(Value::as_str)
            .map(str::to_string),
        description,
    }))
}

/// Parses a provider price. Prices outside the settlement currency cannot
/// be added to the rest of the trip, so they are refused here.
fn settled_price(price: &RawPrice, settlement_currency: &str) -> Result<Money, String> {
    if !price.currency.eq_ignore_ascii_case(settlement_currency) {
        return Err(format!(
            "priced in {} instead of {}",
            price.currency, settlement_currency
        ));
    }
    Money::parse(&price.total, &price.currency).map_err(|e| e.to_string())
}

/// Star rating from the hotel list, given as text or a number.
fn rating_of(candidate: &Value) -> Option<u8> {
    match candidate.get("rating")? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        _ => None,
    }
    .filter(|r| (1..=5).contains(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::search::{samples, MockSearchProvider};
    use crate::domain::booking::HotelRating;
    use crate::ports::{FlightSearchResponse, SearchProviderError};
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()
    }

    fn outbound_query() -> FlightLegQuery {
        FlightLegQuery {
            leg: Leg::Outbound,
            origin: "KUL".into(),
            destination: "SIN".into(),
            date: day(),
            cabin_class: CabinClass::Economy,
        }
    }

    fn hotel_params() -> HotelSearchParams {
        HotelSearchParams {
            city: "SIN".into(),
            check_in: day(),
            check_out: day() + chrono::Duration::days(2),
            rating: None,
        }
    }

    fn orchestrator(provider: MockSearchProvider) -> SearchOrchestrator {
        SearchOrchestrator::new(Arc::new(provider), SearchSettings::default())
    }

    fn offers(prices: &[&str]) -> FlightSearchResponse {
        FlightSearchResponse {
            offers: prices
                .iter()
                .enumerate()
                .map(|(i, p)| samples::kul_sin(&format!("60{}", i), "2030-05-01", p))
                .collect(),
            carriers: HashMap::from([("MH".to_string(), "Malaysia Airlines".to_string())]),
            conversion: None,
        }
    }

    mod flights {
        use super::*;

        #[tokio::test]
        async fn keeps_provider_order_and_caps_at_three() {
            let provider = MockSearchProvider::new().with_flights(offers(&["450.00", "520.00", "530.00", "600.00", "610.00"]));
            let search = orchestrator(provider.clone());

            let list = search.search_flight_leg(&outbound_query()).await;

            assert_eq!(list.len(), 3);
            let prices: Vec<i64> = list
                .iter()
                .map(|e| e.as_option().unwrap().price.amount_minor())
                .collect();
            assert_eq!(prices, vec![45_000, 52_000, 53_000]);
            assert_eq!(provider.flight_queries()[0].max_results, 5);
        }

        #[tokio::test]
        async fn resolves_carrier_names_with_code_fallback() {
            let mut response = offers(&["450.00"]);
            response.offers.push(samples::flight_offer(
                "ZZ", "9", "KUL", "SIN", "2030-05-01T10:00:00", "2030-05-01T11:00:00", "PT1H", "300.00", "MYR",
            ));
            let search = orchestrator(MockSearchProvider::new().with_flights(response));

            let list = search.search_flight_leg(&outbound_query()).await;

            assert_eq!(list[0].as_option().unwrap().carrier_name, "Malaysia Airlines");
            assert_eq!(list[1].as_option().unwrap().carrier_name, "ZZ");
            assert_eq!(list[1].as_option().unwrap().duration.to_string(), "1h");
        }

        #[tokio::test]
        async fn computes_layovers_between_segments() {
            let offer = json!({
                "price": { "total": "380.00", "currency": "MYR" },
                "itineraries": [{
                    "duration": "PT4H",
                    "segments": [
                        { "departure": { "iataCode": "KUL", "at": "2030-05-01T07:00:00" },
                          "arrival": { "iataCode": "PEN", "at": "2030-05-01T08:00:00" },
                          "carrierCode": "AK", "number": "6100" },
                        { "departure": { "iataCode": "PEN", "at": "2030-05-01T09:30:00" },
                          "arrival": { "iataCode": "SIN", "at": "2030-05-01T11:00:00" },
                          "carrierCode": "AK", "number": "1700" }
                    ]
                }],
                "travelerPricings": [{ "fareDetailsBySegment": [{ "cabin": "business" }] }]
            });
            let search = orchestrator(MockSearchProvider::new().with_flights(FlightSearchResponse {
                offers: vec![offer],
                ..Default::default()
            }));

            let list = search.search_flight_leg(&outbound_query()).await;
            let option = list[0].as_option().unwrap();

            assert_eq!(option.origin, "KUL");
            assert_eq!(option.destination, "SIN");
            assert_eq!(option.cabin_class, CabinClass::Business);
            assert_eq!(option.layovers.len(), 1);
            assert_eq!(option.layovers[0].airport, "PEN");
            assert_eq!(option.layovers[0].duration.to_string(), "1h 30m");
        }

        #[tokio::test]
        async fn malformed_offer_becomes_placeholder_in_place() {
            let mut response = offers(&["450.00", "520.00"]);
            response.offers.insert(1, json!({ "price": { "total": "oops" } }));
            let search = orchestrator(MockSearchProvider::new().with_flights(response));

            let list = search.search_flight_leg(&outbound_query()).await;

            assert_eq!(list.len(), 3);
            assert!(list[0].as_option().is_some());
            assert!(matches!(list[1], ListedOption::Unformattable { .. }));
            assert!(list[2].as_option().is_some());
        }

        #[tokio::test]
        async fn overflowing_duration_only_spoils_its_own_offer() {
            let mut response = offers(&["450.00"]);
            response.offers.push(samples::flight_offer(
                "MH", "7", "KUL", "SIN", "2030-05-01T10:00:00", "2030-05-01T11:00:00", "P200000000D", "300.00", "MYR",
            ));
            let search = orchestrator(MockSearchProvider::new().with_flights(response));

            let list = search.search_flight_leg(&outbound_query()).await;

            assert_eq!(list.len(), 2);
            assert!(list[0].as_option().is_some());
            assert!(matches!(list[1], ListedOption::Unformattable { .. }));
        }

        #[tokio::test]
        async fn offer_outside_settlement_currency_is_not_selectable() {
            let mut response = offers(&["450.00"]);
            response.offers.push(samples::flight_offer(
                "SQ", "105", "KUL", "SIN", "2030-05-01T11:30:00", "2030-05-01T12:35:00", "PT1H5M", "140.00", "SGD",
            ));
            let search = orchestrator(MockSearchProvider::new().with_flights(response));

            let list = search.search_flight_leg(&outbound_query()).await;

            assert!(list[0].as_option().is_some());
            assert!(matches!(list[1], ListedOption::Unformattable { .. }));
        }

        #[tokio::test]
        async fn provider_error_yields_empty_list() {
            let search = orchestrator(
                MockSearchProvider::new().with_flight_error(SearchProviderError::api(500, "boom")),
            );
            assert!(search.search_flight_leg(&outbound_query()).await.is_empty());
        }

        #[tokio::test]
        async fn timeout_yields_empty_list() {
            let provider = MockSearchProvider::new()
                .with_flights(offers(&["450.00"]))
                .with_delay(Duration::from_millis(200));
            let settings = SearchSettings {
                timeout: Duration::from_millis(20),
                ..Default::default()
            };
            let search = SearchOrchestrator::new(Arc::new(provider), settings);

            assert!(search.search_flight_leg(&outbound_query()).await.is_empty());
        }

        #[tokio::test]
        async fn conversion_table_only_sets_display_price() {
            let mut response = offers(&["100.00"]);
            response.conversion = Some(ConversionTable {
                target: "USD".into(),
                rates: HashMap::from([("MYR".to_string(), 0.25)]),
            });
            let settings = SearchSettings {
                display_currency: Some("usd".into()),
                ..Default::default()
            };
            let search = SearchOrchestrator::new(
                Arc::new(MockSearchProvider::new().with_flights(response)),
                settings,
            );

            let list = search.search_flight_leg(&outbound_query()).await;
            let option = list[0].as_option().unwrap();

            assert_eq!(option.price, Money::from_major(100, "MYR").unwrap());
            assert_eq!(option.display_price, Some(Money::from_major(25, "USD").unwrap()));
        }

        #[tokio::test]
        async fn conversion_ignored_without_display_currency() {
            let mut response = offers(&["100.00"]);
            response.conversion = Some(ConversionTable {
                target: "USD".into(),
                rates: HashMap::from([("MYR".to_string(), 0.25)]),
            });
            let search = orchestrator(MockSearchProvider::new().with_flights(response));

            let list = search.search_flight_leg(&outbound_query()).await;
            assert_eq!(list[0].as_option().unwrap().display_price, None);
        }
    }

    mod hotels {
        use super::*;

        fn offers_doc(id: &str, total: &str) -> Value {
            samples::hotel_offers(id, &format!("Hotel {id}"), "2030-05-01", "2030-05-03", total, "MYR")
        }

        #[tokio::test]
        async fn failing_hotel_is_skipped() {
            let provider = MockSearchProvider::new()
                .with_hotels(vec![
                    samples::hotel("H1", "Hotel H1", Some(4)),
                    samples::hotel("H2", "Hotel H2", Some(3)),
                    samples::hotel("H3", "Hotel H3", None),
                ])
                .with_hotel_offers("H1", offers_doc("H1", "300.00"))
                .with_hotel_offers_error("H2", SearchProviderError::api(400, "sold out"))
                .with_hotel_offers("H3", offers_doc("H3", "200.00"));
            let search = orchestrator(provider);

            let list = search.search_hotels(&hotel_params()).await;

            let ids: Vec<&str> = list.iter().map(|e| e.as_option().unwrap().hotel_id.as_str()).collect();
            assert_eq!(ids, vec!["H1", "H3"]);
            let first = list[0].as_option().unwrap();
            assert_eq!(first.nightly_price, Money::from_major(150, "MYR").unwrap());
            assert_eq!(first.rating, Some(4));
            assert_eq!(list[1].as_option().unwrap().rating, None);
        }

        #[tokio::test]
        async fn only_five_candidates_are_queried() {
            let hotels: Vec<Value> = (0..8).map(|i| samples::hotel(&format!("H{i}"), "X", None)).collect();
            let provider = MockSearchProvider::new().with_hotels(hotels);
            let search = orchestrator(provider.clone());

            let list = search.search_hotels(&hotel_params()).await;

            assert!(list.is_empty());
            // one city search plus five offer lookups
            assert_eq!(provider.call_count(), 6);
        }

        #[tokio::test]
        async fn zero_city_matches_yields_empty_list() {
            let search = orchestrator(MockSearchProvider::new().with_hotels(vec![]));
            assert!(search.search_hotels(&hotel_params()).await.is_empty());
        }

        #[tokio::test]
        async fn city_search_error_yields_empty_list() {
            let search = orchestrator(
                MockSearchProvider::new().with_hotel_list_error(SearchProviderError::transport("down")),
            );
            assert!(search.search_hotels(&hotel_params()).await.is_empty());
        }

        #[tokio::test]
        async fn rating_filter_is_passed_as_list() {
            let provider = MockSearchProvider::new().with_hotels(vec![]);
            let search = orchestrator(provider.clone());
            let mut params = hotel_params();
            params.rating = Some(HotelRating::new(4).unwrap());

            search.search_hotels(&params).await;

            match &provider.get_calls()[0] {
                crate::adapters::search::MockSearchCall::HotelsByCity(q) => {
                    assert_eq!(q.ratings, vec![4, 5]);
                    assert_eq!(q.radius_km, 5);
                }
                other => panic!("unexpected call {other:?}"),
            }
        }

        #[tokio::test]
        async fn hotel_priced_in_local_currency_is_not_selectable() {
            let provider = MockSearchProvider::new()
                .with_hotels(vec![
                    samples::hotel("H1", "Hotel H1", Some(4)),
                    samples::hotel("H2", "Hotel H2", Some(4)),
                ])
                .with_hotel_offers(
                    "H1",
                    samples::hotel_offers("H1", "Hotel H1", "2030-05-01", "2030-05-03", "300.00", "SGD"),
                )
                .with_hotel_offers("H2", offers_doc("H2", "280.00"));
            let search = orchestrator(provider);

            let list = search.search_hotels(&hotel_params()).await;

            assert_eq!(list.len(), 2);
            assert!(matches!(list[0], ListedOption::Unformattable { .. }));
            assert_eq!(list[1].as_option().unwrap().total_price, Money::from_major(280, "MYR").unwrap());
        }

        #[tokio::test]
        async fn malformed_offer_document_becomes_placeholder() {
            let provider = MockSearchProvider::new()
                .with_hotels(vec![samples::hotel("H1", "Hotel H1", None)])
                .with_hotel_offers("H1", json!({ "offers": [{ "price": {} }] }));
            let search = orchestrator(provider);

            let list = search.search_hotels(&hotel_params()).await;
            assert!(matches!(list[0], ListedOption::Unformattable { .. }));
        }
    }
}
