//! Search provider backed by a YAML fixture file.
//!
//! Serves provider-shaped offers for any requested date from route and
//! hotel templates, so the console binary can run a full conversation
//! offline.
//!
//! ```yaml
//! carriers:
//!   MH: Malaysia Airlines
//! flights:
//!   - price: "450.00"
//!     currency: MYR
//!     segments:
//!       - { from: KUL, to: SIN, carrier: MH, number: "603", depart: "08:00", arrive: "09:05" }
//! hotels:
//!   SIN:
//!     - { hotel_id: HLSIN001, name: Marina Stay, rating: 4, nightly: "150.00", currency: MYR }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::fs;

use crate::domain::foundation::Money;
use crate::ports::{
    ConversionTable, FlightQuery, FlightSearchResponse, HotelCityQuery, SearchProvider,
    SearchProviderError,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFixtures {
    #[serde(default)]
    pub carriers: HashMap<String, String>,
    #[serde(default)]
    pub conversion: Option<ConversionTable>,
    #[serde(default)]
    pub flights: Vec<FlightTemplate>,
    /// City code to hotels.
    #[serde(default)]
    pub hotels: HashMap<String, Vec<HotelTemplate>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlightTemplate {
    pub price: String,
    pub currency: String,
    #[serde(default = "default_cabin")]
    pub cabin: String,
    pub segments: Vec<SegmentTemplate>,
}

fn default_cabin() -> String {
    "ECONOMY".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentTemplate {
    pub from: String,
    pub to: String,
    pub carrier: String,
    pub number: String,
    /// `HH:MM`, local to the search date plus `day_offset`.
    pub depart: String,
    pub arrive: String,
    #[serde(default)]
    pub day_offset: i64,
    /// Extra days between this segment's departure and arrival.
    #[serde(default)]
    pub arrive_day_offset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotelTemplate {
    pub hotel_id: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<u8>,
    pub nightly: String,
    pub currency: String,
    #[serde(default = "default_room")]
    pub room_category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: Option<String>,
    /// Make offer lookups for this hotel fail.
    #[serde(default)]
    pub unavailable: bool,
}

fn default_room() -> String {
    "STANDARD_ROOM".to_string()
}

/// Fixture-backed search provider.
#[derive(Debug, Clone)]
pub struct FixtureSearchProvider {
    fixtures: SearchFixtures,
}

impl FixtureSearchProvider {
    pub fn new(fixtures: SearchFixtures) -> Self {
        Self { fixtures }
    }

    /// Parses fixtures from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, SearchProviderError> {
        let fixtures = serde_yaml::from_str(yaml)
            .map_err(|e| SearchProviderError::InvalidResponse(format!("bad fixture file: {}", e)))?;
        Ok(Self::new(fixtures))
    }

    /// Loads fixtures from a YAML file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SearchProviderError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).await.map_err(|e| {
            SearchProviderError::transport(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&yaml)
    }

    fn find_hotel(&self, hotel_id: &str) -> Option<&HotelTemplate> {
        self.fixtures
            .hotels
            .values()
            .flatten()
            .find(|h| h.hotel_id == hotel_id)
    }
}

fn at(date: NaiveDate, day_offset: i64, time: &str) -> Result<NaiveDateTime, SearchProviderError> {
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| SearchProviderError::InvalidResponse(format!("bad fixture time '{}': {}", time, e)))?;
    Ok((date + Duration::days(day_offset)).and_time(time))
}

fn iso_duration(minutes: i64) -> String {
    match (minutes.max(0) / 60, minutes.max(0) % 60) {
        (0, m) => format!("PT{}M", m),
        (h, 0) => format!("PT{}H", h),
        (h, m) => format!("PT{}H{}M", h, m),
    }
}

fn render_offer(template: &FlightTemplate, date: NaiveDate) -> Result<Value, SearchProviderError> {
    let mut segments = Vec::with_capacity(template.segments.len());
    let mut first_departure = None;
    let mut last_arrival = None;

    for seg in &template.segments {
        let departure = at(date, seg.day_offset, &seg.depart)?;
        let arrival = at(date, seg.day_offset + seg.arrive_day_offset, &seg.arrive)?;
        first_departure.get_or_insert(departure);
        last_arrival = Some(arrival);
        segments.push(json!({
            "departure": { "iataCode": seg.from, "at": departure.format("%Y-%m-%dT%H:%M:%S").to_string() },
            "arrival": { "iataCode": seg.to, "at": arrival.format("%Y-%m-%dT%H:%M:%S").to_string() },
            "carrierCode": seg.carrier,
            "number": seg.number,
        }));
    }

    let minutes = match (first_departure, last_arrival) {
        (Some(d), Some(a)) => (a - d).num_minutes(),
        _ => 0,
    };
    let fare_details: Vec<Value> = template
        .segments
        .iter()
        .map(|_| json!({ "cabin": template.cabin }))
        .collect();

    Ok(json!({
        "price": { "total": template.price, "currency": template.currency },
        "itineraries": [{ "duration": iso_duration(minutes), "segments": segments }],
        "travelerPricings": [{ "fareDetailsBySegment": fare_details }],
    }))
}

#[async_trait]
impl SearchProvider for FixtureSearchProvider {
    async fn search_flights(
        &self,
        query: &FlightQuery,
    ) -> Result<FlightSearchResponse, SearchProviderError> {
        let mut offers = Vec::new();
        for template in &self.fixtures.flights {
            let (Some(first), Some(last)) = (template.segments.first(), template.segments.last())
            else {
                continue;
            };
            let cabin_matches = template.cabin.eq_ignore_ascii_case(query.cabin_class.provider_code());
            if first.from.eq_ignore_ascii_case(&query.origin)
                && last.to.eq_ignore_ascii_case(&query.destination)
                && cabin_matches
            {
                offers.push(render_offer(template, query.departure_date)?);
            }
            if offers.len() >= query.max_results as usize {
                break;
            }
        }

        Ok(FlightSearchResponse {
            offers,
            carriers: self.fixtures.carriers.clone(),
            conversion: self.fixtures.conversion.clone(),
        })
    }

    async fn search_hotels_by_city(
        &self,
        query: &HotelCityQuery,
    ) -> Result<Vec<Value>, SearchProviderError> {
        let hotels = self
            .fixtures
            .hotels
            .get(&query.city_code.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(hotels
            .iter()
            .filter(|h| {
                query.ratings.is_empty() || h.rating.is_some_and(|r| query.ratings.contains(&r))
            })
            .map(|h| {
                let mut value = json!({ "hotelId": h.hotel_id, "name": h.name });
                if let Some(rating) = h.rating {
                    value["rating"] = json!(rating.to_string());
                }
                if let Some(address) = &h.address {
                    value["address"] = json!({ "lines": [address] });
                }
                value
            })
            .collect())
    }

    async fn get_hotel_offers(
        &self,
        hotel_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Value, SearchProviderError> {
        let hotel = self
            .find_hotel(hotel_id)
            .ok_or_else(|| SearchProviderError::api(404, format!("unknown hotel {}", hotel_id)))?;
        if hotel.unavailable {
            return Err(SearchProviderError::api(
                400,
                format!("no rooms available at {}", hotel_id),
            ));
        }

        let nights = (check_out - check_in).num_days().max(1);
        let nightly = Money::parse(&hotel.nightly, &hotel.currency)
            .map_err(|e| SearchProviderError::InvalidResponse(e.to_string()))?;
        let total = nightly
            .amount_minor()
            .checked_mul(nights)
            .and_then(|minor| Money::from_minor(minor, nightly.currency()).ok())
            .ok_or_else(|| SearchProviderError::InvalidResponse("price overflow".to_string()))?;

        Ok(json!({
            "hotel": { "hotelId": hotel.hotel_id, "name": hotel.name },
            "available": true,
            "offers": [{
                "checkInDate": check_in.to_string(),
                "checkOutDate": check_out.to_string(),
                "room": {
                    "typeEstimated": { "category": hotel.room_category },
                    "description": { "text": hotel.description }
                },
                "price": { "currency": total.currency(), "total": total.amount_string() }
            }]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::CabinClass;
    use tempfile::TempDir;

    const FIXTURES: &str = r#"
carriers:
  MH: Malaysia Airlines
flights:
  - price: "450.00"
    currency: MYR
    segments:
      - { from: KUL, to: SIN, carrier: MH, number: "603", depart: "08:00", arrive: "09:05" }
  - price: "380.00"
    currency: MYR
    segments:
      - { from: KUL, to: PEN, carrier: AK, number: "6100", depart: "07:00", arrive: "08:00" }
      - { from: PEN, to: SIN, carrier: AK, number: "1700", depart: "09:30", arrive: "11:00" }
hotels:
  SIN:
    - { hotel_id: HLSIN001, name: Marina Stay, rating: 4, nightly: "150.00", currency: MYR }
    - { hotel_id: HLSIN002, name: Orchard Inn, rating: 3, nightly: "90.00", currency: MYR, unavailable: true }
"#;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()
    }

    fn query() -> FlightQuery {
        FlightQuery {
            origin: "KUL".into(),
            destination: "SIN".into(),
            departure_date: day(),
            cabin_class: CabinClass::Economy,
            max_results: 5,
            currency: "MYR".into(),
        }
    }

    #[tokio::test]
    async fn renders_matching_routes_for_requested_date() {
        let provider = FixtureSearchProvider::from_yaml(FIXTURES).unwrap();
        let response = provider.search_flights(&query()).await.unwrap();

        assert_eq!(response.offers.len(), 2);
        assert_eq!(response.carriers["MH"], "Malaysia Airlines");
        let first = &response.offers[0];
        assert_eq!(first["itineraries"][0]["duration"], "PT1H5M");
        assert_eq!(
            first["itineraries"][0]["segments"][0]["departure"]["at"],
            "2030-05-01T08:00:00"
        );
        let connecting = &response.offers[1];
        assert_eq!(connecting["itineraries"][0]["segments"].as_array().unwrap().len(), 2);
        assert_eq!(connecting["itineraries"][0]["duration"], "PT4H");
    }

    #[tokio::test]
    async fn cabin_class_filters_routes() {
        let provider = FixtureSearchProvider::from_yaml(FIXTURES).unwrap();
        let mut q = query();
        q.cabin_class = CabinClass::Business;
        assert!(provider.search_flights(&q).await.unwrap().offers.is_empty());
    }

    #[tokio::test]
    async fn hotel_rating_filter_and_offer_totals() {
        let provider = FixtureSearchProvider::from_yaml(FIXTURES).unwrap();
        let hotels = provider
            .search_hotels_by_city(&HotelCityQuery {
                city_code: "sin".into(),
                ratings: vec![4, 5],
                radius_km: 5,
            })
            .await
            .unwrap();
        assert_eq!(hotels.len(), 1);

        let offers = provider
            .get_hotel_offers("HLSIN001", day(), day() + Duration::days(2))
            .await
            .unwrap();
        assert_eq!(offers["offers"][0]["price"]["total"], "300.00");
    }

    #[tokio::test]
    async fn unavailable_hotel_fails_its_own_lookup() {
        let provider = FixtureSearchProvider::from_yaml(FIXTURES).unwrap();
        let result = provider
            .get_hotel_offers("HLSIN002", day(), day() + Duration::days(1))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fixtures.yaml");
        std::fs::write(&path, FIXTURES).unwrap();

        let provider = FixtureSearchProvider::load(&path).await.unwrap();
        assert_eq!(provider.search_flights(&query()).await.unwrap().offers.len(), 2);
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(FixtureSearchProvider::from_yaml("flights: [oops").is_err());
    }
}
