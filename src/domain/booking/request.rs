//! The persisted travel request and the document generated from it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, TravelRequestId, UserId};

use super::assembler::TravelRequestPreview;
use super::options::{FlightOption, Layover};
use super::state::UserIdentity;
use super::trip::{CabinClass, TripType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A confirmed travel request as handed to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRequest {
    pub id: TravelRequestId,
    /// Human-facing number, `TR-YYYYMMDD-XXXXXX`.
    pub request_number: String,
    pub user_id: Option<UserId>,
    pub status: RequestStatus,
    pub travel_type: String,
    pub total_cost: Money,
    pub flight_details: FlightDetails,
    pub hotel_details: HotelDetails,
    pub approval_status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDetails {
    pub trip_type: TripType,
    pub origin: String,
    pub destination: String,
    pub outbound_flight: FlightRecord,
    pub return_flight: Option<FlightRecord>,
    pub layovers: Vec<Layover>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub airline: String,
    pub flight_number: String,
    pub cabin_class: CabinClass,
    pub departure_datetime: NaiveDateTime,
    pub arrival_datetime: NaiveDateTime,
    pub duration: String,
    pub price: Money,
}

impl From<&FlightOption> for FlightRecord {
    fn from(flight: &FlightOption) -> Self {
        Self {
            airline: flight.carrier_name.clone(),
            flight_number: flight.flight_code(),
            cabin_class: flight.cabin_class,
            departure_datetime: flight.departure_at,
            arrival_datetime: flight.arrival_at,
            duration: flight.duration.to_string(),
            price: flight.price.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelDetails {
    pub city: String,
    pub hotel_name: String,
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub price_per_night: Money,
    pub total_price: Money,
    pub rating: u8,
}

impl TravelRequest {
    /// Builds the record for a confirmed preview.
    ///
    /// `city` is the hotel search city; the hotel offer itself only carries
    /// an address.
    pub fn from_preview(
        preview: &TravelRequestPreview,
        user_id: Option<UserId>,
        city: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let id = TravelRequestId::new();
        let outbound = &preview.outbound;

        let mut layovers = outbound.layovers.clone();
        if let Some(ret) = &preview.return_flight {
            layovers.extend(ret.layovers.iter().cloned());
        }

        Self {
            request_number: request_number(&id, now),
            id,
            user_id,
            status: RequestStatus::Pending,
            travel_type: "business".to_string(),
            total_cost: preview.total_cost.clone(),
            flight_details: FlightDetails {
                trip_type: preview.trip_type,
                origin: outbound.origin.clone(),
                destination: outbound.destination.clone(),
                outbound_flight: FlightRecord::from(outbound),
                return_flight: preview.return_flight.as_ref().map(FlightRecord::from),
                layovers,
            },
            hotel_details: HotelDetails {
                city: city.into(),
                hotel_name: preview.hotel.name.clone(),
                room_type: preview.hotel.room_category.clone(),
                check_in: preview.hotel.check_in,
                check_out: preview.hotel.check_out,
                nights: preview.nights,
                price_per_night: preview.nightly_rate.clone(),
                total_price: preview.hotel.total_price.clone(),
                rating: preview.hotel.rating.unwrap_or(0),
            },
            approval_status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

fn request_number(id: &TravelRequestId, now: DateTime<Utc>) -> String {
    let suffix: String = id
        .as_uuid()
        .simple()
        .to_string()
        .chars()
        .take(6)
        .collect::<String>()
        .to_ascii_uppercase();
    format!("TR-{}-{}", now.format("%Y%m%d"), suffix)
}

/// Traveller details printed on the trip document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveller {
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub employee_id: Option<String>,
    pub phone: Option<String>,
}

impl From<&UserIdentity> for Traveller {
    fn from(identity: &UserIdentity) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
            department: identity.department.clone(),
            employee_id: identity.employee_id.clone(),
            phone: identity.phone.clone(),
        }
    }
}

/// Input to the document generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDocument {
    pub request_id: TravelRequestId,
    pub request_number: String,
    pub traveller: Traveller,
    pub flight: FlightDetails,
    pub hotel: HotelDetails,
    pub total_cost: Money,
}

impl TripDocument {
    pub fn new(request: &TravelRequest, identity: Option<&UserIdentity>) -> Self {
        Self {
            request_id: request.id,
            request_number: request.request_number.clone(),
            traveller: identity.map(Traveller::from).unwrap_or_default(),
            flight: request.flight_details.clone(),
            hotel: request.hotel_details.clone(),
            total_cost: request.total_cost.clone(),
        }
    }
}
