//! Parameter validation run before any provider call.
//!
//! Pure functions: no I/O, and the current date is passed in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{FlightSlots, HotelSlots};
use super::trip::{CabinClass, HotelRating, TripType};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Bad user input. Always retryable; the message is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("Please provide the {field}.")]
    Missing { field: &'static str },

    #[error("'{value}' is not a valid {field}. Please use the YYYY-MM-DD format.")]
    InvalidDate { field: &'static str, value: String },

    #[error("Please provide a future date for departure.")]
    DepartureInPast,

    #[error("The return date must be after the departure date.")]
    ReturnNotAfterDeparture,

    #[error("The check-out date must be after the check-in date.")]
    CheckOutNotAfterCheckIn,

    #[error("Destination cannot be the same as origin.")]
    SameOriginAndDestination,

    #[error("'{0}' is not a trip type I know. Is it one-way or round trip?")]
    UnknownTripType(String),

    #[error("'{0}' is not a cabin class I know. Choose economy, premium economy, business or first.")]
    UnknownCabinClass(String),

    #[error("'{0}' is not a valid hotel rating. Please choose between 1 and 5 stars.")]
    InvalidRating(String),
}

/// Validated flight search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchParams {
    pub trip_type: TripType,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub cabin_class: CabinClass,
}

/// Validated hotel search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelSearchParams {
    pub city: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rating: Option<HotelRating>,
}

/// Predicate form of [`check_flight_params`].
pub fn validate_flight_params(
    origin: &str,
    destination: &str,
    departure_date: &str,
    return_date: Option<&str>,
    trip_type: TripType,
    today: NaiveDate,
) -> bool {
    check_flight_params(origin, destination, departure_date, return_date, trip_type, today).is_ok()
}

/// Checks flight parameters and returns the parsed dates.
///
/// The departure date must be today or later. For round trips the return
/// date must parse and fall strictly after departure; single trips ignore it.
pub fn check_flight_params(
    origin: &str,
    destination: &str,
    departure_date: &str,
    return_date: Option<&str>,
    trip_type: TripType,
    today: NaiveDate,
) -> Result<(NaiveDate, Option<NaiveDate>), ParameterError> {
    let origin = required("origin airport", origin)?;
    let destination = required("destination airport", destination)?;
    let departure_raw = required("departure date", departure_date)?;

    if origin.eq_ignore_ascii_case(destination) {
        return Err(ParameterError::SameOriginAndDestination);
    }

    let departure = parse_date("departure date", departure_raw)?;
    if departure < today {
        return Err(ParameterError::DepartureInPast);
    }

    let ret = match trip_type {
        TripType::Single => None,
        TripType::Round => {
            let raw = required("return date", return_date.unwrap_or_default())?;
            let ret = parse_date("return date", raw)?;
            if ret <= departure {
                return Err(ParameterError::ReturnNotAfterDeparture);
            }
            Some(ret)
        }
    };

    Ok((departure, ret))
}

/// Predicate form of [`check_hotel_params`].
pub fn validate_hotel_params(city: &str, check_in: &str, check_out: &str) -> bool {
    check_hotel_params(city, check_in, check_out).is_ok()
}

/// Checks hotel parameters: both dates parse and check-out follows check-in.
pub fn check_hotel_params(
    city: &str,
    check_in: &str,
    check_out: &str,
) -> Result<(NaiveDate, NaiveDate), ParameterError> {
    required("city", city)?;
    let check_in = parse_date("check-in date", required("check-in date", check_in)?)?;
    let check_out = parse_date("check-out date", required("check-out date", check_out)?)?;
    if check_out <= check_in {
        return Err(ParameterError::CheckOutNotAfterCheckIn);
    }
    Ok((check_in, check_out))
}

/// Validates collected flight slots into search parameters.
pub fn flight_params_from_slots(
    slots: &FlightSlots,
    today: NaiveDate,
) -> Result<FlightSearchParams, ParameterError> {
    let trip_type = slots.trip_type.ok_or(ParameterError::Missing {
        field: "trip type (one-way or round trip)",
    })?;
    let origin = slots.origin.as_deref().unwrap_or_default();
    let destination = slots.destination.as_deref().unwrap_or_default();

    let (departure_date, return_date) = check_flight_params(
        origin,
        destination,
        slots.departure_date.as_deref().unwrap_or_default(),
        slots.return_date.as_deref(),
        trip_type,
        today,
    )?;

    let cabin_class = match slots.cabin_class.as_deref().map(str::trim) {
        None | Some("") => CabinClass::default(),
        Some(raw) => raw
            .parse()
            .map_err(|_| ParameterError::UnknownCabinClass(raw.to_string()))?,
    };

    Ok(FlightSearchParams {
        trip_type,
        origin: normalize_code(origin),
        destination: normalize_code(destination),
        departure_date,
        return_date,
        cabin_class,
    })
}

/// Validates collected hotel slots into search parameters.
pub fn hotel_params_from_slots(slots: &HotelSlots) -> Result<HotelSearchParams, ParameterError> {
    let city = slots.city.as_deref().unwrap_or_default();
    let (check_in, check_out) = check_hotel_params(
        city,
        slots.check_in.as_deref().unwrap_or_default(),
        slots.check_out.as_deref().unwrap_or_default(),
    )?;

    let rating = match slots.hotel_rating.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => {
            let stars = raw
                .trim_end_matches(|c: char| !c.is_ascii_digit())
                .parse::<u8>()
                .map_err(|_| ParameterError::InvalidRating(raw.to_string()))?;
            Some(HotelRating::new(stars).map_err(|_| ParameterError::InvalidRating(raw.to_string()))?)
        }
    };

    Ok(HotelSearchParams {
        city: normalize_code(city),
        check_in,
        check_out,
        rating,
    })
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ParameterError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParameterError::Missing { field });
    }
    Ok(value)
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ParameterError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ParameterError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
