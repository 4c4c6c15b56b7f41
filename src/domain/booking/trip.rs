//! Trip vocabulary: trip type, cabin class, hotel rating, and legs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Whether the traveller flies one way or there and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    #[default]
    Single,
    Round,
}

impl TripType {
    pub fn is_round(&self) -> bool {
        matches!(self, Self::Round)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Round => "round",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TripType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_word(s);
        match key.as_str() {
            "single" | "one_way" | "oneway" => Ok(Self::Single),
            "round" | "round_trip" | "roundtrip" | "return" => Ok(Self::Round),
            _ => Err(ValidationError::invalid_format(
                "trip_type",
                format!("'{}' is not single or round", s.trim()),
            )),
        }
    }
}

/// Cabin classes in the provider's enumerated spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// The value the search provider expects, e.g. `PREMIUM_ECONOMY`.
    pub fn provider_code(&self) -> &'static str {
        match self {
            Self::Economy => "ECONOMY",
            Self::PremiumEconomy => "PREMIUM_ECONOMY",
            Self::Business => "BUSINESS",
            Self::First => "FIRST",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::PremiumEconomy => "Premium Economy",
            Self::Business => "Business",
            Self::First => "First",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CabinClass {
    type Err = ValidationError;

    /// Case-normalized: "business", "Premium Economy" and "PREMIUM-ECONOMY" all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_word(s).as_str() {
            "economy" | "eco" => Ok(Self::Economy),
            "premium_economy" | "premium" => Ok(Self::PremiumEconomy),
            "business" => Ok(Self::Business),
            "first" | "first_class" => Ok(Self::First),
            _ => Err(ValidationError::invalid_format(
                "cabin_class",
                format!("'{}' is not a known cabin class", s.trim()),
            )),
        }
    }
}

/// Minimum star rating filter for hotel searches (1 to 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HotelRating(u8);

impl HotelRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&stars) {
            return Err(ValidationError::out_of_range(
                "hotel_rating",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                i64::from(stars),
            ));
        }
        Ok(Self(stars))
    }

    pub fn stars(&self) -> u8 {
        self.0
    }

    /// Ratings at or above this one, as the provider's rating list filter.
    pub fn provider_filter(&self) -> Vec<u8> {
        (self.0..=Self::MAX).collect()
    }
}

impl TryFrom<u8> for HotelRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HotelRating> for u8 {
    fn from(rating: HotelRating) -> Self {
        rating.0
    }
}

/// The two bookable units of a travel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingLeg {
    Flight,
    Hotel,
}

impl BookingLeg {
    pub fn other(&self) -> Self {
        match self {
            Self::Flight => Self::Hotel,
            Self::Hotel => Self::Flight,
        }
    }
}

impl fmt::Display for BookingLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flight => f.write_str("flight"),
            Self::Hotel => f.write_str("hotel"),
        }
    }
}

/// One selection unit: a directional flight or the hotel stay.
///
/// Every option list is tagged with the leg it was searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    Outbound,
    Return,
    Hotel,
}

impl Leg {
    pub fn booking_leg(&self) -> BookingLeg {
        match self {
            Self::Outbound | Self::Return => BookingLeg::Flight,
            Self::Hotel => BookingLeg::Hotel,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Outbound => "outbound flight",
            Self::Return => "return flight",
            Self::Hotel => "hotel",
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_word(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .replace(['-', ' '], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    mod trip_type {
        use super::*;

        #[test]
        fn parses_single_synonyms() {
            for s in ["single", "One-Way", "oneway", " SINGLE "] {
                assert_eq!(s.parse::<TripType>().unwrap(), TripType::Single, "{s}");
            }
        }

        #[test]
        fn parses_round_synonyms() {
            for s in ["round", "Round Trip", "return", "round-trip"] {
                assert_eq!(s.parse::<TripType>().unwrap(), TripType::Round, "{s}");
            }
        }

        #[test]
        fn rejects_unknown() {
            assert!("circle".parse::<TripType>().is_err());
        }
    }

    mod cabin_class {
        use super::*;

        #[test]
        fn parsing_is_case_normalized() {
            assert_eq!("business".parse::<CabinClass>().unwrap(), CabinClass::Business);
            assert_eq!("BUSINESS".parse::<CabinClass>().unwrap(), CabinClass::Business);
            assert_eq!(
                "Premium Economy".parse::<CabinClass>().unwrap(),
                CabinClass::PremiumEconomy
            );
            assert_eq!(
                "premium-economy".parse::<CabinClass>().unwrap(),
                CabinClass::PremiumEconomy
            );
        }

        #[test]
        fn provider_code_uses_enumerated_spelling() {
            assert_eq!(CabinClass::PremiumEconomy.provider_code(), "PREMIUM_ECONOMY");
            assert_eq!(
                serde_json::to_string(&CabinClass::PremiumEconomy).unwrap(),
                "\"PREMIUM_ECONOMY\""
            );
        }
    }

    mod hotel_rating {
        use super::*;

        #[test]
        fn accepts_one_to_five() {
            assert!(HotelRating::new(1).is_ok());
            assert!(HotelRating::new(5).is_ok());
            assert!(HotelRating::new(0).is_err());
            assert!(HotelRating::new(6).is_err());
        }

        #[test]
        fn provider_filter_includes_higher_ratings() {
            assert_eq!(HotelRating::new(3).unwrap().provider_filter(), vec![3, 4, 5]);
        }

        #[test]
        fn deserialization_enforces_range() {
            assert!(serde_json::from_str::<HotelRating>("4").is_ok());
            assert!(serde_json::from_str::<HotelRating>("9").is_err());
        }
    }

    #[test]
    fn legs_map_to_booking_legs() {
        assert_eq!(Leg::Outbound.booking_leg(), BookingLeg::Flight);
        assert_eq!(Leg::Return.booking_leg(), BookingLeg::Flight);
        assert_eq!(Leg::Hotel.booking_leg(), BookingLeg::Hotel);
        assert_eq!(BookingLeg::Flight.other(), BookingLeg::Hotel);
    }
}
