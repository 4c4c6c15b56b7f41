//! Offers presented to the user: flight and hotel options and leg-tagged lists.
//!
//! Options are produced once by the search orchestrator and never mutated.
//! Display text is a projection of these records (see `display`), never the
//! other way around.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;

use super::duration::TravelDuration;
use super::trip::{CabinClass, Leg};

/// A stop between two segments of one itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layover {
    pub airport: String,
    pub duration: TravelDuration,
}

/// One bookable flight itinerary for a single direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    pub carrier_code: String,
    /// Display name resolved from the provider's carrier table, or the raw code.
    pub carrier_name: String,
    pub flight_number: String,
    pub cabin_class: CabinClass,
    pub origin: String,
    pub destination: String,
    pub departure_at: NaiveDateTime,
    pub arrival_at: NaiveDateTime,
    pub duration: TravelDuration,
    /// Settlement price. This is what gets persisted.
    pub price: Money,
    /// Price converted for display only, when the provider supplied a rate.
    pub display_price: Option<Money>,
    pub layovers: Vec<Layover>,
}

impl FlightOption {
    pub fn is_direct(&self) -> bool {
        self.layovers.is_empty()
    }

    /// Carrier code and number, e.g. `MH 603`.
    pub fn flight_code(&self) -> String {
        format!("{} {}", self.carrier_code, self.flight_number)
    }
}

/// One bookable room offer at a hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelOption {
    pub hotel_id: String,
    pub name: String,
    pub room_category: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nightly_price: Money,
    pub total_price: Money,
    pub rating: Option<u8>,
    pub address: Option<String>,
    pub description: String,
}

impl HotelOption {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// An entry in an option list.
///
/// An offer the orchestrator could not shape stays in its ranked slot as a
/// placeholder so the remaining offers keep their positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ListedOption<T> {
    Available { option: T },
    Unformattable { reason: String },
}

impl<T> ListedOption<T> {
    pub fn available(option: T) -> Self {
        Self::Available { option }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Available { option } => Some(option),
            Self::Unformattable { .. } => None,
        }
    }
}

/// A ranked, bounded list of offers opened for selection on one leg.
///
/// `list_id` is unique within a conversation; a selection that names a
/// different list id is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionList<T> {
    leg: Leg,
    list_id: u32,
    entries: Vec<ListedOption<T>>,
}

impl<T> OptionList<T> {
    pub fn new(leg: Leg, list_id: u32, entries: Vec<ListedOption<T>>) -> Self {
        Self {
            leg,
            list_id,
            entries,
        }
    }

    pub fn leg(&self) -> Leg {
        self.leg
    }

    pub fn list_id(&self) -> u32 {
        self.list_id
    }

    pub fn entries(&self) -> &[ListedOption<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ListedOption<T>> {
        self.entries.get(index)
    }

    /// True when at least one entry can actually be booked.
    pub fn has_available(&self) -> bool {
        self.entries.iter().any(|e| e.as_option().is_some())
    }
}

/// Identifies the list currently open for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenList {
    pub leg: Leg,
    pub list_id: u32,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    pub fn flight(price_major: i64, currency: &str) -> FlightOption {
        let day = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
        FlightOption {
            carrier_code: "MH".to_string(),
            carrier_name: "Malaysia Airlines".to_string(),
            flight_number: format!("6{:02}", price_major % 100),
            cabin_class: CabinClass::Economy,
            origin: "KUL".to_string(),
            destination: "SIN".to_string(),
            departure_at: day.and_hms_opt(8, 0, 0).unwrap(),
            arrival_at: day.and_hms_opt(9, 5, 0).unwrap(),
            duration: TravelDuration::new(Some(1), Some(5)),
            price: Money::from_major(price_major, currency).unwrap(),
            display_price: None,
            layovers: Vec::new(),
        }
    }

    pub fn hotel(total_major: i64, nights: i64, currency: &str) -> HotelOption {
        let check_in = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
        let total = Money::from_major(total_major, currency).unwrap();
        HotelOption {
            hotel_id: "HLSIN001".to_string(),
            name: "Marina Stay".to_string(),
            room_category: "STANDARD_ROOM".to_string(),
            check_in,
            check_out: check_in + chrono::Duration::days(nights),
            nightly_price: total.divided_by(nights as u32),
            total_price: total,
            rating: Some(4),
            address: Some("1 Bayfront Ave, Singapore".to_string()),
            description: "Harbour view".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn option_list_reports_leg_and_id() {
        let list = OptionList::new(Leg::Outbound, 7, vec![ListedOption::available(flight(450, "MYR"))]);
        assert_eq!(list.leg(), Leg::Outbound);
        assert_eq!(list.list_id(), 7);
        assert_eq!(list.len(), 1);
        assert!(list.has_available());
    }

    #[test]
    fn placeholder_only_list_has_nothing_available() {
        let list: OptionList<FlightOption> = OptionList::new(
            Leg::Return,
            1,
            vec![ListedOption::Unformattable {
                reason: "missing price".to_string(),
            }],
        );
        assert!(!list.has_available());
        assert!(list.get(0).unwrap().as_option().is_none());
    }

    #[test]
    fn hotel_nights_from_dates() {
        assert_eq!(hotel(300, 2, "SGD").nights(), 2);
    }

    #[test]
    fn flight_code_joins_carrier_and_number() {
        let f = flight(450, "MYR");
        assert_eq!(f.flight_code(), "MH 650");
        assert!(f.is_direct());
    }
}
