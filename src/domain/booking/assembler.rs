//! Builds the priced travel request preview from the selected options.
//!
//! Works on the structured option records carried in the conversation
//! state. Display text is never read back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{Money, MoneyError};

use super::display;
use super::options::{FlightOption, HotelOption};
use super::state::ConversationState;
use super::trip::{Leg, TripType};

/// Assembly could not produce a preview.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("Please finish choosing your {}.", join_legs(.missing))]
    Missing { missing: Vec<Leg> },

    #[error("Prices could not be combined: {0}")]
    Pricing(#[from] MoneyError),
}

fn join_legs(legs: &[Leg]) -> String {
    legs.iter().map(Leg::label).collect::<Vec<_>>().join(" and ")
}

/// The assembled, priced request awaiting confirmation.
///
/// Produced once both legs are selected and consumed by the confirmation
/// step. `total_cost` is always in the settlement currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRequestPreview {
    pub trip_type: TripType,
    pub outbound: FlightOption,
    pub return_flight: Option<FlightOption>,
    pub hotel: HotelOption,
    pub nights: u32,
    pub nightly_rate: Money,
    pub total_cost: Money,
    /// Total converted at the provider's rate, for display only.
    pub display_total: Option<Money>,
    pub summary: String,
}

/// Assembles the preview for `state`'s current selections.
pub fn assemble(state: &ConversationState) -> Result<TravelRequestPreview, AssemblyError> {
    let trip_type = state.trip_type();

    let mut missing = Vec::new();
    if state.selected_outbound.is_none() {
        missing.push(Leg::Outbound);
    }
    if trip_type.is_round() && state.selected_return.is_none() {
        missing.push(Leg::Return);
    }
    if state.selected_hotel.is_none() {
        missing.push(Leg::Hotel);
    }

    let (outbound, hotel) = match (&state.selected_outbound, &state.selected_hotel) {
        (Some(outbound), Some(hotel)) if missing.is_empty() => (outbound, hotel),
        _ => return Err(AssemblyError::Missing { missing }),
    };
    let return_flight = if trip_type.is_round() {
        state.selected_return.clone()
    } else {
        None
    };

    let mut total_cost = outbound.price.clone();
    if let Some(ret) = &return_flight {
        total_cost = total_cost.checked_add(&ret.price)?;
    }
    total_cost = total_cost.checked_add(&hotel.total_price)?;

    let nights = u32::try_from(hotel.nights()).unwrap_or(0);
    let nightly_rate = hotel.total_price.divided_by(nights);
    let display_total = display_total(outbound, &total_cost);

    let mut preview = TravelRequestPreview {
        trip_type,
        outbound: outbound.clone(),
        return_flight,
        hotel: hotel.clone(),
        nights,
        nightly_rate,
        total_cost,
        display_total,
        summary: String::new(),
    };
    preview.summary = display::preview_summary(&preview);
    Ok(preview)
}

/// Applies the outbound offer's conversion rate to the total.
fn display_total(outbound: &FlightOption, total: &Money) -> Option<Money> {
    let converted = outbound.display_price.as_ref()?;
    if outbound.price.amount_minor() == 0 || outbound.price.currency() != total.currency() {
        return None;
    }
    let rate = converted.amount_minor() as f64 / outbound.price.amount_minor() as f64;
    total.converted(rate, converted.currency()).ok()
}
