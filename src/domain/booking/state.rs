//! Conversation state for one booking dialogue.
//!
//! `BookingStep` is the explicit state machine; `ConversationState` is the
//! per-conversation record it governs. Each step's preconditions are checked
//! by the transition table, not by scattered "is this slot set" checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, StateMachine, UserId, ValidationError};

use super::assembler::TravelRequestPreview;
use super::options::{FlightOption, HotelOption, OpenList, OptionList};
use super::trip::{BookingLeg, Leg, TripType};

/// Where the conversation is in the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    #[default]
    Start,
    TripTypeSet,
    FlightParamsCollected,
    FlightSearched,
    OutboundSelected,
    ReturnSelected,
    FlightDone,
    HotelParamsCollected,
    HotelSearched,
    HotelSelected,
    HotelDone,
    PreviewReady,
    Saved,
}

impl BookingStep {
    /// The leg whose parameters or selections this step is working on.
    ///
    /// `None` between legs, where the controller decides what comes next.
    pub fn active_leg(&self) -> Option<BookingLeg> {
        use BookingStep::*;
        match self {
            TripTypeSet | FlightParamsCollected | FlightSearched | OutboundSelected
            | ReturnSelected => Some(BookingLeg::Flight),
            HotelParamsCollected | HotelSearched | HotelSelected => Some(BookingLeg::Hotel),
            Start | FlightDone | HotelDone | PreviewReady | Saved => None,
        }
    }

    pub fn label(&self) -> &'static str {
        use BookingStep::*;
        match self {
            Start => "start",
            TripTypeSet => "trip_type_set",
            FlightParamsCollected => "flight_params_collected",
            FlightSearched => "flight_searched",
            OutboundSelected => "outbound_selected",
            ReturnSelected => "return_selected",
            FlightDone => "flight_done",
            HotelParamsCollected => "hotel_params_collected",
            HotelSearched => "hotel_searched",
            HotelSelected => "hotel_selected",
            HotelDone => "hotel_done",
            PreviewReady => "preview_ready",
            Saved => "saved",
        }
    }
}

impl StateMachine for BookingStep {
    fn successors(&self) -> &'static [Self] {
        use BookingStep::*;
        match self {
            Start => &[TripTypeSet, HotelParamsCollected],
            TripTypeSet => &[TripTypeSet, FlightParamsCollected, HotelParamsCollected],
            FlightParamsCollected => &[TripTypeSet, FlightParamsCollected, FlightSearched],
            FlightSearched => &[TripTypeSet, FlightParamsCollected, OutboundSelected],
            OutboundSelected => &[TripTypeSet, FlightParamsCollected, ReturnSelected, FlightDone],
            ReturnSelected => &[FlightDone],
            FlightDone => &[HotelParamsCollected, PreviewReady],
            HotelParamsCollected => &[HotelParamsCollected, HotelSearched],
            HotelSearched => &[HotelParamsCollected, HotelSelected],
            HotelSelected => &[HotelDone],
            HotelDone => &[TripTypeSet, FlightParamsCollected, HotelParamsCollected, PreviewReady],
            PreviewReady => &[Saved],
            Saved => &[],
        }
    }
}

/// Who is booking, bound from the transport's auth token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub employee_id: Option<String>,
    pub phone: Option<String>,
}

/// Flight parameters as collected from the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSlots {
    pub trip_type: Option<TripType>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub cabin_class: Option<String>,
}

impl FlightSlots {
    /// True once every parameter the search needs has a value.
    pub fn is_complete(&self) -> bool {
        let base = self.trip_type.is_some()
            && has_text(&self.origin)
            && has_text(&self.destination)
            && has_text(&self.departure_date);
        match self.trip_type {
            Some(TripType::Round) => base && has_text(&self.return_date),
            _ => base,
        }
    }

    /// Names of the parameters still missing, in prompt order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.trip_type.is_none() {
            missing.push("trip type (one-way or round trip)");
        }
        if !has_text(&self.origin) {
            missing.push("origin airport");
        }
        if !has_text(&self.destination) {
            missing.push("destination airport");
        }
        if !has_text(&self.departure_date) {
            missing.push("departure date");
        }
        if self.trip_type == Some(TripType::Round) && !has_text(&self.return_date) {
            missing.push("return date");
        }
        missing
    }
}

/// Hotel parameters as collected from the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelSlots {
    pub city: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub hotel_rating: Option<String>,
}

impl HotelSlots {
    pub fn is_complete(&self) -> bool {
        has_text(&self.city) && has_text(&self.check_in) && has_text(&self.check_out)
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !has_text(&self.city) {
            missing.push("city");
        }
        if !has_text(&self.check_in) {
            missing.push("check-in date");
        }
        if !has_text(&self.check_out) {
            missing.push("check-out date");
        }
        missing
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Everything one conversation has collected so far.
///
/// Owned by exactly one conversation and only mutated by the flow
/// controller while it handles that conversation's current turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub conversation_id: ConversationId,
    pub identity: Option<UserIdentity>,
    pub step: BookingStep,
    pub flight: FlightSlots,
    pub hotel: HotelSlots,
    pub outbound_options: Option<OptionList<FlightOption>>,
    pub return_options: Option<OptionList<FlightOption>>,
    pub hotel_options: Option<OptionList<HotelOption>>,
    pub open_list: Option<OpenList>,
    pub selected_outbound: Option<FlightOption>,
    pub selected_return: Option<FlightOption>,
    pub selected_hotel: Option<HotelOption>,
    pub flight_search_completed: bool,
    pub hotel_search_completed: bool,
    pub pending_preview: Option<TravelRequestPreview>,
    /// Never reset, so lists from before a reset stay distinguishable.
    next_list_id: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationState {
    pub fn new(conversation_id: ConversationId) -> Self {
        let now = Utc::now();
        Self {
            conversation_id,
            identity: None,
            step: BookingStep::Start,
            flight: FlightSlots::default(),
            hotel: HotelSlots::default(),
            outbound_options: None,
            return_options: None,
            hotel_options: None,
            open_list: None,
            selected_outbound: None,
            selected_return: None,
            selected_hotel: None,
            flight_search_completed: false,
            hotel_search_completed: false,
            pending_preview: None,
            next_list_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn trip_type(&self) -> TripType {
        self.flight.trip_type.unwrap_or_default()
    }

    /// Moves to `target` if the transition table allows it.
    pub fn advance(&mut self, target: BookingStep) -> Result<(), ValidationError> {
        self.step = self.step.transition_to(target)?;
        Ok(())
    }

    /// Clears all booking data. Identity and the list counter survive.
    ///
    /// Safe in any step, including mid-search states; calling it twice
    /// leaves the same state as calling it once.
    pub fn reset(&mut self) {
        self.step = BookingStep::Start;
        self.flight = FlightSlots::default();
        self.hotel = HotelSlots::default();
        self.outbound_options = None;
        self.return_options = None;
        self.hotel_options = None;
        self.open_list = None;
        self.selected_outbound = None;
        self.selected_return = None;
        self.selected_hotel = None;
        self.flight_search_completed = false;
        self.hotel_search_completed = false;
        self.pending_preview = None;
    }

    /// Moves to `Saved` and clears the booking data, as after a successful save.
    pub fn complete_save(&mut self) -> Result<(), ValidationError> {
        self.advance(BookingStep::Saved)?;
        self.reset();
        self.step = BookingStep::Saved;
        Ok(())
    }

    /// Drops flight results and selections so the flight leg can start over.
    pub fn clear_flight_results(&mut self) {
        self.outbound_options = None;
        self.return_options = None;
        self.selected_outbound = None;
        self.selected_return = None;
        self.flight_search_completed = false;
        if self.open_list.is_some_and(|o| o.leg.booking_leg() == BookingLeg::Flight) {
            self.open_list = None;
        }
    }

    /// Drops hotel results and selection so the hotel leg can start over.
    pub fn clear_hotel_results(&mut self) {
        self.hotel_options = None;
        self.selected_hotel = None;
        self.hotel_search_completed = false;
        if self.open_list.is_some_and(|o| o.leg == Leg::Hotel) {
            self.open_list = None;
        }
    }

    /// Sends the hotel leg back to its parameter step. The hotel slots and
    /// the flight leg are kept.
    pub fn reopen_hotel(&mut self) -> Result<(), ValidationError> {
        self.advance(BookingStep::HotelParamsCollected)?;
        self.clear_hotel_results();
        self.pending_preview = None;
        Ok(())
    }

    /// Reserves the id for the next option list.
    pub fn allocate_list_id(&mut self) -> u32 {
        let id = self.next_list_id;
        self.next_list_id = self.next_list_id.wrapping_add(1).max(1);
        id
    }

    /// Opens `list` for selection on its leg.
    pub fn open(&mut self, leg: Leg, list_id: u32) {
        self.open_list = Some(OpenList { leg, list_id });
    }

    pub fn is_leg_done(&self, leg: BookingLeg) -> bool {
        match leg {
            BookingLeg::Flight => self.flight_search_completed,
            BookingLeg::Hotel => self.hotel_search_completed,
        }
    }

    pub fn both_legs_done(&self) -> bool {
        self.flight_search_completed && self.hotel_search_completed
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
