//! The booking flow: sequences validation, search, selection, assembly and
//! confirmation for one conversation turn at a time.
//!
//! The controller owns no conversation data. Each call receives the
//! conversation's state exclusively and leaves it consistent whether the
//! turn succeeds or fails.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;

use crate::domain::booking::display;
use crate::domain::booking::{
    assemble, flight_params_from_slots, hotel_params_from_slots, interpret, resolve_selection,
    AssemblyError, BookingError, BookingLeg, BookingStep, ConversationState, FlightOption, FlightSlots,
    HotelSlots, Intent, Leg, ListedOption, OpenList, OptionButton, OptionList, OutboundMessage,
    ParameterError, SearchError, SelectPayload, SelectionError, SelectionReference, SlotUpdate,
    TravelRequest, TravelRequestPreview, TripDocument, TripType, TurnCommand,
    UserTurn,
};
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};
use crate::ports::{DocumentGenerator, PersistentStore};

use super::search_orchestrator::{FlightLegQuery, SearchOrchestrator};

/// Upper bounds for the collaborator calls the controller makes itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub persistence_timeout: Duration,
    pub document_timeout: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            persistence_timeout: Duration::from_secs(10),
            document_timeout: Duration::from_secs(30),
        }
    }
}

/// What one turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub messages: Vec<OutboundMessage>,
    pub step: BookingStep,
    /// The failure already reported to the user in `messages`, if any.
    pub error: Option<BookingError>,
}

type Replies = Vec<OutboundMessage>;

pub struct FlowController {
    search: SearchOrchestrator,
    store: Arc<dyn PersistentStore>,
    documents: Arc<dyn DocumentGenerator>,
    settings: FlowSettings,
}

impl FlowController {
    pub fn new(
        search: SearchOrchestrator,
        store: Arc<dyn PersistentStore>,
        documents: Arc<dyn DocumentGenerator>,
        settings: FlowSettings,
    ) -> Self {
        Self {
            search,
            store,
            documents,
            settings,
        }
    }

    /// Handles one user turn to completion.
    ///
    /// Every failure is turned into a user-facing message; nothing here
    /// returns an error to the transport.
    pub async fn handle_turn(&self, state: &mut ConversationState, turn: &UserTurn) -> TurnOutcome {
        if state.step == BookingStep::Saved {
            state.reset();
        }
        self.bind_identity(state, turn).await;

        let command = interpret(turn, state.open_list.is_some());
        tracing::debug!(
            conversation_id = %state.conversation_id,
            step = state.step.label(),
            ?command,
            "handling turn"
        );

        let mut replies = Vec::new();
        let error = match self.dispatch(state, command, &mut replies).await {
            Ok(()) => {
                state.touch();
                None
            }
            Err(e) => {
                tracing::info!(
                    conversation_id = %state.conversation_id,
                    step = state.step.label(),
                    error = %e,
                    "turn failed"
                );
                replies.push(OutboundMessage::text(e.user_message()));
                Some(e)
            }
        };

        TurnOutcome {
            messages: replies,
            step: state.step,
            error,
        }
    }

    async fn dispatch(
        &self,
        state: &mut ConversationState,
        command: TurnCommand,
        replies: &mut Replies,
    ) -> Result<(), BookingError> {
        match command {
            TurnCommand::Reset => {
                state.reset();
                replies.push(leg_menu(
                    "🔄 Your booking has been reset. Would you like to book a flight or a hotel?",
                ));
                Ok(())
            }
            TurnCommand::Confirm => self.confirm(state, replies).await,
            TurnCommand::ChooseLeg(leg) => self.choose_leg(state, leg, replies).await,
            TurnCommand::SetTripType(trip_type) => self.set_trip_type(state, trip_type, replies).await,
            TurnCommand::ProvideSlots(update) => self.provide_slots(state, update, replies).await,
            TurnCommand::Select(reference) => self.select(state, &reference, replies).await,
            TurnCommand::Unrecognized => {
                replies.push(next_prompt(state));
                Ok(())
            }
        }
    }

    /// Binds the user behind the turn's auth token, once per conversation.
    /// Lookup failures leave the conversation anonymous.
    async fn bind_identity(&self, state: &mut ConversationState, turn: &UserTurn) {
        if state.identity.is_some() {
            return;
        }
        let Some(token) = turn.metadata.auth_token.as_ref() else {
            return;
        };

        match timeout(self.settings.persistence_timeout, self.store.find_user_by_token(token)).await {
            Ok(Ok(Some(identity))) => {
                tracing::info!(
                    conversation_id = %state.conversation_id,
                    user_id = identity.user_id.as_str(),
                    "bound user identity"
                );
                state.identity = Some(identity);
            }
            Ok(Ok(None)) => {
                tracing::warn!(conversation_id = %state.conversation_id, "auth token matched no user");
            }
            Ok(Err(e)) => {
                tracing::warn!(conversation_id = %state.conversation_id, error = %e, "user lookup failed");
            }
            Err(_) => {
                tracing::warn!(conversation_id = %state.conversation_id, "user lookup timed out");
            }
        }
    }

    async fn set_trip_type(
        &self,
        state: &mut ConversationState,
        trip_type: TripType,
        replies: &mut Replies,
    ) -> Result<(), BookingError> {
        use BookingStep::*;

        if state.is_leg_done(BookingLeg::Flight) {
            replies.push(already_chosen(BookingLeg::Flight));
            return Ok(());
        }
        if state.step.active_leg() == Some(BookingLeg::Hotel) {
            state.flight.trip_type = Some(trip_type);
            replies.push(OutboundMessage::text(format!(
                "Noted, a {} trip. Let's finish choosing your hotel first.",
                trip_type.label()
            )));
            replies.push(next_prompt(state));
            return Ok(());
        }

        if matches!(state.step, FlightParamsCollected | FlightSearched | OutboundSelected) {
            state.clear_flight_results();
        }
        state.flight.trip_type = Some(trip_type);
        state.advance(TripTypeSet)?;
        self.progress_flight(state, replies).await
    }

    async fn choose_leg(
        &self,
        state: &mut ConversationState,
        leg: BookingLeg,
        replies: &mut Replies,
    ) -> Result<(), BookingError> {
        use BookingStep::*;

        if state.is_leg_done(leg) {
            replies.push(already_chosen(leg));
            replies.push(next_prompt(state));
            return Ok(());
        }

        match (leg, state.step) {
            (BookingLeg::Flight, Start | TripTypeSet | FlightParamsCollected | HotelDone) => {
                self.progress_flight(state, replies).await
            }
            (BookingLeg::Hotel, Start | TripTypeSet | FlightDone | HotelParamsCollected) => {
                self.progress_hotel(state, replies).await
            }
            (requested, step) => {
                if step.active_leg().is_some_and(|active| active != requested) {
                    replies.push(OutboundMessage::text(format!(
                        "Let's finish choosing your {} first.",
                        leg_noun(requested.other())
                    )));
                }
                replies.push(next_prompt(state));
                Ok(())
            }
        }
    }

    async fn provide_slots(
        &self,
        state: &mut ConversationState,
        update: SlotUpdate,
        replies: &mut Replies,
    ) -> Result<(), BookingError> {
        use BookingStep::*;

        let trip_type = match update.trip_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<TripType>()
                    .map_err(|_| ParameterError::UnknownTripType(raw.to_string()))?,
            ),
        };

        let flight_open = !state.is_leg_done(BookingLeg::Flight);
        let hotel_open = !state.is_leg_done(BookingLeg::Hotel);
        let touches_flight = update.has_flight_fields() && flight_open;
        let touches_hotel = update.has_hotel_fields() && hotel_open;

        if update.has_flight_fields() && !flight_open {
            replies.push(already_chosen(BookingLeg::Flight));
        }
        if update.has_hotel_fields() && !hotel_open {
            replies.push(already_chosen(BookingLeg::Hotel));
        }

        if touches_flight {
            if let Some(trip_type) = trip_type {
                if state.flight.trip_type != Some(trip_type) {
                    if matches!(state.step, FlightParamsCollected | FlightSearched | OutboundSelected) {
                        state.clear_flight_results();
                        state.advance(TripTypeSet)?;
                    }
                    state.flight.trip_type = Some(trip_type);
                }
            }
            merge_flight(&mut state.flight, &update);
        }
        if touches_hotel {
            merge_hotel(&mut state.hotel, &update);
        }

        let target = match state.step.active_leg() {
            Some(active) => Some(active),
            None if touches_flight => Some(BookingLeg::Flight),
            None if touches_hotel => Some(BookingLeg::Hotel),
            None => None,
        };

        match target {
            Some(BookingLeg::Flight) if touches_flight || state.open_list.is_none() => {
                if matches!(state.step, Start | HotelDone) && state.flight.trip_type.is_some() {
                    state.advance(TripTypeSet)?;
                }
                self.progress_flight(state, replies).await
            }
            Some(BookingLeg::Hotel) if touches_hotel || state.open_list.is_none() => {
                self.progress_hotel(state, replies).await
            }
            _ => {
                replies.push(next_prompt(state));
                Ok(())
            }
        }
    }

    /// Prompts for whatever the flight leg still needs, or searches once
    /// every parameter is present and valid.
    async fn progress_flight(
        &self,
        state: &mut ConversationState,
        replies: &mut Replies,
    ) -> Result<(), BookingError> {
        use BookingStep::*;

        if state.flight.trip_type.is_none() {
            replies.push(trip_type_prompt());
            return Ok(());
        }
        if matches!(state.step, Start | HotelDone) {
            state.advance(TripTypeSet)?;
        }
        if !state.flight.is_complete() {
            replies.push(flight_slots_prompt(&state.flight));
            return Ok(());
        }

        let params = flight_params_from_slots(&state.flight, Utc::now().date_naive())?;
        state.clear_flight_results();
        state.advance(FlightParamsCollected)?;

        let outbound_query = FlightLegQuery {
            leg: Leg::Outbound,
            origin: params.origin.clone(),
            destination: params.destination.clone(),
            date: params.departure_date,
            cabin_class: params.cabin_class,
        };
        let return_query = params.return_date.map(|date| FlightLegQuery {
            leg: Leg::Return,
            origin: params.destination.clone(),
            destination: params.origin.clone(),
            date,
            cabin_class: params.cabin_class,
        });

        let outbound = self.search.search_flight_leg(&outbound_query).await;
        if !has_available(&outbound) {
            return Err(SearchError::NoResults { leg: Leg::Outbound }.into());
        }
        let inbound = match &return_query {
            Some(query) => {
                let entries = self.search.search_flight_leg(query).await;
                if !has_available(&entries) {
                    return Err(SearchError::NoResults { leg: Leg::Return }.into());
                }
                Some(entries)
            }
            None => None,
        };

        state.advance(FlightSearched)?;
        let outbound_id = state.allocate_list_id();
        let outbound = OptionList::new(Leg::Outbound, outbound_id, outbound);
        replies.push(flight_options_message(&outbound, &params.origin, &params.destination));
        state.outbound_options = Some(outbound);
        if let Some(entries) = inbound {
            let return_id = state.allocate_list_id();
            state.return_options = Some(OptionList::new(Leg::Return, return_id, entries));
        }
        state.open(Leg::Outbound, outbound_id);
        Ok(())
    }

    /// Hotel counterpart of [`Self::progress_flight`].
    async fn progress_hotel(
        &self,
        state: &mut ConversationState,
        replies: &mut Replies,
    ) -> Result<(), BookingError> {
        if !state.hotel.is_complete() {
            replies.push(hotel_slots_prompt(&state.hotel));
            return Ok(());
        }

        let params = hotel_params_from_slots(&state.hotel)?;
        state.clear_hotel_results();
        state.advance(BookingStep::HotelParamsCollected)?;

        let entries = self.search.search_hotels(&params).await;
        if !has_available(&entries) {
            return Err(SearchError::NoResults { leg: Leg::Hotel }.into());
        }

        state.advance(BookingStep::HotelSearched)?;
        let list_id = state.allocate_list_id();
        let list = OptionList::new(Leg::Hotel, list_id, entries);
        replies.push(options_message(
            display::options_header(Leg::Hotel, list.len(), &params.city, None),
            &list,
            display::listed_hotel,
            display::hotel_button_title,
        ));
        state.hotel_options = Some(list);
        state.open(Leg::Hotel, list_id);
        Ok(())
    }

    /// Applies a selection against the open list. Any failure leaves the
    /// state exactly as it was.
    async fn select(
        &self,
        state: &mut ConversationState,
        reference: &SelectionReference,
        replies: &mut Replies,
    ) -> Result<(), BookingError> {
        let open = state.open_list.ok_or(SelectionError::NoOpenList)?;

        match open.leg {
            Leg::Outbound => {
                let chosen = resolve_open(reference, state.outbound_options.as_ref(), open)?.clone();
                state.advance(BookingStep::OutboundSelected)?;
                replies.push(OutboundMessage::text(format!(
                    "✅ Outbound flight selected:\n{}",
                    display::flight_details(&chosen)
                )));

                if state.trip_type().is_round() {
                    let Some(list) = state.return_options.as_ref() else {
                        state.selected_outbound = Some(chosen);
                        return Err(SearchError::NoResults { leg: Leg::Return }.into());
                    };
                    replies.push(flight_options_message(list, &chosen.destination, &chosen.origin));
                    let return_open = OpenList {
                        leg: Leg::Return,
                        list_id: list.list_id(),
                    };
                    state.selected_outbound = Some(chosen);
                    state.open_list = Some(return_open);
                    return Ok(());
                }

                state.selected_outbound = Some(chosen);
                self.finish_flight(state, replies).await
            }
            Leg::Return => {
                let chosen = resolve_open(reference, state.return_options.as_ref(), open)?.clone();
                state.advance(BookingStep::ReturnSelected)?;
                replies.push(OutboundMessage::text(format!(
                    "✅ Return flight selected:\n{}",
                    display::flight_details(&chosen)
                )));
                state.selected_return = Some(chosen);
                self.finish_flight(state, replies).await
            }
            Leg::Hotel => {
                let chosen = resolve_open(reference, state.hotel_options.as_ref(), open)?.clone();
                state.advance(BookingStep::HotelSelected)?;
                replies.push(OutboundMessage::text(format!(
                    "✅ Hotel selected:\n{}",
                    display::hotel_details(&chosen)
                )));
                state.selected_hotel = Some(chosen);
                state.advance(BookingStep::HotelDone)?;
                state.hotel_search_completed = true;
                state.open_list = None;
                self.leg_finished(state, BookingLeg::Hotel, replies).await
            }
        }
    }

    async fn finish_flight(
        &self,
        state: &mut ConversationState,
        replies: &mut Replies,
    ) -> Result<(), BookingError> {
        state.advance(BookingStep::FlightDone)?;
        state.flight_search_completed = true;
        state.open_list = None;
        self.leg_finished(state, BookingLeg::Flight, replies).await
    }

    /// Offers the other leg, or builds the preview once both are done.
    async fn leg_finished(
        &self,
        state: &mut ConversationState,
        finished: BookingLeg,
        replies: &mut Replies,
    ) -> Result<(), BookingError> {
        if state.both_legs_done() {
            return self.show_preview(state, replies);
        }

        match finished {
            BookingLeg::Flight => {
                prefill_hotel(state);
                replies.push(OutboundMessage::text("🏨 Now let's find you a hotel."));
                self.progress_hotel(state, replies).await
            }
            BookingLeg::Hotel => {
                replies.push(OutboundMessage::text("✈️ Now let's book your flight."));
                self.progress_flight(state, replies).await
            }
        }
    }

    fn show_preview(&self, state: &mut ConversationState, replies: &mut Replies) -> Result<(), BookingError> {
        let preview = assemble_or_reopen(state)?;
        state.advance(BookingStep::PreviewReady)?;
        replies.push(OutboundMessage::Options {
            text: format!(
                "{}\n\nSay \"confirm\" to submit this travel request, or \"restart\" to start over.",
                preview.summary
            ),
            buttons: confirm_buttons(),
        });
        state.pending_preview = Some(preview);
        Ok(())
    }

    /// Persists the previewed request, then asks for its document.
    ///
    /// A failed save discards the preview but keeps every selection, so a
    /// second confirmation re-assembles and retries.
    async fn confirm(&self, state: &mut ConversationState, replies: &mut Replies) -> Result<(), BookingError> {
        if state.step != BookingStep::PreviewReady {
            assemble_or_reopen(state)?;
            if state.both_legs_done() {
                return self.show_preview(state, replies);
            }
            replies.push(next_prompt(state));
            return Ok(());
        }

        let preview = match state.pending_preview.take() {
            Some(preview) => preview,
            None => assemble_or_reopen(state)?,
        };
        let city = state
            .hotel
            .city
            .as_deref()
            .map(|c| c.trim().to_ascii_uppercase())
            .unwrap_or_default();
        let request = TravelRequest::from_preview(
            &preview,
            state.identity.as_ref().map(|i| i.user_id.clone()),
            city,
            Utc::now(),
        );

        match timeout(self.settings.persistence_timeout, self.store.insert(&request)).await {
            Ok(Ok(id)) => {
                tracing::info!(
                    conversation_id = %state.conversation_id,
                    request_id = %id,
                    request_number = %request.request_number,
                    "travel request saved"
                );
            }
            Ok(Err(e)) => {
                tracing::error!(conversation_id = %state.conversation_id, error = %e, "failed to save travel request");
                return Err(BookingError::Persistence(e));
            }
            Err(_) => {
                tracing::error!(conversation_id = %state.conversation_id, "saving travel request timed out");
                return Err(BookingError::Persistence(DomainError::new(
                    ErrorCode::Timeout,
                    "travel request store timed out",
                )));
            }
        }

        let document = TripDocument::new(&request, state.identity.as_ref());
        state.complete_save()?;

        let mut text = format!(
            "🎉 Travel request {} has been submitted for approval.\n💵 Total cost: {}",
            request.request_number, request.total_cost
        );
        match timeout(self.settings.document_timeout, self.documents.generate(&document)).await {
            Ok(Ok(reference)) => {
                text.push_str(&format!("\n📄 Itinerary: {}", reference.url));
            }
            Ok(Err(e)) => {
                tracing::warn!(request_number = %request.request_number, error = %e, "itinerary generation failed");
                text.push_str("\nI couldn't generate the itinerary document, but your request is saved.");
            }
            Err(_) => {
                tracing::warn!(request_number = %request.request_number, "itinerary generation timed out");
                text.push_str("\nI couldn't generate the itinerary document, but your request is saved.");
            }
        }
        replies.push(OutboundMessage::text(text));
        Ok(())
    }
}

/// Assembles the preview. When the chosen prices cannot be added up, the
/// hotel leg goes back to its parameter step so another hotel can be picked.
fn assemble_or_reopen(state: &mut ConversationState) -> Result<TravelRequestPreview, BookingError> {
    match assemble(state) {
        Err(AssemblyError::Pricing(e))
            if state.step.can_transition_to(&BookingStep::HotelParamsCollected) =>
        {
            tracing::warn!(
                conversation_id = %state.conversation_id,
                error = %e,
                "selected prices do not combine, reopening hotel leg"
            );
            state.reopen_hotel()?;
            Err(AssemblyError::Pricing(e).into())
        }
        result => Ok(result?),
    }
}

/// Resolves against `list` only if it is the list currently open.
fn resolve_open<'a, T>(
    reference: &SelectionReference,
    list: Option<&'a OptionList<T>>,
    open: OpenList,
) -> Result<&'a T, SelectionError> {
    let list = list
        .filter(|l| l.leg() == open.leg && l.list_id() == open.list_id)
        .ok_or(SelectionError::NoOpenList)?;
    resolve_selection(reference, list)
}

fn has_available<T>(entries: &[ListedOption<T>]) -> bool {
    entries.iter().any(|e| e.as_option().is_some())
}

fn merge_flight(slots: &mut FlightSlots, update: &SlotUpdate) {
    for (slot, value) in [
        (&mut slots.origin, &update.origin),
        (&mut slots.destination, &update.destination),
        (&mut slots.departure_date, &update.departure_date),
        (&mut slots.return_date, &update.return_date),
        (&mut slots.cabin_class, &update.cabin_class),
    ] {
        if value.is_some() {
            slot.clone_from(value);
        }
    }
}

fn merge_hotel(slots: &mut HotelSlots, update: &SlotUpdate) {
    for (slot, value) in [
        (&mut slots.city, &update.city),
        (&mut slots.check_in, &update.check_in),
        (&mut slots.check_out, &update.check_out),
        (&mut slots.hotel_rating, &update.hotel_rating),
    ] {
        if value.is_some() {
            slot.clone_from(value);
        }
    }
}

/// Fills unset hotel slots from the chosen flights.
fn prefill_hotel(state: &mut ConversationState) {
    let Some(outbound) = state.selected_outbound.as_ref() else {
        return;
    };
    let hotel = &mut state.hotel;
    if hotel.city.is_none() {
        hotel.city = Some(outbound.destination.clone());
    }
    if hotel.check_in.is_none() {
        hotel.check_in = state.flight.departure_date.clone();
    }
    if hotel.check_out.is_none() && state.flight.trip_type == Some(TripType::Round) {
        hotel.check_out = state.flight.return_date.clone();
    }
}

fn leg_noun(leg: BookingLeg) -> &'static str {
    match leg {
        BookingLeg::Flight => "flight",
        BookingLeg::Hotel => "hotel",
    }
}

fn already_chosen(leg: BookingLeg) -> OutboundMessage {
    OutboundMessage::text(format!(
        "Your {} is already chosen. Say \"restart\" if you want to change it.",
        leg_noun(leg)
    ))
}

/// English list: `a`, `a and b`, `a, b and c`.
fn join_fields(fields: &[&str]) -> String {
    match fields {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn leg_menu(text: &str) -> OutboundMessage {
    OutboundMessage::Options {
        text: text.to_string(),
        buttons: vec![
            OptionButton::intent("✈️ Book a flight", Intent::BookFlight),
            OptionButton::intent("🏨 Book a hotel", Intent::BookHotel),
        ],
    }
}

fn confirm_buttons() -> Vec<OptionButton> {
    vec![
        OptionButton::intent("✅ Confirm", Intent::Confirm),
        OptionButton::intent("🔄 Start over", Intent::Reset),
    ]
}

fn trip_type_prompt() -> OutboundMessage {
    OutboundMessage::Options {
        text: "✈️ Is this a one-way or a round trip?".to_string(),
        buttons: vec![
            OptionButton::trip_type("One-way", TripType::Single),
            OptionButton::trip_type("Round trip", TripType::Round),
        ],
    }
}

fn flight_slots_prompt(slots: &FlightSlots) -> OutboundMessage {
    OutboundMessage::text(format!(
        "✈️ Please provide the {}.",
        join_fields(&slots.missing())
    ))
}

fn hotel_slots_prompt(slots: &HotelSlots) -> OutboundMessage {
    OutboundMessage::text(format!(
        "🏨 Please provide the {} for your stay.",
        join_fields(&slots.missing())
    ))
}

/// What the user should do next, given where the conversation is.
fn next_prompt(state: &ConversationState) -> OutboundMessage {
    if state.step == BookingStep::PreviewReady {
        return OutboundMessage::Options {
            text: "Say \"confirm\" to submit your travel request, or \"restart\" to start over.".to_string(),
            buttons: confirm_buttons(),
        };
    }
    if let Some(open) = state.open_list {
        return OutboundMessage::text(format!(
            "Please choose one of the {} options above.",
            open.leg.label()
        ));
    }
    match state.step.active_leg() {
        Some(BookingLeg::Flight) if state.flight.trip_type.is_none() => trip_type_prompt(),
        Some(BookingLeg::Flight) => flight_slots_prompt(&state.flight),
        Some(BookingLeg::Hotel) => hotel_slots_prompt(&state.hotel),
        None => match (
            state.is_leg_done(BookingLeg::Flight),
            state.is_leg_done(BookingLeg::Hotel),
        ) {
            (true, false) if state.hotel.is_complete() => leg_menu("Would you like to book your hotel now?"),
            (true, false) => hotel_slots_prompt(&state.hotel),
            (false, true) if state.flight.trip_type.is_none() => trip_type_prompt(),
            (false, true) => flight_slots_prompt(&state.flight),
            _ => leg_menu("👋 Hi! I can arrange your business trip. Would you like to book a flight or a hotel?"),
        },
    }
}

fn flight_options_message(list: &OptionList<FlightOption>, from: &str, to: &str) -> OutboundMessage {
    options_message(
        display::options_header(list.leg(), list.len(), from, Some(to)),
        list,
        display::listed_flight,
        display::flight_button_title,
    )
}

/// Numbered option text plus one select button per entry, tagged with the
/// list's leg and id.
fn options_message<T>(
    header: String,
    list: &OptionList<T>,
    details: fn(&ListedOption<T>) -> String,
    title: fn(usize, &ListedOption<T>) -> String,
) -> OutboundMessage {
    let mut text = header;
    let mut buttons = Vec::with_capacity(list.len());
    for (index, entry) in list.entries().iter().enumerate() {
        text.push_str(&format!("\n\n{}. {}", index + 1, details(entry)));
        buttons.push(OptionButton::select(
            title(index, entry),
            SelectPayload {
                index,
                leg: Some(list.leg()),
                list_id: Some(list.list_id()),
            },
        ));
    }
    OutboundMessage::Options { text, buttons }
}
