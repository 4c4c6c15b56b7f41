//! What arrives from and goes back to the conversation transport.
//!
//! A turn is free text plus an optional structured payload plus metadata.
//! `interpret` reduces it to one `TurnCommand` for the flow controller.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::selection::{parse_position, SelectPayload, SelectionReference};
use super::trip::{BookingLeg, TripType};

/// One user turn as delivered by the transport.
#[derive(Debug, Default, Deserialize)]
pub struct UserTurn {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub payload: Option<TurnPayload>,
    #[serde(default)]
    pub metadata: TurnMetadata,
}

impl UserTurn {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn payload(payload: TurnPayload) -> Self {
        Self {
            payload: Some(payload),
            ..Default::default()
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.metadata.auth_token = Some(SecretString::new(token.into()));
        self
    }
}

/// Transport metadata. The token is never logged.
#[derive(Debug, Default, Deserialize)]
pub struct TurnMetadata {
    #[serde(default)]
    pub auth_token: Option<SecretString>,
}

/// Structured content attached to a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnPayload {
    /// Parameter values extracted upstream.
    Slots(SlotUpdate),
    /// A pick from an option list, usually from a button.
    Select(SelectPayload),
    Intent { intent: Intent },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Reset,
    Confirm,
    BookFlight,
    BookHotel,
}

/// Partial parameter values. Unset fields leave the state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUpdate {
    #[serde(default)]
    pub trip_type: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub cabin_class: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub hotel_rating: Option<String>,
}

impl SlotUpdate {
    pub fn has_flight_fields(&self) -> bool {
        self.trip_type.is_some()
            || self.origin.is_some()
            || self.destination.is_some()
            || self.departure_date.is_some()
            || self.return_date.is_some()
            || self.cabin_class.is_some()
    }

    pub fn has_hotel_fields(&self) -> bool {
        self.city.is_some()
            || self.check_in.is_some()
            || self.check_out.is_some()
            || self.hotel_rating.is_some()
    }
}

/// What the controller should do with a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnCommand {
    Reset,
    Confirm,
    ChooseLeg(BookingLeg),
    SetTripType(TripType),
    ProvideSlots(SlotUpdate),
    Select(SelectionReference),
    Unrecognized,
}

const RESET_PHRASES: &[&str] = &["reset", "restart", "start over", "new booking", "cancel"];
const CONFIRM_WORDS: &[&str] = &["confirm", "yes", "ok", "okay", "submit", "book it"];
const ROUND_PHRASES: &[&str] = &["round trip", "round", "roundtrip", "return trip"];
const SINGLE_PHRASES: &[&str] = &["one way", "oneway", "single", "single trip"];

/// Reduces a turn to a command. A payload always wins over the text.
///
/// With a list open, text naming a position is a selection; text that
/// matches nothing else is also treated as one so the user gets a retry
/// prompt rather than silence.
pub fn interpret(turn: &UserTurn, list_open: bool) -> TurnCommand {
    if let Some(payload) = &turn.payload {
        return match payload {
            TurnPayload::Slots(slots) => TurnCommand::ProvideSlots(slots.clone()),
            TurnPayload::Select(select) => {
                TurnCommand::Select(SelectionReference::Structured(*select))
            }
            TurnPayload::Intent { intent } => match intent {
                Intent::Reset => TurnCommand::Reset,
                Intent::Confirm => TurnCommand::Confirm,
                Intent::BookFlight => TurnCommand::ChooseLeg(BookingLeg::Flight),
                Intent::BookHotel => TurnCommand::ChooseLeg(BookingLeg::Hotel),
            },
        };
    }

    let text = normalize(&turn.text);
    let free_text = || TurnCommand::Select(SelectionReference::FreeText(turn.text.clone()));

    if contains_any(&text, RESET_PHRASES) {
        return TurnCommand::Reset;
    }
    if contains_any(&text, ROUND_PHRASES) {
        return TurnCommand::SetTripType(TripType::Round);
    }
    if contains_any(&text, SINGLE_PHRASES) {
        return TurnCommand::SetTripType(TripType::Single);
    }
    if list_open && parse_position(&turn.text).is_some() {
        return free_text();
    }
    if contains_any(&text, CONFIRM_WORDS) {
        return TurnCommand::Confirm;
    }
    if contains_any(&text, &["flight", "fly", "plane"]) {
        return TurnCommand::ChooseLeg(BookingLeg::Flight);
    }
    if contains_any(&text, &["hotel", "stay", "room"]) {
        return TurnCommand::ChooseLeg(BookingLeg::Hotel);
    }
    if list_open {
        return free_text();
    }
    TurnCommand::Unrecognized
}

/// Lower-cases and collapses punctuation to single spaces.
fn normalize(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-word phrase containment on normalized text.
fn contains_any(text: &str, phrases: &[&str]) -> bool {
    let padded = format!(" {} ", text);
    phrases.iter().any(|p| padded.contains(&format!(" {} ", p)))
}

/// A message sent back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutboundMessage {
    Text { text: String },
    Options { text: String, buttons: Vec<OptionButton> },
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Text { text } | Self::Options { text, .. } => text,
        }
    }

    pub fn buttons(&self) -> &[OptionButton] {
        match self {
            Self::Text { .. } => &[],
            Self::Options { buttons, .. } => buttons,
        }
    }
}

/// A selectable option. `payload` is the JSON turn payload to send back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionButton {
    pub title: String,
    pub payload: String,
}

impl OptionButton {
    pub fn new(title: impl Into<String>, payload: &TurnPayload) -> Self {
        Self {
            title: title.into(),
            payload: serde_json::to_string(payload).unwrap_or_default(),
        }
    }

    pub fn select(title: impl Into<String>, select: SelectPayload) -> Self {
        Self::new(title, &TurnPayload::Select(select))
    }

    pub fn intent(title: impl Into<String>, intent: Intent) -> Self {
        Self::new(title, &TurnPayload::Intent { intent })
    }

    /// A button that fills in one trip type.
    pub fn trip_type(title: impl Into<String>, trip_type: TripType) -> Self {
        let slots = SlotUpdate {
            trip_type: Some(trip_type.to_string()),
            ..Default::default()
        };
        Self::new(title, &TurnPayload::Slots(slots))
    }
}
