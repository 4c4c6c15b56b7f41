//! Booking domain: the conversation state machine and the pure pieces it
//! sequences.
//!
//! Everything here is synchronous and free of I/O. Collaborator calls live
//! in the application layer.

pub mod assembler;
pub mod display;
pub mod duration;
pub mod errors;
pub mod options;
pub mod request;
pub mod selection;
pub mod state;
pub mod trip;
pub mod turn;
pub mod validator;

pub use assembler::{assemble, AssemblyError, TravelRequestPreview};
pub use duration::TravelDuration;
pub use errors::{BookingError, SearchError};
pub use options::{FlightOption, HotelOption, Layover, ListedOption, OpenList, OptionList};
pub use request::{FlightDetails, FlightRecord, HotelDetails, RequestStatus, TravelRequest, TripDocument, Traveller};
pub use selection::{resolve_selection, SelectPayload, SelectionError, SelectionReference};
pub use state::{BookingStep, ConversationState, FlightSlots, HotelSlots, UserIdentity};
pub use trip::{BookingLeg, CabinClass, HotelRating, Leg, TripType};
pub use turn::{interpret, Intent, OptionButton, OutboundMessage, SlotUpdate, TurnCommand, TurnMetadata, TurnPayload, UserTurn};
pub use validator::{
    check_flight_params, check_hotel_params, flight_params_from_slots, hotel_params_from_slots,
    validate_flight_params, validate_hotel_params, FlightSearchParams, HotelSearchParams, ParameterError,
};
