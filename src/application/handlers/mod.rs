//! Application handlers.
//!
//! Command handlers that load state, run the booking flow and persist the
//! result.

pub mod conversation;

pub use conversation::{HandleTurnCommand, HandleTurnError, HandleTurnHandler, HandleTurnResult};
