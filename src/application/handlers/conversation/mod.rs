//! Conversation command handlers.

mod handle_turn;

pub use handle_turn::{HandleTurnCommand, HandleTurnError, HandleTurnHandler, HandleTurnResult};
