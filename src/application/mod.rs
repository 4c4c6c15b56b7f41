//! Application layer - booking flow services and command handlers.
//!
//! This layer sequences domain operations and coordinates between ports.

pub mod booking;
pub mod handlers;

pub use booking::{FlowController, FlowSettings, SearchOrchestrator, SearchSettings, TurnOutcome};
pub use handlers::{HandleTurnCommand, HandleTurnError, HandleTurnHandler, HandleTurnResult};
