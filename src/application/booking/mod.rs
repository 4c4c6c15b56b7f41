//! Booking flow services: search orchestration and the per-turn controller.

mod flow_controller;
mod search_orchestrator;

pub use flow_controller::{FlowController, FlowSettings, TurnOutcome};
pub use search_orchestrator::{FlightLegQuery, SearchOrchestrator, SearchSettings};
