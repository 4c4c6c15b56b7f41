//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the booking domain.

mod errors;
mod ids;
mod money;
mod state_machine;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ConversationId, TravelRequestId, UserId};
pub use money::{Money, MoneyError};
pub use state_machine::StateMachine;
