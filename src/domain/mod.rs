//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `booking` - Booking conversation state machine, validation, selection
//!   and request assembly

pub mod booking;
pub mod foundation;
