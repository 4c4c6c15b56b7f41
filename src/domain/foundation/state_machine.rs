//! Transition tables for step enums.
//!
//! An implementor lists the successors of each state once. Checking,
//! performing and terminal detection all read that one table.

use super::ValidationError;

/// A finite set of states with a fixed successor table.
///
/// ```ignore
/// impl StateMachine for BookingStep {
///     fn successors(&self) -> &'static [Self] {
///         match self {
///             Start => &[TripTypeSet, HotelParamsCollected],
///             Saved => &[],
///             // ...
///         }
///     }
/// }
///
/// state.step = state.step.transition_to(BookingStep::FlightSearched)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug + 'static {
    /// States reachable in one move from `self`.
    fn successors(&self) -> &'static [Self];

    fn can_transition_to(&self, target: &Self) -> bool {
        self.successors().contains(target)
    }

    /// Returns `target` when the move is in the table.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "step",
                format!("Cannot move from {:?} to {:?}", self, target),
            ));
        }
        Ok(target)
    }

    /// A state with no successors ends the machine.
    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}
