//! The error kinds a booking turn can end in.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ValidationError};

use super::assembler::AssemblyError;
use super::selection::SelectionError;
use super::trip::Leg;
use super::validator::ParameterError;

/// Why a search produced nothing to choose from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no {leg} options found")]
    NoResults { leg: Leg },

    #[error("search provider failed for {leg}: {reason}")]
    ProviderFailed { leg: Leg, reason: String },

    #[error("search provider timed out for {leg}")]
    Timeout { leg: Leg },
}

impl SearchError {
    pub fn leg(&self) -> Leg {
        match self {
            Self::NoResults { leg } | Self::ProviderFailed { leg, .. } | Self::Timeout { leg } => {
                *leg
            }
        }
    }
}

/// Every way a turn can fail, grouped by recovery behaviour.
#[derive(Debug, Clone, Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ParameterError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("failed to save travel request: {0}")]
    Persistence(#[from] DomainError),

    /// A step transition the state machine refused.
    #[error("invalid booking step: {0}")]
    State(#[from] ValidationError),
}

impl BookingError {
    /// Text shown to the user.
    ///
    /// Search failures all read as "no results"; provider detail goes to the
    /// log only.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Search(e) => match e.leg() {
                Leg::Hotel => {
                    "No hotels found for those dates. Try another city or different dates.".to_string()
                }
                leg => format!(
                    "No {} options found. Try different dates or airports.",
                    leg.label()
                ),
            },
            Self::Selection(e) => e.to_string(),
            Self::Assembly(AssemblyError::Pricing(_)) => {
                "That hotel's price can't be combined with your flights. Say \"book a hotel\" to choose another one.".to_string()
            }
            Self::Assembly(e) => e.to_string(),
            Self::Persistence(_) => {
                "Sorry, I couldn't save your travel request. Your selections are kept; say \"confirm\" to try again.".to_string()
            }
            Self::State(_) => {
                "Sorry, I lost track of where we were. Say \"restart\" to begin again.".to_string()
            }
        }
    }

    /// Assembly failures need the user to complete a leg first and a
    /// refused transition needs a restart; the rest can simply be retried.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::Assembly(AssemblyError::Missing { .. }) | Self::State(_)
        )
    }
}
