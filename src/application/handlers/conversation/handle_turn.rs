//! HandleTurnHandler - runs one user turn against a stored conversation.

use std::sync::Arc;

use thiserror::Error;

use crate::application::booking::FlowController;
use crate::domain::booking::{BookingError, BookingStep, ConversationState, OutboundMessage, UserTurn};
use crate::domain::foundation::{ConversationId, DomainError};
use crate::ports::ConversationRepository;

/// Command carrying one turn from the transport.
#[derive(Debug)]
pub struct HandleTurnCommand {
    pub conversation_id: ConversationId,
    pub turn: UserTurn,
}

/// Messages to deliver back, plus where the conversation ended up.
#[derive(Debug, Clone)]
pub struct HandleTurnResult {
    pub messages: Vec<OutboundMessage>,
    pub step: BookingStep,
    pub error: Option<BookingError>,
}

#[derive(Debug, Clone, Error)]
pub enum HandleTurnError {
    /// Conversation state could not be loaded or saved.
    #[error("conversation repository error: {0}")]
    Repository(#[from] DomainError),
}

/// Handler for user turns.
///
/// Turns for one conversation must be delivered one at a time; distinct
/// conversations can be handled concurrently.
pub struct HandleTurnHandler {
    repository: Arc<dyn ConversationRepository>,
    controller: Arc<FlowController>,
}

impl HandleTurnHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>, controller: Arc<FlowController>) -> Self {
        Self {
            repository,
            controller,
        }
    }

    pub async fn handle(&self, cmd: HandleTurnCommand) -> Result<HandleTurnResult, HandleTurnError> {
        // 1. Load or start the conversation
        let mut state = match self.repository.find_by_id(&cmd.conversation_id).await? {
            Some(state) => state,
            None => {
                tracing::info!(conversation_id = %cmd.conversation_id, "starting conversation");
                ConversationState::new(cmd.conversation_id)
            }
        };

        // 2. Run the turn
        let outcome = self.controller.handle_turn(&mut state, &cmd.turn).await;

        // 3. Persist
        self.repository.save(&state).await?;

        Ok(HandleTurnResult {
            messages: outcome.messages,
            step: outcome.step,
            error: outcome.error,
        })
    }
}
