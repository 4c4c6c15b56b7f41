//! Conversation repository port.
//!
//! Holds the booking state of each conversation between turns. The handler
//! loads the state, runs one turn and saves it back.

use crate::domain::booking::ConversationState;
use crate::domain::foundation::{ConversationId, DomainError};
use async_trait::async_trait;

/// Repository port for per-conversation booking state.
///
/// Implementations must:
/// - Store states keyed by conversation id, one state per conversation
/// - Make `save` an upsert
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Save (insert or replace) a conversation's state.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, state: &ConversationState) -> Result<(), DomainError>;

    /// Find a conversation's state by its ID.
    ///
    /// Returns `None` if the conversation has not been seen yet.
    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<ConversationState>, DomainError>;

    /// Remove a conversation's state.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if there is nothing to remove
    async fn delete(&self, id: &ConversationId) -> Result<(), DomainError>;
}
