//! In-memory conversation state repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::ConversationState;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::ports::ConversationRepository;

/// In-memory implementation of `ConversationRepository`.
///
/// Uses a `RwLock<HashMap>` for thread-safe access; states are cloned in
/// and out so callers never share a live record.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    states: Arc<RwLock<HashMap<ConversationId, ConversationState>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn save(&self, state: &ConversationState) -> Result<(), DomainError> {
        self.states
            .write()
            .await
            .insert(state.conversation_id, state.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<ConversationState>, DomainError> {
        Ok(self.states.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), DomainError> {
        self.states
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
                    .with_detail("conversation_id", id.to_string())
            })
    }
}
