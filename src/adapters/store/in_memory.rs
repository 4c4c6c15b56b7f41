//! In-memory travel request store for testing and local runs.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::{TravelRequest, UserIdentity};
use crate::domain::foundation::{DomainError, ErrorCode, TravelRequestId};
use crate::ports::PersistentStore;

/// In-memory implementation of `PersistentStore`.
///
/// Uses a `RwLock<HashMap>` for thread-safe access. A store can be switched
/// into failing mode to exercise the persistence-error path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTravelRequestStore {
    requests: Arc<RwLock<HashMap<TravelRequestId, TravelRequest>>>,
    users: Arc<RwLock<HashMap<String, UserIdentity>>>,
    failing: Arc<RwLock<bool>>,
}

impl InMemoryTravelRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `identity` under an auth token.
    pub async fn add_user(&self, token: impl Into<String>, identity: UserIdentity) {
        self.users.write().await.insert(token.into(), identity);
    }

    /// Makes every following insert fail (or succeed again).
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    /// Returns all stored requests (for test assertions).
    pub async fn all(&self) -> Vec<TravelRequest> {
        self.requests.read().await.values().cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl PersistentStore for InMemoryTravelRequestStore {
    async fn insert(&self, request: &TravelRequest) -> Result<TravelRequestId, DomainError> {
        if *self.failing.read().await {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "travel request store unavailable",
            ));
        }

        let mut requests = self.requests.write().await;
        if requests.contains_key(&request.id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("travel request {} already exists", request.id),
            ));
        }
        requests.insert(request.id, request.clone());
        Ok(request.id)
    }

    async fn find_by_id(&self, id: &TravelRequestId) -> Result<Option<TravelRequest>, DomainError> {
        Ok(self.requests.read().await.get(id).cloned())
    }

    async fn find_user_by_token(
        &self,
        token: &SecretString,
    ) -> Result<Option<UserIdentity>, DomainError> {
        Ok(self.users.read().await.get(token.expose_secret()).cloned())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::booking::options::fixtures::{flight, hotel};
    use crate::domain::booking::{assemble, ConversationState, TravelRequest, TripType, UserIdentity};
    use crate::domain::foundation::{ConversationId, UserId};
    use chrono::Utc;

    pub fn request() -> TravelRequest {
        let mut state = ConversationState::new(ConversationId::new());
        state.flight.trip_type = Some(TripType::Single);
        state.selected_outbound = Some(flight(450, "MYR"));
        state.selected_hotel = Some(hotel(300, 2, "MYR"));
        let preview = assemble(&state).unwrap();
        TravelRequest::from_preview(&preview, None, "SIN", Utc::now())
    }

    pub fn identity() -> UserIdentity {
        UserIdentity {
            user_id: UserId::new("emp-7").unwrap(),
            name: "Aisha Rahman".to_string(),
            email: Some("aisha@example.com".to_string()),
            department: Some("Finance".to_string()),
            employee_id: Some("E007".to_string()),
            phone: None,
        }
    }
}
