//! Persistent store port for confirmed travel requests and user lookup.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::booking::{TravelRequest, UserIdentity};
use crate::domain::foundation::{DomainError, TravelRequestId};

/// Repository port for travel requests.
///
/// Implementations must:
/// - Assign nothing: the record arrives with its id and request number
/// - Reject a second insert of the same id with `DatabaseError`
/// - Treat an unknown token as `Ok(None)`, not an error
#[async_trait]
pub trait PersistentStore: Send + Sync {
    /// Insert a confirmed travel request, returning its record id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, request: &TravelRequest) -> Result<TravelRequestId, DomainError>;

    /// Find a stored travel request by id.
    async fn find_by_id(&self, id: &TravelRequestId) -> Result<Option<TravelRequest>, DomainError>;

    /// Resolve an auth token to the user it belongs to.
    async fn find_user_by_token(
        &self,
        token: &SecretString,
    ) -> Result<Option<UserIdentity>, DomainError>;
}
