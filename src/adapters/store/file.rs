//! Filesystem store for travel requests.
//!
//! Layout under the data directory:
//!
//! - `travel_requests/{id}.json` - one pretty-printed record per request
//! - `users.json` - token to user identity table, maintained out of band

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::booking::{TravelRequest, UserIdentity};
use crate::domain::foundation::{DomainError, ErrorCode, TravelRequestId};
use crate::ports::PersistentStore;

const REQUESTS_DIR: &str = "travel_requests";
const USERS_FILE: &str = "users.json";

/// File-backed implementation of `PersistentStore`.
pub struct FileTravelRequestStore {
    base_dir: PathBuf,
}

fn storage_error(context: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

impl FileTravelRequestStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn request_path(&self, id: &TravelRequestId) -> PathBuf {
        self.base_dir.join(REQUESTS_DIR).join(format!("{}.json", id))
    }

    fn users_path(&self) -> PathBuf {
        self.base_dir.join(USERS_FILE)
    }

    async fn load_users(&self) -> Result<HashMap<String, UserIdentity>, DomainError> {
        let path = self.users_path();
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|e| storage_error("Failed to read users file", e))?;
        serde_json::from_str(&raw).map_err(|e| storage_error("Malformed users file", e))
    }

    /// Writes the token table (used by setup tooling and tests).
    pub async fn save_users(&self, users: &HashMap<String, UserIdentity>) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| storage_error("Failed to create directory", e))?;
        let body = serde_json::to_string_pretty(users)
            .map_err(|e| storage_error("Failed to encode users", e))?;
        write_atomic(&self.users_path(), &body).await
    }
}

/// Write through a temporary file and rename into place.
async fn write_atomic(path: &Path, content: &str) -> Result<(), DomainError> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)
        .await
        .map_err(|e| storage_error("Failed to write temporary file", e))?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| storage_error("Failed to rename file", e))
}

#[async_trait]
impl PersistentStore for FileTravelRequestStore {
    async fn insert(&self, request: &TravelRequest) -> Result<TravelRequestId, DomainError> {
        let path = self.request_path(&request.id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("Failed to create directory", e))?;
        }
        if fs::try_exists(&path).await.unwrap_or(false) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("travel request {} already exists", request.id),
            ));
        }

        let body = serde_json::to_string_pretty(request)
            .map_err(|e| storage_error("Failed to encode travel request", e))?;
        write_atomic(&path, &body).await?;

        tracing::debug!(
            request_id = %request.id,
            request_number = %request.request_number,
            "travel request written"
        );
        Ok(request.id)
    }

    async fn find_by_id(&self, id: &TravelRequestId) -> Result<Option<TravelRequest>, DomainError> {
        let path = self.request_path(id);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|e| storage_error("Failed to read travel request", e))?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| storage_error("Malformed travel request", e))
    }

    async fn find_user_by_token(
        &self,
        token: &SecretString,
    ) -> Result<Option<UserIdentity>, DomainError> {
        let users = self.load_users().await?;
        Ok(users.get(token.expose_secret()).cloned())
    }
}
