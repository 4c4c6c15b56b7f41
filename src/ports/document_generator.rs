//! Document Generator Port - trip document generation interface.
//!
//! Turns a saved travel request into a downloadable itinerary. The flow
//! controller calls this after a successful save; the adapter decides the
//! format and where the file lives.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::booking::TripDocument;

/// Port for generating trip documents.
///
/// # Contract
///
/// Implementations must:
/// - Produce one document per request number; regenerating overwrites
/// - Return a reference the user can follow to download the document
/// - Never modify the travel request itself
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    /// Generate the itinerary document for a saved request.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if required data is missing or the document
    /// cannot be written.
    async fn generate(&self, document: &TripDocument) -> Result<DocumentReference, DocumentError>;
}

/// Where a generated document can be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub url: String,
    pub file_name: String,
}

/// Errors that can occur during document generation.
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    /// Missing required data for generation.
    #[error("Missing required data: {field}")]
    MissingData { field: String },

    /// Writing the document failed.
    #[error("Document storage failed: {0}")]
    Storage(String),

    /// Internal generation error.
    #[error("Generation failed: {0}")]
    Internal(String),
}

impl DocumentError {
    /// Creates a missing data error.
    pub fn missing_data(field: impl Into<String>) -> Self {
        Self::MissingData {
            field: field.into(),
        }
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
