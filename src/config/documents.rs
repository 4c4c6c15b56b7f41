//! Itinerary document configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use super::search::check_timeout;

/// Itinerary output location and public URL
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Prefix for download links handed to the user
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/itineraries")
}

fn default_base_url() -> String {
    "http://localhost:8080/itineraries".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DocumentsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        check_timeout("documents.timeout_secs", self.timeout_secs)
    }
}
