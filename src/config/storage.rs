//! Travel request storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use super::search::check_timeout;

/// Where confirmed travel requests and the user table live
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for request files and `users.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Store call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.data_dir"));
        }
        check_timeout("storage.timeout_secs", self.timeout_secs)
    }
}
