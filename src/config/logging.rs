//! Logging configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Log filter and output format
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "voxia=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.filter.trim().is_empty() {
            return Err(ValidationError::MissingRequired("logging.filter"));
        }
        Ok(())
    }
}
