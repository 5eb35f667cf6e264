//! Configuration validation.

use crate::error::ConfigError;

use super::Config;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

impl Config {
    /// Validate configuration values before anything is built from them.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.vision.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::ValidationError(format!(
                "vision.endpoint must be an http(s) URL, got '{endpoint}'"
            )));
        }
        if self.vision.api_version.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "vision.api_version must not be empty".into(),
            ));
        }
        if self.vision.language.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "vision.language must not be empty".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {}",
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}
