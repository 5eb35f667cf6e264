//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Computer Vision service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Regional endpoint, e.g. "https://westus.api.cognitive.microsoft.com"
    pub endpoint: String,

    /// API version segment of the analyze path ("v3.2" -> /vision/v3.2/analyze)
    pub api_version: String,

    /// Language for returned captions and tags
    pub language: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: "${MICROSOFT_VISION_API_KEY}".to_string(),
            endpoint: "https://westus.api.cognitive.microsoft.com".to_string(),
            api_version: "v3.2".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
