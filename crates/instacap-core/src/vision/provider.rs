//! Vision provider trait and factory.
//!
//! Defines the interface the caption adapter talks to, plus the factory that
//! builds the Computer Vision client from config.

use super::types::{AnalysisResult, ImageSource, VisualFeature};
use crate::config::VisionConfig;
use crate::error::{ConfigError, VisionError};
use async_trait::async_trait;

/// Trait that all vision backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn VisionProvider>` for injection).
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name for logging (e.g., "azure").
    fn name(&self) -> &str;

    /// Analyze an image, returning only the requested features.
    async fn analyze(
        &self,
        image: &ImageSource,
        features: &[VisualFeature],
    ) -> Result<AnalysisResult, VisionError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the vision provider from config.
pub struct VisionProviderFactory;

impl VisionProviderFactory {
    /// Create the Computer Vision provider described by `config`.
    ///
    /// The API key is resolved here, once; a missing key fails fast instead
    /// of surfacing as a 401 on the first call.
    pub fn create(config: &VisionConfig) -> Result<Box<dyn VisionProvider>, ConfigError> {
        let api_key = resolve_env_var(&config.api_key).ok_or_else(|| {
            ConfigError::MissingApiKey(format!(
                "'{}' did not resolve to a key. Set MICROSOFT_VISION_API_KEY or vision.api_key.",
                config.api_key
            ))
        })?;
        Ok(Box::new(super::azure::AzureVisionProvider::new(
            &config.endpoint,
            &config.api_version,
            &config.language,
            &api_key,
        )))
    }
}
