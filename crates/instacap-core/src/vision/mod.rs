//! Computer Vision integration.
//!
//! A provider abstraction over the image-analysis service plus the HTTP
//! client for Microsoft's Analyze Image endpoint.

pub(crate) mod azure;
pub(crate) mod provider;
pub(crate) mod types;

pub use azure::AzureVisionProvider;
pub use provider::{resolve_env_var, VisionProvider, VisionProviderFactory};
pub use types::{
    AnalysisResult, Caption, Description, ImageMetadata, ImageSource, ImageTag, VisualFeature,
};
