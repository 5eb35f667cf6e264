//! Instacap Core - Instagram-ready captions from Computer Vision analysis.
//!
//! Instacap forwards an image (URL or byte stream) to the Computer Vision
//! Analyze Image API and renders the returned captions and tags as a
//! ready-to-post line of text.
//!
//! # Architecture
//!
//! ```text
//! Config → VisionProviderFactory → dyn VisionProvider → CaptionService → String
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use instacap_core::{CaptionService, Config, VisionProviderFactory};
//!
//! #[tokio::main]
//! async fn main() -> instacap_core::Result<()> {
//!     let config = Config::load()?;
//!     let service = CaptionService::new(VisionProviderFactory::create(&config.vision)?);
//!
//!     let caption = service.caption_from_url("https://example.com/cat.jpg").await?;
//!     println!("{caption}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod caption;
pub mod config;
pub mod error;
pub mod vision;

// Re-exports for convenient access
pub use caption::{format_caption, format_tags, CaptionService, FALLBACK_MESSAGE};
pub use config::Config;
pub use error::{ConfigError, InstacapError, Result, VisionError, VisionResult};
pub use vision::{
    AnalysisResult, ImageSource, ImageTag, VisionProvider, VisionProviderFactory, VisualFeature,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
