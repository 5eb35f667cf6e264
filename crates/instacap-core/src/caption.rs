//! Caption adapter: turns Computer Vision analysis into Instagram-ready text.
//!
//! Two output modes, each reachable from a URL or a byte stream:
//!
//! - caption mode asks for `Description` + `Tags` and renders the first
//!   caption followed by five tag slots;
//! - tags mode asks for `Tags` only and renders the first tag.
//!
//! Errors from the vision provider are returned untouched. A result with
//! nothing usable in it is not an error: it renders as [`FALLBACK_MESSAGE`].

use crate::config::Config;
use crate::error::VisionResult;
use crate::vision::{
    AnalysisResult, ImageSource, VisionProvider, VisionProviderFactory, VisualFeature,
};
use std::sync::Arc;
use tokio::io::AsyncRead;

/// Returned whenever no caption (or no tag, in tags mode) was found.
pub const FALLBACK_MESSAGE: &str = "Couldn't find a caption for this one";

const CAPTION_PREFIX: &str = "Your Instagram caption can be: ";
const CAPTION_TAGS_INTRO: &str = "   .Most relevant tags I can think of :";
const TAGS_PREFIX: &str = "Your Instagrams Tags will be: ";

/// Separator placed between tag slots in caption mode.
pub const TAG_SEPARATOR: &str = " ,";

/// Number of tag slots rendered in caption mode. Missing tags leave an empty
/// slot, so the separators are always all present.
pub const CAPTION_TAG_SLOTS: usize = 5;

const CAPTION_FEATURES: &[VisualFeature] = &[VisualFeature::Description, VisualFeature::Tags];
const TAG_FEATURES: &[VisualFeature] = &[VisualFeature::Tags];

/// Render caption mode output for an analysis result.
pub fn format_caption(result: &AnalysisResult) -> String {
    let caption = match result.first_caption() {
        Some(text) if !text.is_empty() => text,
        _ => return FALLBACK_MESSAGE.to_string(),
    };

    let tags = (0..CAPTION_TAG_SLOTS)
        .map(|i| result.tag_name(i).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR);

    format!("{CAPTION_PREFIX}{caption}{CAPTION_TAGS_INTRO}{tags}")
}

/// Render tags mode output for an analysis result.
pub fn format_tags(result: &AnalysisResult) -> String {
    match result.tag_name(0) {
        Some(name) if !name.is_empty() => format!("{TAGS_PREFIX}{name}"),
        _ => FALLBACK_MESSAGE.to_string(),
    }
}

/// Caption adapter over an injected vision provider.
///
/// Cheap to clone and safe to share across tasks: every call is an
/// independent request and nothing is cached between calls.
#[derive(Clone)]
pub struct CaptionService {
    provider: Arc<dyn VisionProvider>,
}

impl CaptionService {
    pub fn new(provider: Box<dyn VisionProvider>) -> Self {
        Self {
            provider: Arc::from(provider),
        }
    }

    /// Build a caption service straight from configuration.
    ///
    /// The API key is resolved here and never re-read.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        tracing::debug!("Initializing Instacap v{}", crate::VERSION);
        let provider = VisionProviderFactory::create(&config.vision)?;
        Ok(Self::new(provider))
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Caption for an image URL.
    pub async fn caption_from_url(&self, url: &str) -> VisionResult<String> {
        self.caption(&ImageSource::Url(url.to_string())).await
    }

    /// Caption for an image read from a stream.
    pub async fn caption_from_stream<R>(&self, reader: R) -> VisionResult<String>
    where
        R: AsyncRead + Unpin + Send,
    {
        let source = ImageSource::from_reader(reader).await?;
        self.caption(&source).await
    }

    /// Tags line for an image URL.
    pub async fn tags_from_url(&self, url: &str) -> VisionResult<String> {
        self.tags(&ImageSource::Url(url.to_string())).await
    }

    /// Tags line for an image read from a stream.
    pub async fn tags_from_stream<R>(&self, reader: R) -> VisionResult<String>
    where
        R: AsyncRead + Unpin + Send,
    {
        let source = ImageSource::from_reader(reader).await?;
        self.tags(&source).await
    }

    /// Caption for an already-built image source.
    pub async fn caption(&self, source: &ImageSource) -> VisionResult<String> {
        let result = self.provider.analyze(source, CAPTION_FEATURES).await?;
        Ok(format_caption(&result))
    }

    /// Tags line for an already-built image source.
    pub async fn tags(&self, source: &ImageSource) -> VisionResult<String> {
        let result = self.provider.analyze(source, TAG_FEATURES).await?;
        Ok(format_tags(&result))
    }

    /// Raw analysis with caller-chosen features.
    pub async fn analyze(
        &self,
        source: &ImageSource,
        features: &[VisualFeature],
    ) -> VisionResult<AnalysisResult> {
        self.provider.analyze(source, features).await
    }
}
