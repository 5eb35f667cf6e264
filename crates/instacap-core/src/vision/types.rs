//! Request and response types for the Computer Vision analyze call.
//!
//! Response structs mirror the service's camelCase JSON. Every field the
//! service may omit is optional or defaulted, so a sparse body still decodes.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

/// The image reference handed to the vision service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A publicly reachable image URL, fetched by the service
    Url(String),
    /// Raw image bytes, uploaded in the request body
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Drain a stream into a [`ImageSource::Bytes`].
    pub async fn from_reader<R>(mut reader: R) -> std::io::Result<Self>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        Ok(ImageSource::Bytes(bytes))
    }

    /// Short label for logging ("url" or "bytes").
    pub fn kind(&self) -> &'static str {
        match self {
            ImageSource::Url(_) => "url",
            ImageSource::Bytes(_) => "bytes",
        }
    }

    /// Whether the reference carries nothing to analyze.
    pub fn is_empty(&self) -> bool {
        match self {
            ImageSource::Url(url) => url.trim().is_empty(),
            ImageSource::Bytes(bytes) => bytes.is_empty(),
        }
    }
}

/// A visual feature that can be requested from the analyze endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualFeature {
    /// Natural-language captions
    Description,
    /// Keyword tags with confidence scores
    Tags,
}

impl VisualFeature {
    /// Value used in the `visualFeatures` query parameter.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            VisualFeature::Description => "Description",
            VisualFeature::Tags => "Tags",
        }
    }

    /// Join features into a single `visualFeatures` query value.
    pub fn query_list(features: &[VisualFeature]) -> String {
        features
            .iter()
            .map(VisualFeature::as_query_value)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::str::FromStr for VisualFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "description" => Ok(VisualFeature::Description),
            "tags" => Ok(VisualFeature::Tags),
            other => Err(format!("unknown visual feature: {other}")),
        }
    }
}

/// Result of an analyze call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Captions, present when `Description` was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    /// Tags in the order the service returned them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ImageTag>>,

    /// Service-assigned request identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Basic image properties reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

impl AnalysisResult {
    /// Text of the first caption candidate, if any.
    pub fn first_caption(&self) -> Option<&str> {
        self.description
            .as_ref()
            .and_then(|d| d.captions.first())
            .map(|c| c.text.as_str())
    }

    /// Name of the tag at `index`, if the service returned that many.
    pub fn tag_name(&self, index: usize) -> Option<&str> {
        self.tags
            .as_ref()
            .and_then(|tags| tags.get(index))
            .map(|t| t.name.as_str())
    }
}

/// Description block: caption candidates plus description-level keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    /// Keywords associated with the description
    #[serde(default)]
    pub tags: Vec<String>,

    /// Caption candidates, best first
    #[serde(default)]
    pub captions: Vec<Caption>,
}

/// A caption candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// The caption sentence
    pub text: String,

    /// Confidence score from 0.0 to 1.0
    #[serde(default)]
    pub confidence: f32,
}

/// A tag with confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTag {
    /// The tag label (e.g., "cat", "outdoor")
    pub name: String,

    /// Confidence score from 0.0 to 1.0
    #[serde(default)]
    pub confidence: f32,

    /// Optional parent concept (e.g., "animal" for "cat")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ImageTag {
    /// Create a new tag with the given name and confidence.
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
            hint: None,
        }
    }
}

/// Image properties reported alongside the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}
