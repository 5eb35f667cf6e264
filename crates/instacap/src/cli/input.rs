//! Image argument parsing shared by the image commands.

use anyhow::Context;
use instacap_core::ImageSource;
use std::path::{Path, PathBuf};

/// Where the image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// Remote image, analyzed by URL
    Url(String),
    /// Local file, uploaded as bytes
    File(PathBuf),
    /// Standard input, uploaded as bytes
    Stdin,
}

impl ImageInput {
    /// Classify a command-line image argument.
    ///
    /// Surrounding whitespace is stripped first and the trimmed value is what
    /// every variant carries. After that, `-` is stdin, anything with an
    /// http(s) scheme is a URL, and the rest are paths.
    pub fn parse(arg: &str) -> Self {
        let trimmed = arg.trim();
        let lower = trimmed.to_ascii_lowercase();
        if trimmed == "-" {
            ImageInput::Stdin
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageInput::Url(trimmed.to_string())
        } else {
            ImageInput::File(PathBuf::from(trimmed))
        }
    }

    /// Open a local file for streaming, with a hint if it doesn't exist.
    pub async fn open_file(path: &Path) -> anyhow::Result<tokio::fs::File> {
        if !path.exists() {
            anyhow::bail!(
                "Image file does not exist: {:?}\n\n  Hint: Pass an http(s) URL, a file path, or `-` for stdin.",
                path
            );
        }
        tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open image {}", path.display()))
    }

    /// Read the whole image into an [`ImageSource`].
    pub async fn into_source(self) -> anyhow::Result<ImageSource> {
        match self {
            ImageInput::Url(url) => Ok(ImageSource::Url(url)),
            ImageInput::File(path) => {
                let file = Self::open_file(&path).await?;
                ImageSource::from_reader(file)
                    .await
                    .with_context(|| format!("Failed to read image {}", path.display()))
            }
            ImageInput::Stdin => ImageSource::from_reader(tokio::io::stdin())
                .await
                .context("Failed to read image from stdin"),
        }
    }
}
