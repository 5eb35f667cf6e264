//! The `instacap caption` and `instacap tags` commands.

use clap::Args;
use instacap_core::{CaptionService, Config};

use super::input::ImageInput;

/// Arguments shared by `caption` and `tags`.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Image URL (http/https), file path, or `-` to read from stdin
    #[arg(required = true)]
    pub image: String,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Caption,
    Tags,
}

/// Execute the caption command.
pub async fn execute_caption(args: ImageArgs, config: &Config) -> anyhow::Result<()> {
    run(args, config, Mode::Caption).await
}

/// Execute the tags command.
pub async fn execute_tags(args: ImageArgs, config: &Config) -> anyhow::Result<()> {
    run(args, config, Mode::Tags).await
}

async fn run(args: ImageArgs, config: &Config, mode: Mode) -> anyhow::Result<()> {
    let service = CaptionService::from_config(config)?;
    let input = ImageInput::parse(&args.image);
    tracing::debug!(
        "Requesting {mode:?} for {input:?} via {}",
        service.provider_name()
    );

    let text = match (input, mode) {
        (ImageInput::Url(url), Mode::Caption) => service.caption_from_url(&url).await?,
        (ImageInput::Url(url), Mode::Tags) => service.tags_from_url(&url).await?,
        (ImageInput::File(path), Mode::Caption) => {
            let file = ImageInput::open_file(&path).await?;
            service.caption_from_stream(file).await?
        }
        (ImageInput::File(path), Mode::Tags) => {
            let file = ImageInput::open_file(&path).await?;
            service.tags_from_stream(file).await?
        }
        (ImageInput::Stdin, Mode::Caption) => {
            service.caption_from_stream(tokio::io::stdin()).await?
        }
        (ImageInput::Stdin, Mode::Tags) => service.tags_from_stream(tokio::io::stdin()).await?,
    };

    println!("{text}");
    Ok(())
}
