//! The `instacap analyze` command: raw analysis result as JSON.

use clap::Args;
use instacap_core::{AnalysisResult, CaptionService, Config, VisualFeature};

use super::input::ImageInput;

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Image URL (http/https), file path, or `-` to read from stdin
    #[arg(required = true)]
    pub image: String,

    /// Visual features to request (comma-separated: description, tags)
    #[arg(long, value_delimiter = ',', default_values = ["description", "tags"])]
    pub features: Vec<VisualFeature>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    let service = CaptionService::from_config(config)?;
    let source = ImageInput::parse(&args.image).into_source().await?;

    let result = service.analyze(&source, &dedup(args.features)).await?;
    println!("{}", render(&result, args.pretty)?);
    Ok(())
}

/// Drop repeated features while keeping the order they were given in.
fn dedup(features: Vec<VisualFeature>) -> Vec<VisualFeature> {
    let mut unique = Vec::with_capacity(features.len());
    for feature in features {
        if !unique.contains(&feature) {
            unique.push(feature);
        }
    }
    unique
}

fn render(result: &AnalysisResult, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    }
}
