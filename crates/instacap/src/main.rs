//! Instacap CLI - Instagram-ready captions and tags for your photos.
//!
//! Sends an image to the Computer Vision Analyze Image API and prints a
//! caption line or a tags line built from the result.
//!
//! # Usage
//!
//! ```bash
//! # Caption an image by URL
//! instacap caption https://example.com/cat.jpg
//!
//! # First tag of a local file
//! instacap tags ./photos/dog.jpg
//!
//! # Pipe an image in
//! cat beach.png | instacap caption -
//!
//! # Raw analysis JSON
//! instacap analyze ./photos/dog.jpg --pretty
//!
//! # View configuration
//! instacap config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Instacap - Instagram-ready captions and tags for your photos.
#[derive(Parser, Debug)]
#[command(name = "instacap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "INSTACAP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Suggest a caption plus the most relevant tags for an image
    Caption(cli::caption::ImageArgs),

    /// Suggest the single most relevant tag for an image
    Tags(cli::caption::ImageArgs),

    /// Print the raw analysis result as JSON
    Analyze(cli::analyze::AnalyzeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli::config::resolve_path(cli.config.as_deref());

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match cli::config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `instacap config path`."
            );
            instacap_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Instacap v{}", instacap_core::VERSION);

    match cli.command {
        Commands::Caption(args) => cli::caption::execute_caption(args, &config).await,
        Commands::Tags(args) => cli::caption::execute_tags(args, &config).await,
        Commands::Analyze(args) => cli::analyze::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args, &config_path).await,
    }
}
