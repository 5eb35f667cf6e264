//! The `instacap config` command for configuration management.

use clap::{Args, Subcommand};
use instacap_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Config file to use: `--config` (with `~` expanded) or the default location.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            PathBuf::from(expanded)
        }
        None => Config::default_path(),
    }
}

/// Load config from `path`, or defaults if the file doesn't exist.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        Config::load_from(path)
    } else {
        Ok(Config::default())
    }
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs, path: &Path) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = load(path)?;
            let toml = config.to_toml()?;
            println!("{}", toml);
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            write_default(path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn write_default(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = Config::default().to_toml()?;
    std::fs::write(path, toml)?;
    Ok(())
}
