//! Config command - inspect and scaffold configuration files.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use regan_core::models::config::ReganConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Target path (default: ~/.config/regan/config.json)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = match config_path {
                Some(path) => ReganConfig::from_file(Path::new(path))?,
                None => ReganConfig::default(),
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init { path } => {
            let target = match path {
                Some(p) => p,
                None => default_config_path()?,
            };
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            ReganConfig::default().save(&target)?;
            println!(
                "{} Wrote default config to {}",
                style("✓").green(),
                target.display()
            );
        }
    }

    Ok(())
}

fn default_config_path() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;
    Ok(base.join("regan").join("config.json"))
}
