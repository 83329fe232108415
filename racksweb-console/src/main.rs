//! RacksWeb Console - terminal front-end for the RacksDB inventory
//!
//! Same views as the web UI, printed as text:
//! - Datacenters, rooms and rack fill rates
//! - Infrastructures with their equipment filtered and grouped by rack
//! - Equipment type details and SVG diagrams

mod commands;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Commands;
use racksweb_core::config::CONFIG_PATH_ENV;
use racksweb_core::{RacksDbClient, RuntimeConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = r#"Examples:
  racksweb-console datacenters
  racksweb-console rooms paris
  racksweb-console room paris noisy --query R0
  racksweb-console infrastructure mercury --category nodes --tag prod --collapse R02
  racksweb-console equipment-type mercury sm220bt
  racksweb-console draw infrastructure mercury --output mercury.svg"#
)]
struct Cli {
    /// Runtime configuration file (API_SERVER / API_VERSION)
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

async fn load_config(path: Option<&PathBuf>) -> Result<RuntimeConfig> {
    let config = match path {
        Some(path) => RuntimeConfig::load_from(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?
            .with_env_overrides(),
        None => RuntimeConfig::load()
            .await
            .with_context(|| format!("Failed to load runtime configuration (${CONFIG_PATH_ENV})"))?,
    };
    debug!(?config, "runtime configuration");
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("🗄️ RacksWeb console starting...");

    let config = load_config(cli.config.as_ref()).await?;
    let client = RacksDbClient::new(&config).context("Failed to create RacksDB client")?;

    let output = commands::execute(cli.command, &client).await?;
    std::io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    Ok(())
}
