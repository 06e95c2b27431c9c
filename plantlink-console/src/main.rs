use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use plantlink_client::ApiClient;

mod commands;
mod config;
mod table;

use commands::assets::AssetAction;
use commands::devices::DeviceAction;
use commands::signals::SignalAction;
use config::Config;

#[derive(Parser)]
#[command(name = "plantlink")]
#[command(about = "Console for the PlantLink device and asset backend")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "plantlink.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage registered devices
    Devices {
        #[command(subcommand)]
        action: DeviceAction,
    },
    /// Manage assets attached to devices
    Assets {
        #[command(subcommand)]
        action: AssetAction,
    },
    /// Manage signal measurement points on assets
    Signals {
        #[command(subcommand)]
        action: SignalAction,
    },
    /// Show the entity counts overview
    Dashboard,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "plantlink=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        info!(path = ?cli.config, "Loading configuration");
        Config::load(&cli.config)?
    } else {
        info!("No configuration file found, using defaults");
        Config::default()
    }
    .with_env_overrides();

    let client = if config.backend.accept_invalid_certs {
        ApiClient::insecure(config.backend.base_url)?
    } else {
        ApiClient::new(config.backend.base_url)
    };
    info!(base_url = client.base_url(), "Using backend");

    match cli.command {
        Command::Devices { action } => commands::devices::run(client, action).await,
        Command::Assets { action } => commands::assets::run(client, action).await,
        Command::Signals { action } => commands::signals::run(client, action).await,
        Command::Dashboard => {
            commands::dashboard::run(client).await;
            Ok(())
        }
    }
}
