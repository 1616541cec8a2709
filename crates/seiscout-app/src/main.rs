//! SeiScout - Entry Point
//!
//! Serves the wallet analytics dashboard until Ctrl-C.

use anyhow::Result;
use clap::Parser;
use seiscout_app::{AppConfig, Application, ConfigSource};
use tracing::{info, warn};

/// SeiScout wallet analytics dashboard
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SEISCOUT_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the dashboard port
    #[arg(short, long)]
    port: Option<u16>,

    /// Back wallet requests with the simulated demo wallet
    #[arg(long)]
    demo_wallet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, source) = AppConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.dashboard.port = port;
    }
    if args.demo_wallet {
        config.wallet.demo = true;
    }

    seiscout_telemetry::init_logging(config.telemetry.log_level.as_deref())?;

    info!("Starting SeiScout v{}", env!("CARGO_PKG_VERSION"));
    if source == ConfigSource::BuiltIn {
        warn!("Config file not found, using defaults");
    }
    info!(
        source = %source,
        port = config.dashboard.port,
        "Configuration loaded"
    );

    let app = Application::new(config)?;
    app.run().await?;

    Ok(())
}
