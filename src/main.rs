//! busgate — HTTP gateway for bus-hosted resources.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                   GATEWAY                       │
//!                    │                                                 │
//!   HTTP POST        │  ┌─────────┐   ┌──────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│ security│──▶│ routing  │──▶│ access gate │──┼──▶ access.<rid>
//!                    │  │ (origin)│   │ (path)   │   │             │  │
//!                    │  └─────────┘   └──────────┘   └──────┬──────┘  │
//!                    │                                      │ grant   │
//!                    │                                      ▼         │
//!   HTTP Response    │  ┌─────────┐                  ┌─────────────┐  │
//!   ◀────────────────┼──│response │◀─────────────────│ call        │──┼──▶ call.<rid>.<method>
//!                    │  │composer │                  │ dispatcher  │  │
//!                    │  └─────────┘                  └─────────────┘  │
//!                    └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use busgate::bus::NatsBusClient;
use busgate::config::load_config;
use busgate::{GatewayConfig, HttpServer};

#[derive(Parser)]
#[command(name = "busgate", about = "HTTP gateway for bus-hosted resources")]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    // RUST_LOG wins; the configured level is the fallback.
    let default_filter = format!(
        "busgate={level},tower_http={level}",
        level = config.observability.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("busgate v0.1.0 starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        path_prefix = %config.api.path_prefix,
        allow_origin = %config.cors.allow_origin,
        bus_url = %config.bus.url,
        "Configuration loaded"
    );

    let bus = NatsBusClient::connect(
        &config.bus.url,
        Duration::from_millis(config.bus.request_timeout_ms),
    )
    .await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, Arc::new(bus))?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
