//! TMDB Gateway
//!
//! A small gateway built with Tokio and Axum that relays a fixed set of
//! routes to the TMDB API.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 TMDB GATEWAY                 │
//!                    │                                              │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ routing  │──▶│ upstream  │──┼──▶ api.themoviedb.org
//!                    │  │ server  │   │  table   │   │  client   │  │
//!                    │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!   Client Response  │  ┌─────────┐                        │        │
//!   ◀────────────────┼──│response │◀───────────────────────┘        │
//!                    │  │ relay   │                                 │
//!                    │  └─────────┘                                 │
//!                    │                                              │
//!                    │  config · observability · lifecycle          │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tmdb_proxy::config;
use tmdb_proxy::lifecycle::{signals, Shutdown};
use tmdb_proxy::observability::{logging, metrics};
use tmdb_proxy::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "tmdb-proxy")]
#[command(about = "HTTP gateway for the TMDB API", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "TMDB_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen port; overrides PORT and the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref(), |key| std::env::var(key).ok(), cli.port)?;

    logging::init(&config.observability.log_level);
    tracing::info!("tmdb-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        language = %config.upstream.language,
        timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config)?;

    let signal_task = tokio::spawn(async move {
        signals::shutdown_on_signal(&shutdown).await;
    });

    let result = server.run(listener, server_shutdown).await;
    signal_task.abort();
    result?;

    tracing::info!("Shutdown complete");
    Ok(())
}
