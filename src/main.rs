//! Forwarding relay (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ http::server ──▶ forward::translator ──▶ forward::transport ──▶ Downstream
//!                                                                  │
//!     Client ◀── http::response ◀── forward::composer ◀────────────┘
//! ```
//!
//! The caller picks the destination per request through `x-forward-url`.
//! Each request makes exactly one downstream attempt.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use forward_proxy::config::{load_config, validate_config, ConfigError, ForwardConfig};
use forward_proxy::lifecycle::{signals, Shutdown};
use forward_proxy::observability::{logging, metrics};
use forward_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "forward-proxy")]
#[command(about = "Relay HTTP requests to the URL named in x-forward-url", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "FORWARD_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ForwardConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("forward-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        forward_path = %config.listener.forward_path,
        accept_invalid_certs = config.upstream.accept_invalid_certs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            signals::wait_for_signal().await;
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
