//! Userdata backend with the inbound path normalizer installed.
//!
//! ```text
//! client (escape layer) ──▶ reverse proxy ──▶ normalizer ──▶ router ──▶ handlers
//!                            (collapses %2F)   (restores /)
//! ```
//!
//! Takes an optional TOML config path as its first argument; without one
//! the documented defaults apply.

use std::path::Path;

use tokio::net::TcpListener;

use path_relay::config::{load_config, RelayConfig};
use path_relay::lifecycle::Shutdown;
use path_relay::observability::{logging, metrics};
use path_relay::server::UserdataServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => RelayConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        namespace = %config.escape.namespace,
        marker = %config.escape.marker,
        "path-relay backend starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    let handle = shutdown.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            shutdown.trigger();
        }
    });

    let server = UserdataServer::new(config);
    server.run(listener, handle).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
