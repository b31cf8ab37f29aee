//! Serve command handler.

use std::sync::Arc;

use anyhow::{Context, Result};
use bridge_axum::start_server;
use bridge_relay::InferenceClient;
use tracing::{info, warn};

use crate::commands::ServeArgs;

/// Run the HTTP server until Ctrl-C.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let relay = args.upstream.relay_config();
    if !relay.has_api_key() {
        warn!("NEURALSEEK_API_KEY is not set; upstream requests are sent without credentials");
    }
    info!(
        upstream = relay.url(),
        agent = relay.agent_name(),
        "Frame interpretation relay configured"
    );

    let client = InferenceClient::new(relay).context("Failed to create inference client")?;
    start_server(args.server_config(), Arc::new(client), shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        // Without a signal handler, run until killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining connections");
}
