//! Relay command handler.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bridge_core::FrameRequest;
use bridge_relay::InferenceClient;
use futures_util::StreamExt;

use crate::commands::UpstreamArgs;

/// Send one image upstream and print each token on its own line.
pub async fn execute(image: &Path, prior: String, upstream: &UpstreamArgs) -> Result<()> {
    let frame = tokio::fs::read(image)
        .await
        .with_context(|| format!("Failed to read {}", image.display()))?;
    let client = InferenceClient::new(upstream.relay_config())
        .context("Failed to create inference client")?;

    let mut tokens = client.relay(FrameRequest::new(frame, prior));
    let mut stdout = std::io::stdout();
    while let Some(token) = tokens.next().await {
        writeln!(stdout, "{token}")?;
        stdout.flush()?;
    }
    Ok(())
}
