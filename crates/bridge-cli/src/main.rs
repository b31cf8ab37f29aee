//! CLI entry point - the composition root.
//!
//! Loads `.env`, installs logging and dispatches to a command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bridge_cli::{Cli, Commands, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before parsing so they feed clap's env fallbacks
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging on stderr; `relay` prints tokens on stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve(args) => handlers::serve::execute(args).await,
        Commands::Sniff { file, content_type } => {
            handlers::sniff::execute(&file, content_type.as_deref()).await
        }
        Commands::Relay {
            image,
            prior,
            upstream,
        } => handlers::relay::execute(&image, prior, &upstream).await,
    }
}
