//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Publish camera frames and video segments, and relay frame
/// interpretation from a streaming inference service.
#[derive(Debug, Parser)]
#[command(name = "speak-bridge")]
#[command(version, about)]
pub struct Cli {
    /// Enable verbose/debug output (ignored when RUST_LOG is set)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log directive when `RUST_LOG` is unset.
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug,hyper=info,reqwest=info"
        } else {
            "info"
        }
    }
}
