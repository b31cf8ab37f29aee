//! Command handlers.
//!
//! Each handler owns one subcommand and returns `anyhow::Result`.

pub mod relay;
pub mod serve;
pub mod sniff;
