//! Command-line front end for speak-bridge.
//!
//! `main.rs` is the composition root; this library holds the argument
//! definitions and command handlers so they can be tested.

#![deny(unsafe_code)]

pub mod commands;
pub mod handlers;
pub mod parser;

pub use commands::{Commands, ServeArgs, UpstreamArgs};
pub use parser::Cli;
