//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that delegate to the artifact store or the
//! frame interpreter held in `AppState`.

pub mod interpret;
pub mod stream;
pub mod system;
