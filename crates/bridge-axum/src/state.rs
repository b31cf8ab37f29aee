//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// This is an Arc-wrapped `AxumContext` holding the artifact store and the
/// frame interpreter.
pub type AppState = Arc<AxumContext>;
