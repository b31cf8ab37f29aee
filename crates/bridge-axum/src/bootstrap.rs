//! Bootstrap and server startup for the Axum adapter.
//!
//! `bootstrap` prepares the publish directory and assembles the context;
//! `start_server` binds the listener and serves until the shutdown future
//! resolves.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use bridge_core::{ArtifactStore, FrameInterpreter, StoreConfig};
use tokio::net::TcpListener;
use tracing::info;

/// Default upload size cap (64 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// CORS configuration for the server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server; 0 picks a free one.
    pub port: u16,
    /// Publish directory, URL prefix and history policy.
    pub store: StoreConfig,
    /// Request body cap applied to uploads.
    pub max_upload_bytes: usize,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Config serving `static_dir` on `0.0.0.0:8000`.
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            store: StoreConfig::new(static_dir),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors: CorsConfig::default(),
        }
    }

    #[must_use]
    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    #[must_use]
    pub const fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Set CORS to allow specific origins. An empty list keeps allow-all.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        if !origins.is_empty() {
            self.cors = CorsConfig::AllowOrigins(origins);
        }
        self
    }
}

/// Application context for the Axum adapter.
///
/// Holds no per-request state: the store reads the publish directory on
/// every call and the interpreter opens a fresh session per frame.
pub struct AxumContext {
    pub store: ArtifactStore,
    pub interpreter: Arc<dyn FrameInterpreter>,
}

/// Prepare the publish directory and assemble the context.
pub async fn bootstrap(
    config: &ServerConfig,
    interpreter: Arc<dyn FrameInterpreter>,
) -> Result<AxumContext> {
    let root = config.store.root();
    tokio::fs::create_dir_all(root)
        .await
        .with_context(|| format!("Failed to create publish directory {}", root.display()))?;

    Ok(AxumContext {
        store: ArtifactStore::new(config.store.clone()),
        interpreter,
    })
}

/// Start the web server and run until `shutdown` resolves.
pub async fn start_server<F>(
    config: ServerConfig,
    interpreter: Arc<dyn FrameInterpreter>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let ctx = bootstrap(&config, interpreter).await?;
    let app = crate::routes::create_router(ctx, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local: SocketAddr = listener.local_addr()?;

    info!(
        publish_dir = %config.store.root().display(),
        "speak-bridge listening on http://{local}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("speak-bridge stopped");
    Ok(())
}
