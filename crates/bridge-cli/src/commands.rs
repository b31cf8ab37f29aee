//! Subcommand and argument definitions.
//!
//! Every option falls back to an environment variable, so a `.env` file is
//! enough to configure a deployment.

use std::path::PathBuf;
use std::time::Duration;

use bridge_axum::ServerConfig;
use bridge_core::StoreConfig;
use bridge_relay::{DEFAULT_AGENT_NAME, DEFAULT_STREAM_URL, RelayConfig};
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Classify a local file the way uploads are classified
    Sniff {
        /// File to inspect
        file: PathBuf,
        /// Content type to treat as declared by the client
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Interpret a local image and print tokens as they arrive
    Relay {
        /// Image file to send
        image: PathBuf,
        /// Interpretation of the previous frame
        #[arg(long, default_value = "")]
        prior: String,
        #[command(flatten)]
        upstream: UpstreamArgs,
    },
}

/// Options for `speak-bridge serve`.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "BRIDGE_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "BRIDGE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Publish directory, served under /static
    #[arg(long, env = "BRIDGE_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Timestamped copies kept per slot (0 disables history)
    #[arg(long, env = "BRIDGE_HISTORY_LIMIT", default_value_t = 0)]
    pub history_limit: usize,

    /// Largest accepted upload in MiB
    #[arg(long, env = "BRIDGE_MAX_UPLOAD_MB", default_value_t = 64)]
    pub max_upload_mb: usize,

    /// Allowed CORS origin; repeat for several. Default allows any origin.
    #[arg(long = "allowed-origin")]
    pub allowed_origins: Vec<String>,

    #[command(flatten)]
    pub upstream: UpstreamArgs,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        let store =
            StoreConfig::new(&self.static_dir).with_history_limit(self.history_limit);

        ServerConfig::new(&self.static_dir)
            .with_bind(self.host.clone(), self.port)
            .with_store(store)
            .with_max_upload_bytes(self.max_upload_mb.saturating_mul(1024 * 1024))
            .with_allowed_origins(self.allowed_origins.clone())
    }
}

/// Connection settings for the inference service.
#[derive(Debug, Clone, Args)]
pub struct UpstreamArgs {
    /// Streaming endpoint of the inference service
    #[arg(long = "upstream-url", env = "NEURALSEEK_STREAM_URL", default_value = DEFAULT_STREAM_URL)]
    pub url: String,

    /// Bearer token for the inference service
    #[arg(long, env = "NEURALSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Agent that interprets frames
    #[arg(long, env = "NEURALSEEK_AGENT_NAME", default_value = DEFAULT_AGENT_NAME)]
    pub agent_name: String,

    /// Seconds without upstream bytes before a session is abandoned
    #[arg(long, env = "BRIDGE_UPSTREAM_IDLE_TIMEOUT", default_value_t = 60)]
    pub idle_timeout_secs: u64,

    /// JSON field holding token text, in priority order; repeatable
    #[arg(long = "token-field")]
    pub token_fields: Vec<String>,
}

impl UpstreamArgs {
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig::new()
            .with_url(self.url.clone())
            .with_api_key(self.api_key.clone())
            .with_agent_name(self.agent_name.clone())
            .with_idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .with_token_fields(self.token_fields.clone())
    }
}
