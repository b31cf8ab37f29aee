//! Configuration for the upstream inference relay.

use std::time::Duration;

/// Upstream endpoint used when none is configured.
pub const DEFAULT_STREAM_URL: &str = "https://api.neuralseek.com/maistro_stream";

/// Agent identifier sent when none is configured.
pub const DEFAULT_AGENT_NAME: &str = "ASL_Interpreter";

/// Payload fields checked for token text, highest priority first.
pub const DEFAULT_TOKEN_FIELDS: [&str; 3] = ["delta", "text", "message"];

/// Configuration for [`InferenceClient`](crate::InferenceClient).
///
/// # Example
///
/// ```
/// use bridge_relay::RelayConfig;
/// use std::time::Duration;
///
/// let config = RelayConfig::new()
///     .with_url("http://127.0.0.1:9000/stream")
///     .with_idle_timeout(Duration::from_secs(120))
///     .with_token_fields(["content", "delta"]);
/// assert_eq!(config.token_fields(), ["content", "delta"]);
/// ```
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub(crate) url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) agent_name: String,
    /// Longest silence tolerated between upstream reads, including the wait
    /// for response headers.
    pub(crate) idle_timeout: Duration,
    pub(crate) connect_timeout: Duration,
    pub(crate) token_fields: Vec<String>,
    /// Upstream error bodies are cut to this many characters.
    pub(crate) error_body_limit: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STREAM_URL.to_string(),
            api_key: None,
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            idle_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            token_fields: DEFAULT_TOKEN_FIELDS.iter().map(ToString::to_string).collect(),
            error_body_limit: 200,
        }
    }
}

impl RelayConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set an optional bearer token for the upstream.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = name.into();
        self
    }

    /// Defaults to 60 seconds.
    #[must_use]
    pub const fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Replace the ordered list of payload fields holding token text.
    ///
    /// An empty list keeps the defaults.
    #[must_use]
    pub fn with_token_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if !fields.is_empty() {
            self.token_fields = fields;
        }
        self
    }

    #[must_use]
    pub const fn with_error_body_limit(mut self, chars: usize) -> Self {
        self.error_body_limit = chars;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    #[must_use]
    pub fn token_fields(&self) -> &[String] {
        &self.token_fields
    }

    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
