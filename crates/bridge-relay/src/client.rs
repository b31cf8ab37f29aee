//! Upstream inference client and per-frame relay sessions.

use std::sync::Arc;
use std::time::Instant;

use bridge_core::{FrameInterpreter, FrameRequest, TokenStream};
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult, truncate_body};
use crate::lines::LineBuffer;
use crate::payload::{LineEvent, UpstreamRequest, interpret_line};

/// Client for the streaming inference service.
///
/// Holds a pooled `reqwest::Client`; cloning is cheap and every clone shares
/// the pool. Each call to [`relay`](Self::relay) opens its own upstream
/// request and owns the response until the returned stream is dropped.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    config: Arc<RelayConfig>,
}

impl InferenceClient {
    pub fn new(config: RelayConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(10)
            .user_agent(concat!("speak-bridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RelayError::Client)?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Stream interpretation tokens for one frame.
    ///
    /// Nothing is sent until the stream is polled. Failures surface as one
    /// final diagnostic token; the stream never yields an error.
    pub fn relay(&self, request: FrameRequest) -> TokenStream {
        let session = RelaySession {
            id: Uuid::new_v4(),
            client: self.client.clone(),
            config: self.config.clone(),
            phase: Phase::Pending(request),
            started: Instant::now(),
            tokens: 0,
        };

        futures_util::stream::unfold(session, |mut session| async move {
            let token = session.next_token().await?;
            session.tokens += 1;
            Some((token, session))
        })
        .boxed()
    }
}

impl FrameInterpreter for InferenceClient {
    fn interpret(&self, request: FrameRequest) -> TokenStream {
        self.relay(request)
    }
}

enum Phase {
    Pending(FrameRequest),
    Streaming {
        body: BoxStream<'static, reqwest::Result<Bytes>>,
        lines: LineBuffer,
    },
    Finished,
}

/// One upstream connection serving one downstream request.
struct RelaySession {
    id: Uuid,
    client: Client,
    config: Arc<RelayConfig>,
    phase: Phase,
    started: Instant,
    tokens: usize,
}

impl RelaySession {
    async fn next_token(&mut self) -> Option<String> {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Finished) {
                Phase::Finished => return None,
                Phase::Pending(request) => {
                    let opened = open(&self.client, &self.config, self.id, &request).await;
                    match opened {
                        Ok(response) => {
                            self.phase = Phase::Streaming {
                                body: response.bytes_stream().boxed(),
                                lines: LineBuffer::new(),
                            };
                        }
                        Err(e) => return Some(self.fail(&e)),
                    }
                }
                Phase::Streaming {
                    mut body,
                    mut lines,
                } => {
                    if let Some(line) = lines.next_line() {
                        match interpret_line(&line, &self.config.token_fields) {
                            LineEvent::Token(token) => {
                                self.phase = Phase::Streaming { body, lines };
                                return Some(token);
                            }
                            LineEvent::Skip => {
                                self.phase = Phase::Streaming { body, lines };
                                continue;
                            }
                            LineEvent::Done => {
                                debug!(session = %self.id, "Upstream sent [DONE]");
                                return None;
                            }
                        }
                    }

                    if lines.is_closed() {
                        return None;
                    }

                    match tokio::time::timeout(self.config.idle_timeout, body.next()).await {
                        Ok(Some(Ok(chunk))) => lines.push(&chunk),
                        Ok(Some(Err(e))) => return Some(self.fail(&RelayError::Transport(e))),
                        Ok(None) => lines.close(),
                        Err(_) => {
                            return Some(self.fail(&RelayError::IdleTimeout(
                                self.config.idle_timeout,
                            )));
                        }
                    }
                    self.phase = Phase::Streaming { body, lines };
                }
            }
        }
    }

    fn fail(&self, err: &RelayError) -> String {
        warn!(session = %self.id, "Relay session failed: {err}");
        err.diagnostic()
    }
}

/// Send the request and check the status. Retries are never attempted.
async fn open(
    client: &Client,
    config: &RelayConfig,
    session: Uuid,
    request: &FrameRequest,
) -> RelayResult<reqwest::Response> {
    let body = UpstreamRequest::new(
        &config.agent_name,
        &request.frame,
        &request.prior_hypothesis,
    );

    let mut builder = client
        .post(&config.url)
        .header(ACCEPT, "text/event-stream")
        .json(&body);
    if let Some(key) = &config.api_key {
        builder = builder.bearer_auth(key);
    }

    info!(
        %session,
        frame_bytes = request.frame.len(),
        prior_len = request.prior_hypothesis.len(),
        "Opening upstream relay session"
    );

    let response = tokio::time::timeout(config.idle_timeout, builder.send())
        .await
        .map_err(|_| RelayError::IdleTimeout(config.idle_timeout))?
        .map_err(RelayError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        let text = tokio::time::timeout(config.idle_timeout, response.text())
            .await
            .ok()
            .and_then(Result::ok)
            .unwrap_or_default();
        return Err(RelayError::Status {
            status: status.as_u16(),
            body: truncate_body(&text, config.error_body_limit),
        });
    }

    Ok(response)
}

impl Drop for RelaySession {
    fn drop(&mut self) {
        // Dropping `phase` releases the upstream response and its connection.
        debug!(
            session = %self.id,
            tokens = self.tokens,
            elapsed_ms = self.started.elapsed().as_millis(),
            finished = matches!(self.phase, Phase::Finished),
            "Relay session closed"
        );
    }
}
