//! Upstream request body and per-line token extraction.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde_json::Value;

/// JSON body sent to the inference service.
#[derive(Debug, Serialize)]
pub struct UpstreamRequest<'a> {
    pub agent_name: &'a str,
    pub inputs: UpstreamInputs<'a>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct UpstreamInputs<'a> {
    /// Base64 of the raw frame bytes (no data-URL prefix).
    pub frame_png_b64: String,
    pub prior_hypothesis: &'a str,
}

impl<'a> UpstreamRequest<'a> {
    #[must_use]
    pub fn new(agent_name: &'a str, frame: &[u8], prior_hypothesis: &'a str) -> Self {
        Self {
            agent_name,
            inputs: UpstreamInputs {
                frame_png_b64: STANDARD.encode(frame),
                prior_hypothesis,
            },
            stream: true,
        }
    }
}

/// What a single upstream line contributes to the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Blank line, SSE comment, or a known field holding empty text.
    Skip,
    Token(String),
    /// `[DONE]` sentinel: the upstream has finished.
    Done,
}

/// Interpret one upstream line.
///
/// `data:` framing is optional and the payload may or may not be JSON.
/// Unparseable payloads, or JSON without any of `fields`, come through as
/// the raw trimmed text.
#[must_use]
pub fn interpret_line(line: &str, fields: &[String]) -> LineEvent {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return LineEvent::Skip;
    }

    let payload = trimmed
        .strip_prefix("data:")
        .map_or(trimmed, str::trim);
    if payload.is_empty() {
        return LineEvent::Skip;
    }
    if payload == "[DONE]" {
        return LineEvent::Done;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(payload) {
        for field in fields {
            if let Some(Value::String(text)) = map.get(field) {
                return if text.is_empty() {
                    LineEvent::Skip
                } else {
                    LineEvent::Token(text.clone())
                };
            }
        }
    }

    LineEvent::Token(payload.to_string())
}
