//! Frame interpretation relayed as Server-Sent Events.

use std::convert::Infallible;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use bridge_core::FrameRequest;
use futures_util::StreamExt;
use tracing::debug;

use crate::error::HttpError;
use crate::state::AppState;
use crate::upload::read_upload;

/// Disables response buffering in nginx-style reverse proxies.
const X_ACCEL_BUFFERING: &str = "x-accel-buffering";

/// `POST /api/asl/stream`
///
/// Multipart with one image part and an optional `priorHypothesis` text
/// field. Each interpreter token becomes one `data:` event; the stream ends
/// when the interpreter finishes. Closing the connection drops the token
/// stream and with it the upstream session.
pub async fn stream(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpError> {
    let upload = read_upload(multipart).await?;
    if upload.data.is_empty() {
        return Ok((StatusCode::BAD_REQUEST, "empty frame").into_response());
    }

    debug!(
        frame_bytes = upload.data.len(),
        prior_len = upload.prior_hypothesis.len(),
        "Interpreting frame"
    );

    let tokens = state
        .interpreter
        .interpret(FrameRequest::new(upload.data, upload.prior_hypothesis));
    let events = tokens.map(|token| Ok::<_, Infallible>(token_event(&token)));

    Ok((
        [(X_ACCEL_BUFFERING, "no")],
        Sse::new(events).keep_alive(KeepAlive::default()),
    )
        .into_response())
}

/// One token as an SSE event. Carriage returns become newlines so multi-line
/// tokens are split into several `data:` lines instead of breaking framing.
fn token_event(token: &str) -> Event {
    Event::default().data(token.replace("\r\n", "\n").replace('\r', "\n"))
}
