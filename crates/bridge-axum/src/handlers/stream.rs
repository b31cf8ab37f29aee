//! Publication and latest-pointer handlers.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bridge_core::{Pointer, PublishOutcome, Slot};

use crate::dto::{FramePublished, HistoryListing, HistoryQuery, SegmentPublished, Skipped};
use crate::error::HttpError;
use crate::state::AppState;
use crate::upload::read_upload;

/// `POST /api/stream/segment`
///
/// An empty upload is acknowledged with `{ok:false, skipped:true}` and
/// leaves the current segment in place.
pub async fn upload_segment(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpError> {
    let upload = read_upload(multipart).await?;
    let outcome = state
        .store
        .publish(Slot::Segment, &upload.data, upload.content_type.as_deref())
        .await?;

    Ok(match outcome {
        PublishOutcome::Published(receipt) => {
            Json(SegmentPublished::from(receipt)).into_response()
        }
        PublishOutcome::Skipped => Json(Skipped::empty()).into_response(),
    })
}

/// `POST /api/stream/frame`
pub async fn upload_frame(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpError> {
    let upload = read_upload(multipart).await?;
    let outcome = state
        .store
        .publish(Slot::Frame, &upload.data, upload.content_type.as_deref())
        .await?;

    Ok(match outcome {
        PublishOutcome::Published(receipt) => Json(FramePublished::from(receipt)).into_response(),
        PublishOutcome::Skipped => (StatusCode::BAD_REQUEST, "empty frame").into_response(),
    })
}

/// `GET /api/stream/latest`
pub async fn latest_segment(State(state): State<AppState>) -> Result<Json<Pointer>, HttpError> {
    latest(&state, Slot::Segment).await
}

/// `GET /api/stream/frame/latest`
pub async fn latest_frame(State(state): State<AppState>) -> Result<Json<Pointer>, HttpError> {
    latest(&state, Slot::Frame).await
}

async fn latest(state: &AppState, slot: Slot) -> Result<Json<Pointer>, HttpError> {
    state
        .store
        .latest(slot)
        .await
        .map(Json)
        .ok_or_else(|| HttpError::NotFound("no file yet".to_string()))
}

/// `GET /api/stream/history?slot=segment|frame`
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryListing>, HttpError> {
    let names = state
        .store
        .history(query.slot)
        .await
        .map_err(|e| HttpError::Internal(format!("Failed to list history: {e}")))?;

    Ok(Json(HistoryListing {
        slot: query.slot,
        urls: names.iter().map(|name| state.store.history_url(name)).collect(),
    }))
}
