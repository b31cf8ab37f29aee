//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use bridge_core::DEFAULT_URL_PREFIX;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig, ServerConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// API routes without the `/api` prefix.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Publication
        .route("/stream/segment", post(handlers::stream::upload_segment))
        .route("/stream/frame", post(handlers::stream::upload_frame))
        // Latest pointers
        .route("/stream/latest", get(handlers::stream::latest_segment))
        .route("/stream/frame/latest", get(handlers::stream::latest_frame))
        .route("/stream/history", get(handlers::stream::history))
        // Frame interpretation (SSE)
        .route("/asl/stream", post(handlers::interpret::stream))
}

/// Create the full router: API, health, index and published files.
///
/// Published files are served from the store root under the store's URL
/// prefix, so URLs returned by the publish endpoints resolve here.
pub fn create_router(ctx: AxumContext, config: &ServerConfig) -> Router {
    let static_root = ctx.store.config().root().to_path_buf();
    let static_prefix = match ctx.store.config().url_prefix() {
        "" => DEFAULT_URL_PREFIX.to_string(),
        prefix => prefix.to_string(),
    };

    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(&config.cors);

    Router::new()
        .route("/", get(handlers::system::index))
        .route("/health", get(handlers::system::health))
        .route("/favicon.ico", get(handlers::system::favicon))
        .nest("/api", api_routes().with_state(state))
        .nest_service(&static_prefix, ServeDir::new(static_root))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
