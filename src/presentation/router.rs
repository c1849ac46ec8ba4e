use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_handler, current_analysis_handler, download_notes_handler, export_handler,
    get_notes_handler, health_handler, put_notes_handler, reset_session_handler, session_handler,
    upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes());

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/analysis",
            post(analyze_handler).get(current_analysis_handler),
        )
        .route(
            "/api/v1/analysis/upload",
            post(upload_handler).layer(upload_limit),
        )
        .route(
            "/api/v1/session",
            get(session_handler).delete(reset_session_handler),
        )
        .route("/api/v1/export", post(export_handler))
        .route(
            "/api/v1/notes",
            get(get_notes_handler).put(put_notes_handler),
        )
        .route("/api/v1/notes/download", get(download_notes_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
