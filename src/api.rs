use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::codec::snapshot_from_value;
use crate::constants::events;
use crate::engine::SentimentEngine;
use crate::error::TrackerError;
use crate::sample::sample_snapshot_today;

pub struct AppState {
    pub engine: SentimentEngine,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sample", get(get_sample))
        .route("/annotate", post(annotate_snapshot))
        .with_state(state)
}

pub async fn run_server(state: Arc<AppState>, bind_addr: &str) -> Result<(), TrackerError> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| TrackerError::io(bind_addr, e))?;
    info!("API Server listening on {}", bind_addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| TrackerError::Server(e.to_string()))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn get_sample(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.engine.annotate(&sample_snapshot_today()))
}

/// Extractor rejections (bad JSON, wrong content type) and shape errors both
/// come back as `{"error": ...}` rather than axum's plain-text rejection.
pub async fn annotate_snapshot(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(event = events::SNAPSHOT_REJECTED, error = %rejection.body_text(), "rejected request body");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    match snapshot_from_value(body) {
        Ok(snapshot) => (StatusCode::OK, Json(state.engine.annotate(&snapshot))).into_response(),
        Err(e) => {
            warn!(event = events::SNAPSHOT_REJECTED, error = %e, "rejected snapshot");
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}
