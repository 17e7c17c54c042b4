//! Triage API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! CORS is permissive: the API binds to loopback and serves a local web
//! client during development.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::service::TriageService;

pub fn triage_router(service: Arc<TriageService>) -> Router {
    let ctx = ApiContext { service };
    Router::new()
        .route("/diagnosis/", get(endpoints::health::index))
        .route("/diagnosis/new", post(endpoints::diagnosis::new_case))
        .route("/diagnosis/follow-up", post(endpoints::diagnosis::follow_up))
        .with_state(ctx)
        .fallback(not_found)
        .layer(CorsLayer::permissive())
}

/// Unknown routes get a JSON body, matching the rest of the API.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "NOT_FOUND" })),
    )
}
