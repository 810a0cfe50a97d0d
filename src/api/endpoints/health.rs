//! Liveness endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config;

#[derive(Serialize)]
pub struct RootResponse {
    pub status: String,
    pub model: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /` — service banner with the configured model name.
pub async fn root(State(ctx): State<ApiContext>) -> Json<RootResponse> {
    Json(RootResponse {
        status: format!("{} running", config::APP_NAME),
        model: ctx.model_name.to_string(),
    })
}

/// `GET /api/health` — connection check.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
