//! Failure-autopsy endpoint.

use axum::extract::State;

use crate::analysis::{AnalysisRequest, AutopsyReport};
use crate::api::extract::Json;
use crate::api::types::ApiContext;

/// `POST /api/autopsy` — narrative + trigger event + 36-month
/// timeline. Never fails: a broken model path degrades to the
/// deterministic synthetic report.
pub async fn generate(
    State(ctx): State<ApiContext>,
    Json(req): Json<AnalysisRequest>,
) -> Json<AutopsyReport> {
    Json(ctx.engine.autopsy(&req).await)
}
