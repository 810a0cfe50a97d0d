//! Recovery-plan endpoint.

use axum::extract::State;

use crate::analysis::{AnalysisRequest, RecoveryPlan};
use crate::api::extract::Json;
use crate::api::types::ApiContext;

/// `POST /api/recovery-plan` — five prioritized actions. Never fails:
/// a broken model path degrades to the canned plan.
pub async fn generate(
    State(ctx): State<ApiContext>,
    Json(req): Json<AnalysisRequest>,
) -> Json<RecoveryPlan> {
    Json(ctx.engine.recovery_plan(&req).await)
}
