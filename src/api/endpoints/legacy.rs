//! Legacy endpoints kept for older clients.
//!
//! Unlike the `/api/` routes these surface model failures as a
//! generic 500 instead of degrading to a fallback.

use axum::extract::State;
use serde::Serialize;

use crate::analysis::{LegacyAutopsyRequest, LegacyRecoveryPlan, LegacyRecoveryRequest};
use crate::api::error::ApiError;
use crate::api::extract::Json;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct NarrativeResponse {
    pub narrative: String,
}

/// `POST /autopsy-plan` — plain-text three-sentence narrative.
pub async fn autopsy_plan(
    State(ctx): State<ApiContext>,
    Json(req): Json<LegacyAutopsyRequest>,
) -> Result<Json<NarrativeResponse>, ApiError> {
    let narrative = ctx.engine.legacy_narrative(&req).await?;
    Ok(Json(NarrativeResponse { narrative }))
}

/// `POST /recovery-plan` — legacy recovery plan. The model's parsed
/// JSON is passed through as-is; unparseable output still yields the
/// canned plan, and transport failures are a 500.
pub async fn recovery_plan(
    State(ctx): State<ApiContext>,
    Json(req): Json<LegacyRecoveryRequest>,
) -> Result<Json<LegacyRecoveryPlan>, ApiError> {
    let plan = ctx.engine.legacy_recovery_plan(&req).await?;
    Ok(Json(plan))
}
