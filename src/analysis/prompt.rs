//! Prompt construction for the Gemini calls.
//!
//! Each builder returns the complete prompt text; absent request
//! fields are rendered as `n/a` so the model never sees an empty
//! placeholder.

use std::fmt::Display;

use super::types::{AnalysisRequest, LegacyAutopsyRequest, LegacyRecoveryRequest};

/// Render an optional value for prompt interpolation.
fn opt<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "n/a".to_string(),
    }
}

/// Prompt for `/api/autopsy`: JSON-only, fixed schema, 12 events over
/// 36 months with exactly one root_cause entry.
pub fn build_autopsy_prompt(req: &AnalysisRequest) -> String {
    let business = req.business_or_default();
    let metrics = req.metrics_or_default();
    let top_risks = req.top_risks.join(", ");

    format!(
        r#"You are a senior CFO analyst.
Return ONLY valid JSON. No markdown, no code fences, no extra text.

JSON schema:
{{
  "narrative": "3-4 sentences",
  "triggerEvent": {{
    "date": "YYYY-MM",
    "description": "short description",
    "burnImpact": "e.g. +25% burn",
    "cashImpact": "e.g. -60 days runway",
    "monthsBeforeCollapse": 0
  }},
  "timeline": [
    {{
      "date": "YYYY-MM",
      "type": "normal|warning|critical|root_cause",
      "label": "short label",
      "score": 0,
      "description": "one sentence",
      "rootCause": false,
      "phase": "Year 1 - Healthy Growth",
      "burnImpact": "optional"
    }}
  ]
}}

Generate exactly 12 timeline events spanning 36 months, oldest first.
Include exactly one root_cause event and align triggerEvent with it.
Scores should rise toward the current failureScore.

Business name: {name}
Industry: {industry}
Location: {location}
Dataset period: {dataset_period}
Failure score: {failure_score}
Risk band: {risk_band}
Monthly revenue: {monthly_revenue}
Monthly burn: {monthly_burn}
Cash runway days: {cash_days}
Revenue growth %: {revenue_growth}
Burn rate ratio: {burn_rate_ratio}
Churn rate %: {churn_rate}
Gross margin: {gross_margin}
Top risks: {top_risks}
"#,
        name = opt(&business.name),
        industry = opt(&business.industry),
        location = opt(&business.location),
        dataset_period = opt(&business.dataset_period),
        failure_score = opt(&req.failure_score),
        risk_band = opt(&req.risk_band),
        monthly_revenue = opt(&req.monthly_revenue),
        monthly_burn = opt(&req.monthly_burn),
        cash_days = opt(&metrics.cash_days),
        revenue_growth = opt(&metrics.revenue_growth),
        burn_rate_ratio = opt(&metrics.burn_rate_ratio),
        churn_rate = opt(&metrics.churn_rate),
        gross_margin = opt(&metrics.gross_margin),
    )
}

/// Prompt for `/api/recovery-plan`: JSON array of exactly 5 actions.
pub fn build_recovery_prompt(req: &AnalysisRequest) -> String {
    let business = req.business_or_default();
    let metrics = req.metrics_or_default();
    let top_risks = req.top_risks.join(", ");

    format!(
        r#"You are a startup CFO.
Return ONLY a valid JSON array of exactly 5 objects. No other text. No markdown. No code fences.
Each object must have these exact keys:
  "priority": must be exactly "HIGH", "MEDIUM", or "LOW"
  "action": action title, maximum 8 words
  "impact": one sentence describing the expected business outcome
  "scoreImprovement": integer between 3 and 15

Business name: {name}
Industry: {industry}
Failure score: {failure_score}/100
Risk band: {risk_band}
Monthly revenue: {monthly_revenue}
Monthly burn: {monthly_burn}
Cash runway: {cash_days} days
Revenue growth: {revenue_growth}%
Burn rate ratio: {burn_rate_ratio}
Churn rate: {churn_rate}%
Gross margin: {gross_margin}
Top risks: {top_risks}

Return only the JSON array, nothing else."#,
        name = opt(&business.name),
        industry = opt(&business.industry),
        failure_score = opt(&req.failure_score),
        risk_band = opt(&req.risk_band),
        monthly_revenue = opt(&req.monthly_revenue),
        monthly_burn = opt(&req.monthly_burn),
        cash_days = opt(&metrics.cash_days),
        revenue_growth = opt(&metrics.revenue_growth),
        burn_rate_ratio = opt(&metrics.burn_rate_ratio),
        churn_rate = opt(&metrics.churn_rate),
        gross_margin = opt(&metrics.gross_margin),
    )
}

/// Prompt for legacy `/autopsy-plan`: exactly 3 plain-text sentences.
pub fn build_legacy_narrative_prompt(req: &LegacyAutopsyRequest) -> String {
    format!(
        r#"You are a senior CFO analyst.
Write exactly 3 sentences explaining this business failure trajectory.
Be specific. Use the numbers provided. Plain text only. No bullet points. No headers.

Business failure score: {failure_score}/100
Root cause event: {root_cause}
Burn rate increase: {burn_impact}
Cash runway remaining: {cash_days} days"#,
        failure_score = req.failure_score,
        root_cause = req.root_cause,
        burn_impact = req.burn_impact,
        cash_days = req.cash_days,
    )
}

/// Prompt for legacy `/recovery-plan`.
pub fn build_legacy_recovery_prompt(req: &LegacyRecoveryRequest) -> String {
    format!(
        r#"You are a startup CFO.
Return ONLY a valid JSON array of exactly 5 objects. No other text. No markdown. No code fences.
Each object must have these exact keys:
  "priority": must be exactly "HIGH", "MEDIUM", or "LOW"
  "action": action title, maximum 8 words
  "impact": one sentence describing the expected business outcome
  "scoreImprovement": integer between 3 and 15

Business failure score: {failure_score}/100
Cash runway: {cash_days} days
Top risks: {top_risks}

Return only the JSON array, nothing else."#,
        failure_score = req.failure_score,
        cash_days = req.cash_days,
        top_risks = req.top_risks.join(", "),
    )
}
