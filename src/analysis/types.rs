use serde::{Deserialize, Serialize};

/// Business identity fields attached to an analysis request.
/// All fields are optional — callers send whatever they have.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessInfo {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub employees: Option<String>,
    pub founded: Option<String>,
    pub dataset_period: Option<String>,
}

/// Financial health metrics attached to an analysis request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsInfo {
    pub cash_days: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub burn_rate_ratio: Option<f64>,
    pub churn_rate: Option<f64>,
    pub gross_margin: Option<f64>,
}

/// Shared request body for the autopsy and recovery-plan endpoints.
/// Wire field names are camelCase to match the existing web client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRequest {
    pub failure_score: Option<i64>,
    pub risk_band: Option<String>,
    pub business: Option<BusinessInfo>,
    pub monthly_revenue: Option<f64>,
    pub monthly_burn: Option<f64>,
    pub metrics: Option<MetricsInfo>,
    pub top_risks: Vec<String>,
}

impl AnalysisRequest {
    /// Failure score with the caller's value clamped into 0..=100,
    /// defaulting to 60. A literal 0 also maps to the default —
    /// upstream never scores a business at exactly zero.
    pub fn failure_score_or_default(&self) -> i64 {
        self.failure_score
            .map(|s| s.clamp(0, 100))
            .filter(|s| *s != 0)
            .unwrap_or(60)
    }

    pub fn metrics_or_default(&self) -> MetricsInfo {
        self.metrics.clone().unwrap_or_default()
    }

    pub fn business_or_default(&self) -> BusinessInfo {
        self.business.clone().unwrap_or_default()
    }
}

/// Request body for the legacy `/autopsy-plan` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAutopsyRequest {
    pub failure_score: i64,
    pub root_cause: String,
    pub burn_impact: String,
    pub cash_days: i64,
}

/// Request body for the legacy `/recovery-plan` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRecoveryRequest {
    pub failure_score: i64,
    pub cash_days: i64,
    #[serde(default)]
    pub top_risks: Vec<String>,
}

/// Severity class of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Normal,
    Warning,
    Critical,
    RootCause,
}

/// One entry in the 36-month failure timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// `YYYY-MM`
    pub date: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub label: String,
    pub score: i64,
    pub description: String,
    pub root_cause: bool,
    pub phase: String,
    #[serde(default)]
    pub burn_impact: Option<String>,
}

/// The single decision that set the failure trajectory in motion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    /// `YYYY-MM`
    pub date: String,
    pub description: String,
    pub burn_impact: String,
    pub cash_impact: String,
    pub months_before_collapse: i64,
}

/// Full autopsy response: narrative + trigger + timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutopsyReport {
    pub narrative: String,
    pub trigger_event: TriggerEvent,
    pub timeline: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One recommended recovery action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryAction {
    pub priority: Priority,
    pub action: String,
    pub impact: String,
    pub score_improvement: i64,
}

/// Recovery-plan response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryPlan {
    pub actions: Vec<RecoveryAction>,
}

/// Legacy recovery-plan response body. `actions` carries the model's
/// parsed JSON verbatim rather than coercing it into typed actions;
/// older clients did their own shape checks.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyRecoveryPlan {
    pub actions: serde_json::Value,
}
