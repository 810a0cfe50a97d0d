//! Analysis orchestration: prompt → model → defensive parse, with the
//! deterministic fallback substituted whenever the model path fails.
//!
//! The two modern operations never return an error; the two legacy
//! operations keep the older contract and surface model failures to
//! the caller.

use std::sync::Arc;

use chrono::Utc;

use super::fallback::{
    fallback_autopsy, fallback_recovery_actions, legacy_fallback_recovery_actions,
};
use super::gemini::LlmGenerate;
use super::parser::{parse_autopsy_response, parse_recovery_response, strip_code_fences};
use super::prompt::{
    build_autopsy_prompt, build_legacy_narrative_prompt, build_legacy_recovery_prompt,
    build_recovery_prompt,
};
use super::types::{
    AnalysisRequest, AutopsyReport, LegacyAutopsyRequest, LegacyRecoveryPlan,
    LegacyRecoveryRequest, RecoveryAction, RecoveryPlan,
};
use super::AnalysisError;

/// Drives all four analysis operations over an injected LLM client.
pub struct AnalysisEngine {
    llm: Arc<dyn LlmGenerate>,
}

impl AnalysisEngine {
    pub fn new(llm: Arc<dyn LlmGenerate>) -> Self {
        Self { llm }
    }

    /// Failure autopsy. Model output that cannot be recovered as a
    /// complete report is replaced with the synthetic one.
    pub async fn autopsy(&self, req: &AnalysisRequest) -> AutopsyReport {
        let prompt = build_autopsy_prompt(req);

        match self.generate_and_parse_autopsy(&prompt).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error = %e, "autopsy model path failed, serving fallback");
                fallback_autopsy(
                    req.failure_score_or_default(),
                    &req.metrics_or_default(),
                    Utc::now().date_naive(),
                )
            }
        }
    }

    async fn generate_and_parse_autopsy(
        &self,
        prompt: &str,
    ) -> Result<AutopsyReport, AnalysisError> {
        let raw = self.llm.generate(prompt).await?;
        parse_autopsy_response(&raw)
    }

    /// Recovery plan. Any model or parse failure yields the canned
    /// five actions.
    pub async fn recovery_plan(&self, req: &AnalysisRequest) -> RecoveryPlan {
        let prompt = build_recovery_prompt(req);

        let actions = match self.generate_and_parse_recovery(&prompt).await {
            Ok(actions) => actions,
            Err(e) => {
                tracing::warn!(error = %e, "recovery model path failed, serving fallback");
                fallback_recovery_actions()
            }
        };
        RecoveryPlan { actions }
    }

    async fn generate_and_parse_recovery(
        &self,
        prompt: &str,
    ) -> Result<Vec<RecoveryAction>, AnalysisError> {
        let raw = self.llm.generate(prompt).await?;
        parse_recovery_response(&raw)
    }

    /// Legacy `/autopsy-plan`: plain-text narrative, model failures
    /// propagate.
    pub async fn legacy_narrative(
        &self,
        req: &LegacyAutopsyRequest,
    ) -> Result<String, AnalysisError> {
        let prompt = build_legacy_narrative_prompt(req);
        let raw = self.llm.generate(&prompt).await?;
        Ok(raw.trim().to_string())
    }

    /// Legacy `/recovery-plan`: whatever JSON the model produced is
    /// passed through verbatim. Unparseable output falls back to the
    /// legacy canned plan, but transport failures propagate.
    pub async fn legacy_recovery_plan(
        &self,
        req: &LegacyRecoveryRequest,
    ) -> Result<LegacyRecoveryPlan, AnalysisError> {
        let prompt = build_legacy_recovery_prompt(req);
        let raw = self.llm.generate(&prompt).await?;

        let text = strip_code_fences(&raw);
        let actions = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "legacy recovery output unparseable, serving fallback");
                serde_json::to_value(legacy_fallback_recovery_actions()).unwrap_or_default()
            }
        };
        Ok(LegacyRecoveryPlan { actions })
    }
}
