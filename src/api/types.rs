//! Shared state for the API layer.

use std::sync::Arc;

use crate::analysis::{AnalysisEngine, LlmGenerate};

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub engine: Arc<AnalysisEngine>,
    /// Model name reported by the root banner endpoint.
    pub model_name: Arc<str>,
}

impl ApiContext {
    pub fn new(llm: Arc<dyn LlmGenerate>, model_name: &str) -> Self {
        Self {
            engine: Arc::new(AnalysisEngine::new(llm)),
            model_name: Arc::from(model_name),
        }
    }
}
