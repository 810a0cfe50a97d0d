//! Gemini HTTP client.
//!
//! One operation matters to the rest of the crate: send a prompt,
//! get text back. The `LlmGenerate` trait keeps the engine testable
//! without network access.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::AnalysisError;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default model. The flash tier is deliberate — pro is slower and the
/// prompts here do not need it.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Text-generation seam between the analysis engine and the model.
#[async_trait]
pub trait LlmGenerate: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;
}

/// Gemini generateContent client.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: GEMINI_API_BASE.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Override the API base URL. Used by tests that point the client
    /// at a local stub server.
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl LlmGenerate for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    AnalysisError::Timeout(self.timeout_secs)
                } else {
                    AnalysisError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.is_empty());

        text.ok_or(AnalysisError::EmptyResponse)
    }
}

/// Mock LLM for tests — returns a configurable response.
pub struct MockLlmClient {
    response: String,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl LlmGenerate for MockLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, AnalysisError> {
        Ok(self.response.clone())
    }
}

/// Mock LLM for tests — always fails with an upstream error.
pub struct FailingLlmClient;

#[async_trait]
impl LlmGenerate for FailingLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, AnalysisError> {
        Err(AnalysisError::Upstream {
            status: 503,
            body: "model overloaded".into(),
        })
    }
}
