pub mod engine;
pub mod fallback;
pub mod gemini;
pub mod parser;
pub mod prompt;
pub mod types;

pub use engine::AnalysisEngine;
pub use gemini::{GeminiClient, LlmGenerate, DEFAULT_MODEL};
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Cannot reach Gemini at {0}")]
    Connection(String),

    #[error("Gemini request timed out after {0}s")]
    Timeout(u64),

    #[error("Gemini returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Gemini returned no text")]
    EmptyResponse,

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Model response missing field: {0}")]
    MissingField(&'static str),
}
