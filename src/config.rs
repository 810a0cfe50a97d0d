use crate::analysis::DEFAULT_MODEL;

/// Application-level constants
pub const APP_NAME: &str = "FailGuard AI API";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default CORS origin for the deployed web client.
const DEFAULT_ALLOWED_ORIGIN: &str = "https://failguard.vercel.app";

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "failguard_api=info,tower_http=info".to_string()
}

/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Absent key is not fatal — every model call will fail and the
    /// deterministic fallbacks serve the traffic.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_timeout_secs: 30,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }
}

impl AppConfig {
    /// Read configuration from environment variables, falling back to
    /// defaults (with a warning) on unset or unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("FAILGUARD_HOST").unwrap_or(defaults.host);
        let port = match std::env::var("FAILGUARD_PORT") {
            Ok(raw) => match raw.parse::<u16>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    tracing::warn!("Invalid FAILGUARD_PORT='{raw}', falling back to {}", defaults.port);
                    defaults.port
                }
            },
            Err(_) => defaults.port,
        };

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model);
        let gemini_timeout_secs = match std::env::var("GEMINI_TIMEOUT_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    tracing::warn!(
                        "Invalid GEMINI_TIMEOUT_SECS='{raw}', falling back to {}",
                        defaults.gemini_timeout_secs
                    );
                    defaults.gemini_timeout_secs
                }
            },
            Err(_) => defaults.gemini_timeout_secs,
        };

        let allowed_origins = match std::env::var("FAILGUARD_ALLOWED_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.allowed_origins,
        };

        Self {
            host,
            port,
            gemini_api_key,
            gemini_model,
            gemini_timeout_secs,
            allowed_origins,
        }
    }
}
