use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use failguard_api::analysis::GeminiClient;
use failguard_api::api::{api_router, ApiContext};
use failguard_api::config::{self, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cfg = AppConfig::from_env();

    if cfg.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set — every request will serve the deterministic fallback");
    }
    let gemini = GeminiClient::new(
        cfg.gemini_api_key.as_deref().unwrap_or_default(),
        &cfg.gemini_model,
        cfg.gemini_timeout_secs,
    );

    let ctx = ApiContext::new(Arc::new(gemini), &cfg.gemini_model);
    let app = api_router(ctx, &cfg.allowed_origins);

    let addr = format!("{}:{}", cfg.host, cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(model = %cfg.gemini_model, "Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install ctrl-c handler: {e}");
        return;
    }
    info!("Shutdown signal received");
}
