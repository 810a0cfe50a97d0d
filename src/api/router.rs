//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Analysis routes live under `/api/`; the two legacy routes
//! keep their original top-level paths.

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, CorsLayer};

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// CORS mirrors the web client's needs: configured origins, GET/POST,
/// any requested header, credentials allowed.
pub fn api_router(ctx: ApiContext, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(endpoints::health::root))
        .route("/api/health", get(endpoints::health::check))
        .route("/api/autopsy", post(endpoints::autopsy::generate))
        .route("/api/recovery-plan", post(endpoints::recovery::generate))
        .route("/autopsy-plan", post(endpoints::legacy::autopsy_plan))
        .route("/recovery-plan", post(endpoints::legacy::recovery_plan))
        .with_state(ctx)
        .layer(cors_layer(allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // mirror_request rather than Any: tower-http rejects the wildcard
    // when credentials are allowed.
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
