/**
 * Router Configuration
 *
 * This module combines the public and protected route partitions into the
 * final Axum router, then adds the outer layers: CORS (when a client origin
 * is configured), static file serving for a prebuilt frontend bundle, and a
 * JSON 404 fallback.
 */

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::Json,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::routes::api_routes::{protected_routes, public_routes};
use crate::server::config::Config;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router<()> {
    let router = public_routes()
        .merge(protected_routes(state.clone()))
        .nest_service("/static", ServeDir::new("public"))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "success": false, "message": "Not found" })),
            )
        });

    let router = match cors_layer(&state.config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

/// Cross-origin policy for the browser client.
///
/// Credentials (the session cookie) are allowed only for the single
/// configured origin; with no origin configured there is no cross-origin
/// access at all.
fn cors_layer(config: &Config) -> Option<CorsLayer> {
    let origin = config.client_origin.as_deref()?;
    let origin = match origin.parse::<HeaderValue>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("CLIENT_ORIGIN is not a valid header value, CORS disabled");
            return None;
        }
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
