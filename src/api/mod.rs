//! REST API module using Axum
//!
//! Serves the simulator over HTTP. Every `/api/v1` response uses the
//! envelope in [`envelope`]; `/health` is a bare liveness probe.

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::DashboardState;

use axum::http::{header, Method};
use axum::response::Response;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use envelope::ApiErrorResponse;

/// Comma-separated list of origins allowed to call the API cross-origin.
pub const CORS_ORIGINS_ENV_VAR: &str = "EOR_CORS_ORIGINS";

async fn not_found() -> Response {
    ApiErrorResponse::not_found("No such endpoint")
}

/// Build a CORS layer that is restrictive by default (same-origin only).
fn build_cors_layer() -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var(CORS_ORIGINS_ENV_VAR) {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            layer.allow_origin(allowed)
        }
        Err(_) => layer,
    }
}

/// Create the complete application router.
pub fn create_app(state: DashboardState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::health_routes(state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer())
}
