//! API route definitions
//!
//! - /api/v1/simulate - run one simulation cycle
//! - /api/v1/controls - control bounds and defaults
//! - /api/v1/config - active proxy configuration
//! - /health - liveness probe

use axum::{routing::get, Router};

use super::handlers::{self, DashboardState};

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/simulate", get(handlers::get_simulate))
        .route("/controls", get(handlers::get_controls))
        .route("/config", get(handlers::get_config))
        .with_state(state)
}

/// Health endpoint at root level
pub fn health_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
