//! API handlers for the simulator dashboard

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::config::{ModelPreset, ProxyConfig};
use crate::simulation::Simulator;

/// Shared state for API handlers. Read-only for the life of the server.
#[derive(Clone)]
pub struct DashboardState {
    pub config: Arc<ProxyConfig>,
    pub simulator: Arc<Simulator>,
}

impl DashboardState {
    pub fn new(config: ProxyConfig) -> Self {
        let simulator = Simulator::from_config(&config);
        Self {
            config: Arc::new(config),
            simulator: Arc::new(simulator),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub preset: ModelPreset,
}

/// GET /health
pub async fn health_check(State(state): State<DashboardState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        preset: state.config.preset,
    })
}

// ============================================================================
// Simulation
// ============================================================================

/// Control values for one cycle. Missing values take the control defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SimulateQuery {
    pub injection_bwpd: Option<f64>,
    pub sweep_percent: Option<f64>,
    pub lag_days: Option<u32>,
}

/// GET /api/v1/simulate
pub async fn get_simulate(
    State(state): State<DashboardState>,
    query: Result<Query<SimulateQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };

    let controls = &state.config.controls;
    let input = match controls.input(
        query.injection_bwpd.unwrap_or(controls.injection_default_bwpd),
        query.sweep_percent.unwrap_or(controls.sweep_percent_default),
        query.lag_days.unwrap_or(controls.lag_default_days),
    ) {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "Rejected simulation request");
            return ApiErrorResponse::bad_request(e.to_string());
        }
    };

    match state.simulator.run(&input) {
        Ok(report) => ApiResponse::ok(report),
        Err(e) => ApiErrorResponse::internal(e.to_string()),
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// GET /api/v1/controls
pub async fn get_controls(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(&state.config.controls)
}

/// GET /api/v1/config
pub async fn get_config(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(state.config.as_ref())
}
