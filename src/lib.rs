//! EOR Simulator: waterflood proxy model
//!
//! Forecasts oil production from water injection rate and sweep efficiency
//! with an affine proxy, and derives the indicators a reservoir engineer
//! reads off the dashboard.
//!
//! ## Architecture
//!
//! - **Proxy Model**: predictor, forecast series and derived indicators
//! - **Simulator**: one render cycle from control state to report
//! - **Insight**: template narrative for the operating point
//! - **API**: axum HTTP surface over the simulator

pub mod api;
pub mod config;
pub mod insight;
pub mod proxy_model;
pub mod simulation;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, ModelParams, ModelPreset, ProxyConfig};

// Re-export commonly used types
pub use types::{
    ChartData, ForecastPoint, ForecastSeries, Indicators, InputError, PredictionResult,
    SimulationInput, StrategyRating,
};

pub use proxy_model::{build_series, predict, strategy_rating, voidage_ratio, ForecastError};
pub use simulation::{SimulationReport, Simulator};
