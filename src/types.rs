//! Shared data structures for the waterflood proxy pipeline
//!
//! Every value here is transient: it is built fresh from control state on
//! each simulation cycle and never mutated afterwards.
//! - `SimulationInput`: validated operating point (injection, sweep, lag)
//! - `PredictionResult`: proxy model output at the operating point
//! - `ForecastSeries`: proxy model evaluated over the injection domain
//! - `Indicators` / `ChartData`: display-ready derived values

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Input Errors
// ============================================================================

/// Rejection reasons for an operating point.
///
/// Out-of-domain values are rejected rather than clamped so that a bad
/// request never silently turns into a different forecast.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("Injection rate must be a finite, non-negative value (got {0})")]
    InvalidInjectionRate(f64),

    #[error("Sweep efficiency must be a fraction in [0, 1] (got {0})")]
    InvalidSweepEfficiency(f64),

    #[error("Injection rate {value} BWPD is outside the control range {min}-{max} BWPD")]
    InjectionOutOfRange { value: f64, min: f64, max: f64 },

    #[error("Sweep efficiency {value}% is outside the control range {min}-{max}%")]
    SweepOutOfRange { value: f64, min: f64, max: f64 },

    #[error("Lag time {value} days is not one of the allowed options {options:?}")]
    UnsupportedLag { value: u32, options: Vec<u32> },
}

// ============================================================================
// Simulation Input
// ============================================================================

/// One operating point selected by the user.
///
/// Fields are private so an instance always satisfies the model domain:
/// finite non-negative injection and a sweep fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationInput {
    injection_rate_bwpd: f64,
    sweep_efficiency: f64,
    lag_days: u32,
}

impl SimulationInput {
    /// Build an operating point, checking only the model domain.
    ///
    /// Control-range checks (slider bounds, lag options) live in
    /// [`crate::config::ControlConfig::input`].
    pub fn new(injection_rate_bwpd: f64, sweep_efficiency: f64, lag_days: u32) -> Result<Self, InputError> {
        if !injection_rate_bwpd.is_finite() || injection_rate_bwpd < 0.0 {
            return Err(InputError::InvalidInjectionRate(injection_rate_bwpd));
        }
        if !(0.0..=1.0).contains(&sweep_efficiency) {
            return Err(InputError::InvalidSweepEfficiency(sweep_efficiency));
        }
        Ok(Self {
            injection_rate_bwpd,
            sweep_efficiency,
            lag_days,
        })
    }

    /// Target water injection (BWPD)
    pub fn injection_rate_bwpd(&self) -> f64 {
        self.injection_rate_bwpd
    }

    /// Sweep efficiency as a fraction
    pub fn sweep_efficiency(&self) -> f64 {
        self.sweep_efficiency
    }

    /// Sweep efficiency as a percentage (display form)
    pub fn sweep_percent(&self) -> f64 {
        self.sweep_efficiency * 100.0
    }

    /// Assumed injection-to-response lag. Display only.
    pub fn lag_days(&self) -> u32 {
        self.lag_days
    }
}

// ============================================================================
// Model Outputs
// ============================================================================

/// Proxy model output at the operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted oil production (BOPD)
    pub predicted_oil_rate_bopd: f64,
}

/// A single sample on the forecast curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub injection_rate_bwpd: f64,
    pub oil_rate_bopd: f64,
}

/// Forecast curve: strictly increasing injection rates with their
/// predicted oil rates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Injection rates (x axis)
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.injection_rate_bwpd).collect()
    }

    /// Predicted oil rates (y axis)
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.oil_rate_bopd).collect()
    }

    pub fn first(&self) -> Option<&ForecastPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }
}

// ============================================================================
// Derived Indicators
// ============================================================================

/// Two-level classification of the effective injection (`rate * sweep`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrategyRating {
    /// Effective injection above the configured threshold
    Favorable,
    /// Effective injection at or below the threshold
    Unfavorable,
}

impl std::fmt::Display for StrategyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyRating::Favorable => write!(f, "Favorable"),
            StrategyRating::Unfavorable => write!(f, "Unfavorable"),
        }
    }
}

/// The four headline values shown for an operating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Target water injection (BWPD)
    pub target_injection_bwpd: f64,
    /// Predicted oil output, rounded to 1 decimal (BOPD)
    pub predicted_oil_bopd: f64,
    /// Voidage replacement ratio, rounded to 2 decimals (0 when undefined)
    pub voidage_ratio: f64,
    pub strategy_rating: StrategyRating,
    /// Configured label for `strategy_rating`
    pub strategy_label: String,
}

/// Chart payload for any plotting layer: the forecast curve and the
/// highlighted operating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub curve_x: Vec<f64>,
    pub curve_y: Vec<f64>,
    /// `[injection_rate_bwpd, oil_rate_bopd]`
    pub operating_point: [f64; 2],
    pub x_axis_title: String,
    pub y_axis_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_accepts_domain_edges() {
        assert!(SimulationInput::new(0.0, 0.0, 30).is_ok());
        assert!(SimulationInput::new(30_000.0, 1.0, 90).is_ok());
    }

    #[test]
    fn test_input_rejects_negative_injection() {
        let err = SimulationInput::new(-1.0, 0.2, 30).unwrap_err();
        assert_eq!(err, InputError::InvalidInjectionRate(-1.0));
    }

    #[test]
    fn test_input_rejects_nan() {
        assert!(SimulationInput::new(f64::NAN, 0.2, 30).is_err());
        assert!(SimulationInput::new(100.0, f64::NAN, 30).is_err());
    }

    #[test]
    fn test_input_rejects_sweep_above_one() {
        let err = SimulationInput::new(100.0, 1.5, 30).unwrap_err();
        assert!(matches!(err, InputError::InvalidSweepEfficiency(_)));
    }

    #[test]
    fn test_sweep_percent_conversion() {
        let input = SimulationInput::new(10_000.0, 0.2, 30).unwrap();
        assert!((input.sweep_percent() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_series_axes() {
        let series = ForecastSeries {
            points: vec![
                ForecastPoint { injection_rate_bwpd: 0.0, oil_rate_bopd: 2800.0 },
                ForecastPoint { injection_rate_bwpd: 10.0, oil_rate_bopd: 2802.0 },
            ],
        };
        assert_eq!(series.xs(), vec![0.0, 10.0]);
        assert_eq!(series.ys(), vec![2800.0, 2802.0]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_rating_serializes_snake_case() {
        let json = serde_json::to_string(&StrategyRating::Favorable).unwrap();
        assert_eq!(json, "\"favorable\"");
    }
}
