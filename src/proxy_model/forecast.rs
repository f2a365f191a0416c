//! Forecast series builder
//!
//! Samples the predictor over `[0, domain_max]` to produce the curve drawn
//! behind the operating point.

use thiserror::Error;

use super::predictor::predict;
use crate::config::ModelParams;
use crate::types::{ForecastPoint, ForecastSeries};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Forecast needs at least 2 samples (got {0})")]
    TooFewSamples(usize),

    #[error("Forecast domain maximum must be finite and positive (got {0})")]
    InvalidDomain(f64),
}

/// `n` evenly spaced values from `start` to `stop`, both included.
///
/// The last value is exactly `stop` rather than the accumulated
/// `start + (n - 1) * step`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Evaluate the predictor at `sample_count` evenly spaced injection rates
/// from 0 to `domain_max_bwpd` inclusive.
///
/// The returned series has exactly `sample_count` points with strictly
/// increasing injection rates.
pub fn build_series(
    params: &ModelParams,
    sweep_efficiency: f64,
    domain_max_bwpd: f64,
    sample_count: usize,
) -> Result<ForecastSeries, ForecastError> {
    if sample_count < 2 {
        return Err(ForecastError::TooFewSamples(sample_count));
    }
    if !domain_max_bwpd.is_finite() || domain_max_bwpd <= 0.0 {
        return Err(ForecastError::InvalidDomain(domain_max_bwpd));
    }

    let points = linspace(0.0, domain_max_bwpd, sample_count)
        .into_iter()
        .map(|x| ForecastPoint {
            injection_rate_bwpd: x,
            oil_rate_bopd: predict(params, x, sweep_efficiency),
        })
        .collect();

    Ok(ForecastSeries { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelPreset;

    fn volve() -> ModelParams {
        ModelParams::for_preset(ModelPreset::Volve)
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(0.0, 35_000.0, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[99], 35_000.0);
    }

    #[test]
    fn test_linspace_small_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 10.0, 3), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_default_dashboard_curve() {
        let series = build_series(&volve(), 0.2, 35_000.0, 100).unwrap();
        assert_eq!(series.len(), 100);

        let first = series.first().unwrap();
        assert_eq!(first.injection_rate_bwpd, 0.0);
        assert_eq!(first.oil_rate_bopd, 2800.0);

        let last = series.last().unwrap();
        assert_eq!(last.injection_rate_bwpd, 35_000.0);
        assert!((last.oil_rate_bopd - 9800.0).abs() < 1e-9);
    }

    #[test]
    fn test_series_strictly_increasing_x() {
        let series = build_series(&volve(), 0.35, 12_345.0, 57).unwrap();
        assert!(series
            .points
            .windows(2)
            .all(|w| w[0].injection_rate_bwpd < w[1].injection_rate_bwpd));
    }

    #[test]
    fn test_series_follows_predictor() {
        let params = volve();
        let series = build_series(&params, 0.42, 30_000.0, 11).unwrap();
        for p in &series.points {
            assert_eq!(p.oil_rate_bopd, predict(&params, p.injection_rate_bwpd, 0.42));
        }
    }

    #[test]
    fn test_rejects_too_few_samples() {
        assert_eq!(
            build_series(&volve(), 0.2, 35_000.0, 1),
            Err(ForecastError::TooFewSamples(1))
        );
        assert_eq!(
            build_series(&volve(), 0.2, 35_000.0, 0),
            Err(ForecastError::TooFewSamples(0))
        );
    }

    #[test]
    fn test_rejects_bad_domain() {
        assert!(matches!(
            build_series(&volve(), 0.2, 0.0, 10),
            Err(ForecastError::InvalidDomain(_))
        ));
        assert!(matches!(
            build_series(&volve(), 0.2, f64::INFINITY, 10),
            Err(ForecastError::InvalidDomain(_))
        ));
    }
}
