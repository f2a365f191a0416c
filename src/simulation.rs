//! Simulator: one render cycle from control state to display-ready report
//!
//! `SimulationInput` -> prediction -> forecast series -> indicators ->
//! insight. Every cycle is independent; the simulator holds only
//! read-only configuration.

use serde::Serialize;
use tracing::debug;

use crate::config::{ForecastConfig, ModelParams, ModelPreset, ProxyConfig};
use crate::insight::{self, Insight};
use crate::proxy_model::{build_series, indicators, predict_point, ForecastError};
use crate::types::{ChartData, ForecastSeries, Indicators, PredictionResult, SimulationInput};

pub const X_AXIS_TITLE: &str = "Water Injection Rate (BWPD)";
pub const Y_AXIS_TITLE: &str = "Predicted Oil Production (BOPD)";

/// Everything derived from one operating point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub preset: ModelPreset,
    pub input: SimulationInput,
    pub prediction: PredictionResult,
    pub indicators: Indicators,
    pub chart: ChartData,
    pub insight: Insight,
}

/// A forecast curve row for tabular export.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeriesRow {
    pub injection_rate_bwpd: f64,
    pub oil_rate_bopd: f64,
}

impl SimulationReport {
    /// Forecast curve as rows, in injection order.
    pub fn series_rows(&self) -> Vec<SeriesRow> {
        self.chart
            .curve_x
            .iter()
            .zip(&self.chart.curve_y)
            .map(|(&x, &y)| SeriesRow {
                injection_rate_bwpd: x,
                oil_rate_bopd: y,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Simulator {
    preset: ModelPreset,
    field_name: String,
    params: ModelParams,
    forecast: ForecastConfig,
}

impl Simulator {
    pub fn new(preset: ModelPreset, field_name: impl Into<String>, params: ModelParams, forecast: ForecastConfig) -> Self {
        Self {
            preset,
            field_name: field_name.into(),
            params,
            forecast,
        }
    }

    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::new(
            config.preset,
            config.field.name.clone(),
            config.model.clone(),
            config.forecast.clone(),
        )
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Forecast curve for a sweep efficiency over the configured domain.
    pub fn forecast(&self, sweep_efficiency: f64) -> Result<ForecastSeries, ForecastError> {
        build_series(
            &self.params,
            sweep_efficiency,
            self.forecast.domain_max_bwpd,
            self.forecast.sample_count,
        )
    }

    /// Run one cycle for an operating point.
    pub fn run(&self, input: &SimulationInput) -> Result<SimulationReport, ForecastError> {
        let prediction = predict_point(&self.params, input);
        let series = self.forecast(input.sweep_efficiency())?;
        let indicators = indicators::compute(&self.params, input, &prediction);
        let insight = insight::generate(&self.field_name, input, &indicators);

        debug!(
            preset = %self.preset,
            injection_bwpd = input.injection_rate_bwpd(),
            sweep_efficiency = input.sweep_efficiency(),
            lag_days = input.lag_days(),
            predicted_oil_bopd = prediction.predicted_oil_rate_bopd,
            voidage_ratio = indicators.voidage_ratio,
            rating = %indicators.strategy_rating,
            "Simulation cycle complete"
        );

        let chart = ChartData {
            curve_x: series.xs(),
            curve_y: series.ys(),
            operating_point: [input.injection_rate_bwpd(), prediction.predicted_oil_rate_bopd],
            x_axis_title: X_AXIS_TITLE.to_string(),
            y_axis_title: Y_AXIS_TITLE.to_string(),
        };

        Ok(SimulationReport {
            preset: self.preset,
            input: *input,
            prediction,
            indicators,
            chart,
            insight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy_model::predict;
    use crate::types::StrategyRating;

    #[test]
    fn test_default_cycle() {
        let config = ProxyConfig::default();
        let sim = Simulator::from_config(&config);
        let input = config.controls.default_input().unwrap();
        let report = sim.run(&input).unwrap();

        assert_eq!(report.preset, ModelPreset::Volve);
        assert_eq!(report.prediction.predicted_oil_rate_bopd, 4800.0);
        assert_eq!(report.indicators.voidage_ratio, 2.08);
        assert_eq!(report.indicators.strategy_rating, StrategyRating::Favorable);
        assert_eq!(report.chart.curve_x.len(), 100);
        assert_eq!(report.chart.curve_y.len(), 100);
        assert_eq!(report.chart.operating_point, [10_000.0, 4800.0]);
        assert_eq!(report.chart.x_axis_title, X_AXIS_TITLE);
    }

    #[test]
    fn test_operating_point_lies_on_curve_law() {
        let config = ProxyConfig::for_preset(ModelPreset::HighBase);
        let sim = Simulator::from_config(&config);
        let input = config.controls.input(12_500.0, 35.0, 60).unwrap();
        let report = sim.run(&input).unwrap();

        let [x, y] = report.chart.operating_point;
        assert_eq!(y, predict(sim.params(), x, input.sweep_efficiency()));
        assert_eq!(report.preset, ModelPreset::HighBase);
    }

    #[test]
    fn test_lag_does_not_change_prediction() {
        let config = ProxyConfig::default();
        let sim = Simulator::from_config(&config);
        let a = sim.run(&config.controls.input(10_000.0, 20.0, 15).unwrap()).unwrap();
        let b = sim.run(&config.controls.input(10_000.0, 20.0, 90).unwrap()).unwrap();
        assert_eq!(a.prediction, b.prediction);
        assert_eq!(a.chart, b.chart);
        assert_ne!(a.insight.lag_analysis, b.insight.lag_analysis);
    }

    #[test]
    fn test_bad_sample_count_is_error() {
        let mut forecast = ForecastConfig::default();
        forecast.sample_count = 1;
        let sim = Simulator::new(ModelPreset::Volve, "Volve", ModelParams::default(), forecast);
        let input = SimulationInput::new(10_000.0, 0.2, 30).unwrap();
        assert_eq!(sim.run(&input), Err(ForecastError::TooFewSamples(1)));
    }

    #[test]
    fn test_series_rows() {
        let config = ProxyConfig::default();
        let report = Simulator::from_config(&config)
            .run(&config.controls.default_input().unwrap())
            .unwrap();
        let rows = report.series_rows();
        assert_eq!(rows.len(), 100);
        assert_eq!(rows[0].injection_rate_bwpd, 0.0);
        assert_eq!(rows[0].oil_rate_bopd, 2800.0);
        assert_eq!(rows[99].injection_rate_bwpd, 35_000.0);
    }
}
