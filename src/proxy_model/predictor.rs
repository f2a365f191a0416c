//! Oil rate predictor

use crate::config::ModelParams;
use crate::types::{PredictionResult, SimulationInput};

/// Predict oil production for an injection rate and sweep efficiency.
///
/// `predicted = base_oil + injection_rate * sweep_efficiency`
///
/// Non-decreasing in `injection_rate` for any `sweep_efficiency >= 0`, and
/// in `sweep_efficiency` for any `injection_rate >= 0`. Arguments are not
/// clamped; [`SimulationInput`] rejects out-of-domain values upstream.
pub fn predict(params: &ModelParams, injection_rate_bwpd: f64, sweep_efficiency: f64) -> f64 {
    params.base_oil_bopd + injection_rate_bwpd * sweep_efficiency
}

/// Evaluate the predictor at a validated operating point.
pub fn predict_point(params: &ModelParams, input: &SimulationInput) -> PredictionResult {
    PredictionResult {
        predicted_oil_rate_bopd: predict(params, input.injection_rate_bwpd(), input.sweep_efficiency()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelPreset;

    #[test]
    fn test_reference_operating_point() {
        let params = ModelParams::for_preset(ModelPreset::Volve);
        assert_eq!(predict(&params, 10_000.0, 0.20), 4800.0);
    }

    #[test]
    fn test_high_base_operating_point() {
        let params = ModelParams::for_preset(ModelPreset::HighBase);
        assert_eq!(predict(&params, 10_000.0, 0.20), 5000.0);
    }

    #[test]
    fn test_zero_injection_returns_base() {
        let params = ModelParams::for_preset(ModelPreset::Volve);
        for e in [0.0, 0.05, 0.5, 1.0] {
            assert_eq!(predict(&params, 0.0, e), params.base_oil_bopd);
        }
    }

    #[test]
    fn test_predict_point_uses_input() {
        let params = ModelParams::for_preset(ModelPreset::Volve);
        let input = SimulationInput::new(25_000.0, 0.5, 60).unwrap();
        let result = predict_point(&params, &input);
        assert_eq!(result.predicted_oil_rate_bopd, 15_300.0);
    }
}
