//! Derived indicators: voidage replacement ratio and strategy rating

use super::predictor::predict_point;
use crate::config::ModelParams;
use crate::types::{Indicators, PredictionResult, SimulationInput, StrategyRating};

/// Reported voidage ratio when predicted production is not positive.
pub const VOIDAGE_FALLBACK: f64 = 0.0;

/// Round to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Injection over predicted production, rounded to 2 decimals.
///
/// Undefined when `predicted_oil_rate <= 0`; [`VOIDAGE_FALLBACK`] is
/// returned instead of dividing.
pub fn voidage_ratio(injection_rate_bwpd: f64, predicted_oil_rate_bopd: f64) -> f64 {
    if predicted_oil_rate_bopd > 0.0 {
        round_to(injection_rate_bwpd / predicted_oil_rate_bopd, 2)
    } else {
        VOIDAGE_FALLBACK
    }
}

/// Favorable when effective injection strictly exceeds `threshold`.
pub fn strategy_rating(injection_rate_bwpd: f64, sweep_efficiency: f64, threshold: f64) -> StrategyRating {
    if injection_rate_bwpd * sweep_efficiency > threshold {
        StrategyRating::Favorable
    } else {
        StrategyRating::Unfavorable
    }
}

/// Configured display label for a rating.
pub fn rating_label(params: &ModelParams, rating: StrategyRating) -> &str {
    match rating {
        StrategyRating::Favorable => &params.favorable_label,
        StrategyRating::Unfavorable => &params.unfavorable_label,
    }
}

/// Headline indicators for an operating point and its prediction.
pub fn compute(params: &ModelParams, input: &SimulationInput, prediction: &PredictionResult) -> Indicators {
    let rating = strategy_rating(
        input.injection_rate_bwpd(),
        input.sweep_efficiency(),
        params.rating_threshold,
    );
    Indicators {
        target_injection_bwpd: input.injection_rate_bwpd(),
        predicted_oil_bopd: round_to(prediction.predicted_oil_rate_bopd, 1),
        voidage_ratio: voidage_ratio(input.injection_rate_bwpd(), prediction.predicted_oil_rate_bopd),
        strategy_rating: rating,
        strategy_label: rating_label(params, rating).to_string(),
    }
}

/// Predict and compute indicators in one step.
pub fn for_input(params: &ModelParams, input: &SimulationInput) -> Indicators {
    compute(params, input, &predict_point(params, input))
}
