//! Template-based reservoir insight for a simulated operating point

use serde::{Deserialize, Serialize};

use crate::types::{Indicators, SimulationInput, StrategyRating};

/// Narrative sections shown beside the forecast chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub headline: String,
    pub analysis: String,
    pub lag_analysis: String,
    pub recommendation: String,
}

impl Insight {
    /// Plain-text form with one heading per section.
    pub fn to_text(&self) -> String {
        format!(
            "{}\n\nAnalysis Report:\n{}\n\nLag Time Analysis:\n{}\n\nRecommendation:\n{}\n",
            self.headline, self.analysis, self.lag_analysis, self.recommendation
        )
    }
}

/// Format a number with comma thousands separators: `10000.0` -> `10,000`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Build the insight for an operating point and its indicators.
pub fn generate(field_name: &str, input: &SimulationInput, indicators: &Indicators) -> Insight {
    let injection = format_thousands(input.injection_rate_bwpd(), 0);
    let oil = format_thousands(indicators.predicted_oil_bopd, 1);

    let analysis = match indicators.strategy_rating {
        StrategyRating::Favorable => format!(
            "Based on the current proxy model, injecting {injection} BWPD at {:.1}% sweep \
             efficiency is projected to raise production to {oil} BOPD through pressure \
             support and injector-producer connectivity.",
            input.sweep_percent()
        ),
        StrategyRating::Unfavorable => format!(
            "Based on the current proxy model, injecting {injection} BWPD at {:.1}% sweep \
             efficiency gives {oil} BOPD, close to the base rate. Effective injection is \
             too low for meaningful pressure support.",
            input.sweep_percent()
        ),
    };

    let lag_analysis = format!(
        "The system assumes a {}-day response lag based on historical {field_name} Field \
         pressure transients.",
        input.lag_days()
    );

    let recommendation = if indicators.predicted_oil_bopd > 0.0 {
        format!(
            "Maintain the current VRR of {:.2} to keep reservoir pressure stable and avoid \
             early water breakthrough.",
            indicators.voidage_ratio
        )
    } else {
        "VRR is undefined at zero predicted production. Review the base rate before \
         planning injection."
            .to_string()
    };

    Insight {
        headline: format!("Strategy rating: {}", indicators.strategy_label),
        analysis,
        lag_analysis,
        recommendation,
    }
}
