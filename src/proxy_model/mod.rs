//! Proxy Model Module
//!
//! Deterministic waterflood calculations. All math here is a pure function
//! of its arguments: no I/O, no state, no failure beyond argument checks.
//!
//! - `predict()` - affine oil rate response to effective injection
//! - `build_series()` - the same law sampled over the injection domain
//! - `voidage_ratio()` / `strategy_rating()` - derived indicators

pub mod forecast;
pub mod indicators;
pub mod predictor;

pub use forecast::{build_series, linspace, ForecastError};
pub use indicators::{rating_label, round_to, strategy_rating, voidage_ratio, VOIDAGE_FALLBACK};
pub use predictor::{predict, predict_point};
