//! Built-in default constants.
//!
//! Preset tables and control bounds, grouped by subsystem. Anything here
//! can be overridden from `eor_config.toml`.

// ============================================================================
// Proxy Model
// ============================================================================

/// Base oil production for Volve-like fields (BOPD).
pub const VOLVE_BASE_OIL_BOPD: f64 = 2800.0;

/// Effective-injection cutoff for the strategy rating (BWPD).
pub const VOLVE_RATING_THRESHOLD: f64 = 1000.0;

/// Base oil production of the high-base variant (BOPD).
pub const HIGH_BASE_OIL_BOPD: f64 = 3000.0;

/// Strategy rating cutoff of the high-base variant (BWPD).
pub const HIGH_BASE_RATING_THRESHOLD: f64 = 500.0;

/// Label shown when effective injection exceeds the threshold.
pub const FAVORABLE_LABEL: &str = "OPTIMAL";

/// Label shown otherwise.
pub const UNFAVORABLE_LABEL: &str = "STABLE";

// ============================================================================
// Controls
// ============================================================================

pub const INJECTION_MIN_BWPD: f64 = 0.0;
pub const INJECTION_MAX_BWPD: f64 = 30_000.0;
pub const INJECTION_DEFAULT_BWPD: f64 = 10_000.0;

pub const SWEEP_PERCENT_MIN: f64 = 5.0;
pub const SWEEP_PERCENT_MAX: f64 = 50.0;
pub const SWEEP_PERCENT_DEFAULT: f64 = 20.0;

/// Selectable injection-to-response lag times (days).
pub const LAG_OPTIONS_DAYS: [u32; 5] = [15, 30, 45, 60, 90];
pub const LAG_DEFAULT_DAYS: u32 = 30;

// ============================================================================
// Forecast
// ============================================================================

/// Upper end of the forecast curve (BWPD). Wider than the injection
/// control so the operating point never sits on the chart edge.
pub const FORECAST_DOMAIN_MAX_BWPD: f64 = 35_000.0;

/// Number of evenly spaced samples on the forecast curve.
pub const FORECAST_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Server
// ============================================================================

pub const SERVER_ADDR: &str = "0.0.0.0:8080";

/// Config file searched in the working directory when no path is given.
pub const LOCAL_CONFIG_FILE: &str = "eor_config.toml";
