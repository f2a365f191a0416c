//! Proxy Configuration - the single table behind every model constant
//!
//! The two dashboard variants differed only in base oil rate, rating
//! threshold and copy text, so they are expressed as presets of one table
//! instead of forked logic. A TOML file picks a preset and overrides any
//! subset of its fields.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::types::{InputError, SimulationInput};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "EOR_CONFIG";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),

    #[error("Config parse error ({0}): {1}")]
    Parse(String, toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Presets
// ============================================================================

/// Starting table for a config.
///
/// Neither variant is canonical: `volve` is the default only because it is
/// the table the published dashboard used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelPreset {
    /// Base 2800 BOPD, rating cutoff 1000
    #[default]
    Volve,
    /// Base 3000 BOPD, rating cutoff 500
    HighBase,
}

impl std::fmt::Display for ModelPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelPreset::Volve => write!(f, "volve"),
            ModelPreset::HighBase => write!(f, "high-base"),
        }
    }
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with [`ProxyConfig::load`] which searches:
/// 1. an explicit path (`--config`)
/// 2. `$EOR_CONFIG`
/// 3. `./eor_config.toml`
/// 4. Built-in preset defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Preset the remaining sections were seeded from
    #[serde(default)]
    pub preset: ModelPreset,

    #[serde(default)]
    pub field: FieldInfo,

    #[serde(default)]
    pub model: ModelParams,

    #[serde(default)]
    pub controls: ControlConfig,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::for_preset(ModelPreset::default())
    }
}

impl ProxyConfig {
    /// Built-in table for a preset.
    pub fn for_preset(preset: ModelPreset) -> Self {
        Self {
            preset,
            field: FieldInfo::default(),
            model: ModelParams::for_preset(preset),
            controls: ControlConfig::default(),
            forecast: ForecastConfig::default(),
            server: ServerConfig::default(),
        }
    }

    /// Load configuration using the standard search order.
    ///
    /// An explicit path must load cleanly. Files discovered through
    /// `$EOR_CONFIG` or the working directory fall back to defaults with a
    /// warning.
    pub fn load(explicit: Option<&Path>, preset: Option<ModelPreset>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path, preset)?;
            info!(path = %path.display(), preset = %config.preset, "Loaded proxy config");
            return Ok(config);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p, preset) {
                    Ok(config) => {
                        info!(path = %p.display(), preset = %config.preset, "Loaded proxy config from {CONFIG_ENV_VAR}");
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local, preset) {
                Ok(config) => {
                    info!(preset = %config.preset, "Loaded proxy config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        let preset = preset.unwrap_or_default();
        info!(preset = %preset, "No config file found, using built-in preset");
        Ok(Self::for_preset(preset))
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path, preset: Option<ModelPreset>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&contents, &path.display().to_string(), preset)
    }

    /// Parse a TOML document.
    ///
    /// The document is layered over its preset table: keys it sets win,
    /// everything else keeps the preset value. A `preset` argument
    /// overrides the document's own `preset` key.
    pub fn from_toml_str(contents: &str, preset: Option<ModelPreset>) -> Result<Self, ConfigError> {
        Self::parse(contents, "<inline>", preset)
    }

    fn parse(contents: &str, origin: &str, preset: Option<ModelPreset>) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let overlay: toml::Value = contents
            .parse()
            .map_err(|e| ConfigError::Parse(origin.to_string(), e))?;

        let file_preset = match overlay.get("preset") {
            Some(v) => Some(
                v.clone()
                    .try_into::<ModelPreset>()
                    .map_err(|e| ConfigError::Parse(origin.to_string(), e))?,
            ),
            None => None,
        };
        let base_preset = preset.or(file_preset).unwrap_or_default();

        let mut merged = toml::Value::try_from(Self::for_preset(base_preset))?;
        merge_tables(&mut merged, overlay);

        let mut config: Self = merged
            .try_into()
            .map_err(|e| ConfigError::Parse(origin.to_string(), e))?;
        config.preset = base_preset;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check structural consistency and physical ranges.
    ///
    /// Suspicious-but-usable values are logged as warnings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.controls;
        let mut errors: Vec<String> = Vec::new();

        Self::check_bounds(
            c.injection_min_bwpd,
            c.injection_default_bwpd,
            c.injection_max_bwpd,
            "controls.injection",
            &mut errors,
        );
        Self::check_bounds(
            c.sweep_percent_min,
            c.sweep_percent_default,
            c.sweep_percent_max,
            "controls.sweep_percent",
            &mut errors,
        );

        if c.lag_options_days.is_empty() {
            errors.push("controls.lag_options_days must not be empty".to_string());
        } else if !c.lag_options_days.contains(&c.lag_default_days) {
            errors.push(format!(
                "controls.lag_default_days ({}) must be one of lag_options_days {:?}",
                c.lag_default_days, c.lag_options_days
            ));
        }

        if self.forecast.sample_count < 2 {
            errors.push(format!(
                "forecast.sample_count ({}) must be at least 2",
                self.forecast.sample_count
            ));
        }

        let (range_errors, warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_bounds(min: f64, default: f64, max: f64, name: &str, errors: &mut Vec<String>) {
        if !(min.is_finite() && default.is_finite() && max.is_finite()) {
            errors.push(format!(
                "{name}_min/_default/_max ({min}, {default}, {max}) must all be finite"
            ));
        } else if min >= max {
            errors.push(format!("{name}_min ({min}) must be less than {name}_max ({max})"));
        } else if default < min || default > max {
            errors.push(format!("{name}_default ({default}) must lie within [{min}, {max}]"));
        }
    }
}

/// Recursively overlay `overlay` onto `base`: tables merge key by key,
/// any other value replaces the base value.
fn merge_tables(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                let nested = value.is_table() && base_table.get(&key).is_some_and(toml::Value::is_table);
                match base_table.get_mut(&key) {
                    Some(existing) if nested => merge_tables(existing, value),
                    _ => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ============================================================================
// Field Info
// ============================================================================

/// Identification metadata. Only appears in logs and the insight text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    #[serde(default = "default_field_name")]
    pub name: String,
}

fn default_field_name() -> String {
    "Volve".to_string()
}

impl Default for FieldInfo {
    fn default() -> Self {
        Self {
            name: default_field_name(),
        }
    }
}

// ============================================================================
// Model Parameters
// ============================================================================

/// Constants of the affine proxy model and its rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Oil rate at zero injection (BOPD).
    #[serde(default = "default_base_oil")]
    pub base_oil_bopd: f64,

    /// Effective injection (`rate * sweep`) above which the strategy is
    /// rated favorable.
    #[serde(default = "default_rating_threshold")]
    pub rating_threshold: f64,

    #[serde(default = "default_favorable_label")]
    pub favorable_label: String,

    #[serde(default = "default_unfavorable_label")]
    pub unfavorable_label: String,
}

fn default_base_oil() -> f64 { defaults::VOLVE_BASE_OIL_BOPD }
fn default_rating_threshold() -> f64 { defaults::VOLVE_RATING_THRESHOLD }
fn default_favorable_label() -> String { defaults::FAVORABLE_LABEL.to_string() }
fn default_unfavorable_label() -> String { defaults::UNFAVORABLE_LABEL.to_string() }

impl Default for ModelParams {
    fn default() -> Self {
        Self::for_preset(ModelPreset::default())
    }
}

impl ModelParams {
    pub fn for_preset(preset: ModelPreset) -> Self {
        let (base_oil_bopd, rating_threshold) = match preset {
            ModelPreset::Volve => (default_base_oil(), default_rating_threshold()),
            ModelPreset::HighBase => (defaults::HIGH_BASE_OIL_BOPD, defaults::HIGH_BASE_RATING_THRESHOLD),
        };
        Self {
            base_oil_bopd,
            rating_threshold,
            favorable_label: default_favorable_label(),
            unfavorable_label: default_unfavorable_label(),
        }
    }
}

// ============================================================================
// Controls
// ============================================================================

/// Bounds and defaults of the input controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    #[serde(default = "default_injection_min")]
    pub injection_min_bwpd: f64,

    #[serde(default = "default_injection_max")]
    pub injection_max_bwpd: f64,

    #[serde(default = "default_injection_default")]
    pub injection_default_bwpd: f64,

    #[serde(default = "default_sweep_min")]
    pub sweep_percent_min: f64,

    #[serde(default = "default_sweep_max")]
    pub sweep_percent_max: f64,

    #[serde(default = "default_sweep_default")]
    pub sweep_percent_default: f64,

    #[serde(default = "default_lag_options")]
    pub lag_options_days: Vec<u32>,

    #[serde(default = "default_lag_default")]
    pub lag_default_days: u32,
}

fn default_injection_min() -> f64 { defaults::INJECTION_MIN_BWPD }
fn default_injection_max() -> f64 { defaults::INJECTION_MAX_BWPD }
fn default_injection_default() -> f64 { defaults::INJECTION_DEFAULT_BWPD }
fn default_sweep_min() -> f64 { defaults::SWEEP_PERCENT_MIN }
fn default_sweep_max() -> f64 { defaults::SWEEP_PERCENT_MAX }
fn default_sweep_default() -> f64 { defaults::SWEEP_PERCENT_DEFAULT }
fn default_lag_options() -> Vec<u32> { defaults::LAG_OPTIONS_DAYS.to_vec() }
fn default_lag_default() -> u32 { defaults::LAG_DEFAULT_DAYS }

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            injection_min_bwpd: default_injection_min(),
            injection_max_bwpd: default_injection_max(),
            injection_default_bwpd: default_injection_default(),
            sweep_percent_min: default_sweep_min(),
            sweep_percent_max: default_sweep_max(),
            sweep_percent_default: default_sweep_default(),
            lag_options_days: default_lag_options(),
            lag_default_days: default_lag_default(),
        }
    }
}

impl ControlConfig {
    /// Build a [`SimulationInput`] from raw control values.
    ///
    /// `sweep_percent` is a percentage and is converted to a fraction.
    pub fn input(&self, injection_bwpd: f64, sweep_percent: f64, lag_days: u32) -> Result<SimulationInput, InputError> {
        if !injection_bwpd.is_finite() {
            return Err(InputError::InvalidInjectionRate(injection_bwpd));
        }
        if injection_bwpd < self.injection_min_bwpd || injection_bwpd > self.injection_max_bwpd {
            return Err(InputError::InjectionOutOfRange {
                value: injection_bwpd,
                min: self.injection_min_bwpd,
                max: self.injection_max_bwpd,
            });
        }
        if !(self.sweep_percent_min..=self.sweep_percent_max).contains(&sweep_percent) {
            return Err(InputError::SweepOutOfRange {
                value: sweep_percent,
                min: self.sweep_percent_min,
                max: self.sweep_percent_max,
            });
        }
        if !self.lag_options_days.contains(&lag_days) {
            return Err(InputError::UnsupportedLag {
                value: lag_days,
                options: self.lag_options_days.clone(),
            });
        }
        SimulationInput::new(injection_bwpd, sweep_percent / 100.0, lag_days)
    }

    /// Operating point with every control at its default position.
    pub fn default_input(&self) -> Result<SimulationInput, InputError> {
        self.input(
            self.injection_default_bwpd,
            self.sweep_percent_default,
            self.lag_default_days,
        )
    }
}

// ============================================================================
// Forecast
// ============================================================================

/// Sampling of the forecast curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Upper end of the injection axis (BWPD).
    #[serde(default = "default_domain_max")]
    pub domain_max_bwpd: f64,

    /// Number of evenly spaced samples, endpoints included.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
}

fn default_domain_max() -> f64 { defaults::FORECAST_DOMAIN_MAX_BWPD }
fn default_sample_count() -> usize { defaults::FORECAST_SAMPLE_COUNT }

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            domain_max_bwpd: default_domain_max(),
            sample_count: default_sample_count(),
        }
    }
}

// ============================================================================
// Server Config
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `EOR_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
