//! Proxy Configuration Module
//!
//! Every model constant, control bound and forecast setting lives in one
//! TOML-backed table, [`ProxyConfig`], seeded from a [`ModelPreset`].
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `EOR_CONFIG` environment variable (path to TOML file)
//! 3. `eor_config.toml` in the current working directory
//! 4. Built-in preset defaults
//!
//! The loaded config is passed by value or behind an `Arc`; nothing reads
//! it from global state.
//!
//! ```ignore
//! let config = ProxyConfig::load(None, Some(ModelPreset::HighBase))?;
//! let input = config.controls.default_input()?;
//! ```

mod model_config;
pub mod defaults;
pub mod validation;

pub use model_config::*;
