//! Application configuration module.
//!
//! Manages the TOML config file holding API settings and the
//! theme preference.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, Theme};
pub use paths::resolve_config_path;
