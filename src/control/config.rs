//! Configuration loading for the control station.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Station configuration.
///
/// Every field has a default matching the vehicle's stock firmware, so
/// running without a config file targets an unmodified device access point.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AppConfig {
    /// Base URL of the device (without the /command or /telemetry suffix).
    pub device_url: String,
    /// Cadence of the command push loop [ms].
    pub command_interval_ms: u64,
    /// Cadence of the telemetry poll loop [ms].
    pub telemetry_interval_ms: u64,
    /// Per-request timeout of the HTTP client [ms].
    pub request_timeout_ms: u64,
    /// Round trips at or above this render as a connection error [ms].
    pub max_ping_ms: u32,
    /// Battery voltages at or below this render as a battery error [V].
    pub battery_limit: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device_url: "http://192.168.84.1".to_string(),
            command_interval_ms: 750,
            telemetry_interval_ms: 1500,
            request_timeout_ms: 5000,
            max_ping_ms: 200,
            battery_limit: 3.8,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file {}", config_path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config file {}", config_path.display()))
    }

    /// Load the given path, falling back to defaults when the file does not
    /// exist. A file that exists but does not parse is still an error.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load(config_path)
        } else {
            log::info!("no config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }
}
