//! Control domain for the station: drive intent reconciliation, station
//! configuration and the device HTTP client.

pub mod client;
pub mod config;
pub mod intent;

pub use client::{DeviceClient, TelemetryReading};
pub use config::AppConfig;
pub use intent::{DriveIntent, PointerInput, Zone};
