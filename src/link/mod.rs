//! Device link loops.
//!
//! Two independent tasks talk to the vehicle: `command_task` pushes the
//! drive intent on a fixed cadence (and immediately on every intent change),
//! `telemetry_task` polls device status on its own cadence. Each runs on its
//! own executor thread so a slow response on one channel never stalls the
//! other, and each stops when its cancellation signal fires.

pub mod command_task;
pub mod telemetry_task;

pub use command_task::command_task;
pub use telemetry_task::telemetry_task;

use crate::control::TelemetryReading;
use std::time::Duration;

/// Last observed device status.
///
/// Replaced wholesale on every poll result; an absent field marks a failed
/// request, distinct from a legitimate zero value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    /// Battery voltage [V].
    pub battery: Option<f32>,
    /// Operational state string as reported by the device.
    pub device_state: Option<String>,
    /// Round trip of the poll that produced this snapshot [ms].
    pub latency_ms: Option<u32>,
}

impl TelemetrySnapshot {
    pub fn from_reading(reading: TelemetryReading, rtt: Duration) -> Self {
        Self {
            battery: Some(reading.battery),
            device_state: Some(reading.state),
            latency_ms: Some(rtt.as_millis() as u32),
        }
    }

    /// Snapshot after a failed poll: all fields absent at once.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Refresh messages from the link tasks to the UI.
#[derive(Debug)]
pub enum LinkEvent {
    /// Round trip of the most recent command push, absent on failure.
    /// Reflects the command channel only, not telemetry.
    CommandLatency(Option<u32>),
    /// Result of the most recent telemetry poll.
    Telemetry(TelemetrySnapshot),
}
