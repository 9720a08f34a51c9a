//! Pure derivation of the status tiles from current state.
//!
//! Recomputed on every frame; no tile keeps state of its own.

/// One rendered status tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub label: &'static str,
    pub text: String,
    pub ok: bool,
}

/// Device state tile: ok whenever the device reported any state at all.
pub fn status_tile(device_state: Option<&str>) -> Tile {
    match device_state {
        Some(state) => Tile {
            label: "Status:",
            text: state.to_string(),
            ok: true,
        },
        None => Tile {
            label: "Status:",
            text: "Error".to_string(),
            ok: false,
        },
    }
}

/// Battery tile: ok while the reported voltage is above the limit.
pub fn battery_tile(battery: Option<f32>, limit: f32) -> Tile {
    match battery {
        Some(volts) if volts > limit => Tile {
            label: "Battery:",
            text: format!("{volts:.2} V"),
            ok: true,
        },
        _ => Tile {
            label: "Battery:",
            text: "Error".to_string(),
            ok: false,
        },
    }
}

/// Connection tile: ok while the command round trip stays under the limit.
/// Reflects the command channel only, not the telemetry channel.
pub fn connect_tile(latency_ms: Option<u32>, max_ping_ms: u32) -> Tile {
    match latency_ms {
        Some(ms) if ms < max_ping_ms => Tile {
            label: "Connect.:",
            text: format!("{ms} ms"),
            ok: true,
        },
        _ => Tile {
            label: "Connect.:",
            text: "Error".to_string(),
            ok: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tile_shows_raw_state_or_error() {
        let ok = status_tile(Some("Driving"));
        assert!(ok.ok);
        assert_eq!(ok.text, "Driving");

        let error = status_tile(None);
        assert!(!error.ok);
        assert_eq!(error.text, "Error");
    }

    #[test]
    fn battery_tile_errors_at_or_below_limit() {
        let ok = battery_tile(Some(3.9), 3.8);
        assert!(ok.ok);
        assert_eq!(ok.text, "3.90 V");

        assert!(!battery_tile(Some(3.8), 3.8).ok);
        // a legitimate zero reading is still below the limit
        assert!(!battery_tile(Some(0.0), 3.8).ok);
        assert!(!battery_tile(None, 3.8).ok);
        assert_eq!(battery_tile(None, 3.8).text, "Error");
    }

    #[test]
    fn connect_tile_errors_at_or_above_max_ping() {
        let ok = connect_tile(Some(150), 200);
        assert!(ok.ok);
        assert_eq!(ok.text, "150 ms");

        assert!(!connect_tile(Some(200), 200).ok);
        assert!(!connect_tile(None, 200).ok);
        assert_eq!(connect_tile(None, 200).text, "Error");

        // zero latency is a valid reading, not an absent one
        let zero = connect_tile(Some(0), 200);
        assert!(zero.ok);
        assert_eq!(zero.text, "0 ms");
    }
}
