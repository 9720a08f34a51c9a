//! Drive intent derived from the directional control zones.
//!
//! The four zones map onto two tri-state axes. A press always takes the
//! axis; a release only returns the axis to neutral if the released zone is
//! the one currently driving it, so a stale release cannot clobber a newer
//! press on the opposing zone.

use serde::Serialize;

/// One of the four directional control zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Forward,
    Backward,
    Left,
    Right,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Forward, Zone::Backward, Zone::Left, Zone::Right];

    /// Slot of this zone in per-zone arrays, in `ALL` order.
    pub fn index(self) -> usize {
        match self {
            Zone::Forward => 0,
            Zone::Backward => 1,
            Zone::Left => 2,
            Zone::Right => 3,
        }
    }

    /// Label shown on the control pad.
    pub fn label(self) -> &'static str {
        match self {
            Zone::Forward => "↑ F",
            Zone::Backward => "↓ B",
            Zone::Left => "← L",
            Zone::Right => "→ R",
        }
    }
}

/// A press or release edge on one zone, independent of the input modality
/// (pointer, touch point set, keyboard) that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub zone: Zone,
    pub pressed: bool,
}

/// Desired motion intent. Both axes are always exactly -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriveIntent {
    /// 1 forward, -1 backward, 0 stop.
    pub throttle: i8,
    /// -1 left, 1 right, 0 straight.
    pub steering: i8,
}

impl DriveIntent {
    /// Applies one press/release edge and reports whether the intent changed.
    ///
    /// A reported change is what triggers an immediate command push on top
    /// of the periodic cadence.
    pub fn apply(&mut self, input: PointerInput) -> bool {
        let before = *self;
        match (input.zone, input.pressed) {
            (Zone::Forward, true) => self.throttle = 1,
            (Zone::Forward, false) if self.throttle == 1 => self.throttle = 0,
            (Zone::Backward, true) => self.throttle = -1,
            (Zone::Backward, false) if self.throttle == -1 => self.throttle = 0,
            (Zone::Left, true) => self.steering = -1,
            (Zone::Left, false) if self.steering == -1 => self.steering = 0,
            (Zone::Right, true) => self.steering = 1,
            (Zone::Right, false) if self.steering == 1 => self.steering = 0,
            _ => {}
        }
        *self != before
    }

    /// Whether the given zone currently drives its axis (pad highlight).
    pub fn is_active(&self, zone: Zone) -> bool {
        match zone {
            Zone::Forward => self.throttle == 1,
            Zone::Backward => self.throttle == -1,
            Zone::Left => self.steering == -1,
            Zone::Right => self.steering == 1,
        }
    }

    /// JSON payload for the device's `PUT /command` endpoint.
    pub fn to_payload(&self) -> CommandPayload {
        CommandPayload {
            throttle: self.throttle,
            steering: self.steering,
        }
    }
}

/// Wire format of the `/command` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandPayload {
    pub throttle: i8,
    pub steering: i8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(zone: Zone) -> PointerInput {
        PointerInput { zone, pressed: true }
    }

    fn release(zone: Zone) -> PointerInput {
        PointerInput { zone, pressed: false }
    }

    #[test]
    fn press_and_release_drive_a_single_axis() {
        let mut intent = DriveIntent::default();
        assert!(intent.apply(press(Zone::Forward)));
        assert_eq!(intent.throttle, 1);
        assert_eq!(intent.steering, 0);
        assert!(intent.apply(release(Zone::Forward)));
        assert_eq!(intent.throttle, 0);
    }

    #[test]
    fn axes_stay_tri_state_for_arbitrary_sequences() {
        let script = [
            press(Zone::Forward),
            press(Zone::Forward),
            release(Zone::Backward),
            press(Zone::Backward),
            release(Zone::Forward),
            release(Zone::Backward),
            press(Zone::Left),
            press(Zone::Right),
            release(Zone::Left),
            release(Zone::Right),
        ];
        let mut intent = DriveIntent::default();
        for input in script {
            intent.apply(input);
            assert!([-1, 0, 1].contains(&intent.throttle));
            assert!([-1, 0, 1].contains(&intent.steering));
        }
    }

    #[test]
    fn stale_release_does_not_clobber_newer_press() {
        let mut intent = DriveIntent::default();
        intent.apply(press(Zone::Backward));
        intent.apply(press(Zone::Forward));
        assert_eq!(intent.throttle, 1);
        // releasing a zone that no longer drives the axis is a no-op
        assert!(!intent.apply(release(Zone::Backward)));
        assert_eq!(intent.throttle, 1);
    }

    #[test]
    fn one_change_per_net_transition() {
        let mut intent = DriveIntent::default();
        assert!(intent.apply(press(Zone::Forward)));
        assert!(!intent.apply(press(Zone::Forward)));
        assert!(intent.apply(release(Zone::Forward)));
        assert!(!intent.apply(release(Zone::Forward)));
    }

    #[test]
    fn steering_mirrors_throttle_rules() {
        let mut intent = DriveIntent::default();
        intent.apply(press(Zone::Left));
        assert_eq!(intent.steering, -1);
        intent.apply(press(Zone::Right));
        assert_eq!(intent.steering, 1);
        assert!(!intent.apply(release(Zone::Left)));
        assert_eq!(intent.steering, 1);
        assert!(intent.apply(release(Zone::Right)));
        assert_eq!(intent.steering, 0);
    }

    #[test]
    fn command_payload_matches_device_wire_format() {
        let intent = DriveIntent { throttle: 1, steering: -1 };
        let json = serde_json::to_value(intent.to_payload()).unwrap();
        assert_eq!(json, serde_json::json!({ "Throttle": 1, "Steering": -1 }));
    }
}
