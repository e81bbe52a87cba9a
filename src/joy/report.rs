//! Per-player cycle report
//!
//! Collects everything the query surface knows about one player slot in a
//! single struct, for logging and for change detection between cycles.

use super::JoyInput;
use crate::addressing::PlayerIndex;
use crate::controls::LogicalButton;
use crate::normalize::StickVector;
use crate::polling::PollingService;
use crate::profile::PlatformProfile;

// Tolerance for analog changes considered noise
const ANALOG_TOLERANCE: f32 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerReport {
    pub player: PlayerIndex,
    pub left_stick: StickVector,
    pub right_stick: StickVector,
    /// `None` on platforms without d-pad axes
    pub dpad: Option<StickVector>,
    pub left_trigger: f32,
    pub right_trigger: f32,
    pub held: Vec<LogicalButton>,
    pub pressed: Vec<LogicalButton>,
    pub released: Vec<LogicalButton>,
}

impl PlayerReport {
    pub fn capture<P: PlatformProfile, S: PollingService>(
        joy: &JoyInput<P, S>,
        player: PlayerIndex,
    ) -> Self {
        let buttons_where = |query: fn(&JoyInput<P, S>, LogicalButton, PlayerIndex) -> bool| {
            LogicalButton::ALL
                .iter()
                .copied()
                .filter(|button| query(joy, *button, player))
                .collect::<Vec<_>>()
        };

        Self {
            player,
            left_stick: joy.left_thumbstick(player),
            right_stick: joy.right_thumbstick(player),
            dpad: joy.dpad_if_present(player),
            left_trigger: joy.left_trigger(player),
            right_trigger: joy.right_trigger(player),
            held: buttons_where(JoyInput::<P, S>::held),
            pressed: buttons_where(JoyInput::<P, S>::pressed_this_cycle),
            released: buttons_where(JoyInput::<P, S>::released_this_cycle),
        }
    }

    /// Whether any input differs from rest: sticks centered, triggers
    /// released, no button held or changing.
    pub fn is_active(&self) -> bool {
        let moved = |v: &StickVector| v.x.abs() > ANALOG_TOLERANCE || v.y.abs() > ANALOG_TOLERANCE;

        moved(&self.left_stick)
            || moved(&self.right_stick)
            || self.dpad.as_ref().is_some_and(moved)
            || self.left_trigger > ANALOG_TOLERANCE
            || self.right_trigger > ANALOG_TOLERANCE
            || !self.held.is_empty()
            || !self.pressed.is_empty()
            || !self.released.is_empty()
    }

    /// Whether this report differs noticeably from `previous`
    pub fn has_significant_changes(&self, previous: &PlayerReport) -> bool {
        let stick_changed = |a: &StickVector, b: &StickVector| {
            (a.x - b.x).abs() > ANALOG_TOLERANCE || (a.y - b.y).abs() > ANALOG_TOLERANCE
        };

        let dpad_changed = match (&self.dpad, &previous.dpad) {
            (Some(a), Some(b)) => stick_changed(a, b),
            (None, None) => false,
            _ => true,
        };

        stick_changed(&self.left_stick, &previous.left_stick)
            || stick_changed(&self.right_stick, &previous.right_stick)
            || dpad_changed
            || (self.left_trigger - previous.left_trigger).abs() > ANALOG_TOLERANCE
            || (self.right_trigger - previous.right_trigger).abs() > ANALOG_TOLERANCE
            || self.held != previous.held
            || !self.pressed.is_empty()
            || !self.released.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polling::{RawSnapshot, SnapshotTracker};
    use crate::profile::{MacOsProfile, WindowsProfile};

    #[test]
    fn capture_collects_all_controls() {
        let mut tracker = SnapshotTracker::new();
        let mut snapshot = RawSnapshot::new(1);
        snapshot.set_axis("XJoyL1", 0.5);
        snapshot.set_axis("YJoyDWin1", -1.0);
        snapshot.set_axis("TriggerRWin1", 0.7);
        snapshot.press(20); // bottom, player 1
        snapshot.press(27); // start, player 1
        tracker.advance(snapshot);

        let joy = JoyInput::<WindowsProfile, _>::new(&tracker).unwrap();
        let report = PlayerReport::capture(&joy, 1);

        assert_eq!(report.left_stick, StickVector::new(0.5, 0.0));
        assert_eq!(report.dpad, Some(StickVector::new(0.0, -1.0)));
        assert_eq!(report.right_trigger, 0.7);
        assert_eq!(report.held, vec![LogicalButton::Bottom, LogicalButton::Start]);
        assert_eq!(report.pressed, report.held);
        assert!(report.released.is_empty());
        assert!(report.is_active());
    }

    #[test]
    fn macos_report_has_no_dpad_and_rests_at_zero() {
        let mut tracker = SnapshotTracker::new();
        let mut snapshot = RawSnapshot::new(1);
        snapshot.set_axis("TriggerLMac1", -1.0);
        snapshot.set_axis("TriggerRMac1", -1.0);
        tracker.advance(snapshot);

        let joy = JoyInput::<MacOsProfile, _>::new(&tracker).unwrap();
        let report = PlayerReport::capture(&joy, 1);

        assert_eq!(report.dpad, None);
        assert_eq!(report.left_trigger, 0.0);
        assert!(!report.is_active());
    }

    #[test]
    fn small_analog_noise_is_not_a_change() {
        let tracker = SnapshotTracker::new();
        let joy = JoyInput::<WindowsProfile, _>::new(&tracker).unwrap();
        let previous = PlayerReport::capture(&joy, 2);

        let mut current = previous.clone();
        current.left_stick.x = 0.03;
        assert!(!current.has_significant_changes(&previous));

        current.right_trigger = 0.4;
        assert!(current.has_significant_changes(&previous));
    }

    #[test]
    fn button_edges_are_changes() {
        let tracker = SnapshotTracker::new();
        let joy = JoyInput::<WindowsProfile, _>::new(&tracker).unwrap();
        let previous = PlayerReport::capture(&joy, 1);

        let mut current = previous.clone();
        current.released.push(LogicalButton::Top);
        assert!(current.has_significant_changes(&previous));
    }
}
