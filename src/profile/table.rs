//! The profile table
//!
//! Axis names refer to axes defined in the input-manager configuration; they
//! diverge per platform because each OS driver reports the right stick,
//! d-pad and triggers on different physical axis indices. Button codes are
//! joystick-button indices, which follow the HID button order of each driver.

use super::{AxisPair, ButtonCodes, Platform, Profile};
use crate::normalize::TriggerEncoding;

const LEFT_STICK: AxisPair = AxisPair {
    horizontal: "XJoyL",
    vertical: "YJoyL",
};

const WINDOWS: Profile = Profile {
    platform: Platform::Windows,
    left_stick: LEFT_STICK,
    right_stick: AxisPair {
        horizontal: "XJoyRWin",
        vertical: "YJoyRWin",
    },
    dpad: Some(AxisPair {
        horizontal: "XJoyDWin",
        vertical: "YJoyDWin",
    }),
    left_trigger: "TriggerLWin",
    right_trigger: "TriggerRWin",
    trigger_encoding: TriggerEncoding::UnitRange,
    buttons: ButtonCodes {
        bottom: 0,
        right: 1,
        left: 2,
        top: 3,
        left_bumper: 4,
        right_bumper: 5,
        select: 6,
        start: 7,
        left_stick_click: 8,
        right_stick_click: 9,
    },
};

// Start and select sit next to the stick clicks here, unlike on the other
// platforms. Kept as reported by the driver until verified on hardware.
const MACOS: Profile = Profile {
    platform: Platform::MacOs,
    left_stick: LEFT_STICK,
    right_stick: AxisPair {
        horizontal: "XJoyRMac",
        vertical: "YJoyRMac",
    },
    dpad: None,
    left_trigger: "TriggerLMac",
    right_trigger: "TriggerRMac",
    trigger_encoding: TriggerEncoding::SignedUnit,
    buttons: ButtonCodes {
        bottom: 16,
        right: 17,
        left: 18,
        top: 19,
        left_bumper: 13,
        right_bumper: 14,
        select: 10,
        start: 9,
        left_stick_click: 11,
        right_stick_click: 12,
    },
};

// The d-pad axes only exist for wired controllers.
const LINUX: Profile = Profile {
    platform: Platform::Linux,
    left_stick: LEFT_STICK,
    right_stick: AxisPair {
        horizontal: "XJoyRWin",
        vertical: "YJoyRWin",
    },
    dpad: Some(AxisPair {
        horizontal: "XJoyDLin",
        vertical: "YJoyDLin",
    }),
    left_trigger: "TriggerLLin",
    right_trigger: "TriggerRLin",
    trigger_encoding: TriggerEncoding::UnitRange,
    buttons: ButtonCodes {
        bottom: 0,
        right: 1,
        left: 2,
        top: 3,
        left_bumper: 4,
        right_bumper: 5,
        select: 6,
        start: 7,
        left_stick_click: 9,
        right_stick_click: 10,
    },
};

/// Every supported platform's profile, indexed by [`Platform::index`]
pub static PROFILES: [Profile; 3] = [WINDOWS, MACOS, LINUX];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::LogicalButton;

    #[test]
    fn windows_codes_follow_xinput_order() {
        let codes: Vec<u32> = LogicalButton::ALL
            .iter()
            .map(|b| WINDOWS.button_code(*b))
            .collect();
        assert_eq!(codes, (0..10).collect::<Vec<u32>>());
    }

    #[test]
    fn macos_start_and_select_are_preserved() {
        assert_eq!(MACOS.button_code(LogicalButton::Start), 9);
        assert_eq!(MACOS.button_code(LogicalButton::Select), 10);
    }

    #[test]
    fn linux_shares_right_stick_with_windows() {
        assert_eq!(LINUX.right_stick, WINDOWS.right_stick);
        assert_ne!(LINUX.dpad, WINDOWS.dpad);
    }

    #[test]
    fn only_macos_needs_trigger_correction() {
        assert_eq!(WINDOWS.trigger_encoding, TriggerEncoding::UnitRange);
        assert_eq!(LINUX.trigger_encoding, TriggerEncoding::UnitRange);
        assert_eq!(MACOS.trigger_encoding, TriggerEncoding::SignedUnit);
    }
}
