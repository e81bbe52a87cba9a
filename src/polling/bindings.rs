//! Input-manager bindings
//!
//! Decides which physical gamepad input feeds each raw identifier of a
//! [`Profile`]. This is the job a game engine's input-manager configuration
//! normally does; here it is derived from the profile itself so the raw names
//! and codes the query surface resolves are exactly the ones that get filled.

use crate::addressing::{resolve_axis_name, resolve_button_code, PlayerIndex, ANY_PLAYER};
use crate::controls::LogicalButton;
use crate::normalize::TriggerEncoding;
use crate::polling::RawSnapshot;
use crate::profile::Profile;
use gilrs::{Axis, Button, Gamepad};

/// Read access to one gamepad's current state
pub trait GamepadState {
    fn axis(&self, axis: Axis) -> f32;

    /// Analog value of a button in `[0, 1]`, `0.0` if the pad lacks it
    fn button_value(&self, button: Button) -> f32;

    fn is_pressed(&self, button: Button) -> bool;
}

impl GamepadState for Gamepad<'_> {
    fn axis(&self, axis: Axis) -> f32 {
        self.value(axis)
    }

    fn button_value(&self, button: Button) -> f32 {
        self.button_data(button).map(|data| data.value()).unwrap_or(0.0)
    }

    fn is_pressed(&self, button: Button) -> bool {
        Gamepad::is_pressed(self, button)
    }
}

/// Where the value of a raw axis comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisSource {
    Stick(Axis),
    DPadHorizontal,
    DPadVertical,
    Trigger(Button),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBinding {
    pub base_name: &'static str,
    pub source: AxisSource,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonBinding {
    pub base_code: u32,
    pub button: Button,
}

/// Every axis and button binding of one profile
#[derive(Debug, Clone)]
pub struct InputBindings {
    pub axes: Vec<AxisBinding>,
    pub buttons: Vec<ButtonBinding>,
    pub trigger_encoding: TriggerEncoding,
}

/// Physical button behind each logical button
pub fn physical_button(button: LogicalButton) -> Button {
    match button {
        LogicalButton::Bottom => Button::South,
        LogicalButton::Right => Button::East,
        LogicalButton::Left => Button::West,
        LogicalButton::Top => Button::North,
        LogicalButton::LeftBumper => Button::LeftTrigger,
        LogicalButton::RightBumper => Button::RightTrigger,
        LogicalButton::Select => Button::Select,
        LogicalButton::Start => Button::Start,
        LogicalButton::LeftStickClick => Button::LeftThumb,
        LogicalButton::RightStickClick => Button::RightThumb,
    }
}

impl InputBindings {
    pub fn for_profile(profile: &Profile) -> Self {
        let mut axes = vec![
            AxisBinding {
                base_name: profile.left_stick.horizontal,
                source: AxisSource::Stick(Axis::LeftStickX),
            },
            AxisBinding {
                base_name: profile.left_stick.vertical,
                source: AxisSource::Stick(Axis::LeftStickY),
            },
            AxisBinding {
                base_name: profile.right_stick.horizontal,
                source: AxisSource::Stick(Axis::RightStickX),
            },
            AxisBinding {
                base_name: profile.right_stick.vertical,
                source: AxisSource::Stick(Axis::RightStickY),
            },
            AxisBinding {
                base_name: profile.left_trigger,
                source: AxisSource::Trigger(Button::LeftTrigger2),
            },
            AxisBinding {
                base_name: profile.right_trigger,
                source: AxisSource::Trigger(Button::RightTrigger2),
            },
        ];

        if let Some(dpad) = profile.dpad {
            axes.push(AxisBinding {
                base_name: dpad.horizontal,
                source: AxisSource::DPadHorizontal,
            });
            axes.push(AxisBinding {
                base_name: dpad.vertical,
                source: AxisSource::DPadVertical,
            });
        }

        let buttons = LogicalButton::ALL
            .iter()
            .map(|logical| ButtonBinding {
                base_code: profile.button_code(*logical),
                button: physical_button(*logical),
            })
            .collect();

        Self {
            axes,
            buttons,
            trigger_encoding: profile.trigger_encoding,
        }
    }

    /// Canonical value of an axis source; triggers in `[0, 1]`
    fn read_canonical<G: GamepadState + ?Sized>(source: AxisSource, pad: &G) -> f32 {
        match source {
            AxisSource::Stick(axis) => pad.axis(axis),
            AxisSource::Trigger(button) => pad.button_value(button),
            AxisSource::DPadHorizontal => {
                let axis = pad.axis(Axis::DPadX);
                if axis != 0.0 {
                    axis
                } else {
                    button_axis(pad, Button::DPadLeft, Button::DPadRight)
                }
            }
            AxisSource::DPadVertical => {
                let axis = pad.axis(Axis::DPadY);
                if axis != 0.0 {
                    axis
                } else {
                    button_axis(pad, Button::DPadDown, Button::DPadUp)
                }
            }
        }
    }

    /// Builds the snapshot of one cycle from the pads occupying player slots.
    ///
    /// Slot [`ANY_PLAYER`] is filled with the aggregate of all pads: the
    /// strongest deflection per axis, the furthest-pulled trigger, and any
    /// pad holding a button.
    pub fn capture<G: GamepadState>(&self, cycle: u64, pads: &[(PlayerIndex, G)]) -> RawSnapshot {
        let mut snapshot = RawSnapshot::new(cycle);

        for binding in &self.axes {
            let mut aggregate = 0.0_f32;
            for (player, pad) in pads {
                let value = Self::read_canonical(binding.source, pad);
                if value.abs() > aggregate.abs() {
                    aggregate = value;
                }
                snapshot.set_axis(
                    resolve_axis_name(binding.base_name, *player),
                    self.encode_for(binding.source, value),
                );
            }
            snapshot.set_axis(
                resolve_axis_name(binding.base_name, ANY_PLAYER),
                self.encode_for(binding.source, aggregate),
            );
        }

        for binding in &self.buttons {
            for (player, pad) in pads {
                if pad.is_pressed(binding.button) {
                    snapshot.press(resolve_button_code(binding.base_code, *player));
                    snapshot.press(resolve_button_code(binding.base_code, ANY_PLAYER));
                }
            }
        }

        snapshot
    }

    fn encode_for(&self, source: AxisSource, value: f32) -> f32 {
        match source {
            AxisSource::Trigger(_) => self.trigger_encoding.encode(value),
            _ => value,
        }
    }
}

fn button_axis<G: GamepadState + ?Sized>(pad: &G, negative: Button, positive: Button) -> f32 {
    let mut value = 0.0;
    if pad.is_pressed(negative) {
        value -= 1.0;
    }
    if pad.is_pressed(positive) {
        value += 1.0;
    }
    value
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::profile::Platform;
    use std::collections::{HashMap, HashSet};

    /// Scripted gamepad state
    #[derive(Debug, Default)]
    pub(crate) struct FakePad {
        pub axes: HashMap<Axis, f32>,
        pub values: HashMap<Button, f32>,
        pub pressed: HashSet<Button>,
    }

    impl FakePad {
        pub fn with_axis(mut self, axis: Axis, value: f32) -> Self {
            self.axes.insert(axis, value);
            self
        }

        pub fn with_trigger(mut self, button: Button, value: f32) -> Self {
            self.values.insert(button, value);
            self
        }

        pub fn with_pressed(mut self, button: Button) -> Self {
            self.pressed.insert(button);
            self
        }
    }

    impl GamepadState for FakePad {
        fn axis(&self, axis: Axis) -> f32 {
            self.axes.get(&axis).copied().unwrap_or(0.0)
        }

        fn button_value(&self, button: Button) -> f32 {
            self.values.get(&button).copied().unwrap_or(0.0)
        }

        fn is_pressed(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }
    }

    #[test]
    fn macos_binds_no_dpad() {
        let bindings = InputBindings::for_profile(Profile::for_platform(Platform::MacOs));
        assert_eq!(bindings.axes.len(), 6);
        assert_eq!(bindings.buttons.len(), 10);
    }

    #[test]
    fn player_axes_and_codes_are_addressed() {
        let bindings = InputBindings::for_profile(Profile::for_platform(Platform::Windows));
        let pad = FakePad::default()
            .with_axis(Axis::LeftStickX, 0.75)
            .with_pressed(Button::South);

        let snapshot = bindings.capture(1, &[(2, pad)]);

        assert_eq!(snapshot.axis("XJoyL2"), Some(0.75));
        assert_eq!(snapshot.axis("XJoyL0"), Some(0.75));
        assert!(snapshot.is_held(40));
        assert!(snapshot.is_held(0));
        assert!(!snapshot.is_held(20));
    }

    #[test]
    fn aggregate_keeps_strongest_deflection() {
        let bindings = InputBindings::for_profile(Profile::for_platform(Platform::Linux));
        let first = FakePad::default().with_axis(Axis::RightStickY, 0.2);
        let second = FakePad::default().with_axis(Axis::RightStickY, -0.9);

        let snapshot = bindings.capture(1, &[(1, first), (2, second)]);

        assert_eq!(snapshot.axis("YJoyRWin1"), Some(0.2));
        assert_eq!(snapshot.axis("YJoyRWin2"), Some(-0.9));
        assert_eq!(snapshot.axis("YJoyRWin0"), Some(-0.9));
    }

    #[test]
    fn macos_triggers_are_written_signed() {
        let bindings = InputBindings::for_profile(Profile::for_platform(Platform::MacOs));
        let pad = FakePad::default().with_trigger(Button::RightTrigger2, 0.5);

        let snapshot = bindings.capture(1, &[(1, pad)]);

        assert_eq!(snapshot.axis("TriggerRMac1"), Some(0.0));
        assert_eq!(snapshot.axis("TriggerLMac1"), Some(-1.0));
        assert_eq!(snapshot.axis("TriggerRMac0"), Some(0.0));
    }

    #[test]
    fn no_pads_still_fill_aggregate_slot() {
        let bindings = InputBindings::for_profile(Profile::for_platform(Platform::MacOs));
        let snapshot = bindings.capture::<FakePad>(1, &[]);

        assert_eq!(snapshot.axis("XJoyL0"), Some(0.0));
        assert_eq!(snapshot.axis("TriggerLMac0"), Some(-1.0));
        assert_eq!(snapshot.held_count(), 0);
    }

    #[test]
    fn dpad_falls_back_to_buttons() {
        let bindings = InputBindings::for_profile(Profile::for_platform(Platform::Windows));
        let pad = FakePad::default()
            .with_pressed(Button::DPadLeft)
            .with_pressed(Button::DPadUp);

        let snapshot = bindings.capture(1, &[(1, pad)]);

        assert_eq!(snapshot.axis("XJoyDWin1"), Some(-1.0));
        assert_eq!(snapshot.axis("YJoyDWin1"), Some(1.0));
    }

    #[test]
    fn dpad_prefers_hat_axis() {
        let bindings = InputBindings::for_profile(Profile::for_platform(Platform::Linux));
        let pad = FakePad::default()
            .with_axis(Axis::DPadX, 1.0)
            .with_pressed(Button::DPadLeft);

        let snapshot = bindings.capture(1, &[(1, pad)]);

        assert_eq!(snapshot.axis("XJoyDLin1"), Some(1.0));
        assert_eq!(snapshot.axis("XJoyDLin0"), Some(1.0));
    }
}
