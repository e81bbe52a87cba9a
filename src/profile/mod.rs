//! Platform profiles
//!
//! A [`Profile`] is the fixed table of raw identifiers one target platform
//! uses for every logical control: the input-manager axis names for sticks,
//! d-pad and triggers, the trigger encoding, and a joystick-button base code
//! for each of the ten logical buttons.
//!
//! # Architecture
//!
//! ```text
//! PROFILES[Platform] ──► PlatformProfile marker (compile time) ──► JoyInput<P, _>
//!        │
//!        └─ validate() once at startup
//! ```
//!
//! All platforms live in the single [`PROFILES`] table. Which one a build
//! uses is decided by the [`PlatformProfile`] marker type it instantiates the
//! query surface with; [`NativePlatform`] picks the marker for the compile
//! target. Profiles are never switched at runtime.

pub mod platform;
pub mod table;

use crate::addressing::BUTTONS_PER_PLAYER;
use crate::controls::{LogicalButton, Stick, TriggerSide};
use crate::normalize::TriggerEncoding;
use std::fmt::{self, Display};
use tracing::{debug, info};

pub use platform::{LinuxProfile, MacOsProfile, PlatformProfile, SupportsDPad, WindowsProfile};
#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub use platform::NativePlatform;
pub use table::PROFILES;

/// Target platforms with a controller profile
///
/// Windows covers desktop, Xbox and WSA builds, which share one input
/// configuration. Android has no profile at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::MacOs, Platform::Linux];

    /// Slot of this platform in [`PROFILES`]
    pub const fn index(self) -> usize {
        match self {
            Platform::Windows => 0,
            Platform::MacOs => 1,
            Platform::Linux => 2,
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows/Xbox/WSA"),
            Platform::MacOs => write!(f, "macOS"),
            Platform::Linux => write!(f, "Linux"),
        }
    }
}

/// Horizontal and vertical input-manager axis names of one 2-D control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPair {
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

/// Joystick-button base codes (player-independent) of the ten logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonCodes {
    pub bottom: u32,
    pub right: u32,
    pub left: u32,
    pub top: u32,
    pub left_bumper: u32,
    pub right_bumper: u32,
    pub select: u32,
    pub start: u32,
    pub left_stick_click: u32,
    pub right_stick_click: u32,
}

impl ButtonCodes {
    pub fn code(&self, button: LogicalButton) -> u32 {
        match button {
            LogicalButton::Bottom => self.bottom,
            LogicalButton::Right => self.right,
            LogicalButton::Left => self.left,
            LogicalButton::Top => self.top,
            LogicalButton::LeftBumper => self.left_bumper,
            LogicalButton::RightBumper => self.right_bumper,
            LogicalButton::Select => self.select,
            LogicalButton::Start => self.start,
            LogicalButton::LeftStickClick => self.left_stick_click,
            LogicalButton::RightStickClick => self.right_stick_click,
        }
    }
}

/// Raw identifiers of every logical control on one platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub platform: Platform,
    pub left_stick: AxisPair,
    pub right_stick: AxisPair,
    /// `None` where the platform driver does not expose the d-pad as axes
    pub dpad: Option<AxisPair>,
    pub left_trigger: &'static str,
    pub right_trigger: &'static str,
    pub trigger_encoding: TriggerEncoding,
    pub buttons: ButtonCodes,
}

/// Inconsistencies [`Profile::validate`] can find in the profile table
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile table slot for {expected} holds the {found} profile")]
    MisplacedProfile { expected: Platform, found: Platform },

    #[error("{platform} profile has an empty axis name for {control}")]
    MissingAxisName {
        platform: Platform,
        control: &'static str,
    },

    #[error("{platform} profile d-pad presence does not match platform support")]
    DPadMismatch { platform: Platform },

    #[error("{platform} profile maps {button} to code {code}, outside the per-player stride of {stride}")]
    CodeOutOfStride {
        platform: Platform,
        button: LogicalButton,
        code: u32,
        stride: u32,
    },

    #[error("{platform} profile maps {first} and {second} to the same code {code}")]
    DuplicateCode {
        platform: Platform,
        first: LogicalButton,
        second: LogicalButton,
        code: u32,
    },
}

impl Profile {
    /// The table entry for `platform`
    pub fn for_platform(platform: Platform) -> &'static Profile {
        &PROFILES[platform.index()]
    }

    pub fn stick(&self, stick: Stick) -> AxisPair {
        match stick {
            Stick::Left => self.left_stick,
            Stick::Right => self.right_stick,
        }
    }

    pub fn trigger(&self, side: TriggerSide) -> &'static str {
        match side {
            TriggerSide::Left => self.left_trigger,
            TriggerSide::Right => self.right_trigger,
        }
    }

    pub fn button_code(&self, button: LogicalButton) -> u32 {
        self.buttons.code(button)
    }

    /// Checks the profile for completeness and non-overlapping button codes.
    ///
    /// Every axis name must be present, the d-pad must be present exactly on
    /// platforms that support it, and all ten button codes must be distinct
    /// and below [`BUTTONS_PER_PLAYER`] so that per-player code ranges cannot
    /// overlap.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let platform = self.platform;

        let mut names = vec![
            ("left stick horizontal", self.left_stick.horizontal),
            ("left stick vertical", self.left_stick.vertical),
            ("right stick horizontal", self.right_stick.horizontal),
            ("right stick vertical", self.right_stick.vertical),
            ("left trigger", self.left_trigger),
            ("right trigger", self.right_trigger),
        ];
        if let Some(dpad) = self.dpad {
            names.push(("d-pad horizontal", dpad.horizontal));
            names.push(("d-pad vertical", dpad.vertical));
        }
        for (control, name) in names {
            if name.is_empty() {
                return Err(ProfileError::MissingAxisName { platform, control });
            }
        }

        if self.dpad.is_some() != platform::has_dpad(platform) {
            return Err(ProfileError::DPadMismatch { platform });
        }

        let mut seen: Vec<(LogicalButton, u32)> = Vec::with_capacity(LogicalButton::ALL.len());
        for button in LogicalButton::ALL {
            let code = self.button_code(button);
            if code >= BUTTONS_PER_PLAYER {
                return Err(ProfileError::CodeOutOfStride {
                    platform,
                    button,
                    code,
                    stride: BUTTONS_PER_PLAYER,
                });
            }
            if let Some((first, _)) = seen.iter().find(|(_, c)| *c == code) {
                return Err(ProfileError::DuplicateCode {
                    platform,
                    first: *first,
                    second: button,
                    code,
                });
            }
            seen.push((button, code));
        }

        debug!("{} profile validated", platform);
        Ok(())
    }
}

/// Validates every entry of the profile table and its key order
pub fn validate_all() -> Result<(), ProfileError> {
    for (expected, profile) in Platform::ALL.into_iter().zip(PROFILES.iter()) {
        if profile.platform != expected {
            return Err(ProfileError::MisplacedProfile {
                expected,
                found: profile.platform,
            });
        }
        profile.validate()?;
    }
    info!("Validated {} controller profiles", PROFILES.len());
    Ok(())
}
