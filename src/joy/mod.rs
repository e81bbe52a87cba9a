//! Controller query surface
//!
//! [`JoyInput`] answers "what is player N doing with control X" for one
//! platform profile `P`, reading raw values from a polling service `S`.
//! Every call resolves the raw identifier fresh, queries the service once per
//! axis or button, and normalizes the result. Nothing is cached.
//!
//! Player `0` reads the aggregate of all controllers, `1..=4` a single one.
//!
//! # Examples
//!
//! ```rust
//! use joyinput::joy::JoyInput;
//! use joyinput::polling::{RawSnapshot, SnapshotTracker};
//! use joyinput::profile::MacOsProfile;
//!
//! let mut tracker = SnapshotTracker::new();
//! let mut snapshot = RawSnapshot::new(1);
//! snapshot.set_axis("TriggerRMac1", 0.0);
//! tracker.advance(snapshot);
//!
//! let joy = JoyInput::<MacOsProfile, _>::new(&tracker)?;
//! assert_eq!(joy.right_trigger(1), 0.5);
//! # Ok::<(), joyinput::profile::ProfileError>(())
//! ```
//!
//! # D-pad
//!
//! The d-pad queries exist only for platforms that report the d-pad as axes.
//!
//! ```rust
//! use joyinput::joy::JoyInput;
//! use joyinput::polling::{RawSnapshot, SnapshotTracker};
//! use joyinput::profile::LinuxProfile;
//!
//! let mut tracker = SnapshotTracker::new();
//! let mut snapshot = RawSnapshot::new(1);
//! snapshot.set_axis("XJoyDLin1", -1.0);
//! tracker.advance(snapshot);
//!
//! let joy = JoyInput::<LinuxProfile, _>::new(&tracker)?;
//! assert_eq!(joy.dpad(1).x, -1.0);
//! assert_eq!(joy.dpad_x(1), -1.0);
//! # Ok::<(), joyinput::profile::ProfileError>(())
//! ```
//!
//! On macOS they do not compile:
//!
//! ```compile_fail
//! use joyinput::joy::JoyInput;
//! use joyinput::polling::SnapshotTracker;
//! use joyinput::profile::MacOsProfile;
//!
//! let tracker = SnapshotTracker::new();
//! let joy = JoyInput::<MacOsProfile, _>::new(&tracker)?;
//! let _ = joy.dpad(1);
//! # Ok::<(), joyinput::profile::ProfileError>(())
//! ```
//!
//! ```compile_fail
//! use joyinput::joy::JoyInput;
//! use joyinput::polling::SnapshotTracker;
//! use joyinput::profile::MacOsProfile;
//!
//! let tracker = SnapshotTracker::new();
//! let joy = JoyInput::<MacOsProfile, _>::new(&tracker)?;
//! let _ = joy.dpad_x(1);
//! # Ok::<(), joyinput::profile::ProfileError>(())
//! ```

pub mod report;

use crate::addressing::{resolve_axis_name, resolve_button_code, PlayerIndex};
use crate::controls::{LogicalButton, Stick, TriggerSide};
use crate::normalize::StickVector;
use crate::polling::PollingService;
use crate::profile::{AxisPair, PlatformProfile, ProfileError, SupportsDPad};
use std::marker::PhantomData;
use tracing::debug;

pub use report::PlayerReport;

/// Canonical controller queries for platform `P` over polling service `S`
#[derive(Debug)]
pub struct JoyInput<P: PlatformProfile, S: PollingService> {
    service: S,
    _platform: PhantomData<P>,
}

/// Generates the held/pressed/released trio for one logical button.
macro_rules! button_queries {
    ($($button:ident => $held:ident, $down:ident, $up:ident;)*) => {
        $(
            #[doc = concat!("Whether `", stringify!($button), "` is held by `player`")]
            pub fn $held(&self, player: PlayerIndex) -> bool {
                self.held(LogicalButton::$button, player)
            }

            #[doc = concat!("Whether `", stringify!($button), "` went down this cycle")]
            pub fn $down(&self, player: PlayerIndex) -> bool {
                self.pressed_this_cycle(LogicalButton::$button, player)
            }

            #[doc = concat!("Whether `", stringify!($button), "` went up this cycle")]
            pub fn $up(&self, player: PlayerIndex) -> bool {
                self.released_this_cycle(LogicalButton::$button, player)
            }
        )*
    };
}

impl<P: PlatformProfile, S: PollingService> JoyInput<P, S> {
    /// Validates the platform profile and wraps the polling service.
    pub fn new(service: S) -> Result<Self, ProfileError> {
        let profile = P::profile();
        profile.validate()?;
        debug!("Query surface bound to the {} profile", profile.platform);
        Ok(Self {
            service,
            _platform: PhantomData,
        })
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn into_inner(self) -> S {
        self.service
    }

    fn read_pair(&self, pair: AxisPair, player: PlayerIndex) -> StickVector {
        StickVector::new(
            self.service
                .sample_axis(&resolve_axis_name(pair.horizontal, player)),
            self.service
                .sample_axis(&resolve_axis_name(pair.vertical, player)),
        )
    }

    fn raw_code(&self, button: LogicalButton, player: PlayerIndex) -> u32 {
        resolve_button_code(P::profile().button_code(button), player)
    }

    // Sticks

    /// Raw stick position, components in `[-1, 1]`
    pub fn thumbstick(&self, stick: Stick, player: PlayerIndex) -> StickVector {
        self.read_pair(P::profile().stick(stick), player)
    }

    pub fn left_thumbstick(&self, player: PlayerIndex) -> StickVector {
        self.thumbstick(Stick::Left, player)
    }

    pub fn right_thumbstick(&self, player: PlayerIndex) -> StickVector {
        self.thumbstick(Stick::Right, player)
    }

    // Triggers

    /// Trigger pull in `[0, 1]` on every platform
    pub fn trigger(&self, side: TriggerSide, player: PlayerIndex) -> f32 {
        let profile = P::profile();
        let raw = self
            .service
            .sample_axis(&resolve_axis_name(profile.trigger(side), player));
        profile.trigger_encoding.normalize(raw)
    }

    pub fn left_trigger(&self, player: PlayerIndex) -> f32 {
        self.trigger(TriggerSide::Left, player)
    }

    pub fn right_trigger(&self, player: PlayerIndex) -> f32 {
        self.trigger(TriggerSide::Right, player)
    }

    // Buttons

    pub fn held(&self, button: LogicalButton, player: PlayerIndex) -> bool {
        self.service.key_held(self.raw_code(button, player))
    }

    pub fn pressed_this_cycle(&self, button: LogicalButton, player: PlayerIndex) -> bool {
        self.service
            .key_pressed_this_cycle(self.raw_code(button, player))
    }

    pub fn released_this_cycle(&self, button: LogicalButton, player: PlayerIndex) -> bool {
        self.service
            .key_released_this_cycle(self.raw_code(button, player))
    }

    button_queries! {
        Bottom => bottom_button, bottom_button_down, bottom_button_up;
        Right => right_button, right_button_down, right_button_up;
        Left => left_button, left_button_down, left_button_up;
        Top => top_button, top_button_down, top_button_up;
        LeftBumper => left_bumper, left_bumper_down, left_bumper_up;
        RightBumper => right_bumper, right_bumper_down, right_bumper_up;
        Select => select, select_down, select_up;
        Start => start, start_down, start_up;
        LeftStickClick => left_thumbstick_click, left_thumbstick_click_down, left_thumbstick_click_up;
        RightStickClick => right_thumbstick_click, right_thumbstick_click_down, right_thumbstick_click_up;
    }

    /// D-pad position where the profile has one, for callers generic over
    /// every platform.
    pub(crate) fn dpad_if_present(&self, player: PlayerIndex) -> Option<StickVector> {
        P::profile().dpad.map(|pair| self.read_pair(pair, player))
    }
}

/// D-pad queries, only for platforms that expose the d-pad as axes
impl<P: SupportsDPad, S: PollingService> JoyInput<P, S> {
    /// D-pad position, components in `[-1, 1]`
    pub fn dpad(&self, player: PlayerIndex) -> StickVector {
        self.dpad_if_present(player).unwrap_or_default()
    }

    pub fn dpad_x(&self, player: PlayerIndex) -> f32 {
        self.dpad(player).x
    }

    pub fn dpad_y(&self, player: PlayerIndex) -> f32 {
        self.dpad(player).y
    }
}
