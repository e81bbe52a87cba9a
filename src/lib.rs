//! Cross-platform gamepad queries
//!
//! Maps canonical controller queries (thumbsticks, triggers, d-pad, face
//! buttons) onto the raw axis names and button codes each platform's input
//! layer reports, for up to four players.

pub mod addressing;
pub mod config;
pub mod controls;
#[cfg(not(target_os = "android"))]
pub mod joy;
pub mod normalize;
pub mod polling;
pub mod profile;

pub use addressing::{PlayerIndex, ANY_PLAYER, MAX_PLAYERS};
pub use controls::{LogicalButton, Stick, TriggerSide};
#[cfg(not(target_os = "android"))]
pub use joy::{JoyInput, PlayerReport};
pub use normalize::StickVector;
pub use polling::{PollingService, RawSnapshot, SnapshotTracker};
pub use profile::{Platform, PlatformProfile, Profile, ProfileError};
