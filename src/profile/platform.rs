//! Compile-time platform markers
//!
//! The query surface is generic over a marker type instead of branching on
//! the platform per call. Features a platform lacks are expressed as missing
//! trait impls, so using them is a build error rather than a runtime failure.

use super::{Platform, Profile};

/// Binds a marker type to one entry of the profile table
pub trait PlatformProfile {
    const PLATFORM: Platform;

    /// Whether the profile carries d-pad axes. `true` exactly for the
    /// markers implementing [`SupportsDPad`].
    const HAS_DPAD: bool;

    fn profile() -> &'static Profile {
        Profile::for_platform(Self::PLATFORM)
    }
}

/// Platforms whose driver exposes the d-pad as an axis pair
pub trait SupportsDPad: PlatformProfile {}

/// Whether the marker of `platform` has d-pad axes
pub fn has_dpad(platform: Platform) -> bool {
    match platform {
        Platform::Windows => WindowsProfile::HAS_DPAD,
        Platform::MacOs => MacOsProfile::HAS_DPAD,
        Platform::Linux => LinuxProfile::HAS_DPAD,
    }
}

/// Windows desktop, Xbox and WSA
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsProfile;

#[derive(Debug, Clone, Copy, Default)]
pub struct MacOsProfile;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxProfile;

impl PlatformProfile for WindowsProfile {
    const PLATFORM: Platform = Platform::Windows;
    const HAS_DPAD: bool = true;
}

impl PlatformProfile for MacOsProfile {
    const PLATFORM: Platform = Platform::MacOs;
    const HAS_DPAD: bool = false;
}

impl PlatformProfile for LinuxProfile {
    const PLATFORM: Platform = Platform::Linux;
    const HAS_DPAD: bool = true;
}

impl SupportsDPad for WindowsProfile {}
impl SupportsDPad for LinuxProfile {}

/// Marker of the platform this build targets
#[cfg(target_os = "windows")]
pub type NativePlatform = WindowsProfile;

#[cfg(target_os = "macos")]
pub type NativePlatform = MacOsProfile;

#[cfg(target_os = "linux")]
pub type NativePlatform = LinuxProfile;
