//! Per-player addressing
//!
//! Turns a profile's player-independent identifiers into the raw identifiers
//! the polling service is queried with. Axis names get the player index
//! appended as decimal text; button codes are offset by a fixed per-player
//! stride.

/// Player slot. `0` addresses all players at once, `1..=MAX_PLAYERS` a
/// single controller. Values beyond that are passed through unchecked.
pub type PlayerIndex = u16;

/// Width of one player's button-code range.
///
/// Has to match the polling service's per-player button enumeration; the
/// two change together or not at all.
pub const BUTTONS_PER_PLAYER: u32 = 20;

/// Highest individually addressable player slot
pub const MAX_PLAYERS: PlayerIndex = 4;

/// The aggregate "any player" slot
pub const ANY_PLAYER: PlayerIndex = 0;

/// Appends the player index to an input-manager axis name.
///
/// Player `0` yields the `<name>0` axis, which the input manager binds to
/// every connected device.
pub fn resolve_axis_name(base: &str, player: PlayerIndex) -> String {
    format!("{}{}", base, player)
}

/// Offsets a button base code into the given player's code range.
pub fn resolve_button_code(base: u32, player: PlayerIndex) -> u32 {
    base + u32::from(player) * BUTTONS_PER_PLAYER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::LogicalButton;
    use crate::profile::{Platform, Profile};
    use std::collections::HashMap;

    #[test]
    fn axis_name_carries_player_suffix() {
        assert_eq!(resolve_axis_name("XJoyL", 3), "XJoyL3");
        assert_eq!(resolve_axis_name("TriggerRMac", 1), "TriggerRMac1");
    }

    #[test]
    fn aggregate_axis_name_differs_from_every_player() {
        let aggregate = resolve_axis_name("YJoyRWin", ANY_PLAYER);
        assert_eq!(aggregate, "YJoyRWin0");
        for player in 1..=MAX_PLAYERS {
            assert_ne!(resolve_axis_name("YJoyRWin", player), aggregate);
        }
    }

    #[test]
    fn bottom_button_of_player_two_on_windows() {
        let base = Profile::for_platform(Platform::Windows).button_code(LogicalButton::Bottom);
        assert_eq!(base, 0);
        assert_eq!(resolve_button_code(base, 2), 40);
    }

    #[test]
    fn button_codes_never_collide_across_players() {
        for platform in Platform::ALL {
            let profile = Profile::for_platform(platform);
            let mut owners = HashMap::new();

            for player in 0..=MAX_PLAYERS {
                for button in LogicalButton::ALL {
                    let code = resolve_button_code(profile.button_code(button), player);
                    if let Some(previous) = owners.insert(code, (button, player)) {
                        panic!(
                            "{platform}: code {code} used by {:?} and {:?}",
                            previous,
                            (button, player)
                        );
                    }
                }
            }

            assert_eq!(owners.len(), 10 * (MAX_PLAYERS as usize + 1));
        }
    }

    #[test]
    fn out_of_range_player_is_passed_through() {
        assert_eq!(resolve_button_code(7, 9), 187);
        assert_eq!(resolve_axis_name("XJoyL", 12), "XJoyL12");
    }
}
