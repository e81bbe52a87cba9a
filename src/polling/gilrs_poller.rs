//! Gamepad poller backed by gilrs
//!
//! Produces one [`RawSnapshot`] per polling cycle from the connected
//! gamepads and keeps the previous/current pair in a [`SnapshotTracker`].
//! Gamepads take player slots `1..=max_players` in connection order and
//! keep their slot until they disconnect.
//!
//! # Lifecycle
//!
//! ```text
//! GilrsPoller<Initializing> ──initialize()──► GilrsPoller<Polling>
//!   (gilrs context up)                          (poll_cycle() per tick)
//! ```

use crate::addressing::{PlayerIndex, MAX_PLAYERS};
use crate::polling::bindings::InputBindings;
use crate::polling::{PollingService, RawSnapshot, SnapshotTracker};
use crate::profile::Profile;
use gilrs::{Event, EventType, Gamepad, GamepadId, Gilrs};
use statum::{machine, state};
use std::fmt::Debug;
use tracing::{debug, error, info, warn};

// Poller errors
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    #[error("Failed to initialize poller: {0}")]
    InitializationError(String),

    #[error("Invalid player count {0}, expected 1..={max}", max = MAX_PLAYERS)]
    InvalidPlayerCount(PlayerIndex),
}

/// Assignment of devices to player slots `1..=capacity`
#[derive(Debug, Clone)]
pub struct PlayerSlots<Id = GamepadId> {
    slots: Vec<Option<Id>>,
}

impl<Id: Copy + Eq + Debug> PlayerSlots<Id> {
    pub fn new(capacity: PlayerIndex) -> Self {
        Self {
            slots: vec![None; usize::from(capacity)],
        }
    }

    /// Gives `id` the lowest free slot, or returns the slot it already has.
    /// `None` when every slot is taken.
    pub fn assign(&mut self, id: Id) -> Option<PlayerIndex> {
        if let Some(player) = self.player_of(id) {
            return Some(player);
        }
        let free = self.slots.iter().position(Option::is_none)?;
        self.slots[free] = Some(id);
        Some(free as PlayerIndex + 1)
    }

    /// Frees the slot held by `id`
    pub fn release(&mut self, id: Id) -> Option<PlayerIndex> {
        let player = self.player_of(id)?;
        self.slots[usize::from(player) - 1] = None;
        Some(player)
    }

    pub fn player_of(&self, id: Id) -> Option<PlayerIndex> {
        self.slots
            .iter()
            .position(|slot| *slot == Some(id))
            .map(|index| index as PlayerIndex + 1)
    }

    /// Occupied slots in player order
    pub fn occupied(&self) -> impl Iterator<Item = (PlayerIndex, Id)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|id| (index as PlayerIndex + 1, id)))
    }

    pub fn capacity(&self) -> PlayerIndex {
        self.slots.len() as PlayerIndex
    }
}

// Poller states
#[state]
#[derive(Debug, Clone)]
pub enum PollerState {
    Initializing,
    Polling,
}

#[machine]
#[derive(Debug)]
pub struct GilrsPoller<S: PollerState> {
    // Gilrs context
    gilrs: Gilrs,

    // Raw identifiers to fill, derived from the active profile
    bindings: InputBindings,

    // Gamepad to player slot assignment
    slots: PlayerSlots,

    // Previous and current snapshot
    tracker: SnapshotTracker,

    // Number of completed polling cycles
    cycle: u64,
}

impl<S: PollerState> GilrsPoller<S> {
    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    pub fn max_players(&self) -> PlayerIndex {
        self.slots.capacity()
    }
}

impl GilrsPoller<Initializing> {
    pub fn create(profile: &Profile, max_players: PlayerIndex) -> Result<Self, PollerError> {
        if max_players == 0 || max_players > MAX_PLAYERS {
            return Err(PollerError::InvalidPlayerCount(max_players));
        }

        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(PollerError::InitializationError(e.to_string()));
            }
        };

        let bindings = InputBindings::for_profile(profile);
        debug!(
            "Bound {} axes and {} buttons for the {} profile",
            bindings.axes.len(),
            bindings.buttons.len(),
            profile.platform
        );

        Ok(Self::new(
            gilrs,
            bindings,
            PlayerSlots::new(max_players),
            SnapshotTracker::new(),
            0, // cycle
        ))
    }

    /// Assigns already connected gamepads to player slots and starts polling.
    pub fn initialize(mut self) -> GilrsPoller<Polling> {
        {
            let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self.gilrs.gamepads().collect();

            if gamepads.is_empty() {
                warn!("No gamepad connected, waiting for connections");
            } else {
                info!("Found {} gamepads:", gamepads.len());
                for (id, gamepad) in &gamepads {
                    match self.slots.assign(*id) {
                        Some(player) => info!(
                            "  Player {}: ID {}, Name: {}, UUID: {:?}",
                            player,
                            id,
                            gamepad.name(),
                            gamepad.uuid()
                        ),
                        None => warn!(
                            "  No free player slot for {} ({}), ignoring it",
                            gamepad.name(),
                            id
                        ),
                    }
                }
            }
        }

        info!("Gamepad poller initialized, transitioning to Polling state");
        self.transition()
    }
}

impl GilrsPoller<Polling> {
    /// Runs one polling cycle and returns its number.
    ///
    /// Drains pending gilrs events to keep slot assignment current, then
    /// captures every occupied slot and the aggregate slot `0`.
    pub fn poll_cycle(&mut self) -> u64 {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => match self.slots.assign(id) {
                    Some(player) => info!("Gamepad {} connected as player {}", id, player),
                    None => warn!("Gamepad {} connected but all player slots are taken", id),
                },
                EventType::Disconnected => match self.slots.release(id) {
                    Some(player) => warn!("Gamepad {} (player {}) disconnected", id, player),
                    None => debug!("Unassigned gamepad {} disconnected", id),
                },
                _ => {}
            }
        }

        self.cycle += 1;

        let pads: Vec<(PlayerIndex, Gamepad<'_>)> = self
            .slots
            .occupied()
            .filter_map(|(player, id)| self.gilrs.connected_gamepad(id).map(|pad| (player, pad)))
            .collect();
        let snapshot: RawSnapshot = self.bindings.capture(self.cycle, &pads);
        self.tracker.advance(snapshot);

        self.cycle
    }

    /// Player slots holding a gamepad
    pub fn players(&self) -> Vec<PlayerIndex> {
        self.slots.occupied().map(|(player, _)| player).collect()
    }

    pub fn tracker(&self) -> &SnapshotTracker {
        &self.tracker
    }
}

impl PollingService for GilrsPoller<Polling> {
    fn sample_axis(&self, raw_name: &str) -> f32 {
        self.tracker.sample_axis(raw_name)
    }

    fn key_held(&self, raw_code: u32) -> bool {
        self.tracker.key_held(raw_code)
    }

    fn key_pressed_this_cycle(&self, raw_code: u32) -> bool {
        self.tracker.key_pressed_this_cycle(raw_code)
    }

    fn key_released_this_cycle(&self, raw_code: u32) -> bool {
        self.tracker.key_released_this_cycle(raw_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_fill_in_connection_order() {
        let mut slots: PlayerSlots<u32> = PlayerSlots::new(4);

        assert_eq!(slots.assign(10), Some(1));
        assert_eq!(slots.assign(11), Some(2));
        assert_eq!(slots.assign(10), Some(1));
        assert_eq!(slots.occupied().collect::<Vec<_>>(), vec![(1, 10), (2, 11)]);
    }

    #[test]
    fn released_slot_is_reused() {
        let mut slots: PlayerSlots<u32> = PlayerSlots::new(4);
        slots.assign(1);
        slots.assign(2);
        slots.assign(3);

        assert_eq!(slots.release(2), Some(2));
        assert_eq!(slots.release(2), None);
        assert_eq!(slots.assign(4), Some(2));
        assert_eq!(slots.player_of(3), Some(3));
    }

    #[test]
    fn full_slots_reject_new_devices() {
        let mut slots: PlayerSlots<u32> = PlayerSlots::new(2);
        slots.assign(1);
        slots.assign(2);

        assert_eq!(slots.assign(3), None);
        assert_eq!(slots.capacity(), 2);
    }
}
