//! Polling subsystem
//!
//! The query surface never touches devices itself. It asks a
//! [`PollingService`] for the current value of a raw axis name or raw button
//! code. Implementations:
//!
//! 1. [`SnapshotTracker`] - previous/current snapshot pair with edge detection
//! 2. [`gilrs_poller::GilrsPoller`] - fills the tracker from real gamepads, one
//!    snapshot per polling cycle
//!
//! # Cycle model
//!
//! ```text
//! poll_cycle() ──► RawSnapshot ──► SnapshotTracker::advance ──► queries
//!                                  (previous ← current)
//! ```
//!
//! Between two `advance` calls every query reads the same immutable
//! snapshot, so repeated reads within a cycle agree.

pub mod bindings;
pub mod gilrs_poller;

use chrono::{DateTime, Local};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Raw input queries consumed by the query surface
pub trait PollingService {
    /// Current-cycle value of an input-manager axis. Unknown names read `0.0`.
    fn sample_axis(&self, raw_name: &str) -> f32;

    /// Whether the raw button code is down this cycle
    fn key_held(&self, raw_code: u32) -> bool;

    /// Whether the raw button code went from up to down at this cycle boundary
    fn key_pressed_this_cycle(&self, raw_code: u32) -> bool;

    /// Whether the raw button code went from down to up at this cycle boundary
    fn key_released_this_cycle(&self, raw_code: u32) -> bool;
}

impl<T: PollingService + ?Sized> PollingService for &T {
    fn sample_axis(&self, raw_name: &str) -> f32 {
        (**self).sample_axis(raw_name)
    }

    fn key_held(&self, raw_code: u32) -> bool {
        (**self).key_held(raw_code)
    }

    fn key_pressed_this_cycle(&self, raw_code: u32) -> bool {
        (**self).key_pressed_this_cycle(raw_code)
    }

    fn key_released_this_cycle(&self, raw_code: u32) -> bool {
        (**self).key_released_this_cycle(raw_code)
    }
}

/// Raw input state of one polling cycle
#[derive(Debug, Clone)]
pub struct RawSnapshot {
    axes: HashMap<String, f32>,
    held: HashSet<u32>,
    pub cycle: u64,
    pub captured_at: DateTime<Local>,
}

impl Default for RawSnapshot {
    fn default() -> Self {
        Self {
            axes: HashMap::new(),
            held: HashSet::new(),
            cycle: 0,
            captured_at: Local::now(),
        }
    }
}

impl RawSnapshot {
    pub fn new(cycle: u64) -> Self {
        Self {
            cycle,
            ..Self::default()
        }
    }

    pub fn set_axis(&mut self, raw_name: impl Into<String>, value: f32) {
        self.axes.insert(raw_name.into(), value);
    }

    pub fn press(&mut self, raw_code: u32) {
        self.held.insert(raw_code);
    }

    pub fn axis(&self, raw_name: &str) -> Option<f32> {
        self.axes.get(raw_name).copied()
    }

    pub fn is_held(&self, raw_code: u32) -> bool {
        self.held.contains(&raw_code)
    }

    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}

/// Owns the previous and current snapshot and derives button edges from them
#[derive(Debug, Clone, Default)]
pub struct SnapshotTracker {
    previous: RawSnapshot,
    current: RawSnapshot,
}

impl SnapshotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle boundary: `next` becomes current, current becomes previous.
    pub fn advance(&mut self, next: RawSnapshot) {
        trace!(
            "Advancing to cycle {} ({} axes, {} buttons held)",
            next.cycle,
            next.axis_count(),
            next.held_count()
        );
        self.previous = std::mem::replace(&mut self.current, next);
    }

    pub fn current(&self) -> &RawSnapshot {
        &self.current
    }

    pub fn previous(&self) -> &RawSnapshot {
        &self.previous
    }

    pub fn cycle(&self) -> u64 {
        self.current.cycle
    }
}

impl PollingService for SnapshotTracker {
    fn sample_axis(&self, raw_name: &str) -> f32 {
        match self.current.axis(raw_name) {
            Some(value) => value,
            None => {
                trace!("Axis {} not bound this cycle, reading 0.0", raw_name);
                0.0
            }
        }
    }

    fn key_held(&self, raw_code: u32) -> bool {
        self.current.is_held(raw_code)
    }

    fn key_pressed_this_cycle(&self, raw_code: u32) -> bool {
        self.current.is_held(raw_code) && !self.previous.is_held(raw_code)
    }

    fn key_released_this_cycle(&self, raw_code: u32) -> bool {
        !self.current.is_held(raw_code) && self.previous.is_held(raw_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(cycle: u64, held: &[u32]) -> RawSnapshot {
        let mut snapshot = RawSnapshot::new(cycle);
        for code in held {
            snapshot.press(*code);
        }
        snapshot
    }

    #[test]
    fn unknown_axis_reads_zero() {
        let tracker = SnapshotTracker::new();
        assert_eq!(tracker.sample_axis("XJoyL1"), 0.0);
    }

    #[test]
    fn press_and_release_edges_last_one_cycle() {
        let mut tracker = SnapshotTracker::new();

        tracker.advance(snapshot(1, &[40]));
        assert!(tracker.key_held(40));
        assert!(tracker.key_pressed_this_cycle(40));
        assert!(!tracker.key_released_this_cycle(40));

        tracker.advance(snapshot(2, &[40]));
        assert!(tracker.key_held(40));
        assert!(!tracker.key_pressed_this_cycle(40));

        tracker.advance(snapshot(3, &[]));
        assert!(!tracker.key_held(40));
        assert!(tracker.key_released_this_cycle(40));
        assert!(!tracker.key_pressed_this_cycle(40));

        tracker.advance(snapshot(4, &[]));
        assert!(!tracker.key_released_this_cycle(40));
    }

    #[test]
    fn edges_are_never_both_set() {
        let sequences: [&[u32]; 6] = [&[1], &[], &[1], &[1], &[], &[]];
        let mut tracker = SnapshotTracker::new();

        for (cycle, held) in sequences.iter().enumerate() {
            tracker.advance(snapshot(cycle as u64, held));
            assert!(!(tracker.key_pressed_this_cycle(1) && tracker.key_released_this_cycle(1)));
        }
    }

    #[test]
    fn reads_within_a_cycle_agree() {
        let mut tracker = SnapshotTracker::new();
        let mut next = snapshot(7, &[3]);
        next.set_axis("XJoyL1", -0.4);
        tracker.advance(next);

        assert_eq!(tracker.key_held(3), tracker.key_held(3));
        assert_eq!(tracker.sample_axis("XJoyL1"), tracker.sample_axis("XJoyL1"));
        assert_eq!(tracker.cycle(), 7);
    }

    #[test]
    fn reference_forwards_queries() {
        let mut tracker = SnapshotTracker::new();
        tracker.advance(snapshot(1, &[5]));

        fn pressed_via<S: PollingService>(service: S, code: u32) -> bool {
            service.key_pressed_this_cycle(code)
        }

        assert!(pressed_via(&tracker, 5));
        assert_eq!(tracker.previous().held_count(), 0);
    }
}
