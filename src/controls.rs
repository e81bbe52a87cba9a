//! Logical controls
//!
//! Platform-independent names for every input the query surface exposes.
//! Each one resolves to exactly one raw identifier through the active
//! [`Profile`](crate::profile::Profile).

use std::fmt::{self, Display};

/// The ten digital buttons of a standard twin-stick controller.
///
/// Face buttons are named by position, not by the label printed on them,
/// because the labels differ between controller vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalButton {
    Bottom,
    Right,
    Left,
    Top,
    LeftBumper,
    RightBumper,
    Select,
    Start,
    LeftStickClick,
    RightStickClick,
}

impl LogicalButton {
    pub const ALL: [LogicalButton; 10] = [
        LogicalButton::Bottom,
        LogicalButton::Right,
        LogicalButton::Left,
        LogicalButton::Top,
        LogicalButton::LeftBumper,
        LogicalButton::RightBumper,
        LogicalButton::Select,
        LogicalButton::Start,
        LogicalButton::LeftStickClick,
        LogicalButton::RightStickClick,
    ];
}

impl Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicalButton::Bottom => "BottomButton",
            LogicalButton::Right => "RightButton",
            LogicalButton::Left => "LeftButton",
            LogicalButton::Top => "TopButton",
            LogicalButton::LeftBumper => "LeftBumper",
            LogicalButton::RightBumper => "RightBumper",
            LogicalButton::Select => "Select",
            LogicalButton::Start => "Start",
            LogicalButton::LeftStickClick => "LeftStickClick",
            LogicalButton::RightStickClick => "RightStickClick",
        };
        write!(f, "{}", name)
    }
}

// Analog stick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stick {
    Left,
    Right,
}

// Trigger side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerSide {
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_lists_every_button_once() {
        let unique: HashSet<_> = LogicalButton::ALL.iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn display_uses_query_names() {
        assert_eq!(LogicalButton::Bottom.to_string(), "BottomButton");
        assert_eq!(LogicalButton::RightStickClick.to_string(), "RightStickClick");
    }
}
