//! Da Wire data structures.

use crate::core::constants::{DA_WIRE_ROUNDS, WIRE_GRIP_TARGET_SECONDS};
use crate::quests::QuestOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WirePhase {
    /// Watching the swing; input ignored.
    Watch,
    /// One lick allowed, judged against the current wire position.
    TimingWindow,
    /// Gripping; time accumulates while Action stays down.
    Hold,
    /// Round message shown until Confirm.
    RoundResult,
}

/// Result of pressing Action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LickOutcome {
    /// Wire was near the center; now holding.
    Gripping,
    /// Wire was off-center; round lost.
    Missed,
    /// Not in the timing window.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct DaWireQuest {
    /// 1-based.
    pub(super) round: u32,
    pub(super) wins: u32,
    pub(super) phase: WirePhase,
    pub(super) phase_timer: f64,
    /// Always within [-1, 1].
    pub(super) wire_position: f64,
    pub(super) wire_direction: f64,
    pub(super) grip_progress: f64,
    pub(super) action_held: bool,
    pub(super) result_message: Option<String>,
    pub(super) outcome: Option<QuestOutcome>,
}

impl Default for DaWireQuest {
    fn default() -> Self {
        Self::new()
    }
}

impl DaWireQuest {
    pub fn new() -> Self {
        Self {
            round: 1,
            wins: 0,
            phase: WirePhase::Watch,
            phase_timer: 0.0,
            wire_position: 0.0,
            wire_direction: 1.0,
            grip_progress: 0.0,
            action_held: false,
            result_message: None,
            outcome: None,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        DA_WIRE_ROUNDS
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn phase(&self) -> WirePhase {
        self.phase
    }

    pub fn wire_position(&self) -> f64 {
        self.wire_position
    }

    /// Grip bar fill, 0.0 to 1.0.
    pub fn grip_fraction(&self) -> f64 {
        (self.grip_progress / WIRE_GRIP_TARGET_SECONDS).clamp(0.0, 1.0)
    }

    pub fn result_message(&self) -> Option<&str> {
        self.result_message.as_deref()
    }

    pub fn instructions(&self) -> &'static str {
        match self.phase {
            WirePhase::Watch => "Watch the string swing... Get ready!",
            WirePhase::TimingWindow => "Press SPACE when the string is in the CENTER!",
            WirePhase::Hold => "HOLD SPACE to grip the string!",
            WirePhase::RoundResult => "Press ENTER to continue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_quest_starts_round_one_centered() {
        let quest = DaWireQuest::new();
        assert_eq!(quest.round(), 1);
        assert_eq!(quest.wins(), 0);
        assert_eq!(quest.phase(), WirePhase::Watch);
        assert_eq!(quest.wire_position(), 0.0);
        assert!(quest.result_message().is_none());
        assert_eq!(quest.grip_fraction(), 0.0);
    }
}
