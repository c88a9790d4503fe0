//! Wardrobe quest data structures.

use crate::core::constants::{
    KOSH_FLOOR_Y, KOSH_START_X, WARDROBE_CATCHES_NEEDED, WARDROBE_ROUNDS,
};
use crate::core::geometry::Vec2;
use crate::quests::QuestOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WardrobePhase {
    /// Intro: Kosh walks up to the wardrobe.
    Approach,
    /// Intro: the doors swing open.
    DoorOpening,
    /// Intro: Kosh leaps inside.
    Jump,
    /// Nothing visible; waiting out a random delay.
    Waiting,
    /// Raccoon visible and clickable until the peek timer runs out.
    Peeking,
    /// Round result shown for a fixed pause.
    RoundResult,
}

impl WardrobePhase {
    pub fn is_intro(&self) -> bool {
        matches!(self, Self::Approach | Self::DoorOpening | Self::Jump)
    }
}

#[derive(Debug, Clone)]
pub struct WardrobeQuest {
    pub(super) phase: WardrobePhase,
    pub(super) phase_timer: f64,
    /// Length of the current Waiting or Peeking phase.
    pub(super) phase_duration: f64,
    pub(super) kosh: Vec2,
    /// 0.0 closed, 1.0 fully open.
    pub(super) door_openness: f64,
    pub(super) wardrobe_open: bool,
    /// 1-based.
    pub(super) round: u32,
    pub(super) catches: u32,
    /// Raccoon position while peeking.
    pub(super) target: Option<Vec2>,
    pub(super) result_message: Option<String>,
    pub(super) outcome: Option<QuestOutcome>,
}

impl Default for WardrobeQuest {
    fn default() -> Self {
        Self::new()
    }
}

impl WardrobeQuest {
    pub fn new() -> Self {
        Self {
            phase: WardrobePhase::Approach,
            phase_timer: 0.0,
            phase_duration: 0.0,
            kosh: Vec2::new(KOSH_START_X, KOSH_FLOOR_Y),
            door_openness: 0.0,
            wardrobe_open: false,
            round: 1,
            catches: 0,
            target: None,
            result_message: None,
            outcome: None,
        }
    }

    pub fn phase(&self) -> WardrobePhase {
        self.phase
    }

    pub fn kosh_position(&self) -> Vec2 {
        self.kosh
    }

    pub fn door_openness(&self) -> f64 {
        self.door_openness
    }

    pub fn wardrobe_open(&self) -> bool {
        self.wardrobe_open
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        WARDROBE_ROUNDS
    }

    pub fn catches(&self) -> u32 {
        self.catches
    }

    pub fn catches_needed(&self) -> u32 {
        WARDROBE_CATCHES_NEEDED
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn result_message(&self) -> Option<&str> {
        self.result_message.as_deref()
    }

    pub fn instructions(&self) -> &'static str {
        match self.phase {
            WardrobePhase::Approach => "Kosh approaches the mysterious wardrobe...",
            WardrobePhase::DoorOpening => "The wardrobe doors creak open...",
            WardrobePhase::Jump => "Kosh leaps inside!",
            WardrobePhase::Waiting => "Waiting for raccoon...",
            WardrobePhase::Peeking => "Click it quick!",
            WardrobePhase::RoundResult => "",
        }
    }
}
