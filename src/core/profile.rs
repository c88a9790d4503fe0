//! The player's persistent progress: energy, completed quests, secret flag.

use super::constants::{MAX_ENERGY, STARTING_ENERGY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifies one of the four quests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestId {
    WindowWitch,
    DaWire,
    InAndOut,
    WitchInWardrobe,
}

impl QuestId {
    pub const ALL: [QuestId; 4] = [
        QuestId::WindowWitch,
        QuestId::DaWire,
        QuestId::InAndOut,
        QuestId::WitchInWardrobe,
    ];

    /// Quests that count toward overworld completion.
    pub const BASE: [QuestId; 3] = [QuestId::WindowWitch, QuestId::DaWire, QuestId::InAndOut];

    /// Stable id used in save files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WindowWitch => "window_witch",
            Self::DaWire => "da_wire",
            Self::InAndOut => "in_and_out",
            Self::WitchInWardrobe => "witch_in_wardrobe",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == id)
    }

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::WindowWitch => "Window Witch",
            Self::DaWire => "Da Wire",
            Self::InAndOut => "In and Out",
            Self::WitchInWardrobe => "Witch in the Wardrobe",
        }
    }

    /// Only offered once the secret has been unlocked.
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::WitchInWardrobe)
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Energy, quest completion and the secret-content flag.
///
/// `0 <= energy <= max_energy` holds at all times: spends that would break
/// it are rejected before any mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    energy: u32,
    max_energy: u32,
    completed_quests: BTreeSet<QuestId>,
    secret_unlocked: bool,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerProfile {
    /// Fresh new-game profile: full energy, nothing completed.
    pub fn new() -> Self {
        Self {
            energy: STARTING_ENERGY.min(MAX_ENERGY),
            max_energy: MAX_ENERGY,
            completed_quests: BTreeSet::new(),
            secret_unlocked: false,
        }
    }

    /// Rebuild a profile from stored parts. Energy is clamped to the maximum.
    pub fn from_parts(
        energy: u32,
        completed_quests: impl IntoIterator<Item = QuestId>,
        secret_unlocked: bool,
    ) -> Self {
        Self {
            energy: energy.min(MAX_ENERGY),
            max_energy: MAX_ENERGY,
            completed_quests: completed_quests.into_iter().collect(),
            secret_unlocked,
        }
    }

    /// Fresh profile with a specific energy level (clamped).
    pub fn with_energy(energy: u32) -> Self {
        Self {
            energy: energy.min(MAX_ENERGY),
            ..Self::new()
        }
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.energy >= cost
    }

    /// Spend `cost` energy. Returns false, leaving energy untouched, if the
    /// player cannot afford it.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.energy -= cost;
        true
    }

    pub fn is_completed(&self, quest: QuestId) -> bool {
        self.completed_quests.contains(&quest)
    }

    /// Record a completed quest. Returns true if it was not completed before.
    pub fn mark_completed(&mut self, quest: QuestId) -> bool {
        self.completed_quests.insert(quest)
    }

    /// Completed quests in stable id order.
    pub fn completed_quests(&self) -> impl Iterator<Item = QuestId> + '_ {
        self.completed_quests.iter().copied()
    }

    pub fn secret_unlocked(&self) -> bool {
        self.secret_unlocked
    }

    /// Unlock the secret quest. Returns true only on the first unlock.
    pub fn unlock_secret(&mut self) -> bool {
        let newly = !self.secret_unlocked;
        self.secret_unlocked = true;
        newly
    }

    /// Whether `quest` may be started from the overworld.
    pub fn is_available(&self, quest: QuestId) -> bool {
        !quest.is_secret() || self.secret_unlocked
    }

    /// Quests currently offered, in menu order.
    pub fn available_quests(&self) -> Vec<QuestId> {
        QuestId::ALL
            .into_iter()
            .filter(|q| self.is_available(*q))
            .collect()
    }

    /// Percentage of base quests completed (the secret quest is a bonus).
    pub fn completion_percent(&self) -> u32 {
        let done = QuestId::BASE
            .iter()
            .filter(|q| self.is_completed(**q))
            .count() as u32;
        done * 100 / QuestId::BASE.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_defaults() {
        let profile = PlayerProfile::new();
        assert_eq!(profile.energy(), 100);
        assert_eq!(profile.max_energy(), 100);
        assert_eq!(profile.completed_quests().count(), 0);
        assert!(!profile.secret_unlocked());
    }

    #[test]
    fn test_try_spend_rejects_without_mutation() {
        let mut profile = PlayerProfile::with_energy(4);
        assert!(!profile.try_spend(5));
        assert_eq!(profile.energy(), 4);
        assert!(profile.try_spend(4));
        assert_eq!(profile.energy(), 0);
        assert!(!profile.try_spend(1));
        assert_eq!(profile.energy(), 0);
    }

    #[test]
    fn test_from_parts_clamps_energy() {
        let profile = PlayerProfile::from_parts(500, [QuestId::InAndOut], false);
        assert_eq!(profile.energy(), MAX_ENERGY);
        assert_eq!(PlayerProfile::with_energy(500).energy(), MAX_ENERGY);
    }

    #[test]
    fn test_mark_completed_is_idempotent() {
        let mut profile = PlayerProfile::new();
        assert!(profile.mark_completed(QuestId::DaWire));
        assert!(!profile.mark_completed(QuestId::DaWire));
        assert_eq!(profile.completed_quests().count(), 1);
    }

    #[test]
    fn test_secret_gates_wardrobe() {
        let mut profile = PlayerProfile::new();
        assert!(!profile.is_available(QuestId::WitchInWardrobe));
        assert_eq!(profile.available_quests().len(), 3);

        assert!(profile.unlock_secret());
        assert!(!profile.unlock_secret());
        assert!(profile.is_available(QuestId::WitchInWardrobe));
        assert_eq!(profile.available_quests().len(), 4);
    }

    #[test]
    fn test_completion_percent_ignores_secret() {
        let mut profile = PlayerProfile::new();
        profile.mark_completed(QuestId::WitchInWardrobe);
        assert_eq!(profile.completion_percent(), 0);
        profile.mark_completed(QuestId::WindowWitch);
        assert_eq!(profile.completion_percent(), 33);
        profile.mark_completed(QuestId::DaWire);
        profile.mark_completed(QuestId::InAndOut);
        assert_eq!(profile.completion_percent(), 100);
    }

    #[test]
    fn test_quest_id_round_trip() {
        for quest in QuestId::ALL {
            assert_eq!(QuestId::from_id(quest.as_str()), Some(quest));
            assert!(!quest.title().is_empty());
        }
        assert_eq!(QuestId::from_id("dragon_slayer"), None);
    }
}
