//! Quest mini-games and the contract the host drives them through.
//!
//! Each quest is an independent state machine advanced by `dt` ticks and
//! discrete input events. It reads and mutates the player profile and the
//! effect system through a [`QuestContext`], and finishes by producing a
//! sticky [`QuestOutcome`].

pub mod da_wire;
pub mod in_and_out;
pub mod wardrobe;
pub mod window_witch;

pub use da_wire::DaWireQuest;
pub use in_and_out::InAndOutQuest;
pub use wardrobe::WardrobeQuest;
pub use window_witch::WindowWitchQuest;

use crate::core::geometry::Vec2;
use crate::core::input::Key;
use crate::core::profile::{PlayerProfile, QuestId};
use crate::core::rng::QuestRng;
use crate::effects::EffectSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestResult {
    Success,
    Failure,
}

/// Terminal result of one quest run, produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestOutcome {
    pub quest: QuestId,
    pub result: QuestResult,
    /// Human-readable summary ("Only got 1/5 rounds...").
    pub detail: String,
}

impl QuestOutcome {
    pub fn success(quest: QuestId, detail: impl Into<String>) -> Self {
        Self {
            quest,
            result: QuestResult::Success,
            detail: detail.into(),
        }
    }

    pub fn failure(quest: QuestId, detail: impl Into<String>) -> Self {
        Self {
            quest,
            result: QuestResult::Failure,
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == QuestResult::Success
    }
}

/// Everything a quest may touch besides its own state.
pub struct QuestContext<'a, R: QuestRng> {
    pub profile: &'a mut PlayerProfile,
    pub effects: &'a mut EffectSystem,
    pub rng: &'a mut R,
}

impl<'a, R: QuestRng> QuestContext<'a, R> {
    pub fn new(
        profile: &'a mut PlayerProfile,
        effects: &'a mut EffectSystem,
        rng: &'a mut R,
    ) -> Self {
        Self {
            profile,
            effects,
            rng,
        }
    }
}

/// The capability set every quest implements.
///
/// Once [`QuestMachine::outcome`] returns `Some`, every further call is a
/// no-op.
pub trait QuestMachine {
    fn quest_id(&self) -> QuestId;

    fn on_tick<R: QuestRng>(&mut self, dt: f64, ctx: &mut QuestContext<'_, R>);

    fn on_key_down<R: QuestRng>(&mut self, key: Key, ctx: &mut QuestContext<'_, R>);

    fn on_key_up<R: QuestRng>(&mut self, key: Key, ctx: &mut QuestContext<'_, R>);

    fn on_click<R: QuestRng>(&mut self, pos: Vec2, ctx: &mut QuestContext<'_, R>);

    /// The terminal outcome, once produced.
    fn outcome(&self) -> Option<&QuestOutcome>;

    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Reports (once) that the player discovered the secret during this run.
    fn take_secret_discovery(&mut self) -> bool {
        false
    }
}

/// The one quest currently being played.
#[derive(Debug, Clone)]
pub enum ActiveQuest {
    WindowWitch(WindowWitchQuest),
    DaWire(DaWireQuest),
    InAndOut(InAndOutQuest),
    Wardrobe(WardrobeQuest),
}

/// Forward a call to whichever quest is active.
macro_rules! dispatch {
    ($self:expr, $quest:ident => $call:expr) => {
        match $self {
            ActiveQuest::WindowWitch($quest) => $call,
            ActiveQuest::DaWire($quest) => $call,
            ActiveQuest::InAndOut($quest) => $call,
            ActiveQuest::Wardrobe($quest) => $call,
        }
    };
}

impl ActiveQuest {
    /// Build a fresh instance of `quest`.
    pub fn start<R: QuestRng>(quest: QuestId, ctx: &mut QuestContext<'_, R>) -> Self {
        match quest {
            QuestId::WindowWitch => ActiveQuest::WindowWitch(WindowWitchQuest::new(ctx)),
            QuestId::DaWire => ActiveQuest::DaWire(DaWireQuest::new()),
            QuestId::InAndOut => ActiveQuest::InAndOut(InAndOutQuest::new()),
            QuestId::WitchInWardrobe => ActiveQuest::Wardrobe(WardrobeQuest::new()),
        }
    }
}

impl QuestMachine for ActiveQuest {
    fn quest_id(&self) -> QuestId {
        dispatch!(self, q => q.quest_id())
    }

    fn on_tick<R: QuestRng>(&mut self, dt: f64, ctx: &mut QuestContext<'_, R>) {
        dispatch!(self, q => q.on_tick(dt, ctx))
    }

    fn on_key_down<R: QuestRng>(&mut self, key: Key, ctx: &mut QuestContext<'_, R>) {
        dispatch!(self, q => q.on_key_down(key, ctx))
    }

    fn on_key_up<R: QuestRng>(&mut self, key: Key, ctx: &mut QuestContext<'_, R>) {
        dispatch!(self, q => q.on_key_up(key, ctx))
    }

    fn on_click<R: QuestRng>(&mut self, pos: Vec2, ctx: &mut QuestContext<'_, R>) {
        dispatch!(self, q => q.on_click(pos, ctx))
    }

    fn outcome(&self) -> Option<&QuestOutcome> {
        dispatch!(self, q => q.outcome())
    }

    fn take_secret_discovery(&mut self) -> bool {
        dispatch!(self, q => q.take_secret_discovery())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;

    #[test]
    fn test_start_builds_matching_variant() {
        let mut profile = PlayerProfile::new();
        let mut effects = EffectSystem::seeded(0);
        let mut rng = ScriptedRng::constant(0.9);
        let mut ctx = QuestContext::new(&mut profile, &mut effects, &mut rng);

        for quest in QuestId::ALL {
            let active = ActiveQuest::start(quest, &mut ctx);
            assert_eq!(active.quest_id(), quest);
            assert!(!active.is_terminal());
        }
    }

    #[test]
    fn test_outcome_constructors() {
        let win = QuestOutcome::success(QuestId::DaWire, "won");
        assert!(win.is_success());
        let loss = QuestOutcome::failure(QuestId::DaWire, "lost");
        assert!(!loss.is_success());
        assert_eq!(loss.result, QuestResult::Failure);
    }
}
