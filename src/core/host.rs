//! Quest host: owns the session state and drives the one active quest.
//!
//! The host starts quests, forwards ticks and input, and when a quest
//! terminates commits the result to the profile and queues a
//! [`HostEvent`] for the navigation shell.

use super::geometry::Vec2;
use super::input::{InputEvent, InputSource, Key};
use super::profile::{PlayerProfile, QuestId};
use super::rng::QuestRng;
use crate::effects::EffectSystem;
use crate::quests::{ActiveQuest, QuestContext, QuestMachine, QuestOutcome};
use thiserror::Error;

/// Why a quest could not be started. Nothing is mutated on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// Secret quest requested before it was unlocked.
    #[error("quest '{0}' is locked")]
    Locked(QuestId),

    /// Another quest is still running.
    #[error("quest '{0}' is already in progress")]
    AlreadyActive(QuestId),
}

/// Notifications for the navigation shell, drained with
/// [`QuestHost::take_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    QuestTerminated(QuestOutcome),
    SecretUnlocked,
    /// The player left mid-quest; nothing was committed.
    QuestAbandoned(QuestId),
}

pub struct QuestHost<R: QuestRng> {
    profile: PlayerProfile,
    effects: EffectSystem,
    rng: R,
    active: Option<ActiveQuest>,
    events: Vec<HostEvent>,
    pointer: Vec2,
}

impl<R: QuestRng> QuestHost<R> {
    pub fn new(profile: PlayerProfile, rng: R) -> Self {
        Self::with_effects(profile, EffectSystem::new(), rng)
    }

    /// Host with an explicit effect system (seeded for reproducible runs).
    pub fn with_effects(profile: PlayerProfile, effects: EffectSystem, rng: R) -> Self {
        Self {
            profile,
            effects,
            rng,
            active: None,
            events: Vec::new(),
            pointer: Vec2::ZERO,
        }
    }

    pub fn start(&mut self, quest: QuestId) -> Result<(), StartError> {
        if let Some(active) = &self.active {
            return Err(StartError::AlreadyActive(active.quest_id()));
        }
        if !self.profile.is_available(quest) {
            log::warn!("refused to start locked quest {quest}");
            return Err(StartError::Locked(quest));
        }

        self.effects.clear();
        let mut ctx = QuestContext::new(&mut self.profile, &mut self.effects, &mut self.rng);
        self.active = Some(ActiveQuest::start(quest, &mut ctx));
        log::info!("quest started: {quest}");
        Ok(())
    }

    /// Leave the running quest without committing anything further.
    pub fn abandon(&mut self) -> Option<QuestId> {
        let quest = self.active.take()?.quest_id();
        log::info!("quest abandoned: {quest}");
        self.events.push(HostEvent::QuestAbandoned(quest));
        Some(quest)
    }

    /// Advance the active quest and the particles by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.drive(|quest, ctx| quest.on_tick(dt, ctx));
        self.effects.tick(dt);
    }

    pub fn key_down(&mut self, key: Key) {
        if key == Key::Exit {
            self.abandon();
            return;
        }
        self.drive(|quest, ctx| quest.on_key_down(key, ctx));
    }

    pub fn key_up(&mut self, key: Key) {
        self.drive(|quest, ctx| quest.on_key_up(key, ctx));
    }

    pub fn click(&mut self, pos: Vec2) {
        self.pointer = pos;
        self.drive(|quest, ctx| quest.on_click(pos, ctx));
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::Click(pos) => self.click(pos),
            InputEvent::PointerMoved(pos) => self.pointer_moved(pos),
        }
    }

    /// Run one frame from `input`: tick by its elapsed time, then deliver
    /// the events that arrived. Returns the elapsed time.
    pub fn pump<I: InputSource>(&mut self, input: &mut I) -> f64 {
        let dt = input.elapsed();
        self.tick(dt);
        for event in input.poll_events() {
            self.handle_event(event);
        }
        self.pointer = input.pointer_position();
        dt
    }

    fn drive(&mut self, call: impl FnOnce(&mut ActiveQuest, &mut QuestContext<'_, R>)) {
        let Some(quest) = self.active.as_mut() else {
            return;
        };
        let mut ctx = QuestContext::new(&mut self.profile, &mut self.effects, &mut self.rng);
        call(quest, &mut ctx);
        self.settle();
    }

    /// Commit secret discovery and terminal outcomes after every call into
    /// the quest.
    fn settle(&mut self) {
        let Some(quest) = self.active.as_mut() else {
            return;
        };

        if quest.take_secret_discovery() && self.profile.unlock_secret() {
            log::info!("secret quest unlocked");
            self.events.push(HostEvent::SecretUnlocked);
        }

        if let Some(outcome) = quest.outcome().cloned() {
            if outcome.is_success() {
                self.profile.mark_completed(outcome.quest);
            }
            log::info!(
                "quest {} finished: {:?} ({})",
                outcome.quest,
                outcome.result,
                outcome.detail
            );
            self.events.push(HostEvent::QuestTerminated(outcome));
            self.active = None;
        }
    }

    /// Drain queued notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn active(&self) -> Option<&ActiveQuest> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn effects(&self) -> &EffectSystem {
        &self.effects
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Replace the profile (Continue from a save). Drops any running quest.
    pub fn load_profile(&mut self, profile: PlayerProfile) {
        self.active = None;
        self.effects.clear();
        self.profile = profile;
    }

    /// Fresh profile, no quest, no particles.
    pub fn new_game(&mut self) {
        self.load_profile(PlayerProfile::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;
    use crate::quests::QuestResult;

    fn host(profile: PlayerProfile, rng: ScriptedRng) -> QuestHost<ScriptedRng> {
        QuestHost::with_effects(profile, EffectSystem::seeded(3), rng)
    }

    #[test]
    fn test_secret_quest_locked_until_unlocked() {
        let mut host = host(PlayerProfile::new(), ScriptedRng::constant(0.99));
        assert_eq!(
            host.start(QuestId::WitchInWardrobe),
            Err(StartError::Locked(QuestId::WitchInWardrobe))
        );
        assert!(!host.is_active());

        let mut unlocked = host_with_secret();
        assert!(unlocked.start(QuestId::WitchInWardrobe).is_ok());
    }

    fn host_with_secret() -> QuestHost<ScriptedRng> {
        host(
            PlayerProfile::from_parts(100, [QuestId::WindowWitch], true),
            ScriptedRng::constant(0.99),
        )
    }

    #[test]
    fn test_second_start_rejected() {
        let mut host = host(PlayerProfile::new(), ScriptedRng::constant(0.99));
        host.start(QuestId::DaWire).expect("first start");
        assert_eq!(
            host.start(QuestId::InAndOut),
            Err(StartError::AlreadyActive(QuestId::DaWire))
        );
        assert_eq!(host.active().map(|q| q.quest_id()), Some(QuestId::DaWire));
    }

    #[test]
    fn test_exit_abandons_without_commit() {
        let mut host = host(PlayerProfile::new(), ScriptedRng::constant(0.99));
        host.start(QuestId::InAndOut).expect("start");
        host.key_down(Key::Action);
        assert_eq!(host.profile().energy(), 90);

        host.key_down(Key::Exit);
        assert!(!host.is_active());
        assert_eq!(host.profile().energy(), 90, "no refund");
        assert_eq!(host.profile().completed_quests().count(), 0);
        assert_eq!(
            host.take_events(),
            vec![HostEvent::QuestAbandoned(QuestId::InAndOut)]
        );
    }

    #[test]
    fn test_failure_reports_without_completion() {
        let mut host = host(PlayerProfile::with_energy(0), ScriptedRng::constant(0.99));
        host.start(QuestId::InAndOut).expect("start");
        host.key_down(Key::Action);

        let events = host.take_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            HostEvent::QuestTerminated(outcome) => {
                assert_eq!(outcome.result, QuestResult::Failure);
                assert_eq!(outcome.quest, QuestId::InAndOut);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(!host.is_active());
        assert!(!host.profile().is_completed(QuestId::InAndOut));
    }

    #[test]
    fn test_egg_click_unlocks_secret() {
        // Egg spawns (0.1 < 0.75) centered on its anchor.
        let rng = ScriptedRng::new([0.1, 0.5, 0.5]).with_fallback(0.99);
        let mut host = host(PlayerProfile::new(), rng);
        host.start(QuestId::WindowWitch).expect("start");

        host.click(Vec2::new(600.0, 150.0));
        assert!(host.profile().secret_unlocked());
        assert_eq!(host.take_events(), vec![HostEvent::SecretUnlocked]);
        assert!(host.is_active(), "main quest keeps going");
    }

    #[test]
    fn test_replay_of_completed_quest_allowed() {
        let mut host = host(
            PlayerProfile::from_parts(100, [QuestId::DaWire], false),
            ScriptedRng::constant(0.99),
        );
        assert!(host.start(QuestId::DaWire).is_ok());
    }

    #[test]
    fn test_pump_ticks_then_delivers_events() {
        use crate::core::input::ScriptedInput;

        let mut host = host(PlayerProfile::new(), ScriptedRng::constant(0.99));
        host.start(QuestId::InAndOut).expect("start");
        let mut input = ScriptedInput::new()
            .frame(0.016, [InputEvent::KeyDown(Key::Action)])
            .frame(0.5, [InputEvent::PointerMoved(Vec2::new(10.0, 20.0))]);

        assert!((host.pump(&mut input) - 0.016).abs() < 1e-12);
        assert_eq!(host.profile().energy(), 90);
        host.pump(&mut input);
        assert_eq!(host.pointer(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_new_game_resets_everything() {
        let mut host = host_with_secret();
        host.start(QuestId::DaWire).expect("start");
        host.new_game();
        assert!(!host.is_active());
        assert_eq!(host.profile(), &PlayerProfile::new());
    }
}
