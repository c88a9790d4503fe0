//! Game logic for Window Witch: tactic rolls, the window ask, the egg.

use super::types::{DadTarget, Tactic, WindowWitchQuest, WitchPhase, WitchStep};
use crate::core::constants::{KOSH_POS, WINDOW_CONVINCE_RATE, WINDOW_POS, ZZZ_CHANCE};
use crate::core::geometry::Vec2;
use crate::core::input::Key;
use crate::core::profile::QuestId;
use crate::core::rng::QuestRng;
use crate::effects::Rgb;
use crate::quests::{QuestContext, QuestMachine, QuestOutcome};

/// Result of trying a tactic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TacticOutcome {
    /// Not enough energy; nothing spent, nothing rolled.
    Rejected,
    /// Energy spent, roll failed.
    Failed,
    /// Energy spent, this dad is now awake.
    Succeeded(DadTarget),
    /// Not choosing a tactic right now.
    Ignored,
}

const TOO_TIRED: &str = "Too tired! Not enough energy.";
const WINDOW_OPENED: &str = "Success! The dads opened the window. Bird watching time!";
const WINDOW_REFUSED: &str = "They said \"later, Kosh...\" Maybe try again?";
const EGG_FOUND: &str =
    "You found a secret easter egg! A mysterious wardrobe has appeared in the overworld...";

/// Spend the tactic's energy and roll against its success rate.
pub fn select_tactic<R: QuestRng>(
    quest: &mut WindowWitchQuest,
    tactic: Tactic,
    ctx: &mut QuestContext<'_, R>,
) -> TacticOutcome {
    let target = match quest.phase {
        WitchPhase::ChoosingTactic(target) => target,
        _ => return TacticOutcome::Ignored,
    };

    let kosh = Vec2::from(KOSH_POS);
    if tactic == Tactic::Meow {
        ctx.effects.sparkles(kosh, 3, Rgb::GOLD);
    }

    if !ctx.profile.try_spend(tactic.energy_cost()) {
        quest.phase = WitchPhase::Resolving {
            message: TOO_TIRED.to_string(),
            next: WitchStep::Choose(target),
        };
        quest.kosh_action = None;
        return TacticOutcome::Rejected;
    }
    quest.kosh_action = Some(tactic);

    let success = ctx.rng.chance(tactic.success_rate());
    log::debug!(
        "window witch: {} against {} -> {}",
        tactic.name(),
        target.label(),
        if success { "awake" } else { "still asleep" }
    );

    if !success {
        quest.phase = WitchPhase::Resolving {
            message: format!("{} failed. They just rolled over...", tactic.name()),
            next: WitchStep::Choose(target),
        };
        return TacticOutcome::Failed;
    }

    ctx.effects.sparkles(kosh + Vec2::new(0.0, -20.0), 8, Rgb::GREEN);
    quest.dads_awake[target.index()] = true;
    let (message, next) = match target {
        DadTarget::One => (
            format!("{} worked! Dad 1 is awake and grumbling.", tactic.name()),
            WitchStep::Choose(DadTarget::Two),
        ),
        DadTarget::Two => (
            format!("{} worked! Dad 2 is awake too!", tactic.name()),
            WitchStep::Convince,
        ),
    };
    quest.phase = WitchPhase::Resolving { message, next };
    TacticOutcome::Succeeded(target)
}

/// Ask the awake dads to open the window. Free and repeatable.
/// Returns true when the window opens (quest success).
pub fn try_convince<R: QuestRng>(
    quest: &mut WindowWitchQuest,
    ctx: &mut QuestContext<'_, R>,
) -> bool {
    if quest.phase != WitchPhase::ConvinceWindow {
        return false;
    }

    if !ctx.rng.chance(WINDOW_CONVINCE_RATE) {
        quest.phase = WitchPhase::Resolving {
            message: WINDOW_REFUSED.to_string(),
            next: WitchStep::Convince,
        };
        return false;
    }

    quest.window_open = true;
    let window = Vec2::from(WINDOW_POS);
    ctx.effects.sparkles(window, 15, Rgb::GOLD);
    ctx.effects.sparkles(window, 15, Rgb::ROSE);
    quest.phase = WitchPhase::Resolved;
    quest.outcome = Some(QuestOutcome::success(QuestId::WindowWitch, WINDOW_OPENED));
    true
}

/// Close the result dialog and resume at the recorded step.
pub fn dismiss_dialog(quest: &mut WindowWitchQuest) -> bool {
    if let WitchPhase::Resolving { next, .. } = quest.phase {
        quest.phase = next.into();
        quest.kosh_action = None;
        return true;
    }
    false
}

/// Move the tactic cursor (wrapping).
pub fn move_selection(quest: &mut WindowWitchQuest, key: Key) {
    if !matches!(quest.phase, WitchPhase::ChoosingTactic(_)) {
        return;
    }
    let len = Tactic::ALL.len();
    match key {
        Key::Up => quest.selected = (quest.selected + len - 1) % len,
        Key::Down => quest.selected = (quest.selected + 1) % len,
        _ => {}
    }
}

/// Route a key press to the current phase.
pub fn process_key<R: QuestRng>(
    quest: &mut WindowWitchQuest,
    key: Key,
    ctx: &mut QuestContext<'_, R>,
) {
    if quest.outcome.is_some() {
        return;
    }

    match (&quest.phase, key) {
        (WitchPhase::Resolving { .. }, Key::Confirm) => {
            dismiss_dialog(quest);
        }
        (WitchPhase::ChoosingTactic(_), Key::Up | Key::Down) => move_selection(quest, key),
        (WitchPhase::ChoosingTactic(_), Key::Confirm) => {
            let tactic = quest.selected_tactic();
            select_tactic(quest, tactic, ctx);
        }
        (WitchPhase::ConvinceWindow, Key::Confirm) => {
            try_convince(quest, ctx);
        }
        _ => {}
    }
}

/// Check a click against the egg. Consumes the egg at most once and works in
/// any phase before the quest resolves. Returns true if the egg was caught.
pub fn process_click<R: QuestRng>(
    quest: &mut WindowWitchQuest,
    pos: Vec2,
    ctx: &mut QuestContext<'_, R>,
) -> bool {
    if quest.outcome.is_some() {
        return false;
    }
    let egg = match quest.egg {
        Some(egg) if egg.contains(pos) => egg,
        _ => return false,
    };

    quest.egg = None;
    quest.secret_found = true;
    ctx.effects.sparkles(egg.position(), 90, Rgb::LILAC);

    let next = match &quest.phase {
        WitchPhase::ChoosingTactic(target) => WitchStep::Choose(*target),
        WitchPhase::Resolving { next, .. } => *next,
        WitchPhase::ConvinceWindow | WitchPhase::Resolved => WitchStep::Convince,
    };
    quest.phase = WitchPhase::Resolving {
        message: EGG_FOUND.to_string(),
        next,
    };
    log::info!("window witch: easter egg found");
    true
}

/// Per-frame update: egg bobbing and sleepy Zs.
pub fn tick_window_witch<R: QuestRng>(
    quest: &mut WindowWitchQuest,
    dt: f64,
    ctx: &mut QuestContext<'_, R>,
) {
    if quest.outcome.is_some() {
        return;
    }
    if let Some(egg) = quest.egg.as_mut() {
        egg.advance(dt);
    }
    for dad in [DadTarget::One, DadTarget::Two] {
        if !quest.is_awake(dad) {
            ctx.effects.maybe_zzz(dad.head(), ZZZ_CHANCE);
        }
    }
}

impl QuestMachine for WindowWitchQuest {
    fn quest_id(&self) -> QuestId {
        QuestId::WindowWitch
    }

    fn on_tick<R: QuestRng>(&mut self, dt: f64, ctx: &mut QuestContext<'_, R>) {
        tick_window_witch(self, dt, ctx);
    }

    fn on_key_down<R: QuestRng>(&mut self, key: Key, ctx: &mut QuestContext<'_, R>) {
        process_key(self, key, ctx);
    }

    fn on_key_up<R: QuestRng>(&mut self, _key: Key, _ctx: &mut QuestContext<'_, R>) {}

    fn on_click<R: QuestRng>(&mut self, pos: Vec2, ctx: &mut QuestContext<'_, R>) {
        process_click(self, pos, ctx);
    }

    fn outcome(&self) -> Option<&QuestOutcome> {
        self.outcome.as_ref()
    }

    fn take_secret_discovery(&mut self) -> bool {
        std::mem::take(&mut self.secret_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::PlayerProfile;
    use crate::core::rng::ScriptedRng;
    use crate::effects::EffectSystem;
    use crate::quests::window_witch::types::EasterEgg;

    struct Fixture {
        profile: PlayerProfile,
        effects: EffectSystem,
        rng: ScriptedRng,
    }

    impl Fixture {
        fn new(energy: u32, draws: &[f64]) -> Self {
            Self {
                profile: PlayerProfile::with_energy(energy),
                effects: EffectSystem::seeded(0),
                rng: ScriptedRng::new(draws.iter().copied()).with_fallback(0.99),
            }
        }

        fn ctx(&mut self) -> QuestContext<'_, ScriptedRng> {
            QuestContext::new(&mut self.profile, &mut self.effects, &mut self.rng)
        }
    }

    #[test]
    fn test_rejected_tactic_changes_nothing() {
        let mut fx = Fixture::new(4, &[0.0]);
        let mut quest = WindowWitchQuest::with_egg(None);

        let outcome = select_tactic(&mut quest, Tactic::Meow, &mut fx.ctx());

        assert_eq!(outcome, TacticOutcome::Rejected);
        assert_eq!(fx.profile.energy(), 4);
        assert_eq!(quest.target(), Some(DadTarget::One));
        assert_eq!(fx.rng.remaining(), 1, "no roll on rejection");
        assert_eq!(quest.dialog(), Some(TOO_TIRED));
        assert!(quest.kosh_action().is_none());
    }

    #[test]
    fn test_success_against_dad_one_advances_target() {
        let mut fx = Fixture::new(100, &[0.0]);
        let mut quest = WindowWitchQuest::with_egg(None);

        let outcome = select_tactic(&mut quest, Tactic::PawTap, &mut fx.ctx());

        assert_eq!(outcome, TacticOutcome::Succeeded(DadTarget::One));
        assert_eq!(fx.profile.energy(), 97);
        assert!(quest.is_awake(DadTarget::One));
        assert_eq!(quest.target(), Some(DadTarget::Two));
        assert!(dismiss_dialog(&mut quest));
        assert_eq!(quest.phase(), &WitchPhase::ChoosingTactic(DadTarget::Two));
    }

    #[test]
    fn test_failed_roll_spends_energy_keeps_target() {
        let mut fx = Fixture::new(100, &[0.7]);
        let mut quest = WindowWitchQuest::with_egg(None);

        let outcome = select_tactic(&mut quest, Tactic::PawTap, &mut fx.ctx());

        assert_eq!(outcome, TacticOutcome::Failed);
        assert_eq!(fx.profile.energy(), 97);
        assert!(!quest.is_awake(DadTarget::One));
        assert_eq!(quest.target(), Some(DadTarget::One));
        assert_eq!(quest.kosh_action(), Some(Tactic::PawTap));
    }

    #[test]
    fn test_success_against_dad_two_moves_to_convince() {
        let mut fx = Fixture::new(100, &[0.0, 0.0]);
        let mut quest = WindowWitchQuest::with_egg(None);

        select_tactic(&mut quest, Tactic::Zoomies, &mut fx.ctx());
        dismiss_dialog(&mut quest);
        let outcome = select_tactic(&mut quest, Tactic::Zoomies, &mut fx.ctx());
        dismiss_dialog(&mut quest);

        assert_eq!(outcome, TacticOutcome::Succeeded(DadTarget::Two));
        assert_eq!(quest.phase(), &WitchPhase::ConvinceWindow);
        assert!(quest.target().is_none());
        assert_eq!(fx.profile.energy(), 70);

        // Tactics are no longer accepted.
        let again = select_tactic(&mut quest, Tactic::Meow, &mut fx.ctx());
        assert_eq!(again, TacticOutcome::Ignored);
        assert_eq!(fx.profile.energy(), 70);
    }

    #[test]
    fn test_convince_failure_is_replayable_and_free() {
        let mut fx = Fixture::new(100, &[0.95, 0.95, 0.1]);
        let mut quest = WindowWitchQuest::with_egg(None);
        quest.dads_awake = [true, true];
        quest.phase = WitchPhase::ConvinceWindow;

        assert!(!try_convince(&mut quest, &mut fx.ctx()));
        dismiss_dialog(&mut quest);
        assert!(!try_convince(&mut quest, &mut fx.ctx()));
        dismiss_dialog(&mut quest);
        assert_eq!(quest.phase(), &WitchPhase::ConvinceWindow);
        assert!(try_convince(&mut quest, &mut fx.ctx()));

        assert_eq!(fx.profile.energy(), 100);
        assert!(quest.window_open());
        assert_eq!(quest.phase(), &WitchPhase::Resolved);
        let outcome = quest.outcome().expect("quest should resolve");
        assert!(outcome.is_success());
        assert_eq!(outcome.quest, QuestId::WindowWitch);
    }

    #[test]
    fn test_keys_drive_full_quest() {
        let mut fx = Fixture::new(100, &[0.0, 0.0, 0.0]);
        let mut quest = WindowWitchQuest::with_egg(None);

        // Select Gentle Paw Taps.
        process_key(&mut quest, Key::Down, &mut fx.ctx());
        assert_eq!(quest.selected_tactic(), Tactic::PawTap);
        process_key(&mut quest, Key::Confirm, &mut fx.ctx());
        process_key(&mut quest, Key::Confirm, &mut fx.ctx());
        process_key(&mut quest, Key::Confirm, &mut fx.ctx());
        process_key(&mut quest, Key::Confirm, &mut fx.ctx());
        assert_eq!(quest.phase(), &WitchPhase::ConvinceWindow);
        process_key(&mut quest, Key::Confirm, &mut fx.ctx());

        assert!(quest.is_terminal());
        assert_eq!(fx.profile.energy(), 94);
    }

    #[test]
    fn test_selection_wraps() {
        let mut quest = WindowWitchQuest::with_egg(None);
        move_selection(&mut quest, Key::Up);
        assert_eq!(quest.selected_tactic(), Tactic::Zoomies);
        move_selection(&mut quest, Key::Down);
        assert_eq!(quest.selected_tactic(), Tactic::Meow);
    }

    #[test]
    fn test_selection_frozen_during_dialog() {
        let mut fx = Fixture::new(0, &[]);
        let mut quest = WindowWitchQuest::with_egg(None);
        select_tactic(&mut quest, Tactic::Meow, &mut fx.ctx());
        move_selection(&mut quest, Key::Down);
        assert_eq!(quest.selected_tactic(), Tactic::Meow);
    }

    #[test]
    fn test_egg_click_consumed_once() {
        let mut fx = Fixture::new(100, &[]);
        let mut quest = WindowWitchQuest::with_egg(Some(EasterEgg::new(Vec2::new(600.0, 150.0))));

        assert!(!process_click(&mut quest, Vec2::new(100.0, 100.0), &mut fx.ctx()));
        assert!(process_click(&mut quest, Vec2::new(610.0, 160.0), &mut fx.ctx()));
        assert!(quest.egg().is_none());
        assert!(quest.take_secret_discovery());
        assert!(!quest.take_secret_discovery());
        assert!(!process_click(&mut quest, Vec2::new(610.0, 160.0), &mut fx.ctx()));
        assert_eq!(fx.effects.len(), 90);
    }

    #[test]
    fn test_egg_click_preserves_main_progress() {
        let mut fx = Fixture::new(100, &[0.0]);
        let mut quest = WindowWitchQuest::with_egg(Some(EasterEgg::new(Vec2::new(600.0, 150.0))));

        select_tactic(&mut quest, Tactic::PawTap, &mut fx.ctx());
        process_click(&mut quest, Vec2::new(600.0, 150.0), &mut fx.ctx());
        assert_eq!(quest.dialog(), Some(EGG_FOUND));
        dismiss_dialog(&mut quest);

        assert_eq!(quest.phase(), &WitchPhase::ChoosingTactic(DadTarget::Two));
        assert!(quest.is_awake(DadTarget::One));
    }

    #[test]
    fn test_tick_spawns_zzz_only_for_sleeping_dads() {
        let mut fx = Fixture::new(100, &[]);
        let mut quest = WindowWitchQuest::with_egg(None);
        quest.dads_awake = [true, true];
        for _ in 0..200 {
            tick_window_witch(&mut quest, 0.016, &mut fx.ctx());
        }
        assert!(fx.effects.is_empty());

        quest.dads_awake = [false, true];
        for _ in 0..1000 {
            tick_window_witch(&mut quest, 0.0, &mut fx.ctx());
        }
        assert!(!fx.effects.is_empty());
        assert!(fx
            .effects
            .particles()
            .iter()
            .all(|p| p.position == DadTarget::One.head()));
    }

    #[test]
    fn test_energy_stall_has_no_failure_transition() {
        let mut fx = Fixture::new(2, &[]);
        let mut quest = WindowWitchQuest::with_egg(None);
        for tactic in Tactic::ALL {
            assert_eq!(
                select_tactic(&mut quest, tactic, &mut fx.ctx()),
                TacticOutcome::Rejected
            );
            dismiss_dialog(&mut quest);
        }
        tick_window_witch(&mut quest, 10.0, &mut fx.ctx());
        assert!(!quest.is_terminal());
        assert_eq!(fx.profile.energy(), 2);
    }
}
