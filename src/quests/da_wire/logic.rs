//! Da Wire game logic: wire swing, lick timing, grip hold, round tally.

use super::types::{DaWireQuest, LickOutcome, WirePhase};
use crate::core::constants::{
    DA_WIRE_ROUNDS, DA_WIRE_WINS_NEEDED, KOSH_POS, WIRE_BASE_SPEED, WIRE_DIFFICULTY_STEP,
    WIRE_GRIP_TARGET_SECONDS, WIRE_LICK_THRESHOLD, WIRE_WATCH_SECONDS,
};
use crate::core::geometry::Vec2;
use crate::core::input::Key;
use crate::core::profile::QuestId;
use crate::core::rng::QuestRng;
use crate::effects::{EffectSystem, Rgb};
use crate::quests::{QuestContext, QuestMachine, QuestOutcome};

/// Swing speed multiplier for a 1-based round: 8% faster each round.
pub fn difficulty_multiplier(round: u32) -> f64 {
    1.0 + f64::from(round.saturating_sub(1)) * WIRE_DIFFICULTY_STEP
}

/// Move the wire, bouncing off the ends of [-1, 1].
pub fn sweep_wire(quest: &mut DaWireQuest, dt: f64) {
    quest.wire_position +=
        WIRE_BASE_SPEED * quest.wire_direction * dt * difficulty_multiplier(quest.round);
    if quest.wire_position > 1.0 {
        quest.wire_position = 1.0;
        quest.wire_direction = -1.0;
    } else if quest.wire_position < -1.0 {
        quest.wire_position = -1.0;
        quest.wire_direction = 1.0;
    }
}

fn end_round(quest: &mut DaWireQuest, won: bool, message: &str) {
    if won {
        quest.wins += 1;
    }
    quest.result_message = Some(format!(
        "{message} (Round {}/{})",
        quest.round, DA_WIRE_ROUNDS
    ));
    quest.phase = WirePhase::RoundResult;
    quest.phase_timer = 0.0;
    quest.action_held = false;
    log::debug!(
        "da wire: round {} {}",
        quest.round,
        if won { "won" } else { "lost" }
    );
}

/// Lick at the wire. Only meaningful in the timing window.
pub fn try_lick(quest: &mut DaWireQuest) -> LickOutcome {
    if quest.phase != WirePhase::TimingWindow {
        return LickOutcome::Ignored;
    }

    if quest.wire_position.abs() < WIRE_LICK_THRESHOLD {
        quest.phase = WirePhase::Hold;
        quest.phase_timer = 0.0;
        quest.grip_progress = 0.0;
        quest.action_held = true;
        LickOutcome::Gripping
    } else {
        end_round(quest, false, "Missed! Try again.");
        LickOutcome::Missed
    }
}

/// Action released. Letting go before the grip target loses the round.
/// Returns true if this ended the round.
pub fn release_grip(quest: &mut DaWireQuest) -> bool {
    quest.action_held = false;
    if quest.phase != WirePhase::Hold {
        return false;
    }
    if quest.grip_progress < WIRE_GRIP_TARGET_SECONDS {
        end_round(quest, false, "Let go too soon!");
        return true;
    }
    false
}

/// Confirm on the round result: next round, or the final verdict.
pub fn acknowledge_result(quest: &mut DaWireQuest) -> bool {
    if quest.phase != WirePhase::RoundResult {
        return false;
    }

    quest.result_message = None;
    if quest.round >= DA_WIRE_ROUNDS {
        quest.outcome = Some(resolve(quest.wins));
        return true;
    }

    quest.round += 1;
    quest.phase = WirePhase::Watch;
    quest.phase_timer = 0.0;
    quest.wire_position = 0.0;
    quest.wire_direction = 1.0;
    quest.grip_progress = 0.0;
    true
}

/// Final verdict for a win tally.
pub fn resolve(wins: u32) -> QuestOutcome {
    if wins >= DA_WIRE_WINS_NEEDED {
        QuestOutcome::success(
            QuestId::DaWire,
            format!("Won {wins}/{DA_WIRE_ROUNDS} rounds. The string is yours!"),
        )
    } else {
        QuestOutcome::failure(
            QuestId::DaWire,
            format!(
                "Only got {wins}/{DA_WIRE_ROUNDS} rounds. Need at least {DA_WIRE_WINS_NEEDED}!"
            ),
        )
    }
}

/// Per-frame update. The wire keeps swinging in every phase.
pub fn tick_da_wire(quest: &mut DaWireQuest, dt: f64, effects: &mut EffectSystem) {
    if quest.outcome.is_some() {
        return;
    }

    sweep_wire(quest, dt);
    quest.phase_timer += dt;

    match quest.phase {
        WirePhase::Watch => {
            if quest.phase_timer >= WIRE_WATCH_SECONDS {
                quest.phase = WirePhase::TimingWindow;
                quest.phase_timer = 0.0;
            }
        }
        WirePhase::Hold => {
            if quest.action_held {
                quest.grip_progress += dt;
            }
            if quest.grip_progress >= WIRE_GRIP_TARGET_SECONDS {
                effects.sparkles(Vec2::from(KOSH_POS), 8, Rgb::GREEN);
                end_round(quest, true, "Perfect! You held on!");
            }
        }
        WirePhase::TimingWindow | WirePhase::RoundResult => {}
    }
}

impl QuestMachine for DaWireQuest {
    fn quest_id(&self) -> QuestId {
        QuestId::DaWire
    }

    fn on_tick<R: QuestRng>(&mut self, dt: f64, ctx: &mut QuestContext<'_, R>) {
        tick_da_wire(self, dt, ctx.effects);
    }

    fn on_key_down<R: QuestRng>(&mut self, key: Key, _ctx: &mut QuestContext<'_, R>) {
        if self.outcome.is_some() {
            return;
        }
        match key {
            Key::Action => {
                try_lick(self);
            }
            Key::Confirm => {
                acknowledge_result(self);
            }
            _ => {}
        }
    }

    fn on_key_up<R: QuestRng>(&mut self, key: Key, _ctx: &mut QuestContext<'_, R>) {
        if self.outcome.is_none() && key == Key::Action {
            release_grip(self);
        }
    }

    fn on_click<R: QuestRng>(&mut self, _pos: Vec2, _ctx: &mut QuestContext<'_, R>) {}

    fn outcome(&self) -> Option<&QuestOutcome> {
        self.outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quests::QuestResult;

    fn at_window(quest: &mut DaWireQuest, position: f64) {
        let mut effects = EffectSystem::seeded(0);
        tick_da_wire(quest, WIRE_WATCH_SECONDS, &mut effects);
        assert_eq!(quest.phase(), WirePhase::TimingWindow);
        quest.wire_position = position;
    }

    fn play_round(quest: &mut DaWireQuest, win: bool) {
        let mut effects = EffectSystem::seeded(0);
        if win {
            at_window(quest, 0.0);
            assert_eq!(try_lick(quest), LickOutcome::Gripping);
            tick_da_wire(quest, WIRE_GRIP_TARGET_SECONDS + 0.01, &mut effects);
        } else {
            at_window(quest, 0.9);
            assert_eq!(try_lick(quest), LickOutcome::Missed);
        }
        assert_eq!(quest.phase(), WirePhase::RoundResult);
        assert!(acknowledge_result(quest));
    }

    #[test]
    fn test_difficulty_multiplier() {
        assert!((difficulty_multiplier(1) - 1.0).abs() < 1e-12);
        assert!((difficulty_multiplier(2) - 1.08).abs() < 1e-12);
        assert!((difficulty_multiplier(5) - 1.32).abs() < 1e-12);
        assert!(difficulty_multiplier(3) > difficulty_multiplier(2));
    }

    #[test]
    fn test_wire_stays_clamped() {
        let mut quest = DaWireQuest::new();
        for step in 0..2000 {
            sweep_wire(&mut quest, 0.013 * f64::from(step % 7));
            assert!((-1.0..=1.0).contains(&quest.wire_position()));
        }
    }

    #[test]
    fn test_wire_bounces_at_end() {
        let mut quest = DaWireQuest::new();
        sweep_wire(&mut quest, 5.0);
        assert_eq!(quest.wire_position(), 1.0);
        sweep_wire(&mut quest, 0.1);
        assert!(quest.wire_position() < 1.0);
    }

    #[test]
    fn test_watch_ignores_action() {
        let mut quest = DaWireQuest::new();
        assert_eq!(try_lick(&mut quest), LickOutcome::Ignored);
        assert_eq!(quest.phase(), WirePhase::Watch);
    }

    #[test]
    fn test_off_center_lick_loses_round() {
        let mut quest = DaWireQuest::new();
        at_window(&mut quest, -0.5);
        assert_eq!(try_lick(&mut quest), LickOutcome::Missed);
        assert_eq!(quest.phase(), WirePhase::RoundResult);
        assert_eq!(quest.wins(), 0);
        assert_eq!(
            quest.result_message(),
            Some("Missed! Try again. (Round 1/5)")
        );
    }

    #[test]
    fn test_early_release_loses_round() {
        let mut effects = EffectSystem::seeded(0);
        let mut quest = DaWireQuest::new();
        at_window(&mut quest, 0.1);
        try_lick(&mut quest);
        tick_da_wire(&mut quest, 0.2, &mut effects);
        assert_eq!(quest.phase(), WirePhase::Hold);
        assert!(release_grip(&mut quest));
        assert_eq!(quest.phase(), WirePhase::RoundResult);
        assert_eq!(quest.wins(), 0);
        assert_eq!(quest.result_message(), Some("Let go too soon! (Round 1/5)"));
    }

    #[test]
    fn test_hold_accumulates_across_ticks() {
        let mut effects = EffectSystem::seeded(0);
        let mut quest = DaWireQuest::new();
        at_window(&mut quest, 0.0);
        try_lick(&mut quest);
        for _ in 0..3 {
            tick_da_wire(&mut quest, 0.1, &mut effects);
        }
        assert_eq!(quest.phase(), WirePhase::Hold);
        assert!(quest.grip_fraction() > 0.5);
        tick_da_wire(&mut quest, 0.15, &mut effects);
        assert_eq!(quest.phase(), WirePhase::RoundResult);
        assert_eq!(quest.wins(), 1);
        assert!(!effects.is_empty());
    }

    #[test]
    fn test_next_round_resets_swing() {
        let mut quest = DaWireQuest::new();
        play_round(&mut quest, false);
        assert_eq!(quest.round(), 2);
        assert_eq!(quest.phase(), WirePhase::Watch);
        assert_eq!(quest.wire_position(), 0.0);
    }

    #[test]
    fn test_outcome_for_every_tally() {
        for wins in 0..=DA_WIRE_ROUNDS {
            let mut quest = DaWireQuest::new();
            for round in 0..DA_WIRE_ROUNDS {
                play_round(&mut quest, round < wins);
            }
            let outcome = quest.outcome().expect("five rounds resolve the quest");
            assert_eq!(outcome.is_success(), wins >= DA_WIRE_WINS_NEEDED);
            assert!(outcome.detail.contains(&format!("{wins}/5")));
        }
    }

    #[test]
    fn test_failure_detail_names_requirement() {
        let outcome = resolve(1);
        assert_eq!(outcome.result, QuestResult::Failure);
        assert_eq!(outcome.detail, "Only got 1/5 rounds. Need at least 2!");
    }
}
