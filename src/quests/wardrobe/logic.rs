//! Wardrobe game logic: scripted intro, peek rounds, catch resolution.

use super::types::{WardrobePhase, WardrobeQuest};
use crate::core::constants::{
    APPROACH_SECONDS, CATCH_RADIUS, DOOR_OPEN_SECONDS, JUMP_ARC_HEIGHT, JUMP_SECONDS,
    KOSH_FLOOR_Y, KOSH_INSIDE, KOSH_START_X, PEEK_POSITIONS, PEEK_SECONDS_RANGE,
    ROUND_RESULT_SECONDS, WAIT_SECONDS_RANGE, WARDROBE_CATCHES_NEEDED, WARDROBE_ROUNDS,
    WARDROBE_X,
};
use crate::core::geometry::{lerp, Vec2};
use crate::core::input::Key;
use crate::core::profile::QuestId;
use crate::core::rng::QuestRng;
use crate::effects::{EffectSystem, Rgb};
use crate::quests::{QuestContext, QuestMachine, QuestOutcome};

const JUMP_START_X: f64 = WARDROBE_X - 100.0;

fn enter(quest: &mut WardrobeQuest, phase: WardrobePhase) {
    quest.phase = phase;
    quest.phase_timer = 0.0;
}

/// Begin a round's hidden wait with a random length.
pub fn start_wait<R: QuestRng>(quest: &mut WardrobeQuest, rng: &mut R) {
    enter(quest, WardrobePhase::Waiting);
    quest.target = None;
    quest.phase_duration = rng.draw_range(WAIT_SECONDS_RANGE.0, WAIT_SECONDS_RANGE.1);
}

/// Show the raccoon at a random spot for a random time.
pub fn start_peek<R: QuestRng>(quest: &mut WardrobeQuest, rng: &mut R) {
    enter(quest, WardrobePhase::Peeking);
    quest.phase_duration = rng.draw_range(PEEK_SECONDS_RANGE.0, PEEK_SECONDS_RANGE.1);
    quest.target = rng
        .choose(&PEEK_POSITIONS)
        .map(|&spot| Vec2::from(spot));
}

/// Resolve the current round as a catch or a miss.
///
/// Only acts while peeking, so a click and a timeout landing on the same
/// frame resolve the round once. Returns whether this call resolved it.
pub fn end_peek(quest: &mut WardrobeQuest, caught: bool, effects: &mut EffectSystem) -> bool {
    if quest.phase != WardrobePhase::Peeking {
        return false;
    }

    if caught {
        quest.catches += 1;
        if let Some(target) = quest.target {
            effects.sparkles(target, 8, Rgb::GOLD);
        }
        quest.result_message = Some(format!("Got it! ({}/{})", quest.catches, WARDROBE_ROUNDS));
    } else {
        quest.result_message = Some(format!(
            "Too slow! ({}/{})",
            quest.catches, WARDROBE_ROUNDS
        ));
    }
    quest.target = None;
    enter(quest, WardrobePhase::RoundResult);
    true
}

/// Click during a peek: a catch if close enough to the raccoon.
pub fn process_click(quest: &mut WardrobeQuest, pos: Vec2, effects: &mut EffectSystem) -> bool {
    if quest.outcome.is_some() || quest.phase != WardrobePhase::Peeking {
        return false;
    }
    match quest.target {
        Some(target) if target.distance(pos) < CATCH_RADIUS => end_peek(quest, true, effects),
        _ => false,
    }
}

fn resolve(catches: u32) -> QuestOutcome {
    if catches >= WARDROBE_CATCHES_NEEDED {
        QuestOutcome::success(
            QuestId::WitchInWardrobe,
            format!("Caught the raccoon {catches}/{WARDROBE_ROUNDS} times! The witch is impressed."),
        )
    } else {
        QuestOutcome::failure(
            QuestId::WitchInWardrobe,
            format!(
                "Only caught {catches}/{WARDROBE_ROUNDS}. Need at least {WARDROBE_CATCHES_NEEDED}!"
            ),
        )
    }
}

/// Per-frame update for the intro script and round timers.
pub fn tick_wardrobe<R: QuestRng>(
    quest: &mut WardrobeQuest,
    dt: f64,
    ctx: &mut QuestContext<'_, R>,
) {
    if quest.outcome.is_some() {
        return;
    }
    quest.phase_timer += dt;
    let t = quest.phase_timer;

    match quest.phase {
        WardrobePhase::Approach => {
            quest.kosh.x = lerp(KOSH_START_X, JUMP_START_X, t / APPROACH_SECONDS);
            if t >= APPROACH_SECONDS {
                enter(quest, WardrobePhase::DoorOpening);
            }
        }
        WardrobePhase::DoorOpening => {
            quest.door_openness = lerp(0.0, 1.0, t / DOOR_OPEN_SECONDS);
            if t >= DOOR_OPEN_SECONDS {
                quest.wardrobe_open = true;
                enter(quest, WardrobePhase::Jump);
            }
        }
        WardrobePhase::Jump => {
            let progress = (t / JUMP_SECONDS).min(1.0);
            quest.kosh = Vec2::new(
                lerp(JUMP_START_X, KOSH_INSIDE.0, progress),
                KOSH_FLOOR_Y - (progress * std::f64::consts::PI).sin() * JUMP_ARC_HEIGHT,
            );
            if t >= JUMP_SECONDS {
                quest.kosh = Vec2::from(KOSH_INSIDE);
                start_wait(quest, ctx.rng);
            }
        }
        WardrobePhase::Waiting => {
            if t >= quest.phase_duration {
                start_peek(quest, ctx.rng);
            }
        }
        WardrobePhase::Peeking => {
            if t >= quest.phase_duration {
                end_peek(quest, false, ctx.effects);
            }
        }
        WardrobePhase::RoundResult => {
            if t >= ROUND_RESULT_SECONDS {
                quest.result_message = None;
                if quest.round >= WARDROBE_ROUNDS {
                    quest.outcome = Some(resolve(quest.catches));
                } else {
                    quest.round += 1;
                    start_wait(quest, ctx.rng);
                }
            }
        }
    }
}

impl QuestMachine for WardrobeQuest {
    fn quest_id(&self) -> QuestId {
        QuestId::WitchInWardrobe
    }

    fn on_tick<R: QuestRng>(&mut self, dt: f64, ctx: &mut QuestContext<'_, R>) {
        tick_wardrobe(self, dt, ctx);
    }

    fn on_key_down<R: QuestRng>(&mut self, _key: Key, _ctx: &mut QuestContext<'_, R>) {}

    fn on_key_up<R: QuestRng>(&mut self, _key: Key, _ctx: &mut QuestContext<'_, R>) {}

    fn on_click<R: QuestRng>(&mut self, pos: Vec2, ctx: &mut QuestContext<'_, R>) {
        process_click(self, pos, ctx.effects);
    }

    fn outcome(&self) -> Option<&QuestOutcome> {
        self.outcome.as_ref()
    }
}
