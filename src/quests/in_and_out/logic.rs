//! In and Out game logic: paid trips, food rolls, give-up and forced endings.

use super::types::{InAndOutQuest, KoshSpot, TripAttempt};
use crate::core::constants::{
    ENERGY_PER_TRIP, FALSE_ALARM_CHANCE, FOOD_BOWL_POS, FOOD_CHANCE, IN_AND_OUT_MAX_TRIPS,
    MIN_TRIPS_FOR_FOOD, TRAVEL_SECONDS,
};
use crate::core::geometry::Vec2;
use crate::core::input::Key;
use crate::core::profile::QuestId;
use crate::core::rng::QuestRng;
use crate::effects::Rgb;
use crate::quests::{QuestContext, QuestMachine, QuestOutcome};

/// Pay for a trip and head out. Both refusals end the run.
pub fn attempt_trip<R: QuestRng>(
    quest: &mut InAndOutQuest,
    ctx: &mut QuestContext<'_, R>,
) -> TripAttempt {
    if quest.outcome.is_some() || quest.spot != KoshSpot::Inside {
        return TripAttempt::Ignored;
    }

    if !ctx.profile.can_afford(ENERGY_PER_TRIP) {
        quest.outcome = Some(QuestOutcome::failure(
            QuestId::InAndOut,
            format!(
                "Ran out of energy after {} trips! No food found. The hunger continues...",
                quest.trips
            ),
        ));
        return TripAttempt::OutOfEnergy;
    }

    if quest.trips >= IN_AND_OUT_MAX_TRIPS {
        quest.outcome = Some(QuestOutcome::failure(
            QuestId::InAndOut,
            format!(
                "Checked {IN_AND_OUT_MAX_TRIPS} times! That's enough for today. Still no food..."
            ),
        ));
        return TripAttempt::TripCapReached;
    }

    if !ctx.profile.try_spend(ENERGY_PER_TRIP) {
        return TripAttempt::OutOfEnergy;
    }
    quest.trips += 1;
    quest.spot = KoshSpot::TravelingOut;
    quest.travel_timer = 0.0;
    TripAttempt::Departed
}

/// Kosh reaches the bowl: maybe roll for food, then for a false alarm.
/// The false alarm is flavor text, so it draws from the cosmetic generator.
fn arrive_outside<R: QuestRng>(quest: &mut InAndOutQuest, ctx: &mut QuestContext<'_, R>) {
    quest.spot = KoshSpot::Outside;
    quest.travel_timer = 0.0;

    if !quest.food_appeared && quest.trips >= MIN_TRIPS_FOR_FOOD && ctx.rng.chance(FOOD_CHANCE) {
        quest.food_appeared = true;
        log::debug!("in and out: food appeared on trip {}", quest.trips);
    }

    quest.false_alarm =
        !quest.food_appeared && quest.trips > 0 && ctx.effects.roll(FALSE_ALARM_CHANCE);
}

/// Confirm: eat if food is there, otherwise walk back; inside, give up.
pub fn confirm<R: QuestRng>(quest: &mut InAndOutQuest, ctx: &mut QuestContext<'_, R>) {
    if quest.outcome.is_some() {
        return;
    }

    match quest.spot {
        KoshSpot::Outside if quest.food_appeared => {
            ctx.effects.sparkles(Vec2::from(FOOD_BOWL_POS), 8, Rgb::GREEN);
            quest.outcome = Some(QuestOutcome::success(
                QuestId::InAndOut,
                format!(
                    "SUCCESS! Food appeared after {} trips! Time to eat!",
                    quest.trips
                ),
            ));
        }
        KoshSpot::Outside => {
            quest.spot = KoshSpot::TravelingBack;
            quest.travel_timer = 0.0;
            quest.false_alarm = false;
        }
        KoshSpot::Inside if quest.trips > 0 => give_up(quest),
        _ => {}
    }
}

/// Voluntary end of the run.
pub fn give_up(quest: &mut InAndOutQuest) {
    if quest.outcome.is_some() || quest.spot != KoshSpot::Inside || quest.trips == 0 {
        return;
    }
    quest.outcome = Some(QuestOutcome::failure(
        QuestId::InAndOut,
        format!(
            "Gave up after {} trips. Maybe there will be food next time?",
            quest.trips
        ),
    ));
}

/// Per-frame update: advance the walk between rooms.
pub fn tick_in_and_out<R: QuestRng>(
    quest: &mut InAndOutQuest,
    dt: f64,
    ctx: &mut QuestContext<'_, R>,
) {
    if quest.outcome.is_some() {
        return;
    }

    match quest.spot {
        KoshSpot::TravelingOut | KoshSpot::TravelingBack => {
            quest.travel_timer += dt;
            if quest.travel_timer >= TRAVEL_SECONDS {
                if quest.spot == KoshSpot::TravelingOut {
                    arrive_outside(quest, ctx);
                } else {
                    quest.spot = KoshSpot::Inside;
                    quest.travel_timer = 0.0;
                }
            }
        }
        KoshSpot::Inside | KoshSpot::Outside => {}
    }
}

impl QuestMachine for InAndOutQuest {
    fn quest_id(&self) -> QuestId {
        QuestId::InAndOut
    }

    fn on_tick<R: QuestRng>(&mut self, dt: f64, ctx: &mut QuestContext<'_, R>) {
        tick_in_and_out(self, dt, ctx);
    }

    fn on_key_down<R: QuestRng>(&mut self, key: Key, ctx: &mut QuestContext<'_, R>) {
        match key {
            Key::Action => {
                attempt_trip(self, ctx);
            }
            Key::Confirm => confirm(self, ctx),
            _ => {}
        }
    }

    fn on_key_up<R: QuestRng>(&mut self, _key: Key, _ctx: &mut QuestContext<'_, R>) {}

    fn on_click<R: QuestRng>(&mut self, _pos: Vec2, _ctx: &mut QuestContext<'_, R>) {}

    fn outcome(&self) -> Option<&QuestOutcome> {
        self.outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::PlayerProfile;
    use crate::core::rng::ScriptedRng;
    use crate::effects::EffectSystem;

    struct Fixture {
        profile: PlayerProfile,
        effects: EffectSystem,
        rng: ScriptedRng,
    }

    impl Fixture {
        fn new(energy: u32, rng: ScriptedRng) -> Self {
            Self {
                profile: PlayerProfile::with_energy(energy),
                effects: EffectSystem::seeded(0),
                rng,
            }
        }

        fn ctx(&mut self) -> QuestContext<'_, ScriptedRng> {
            QuestContext::new(&mut self.profile, &mut self.effects, &mut self.rng)
        }
    }

    /// Inside -> Outside, one full walk.
    fn go_out(quest: &mut InAndOutQuest, fx: &mut Fixture) -> TripAttempt {
        let attempt = attempt_trip(quest, &mut fx.ctx());
        if attempt == TripAttempt::Departed {
            tick_in_and_out(quest, TRAVEL_SECONDS, &mut fx.ctx());
        }
        attempt
    }

    /// Outside (no food) -> Inside.
    fn go_back(quest: &mut InAndOutQuest, fx: &mut Fixture) {
        confirm(quest, &mut fx.ctx());
        assert_eq!(quest.spot(), KoshSpot::TravelingBack);
        tick_in_and_out(quest, TRAVEL_SECONDS, &mut fx.ctx());
        assert_eq!(quest.spot(), KoshSpot::Inside);
    }

    #[test]
    fn test_trip_pays_eagerly() {
        let mut fx = Fixture::new(100, ScriptedRng::constant(0.99));
        let mut quest = InAndOutQuest::new();

        assert_eq!(attempt_trip(&mut quest, &mut fx.ctx()), TripAttempt::Departed);
        assert_eq!(fx.profile.energy(), 90);
        assert_eq!(quest.trips(), 1);
        assert_eq!(quest.spot(), KoshSpot::TravelingOut);

        // Travel is not interactive.
        assert_eq!(attempt_trip(&mut quest, &mut fx.ctx()), TripAttempt::Ignored);
        confirm(&mut quest, &mut fx.ctx());
        assert_eq!(quest.spot(), KoshSpot::TravelingOut);
        assert_eq!(fx.profile.energy(), 90);
    }

    #[test]
    fn test_travel_takes_a_second() {
        let mut fx = Fixture::new(100, ScriptedRng::constant(0.99));
        let mut quest = InAndOutQuest::new();
        attempt_trip(&mut quest, &mut fx.ctx());
        tick_in_and_out(&mut quest, 0.6, &mut fx.ctx());
        assert_eq!(quest.spot(), KoshSpot::TravelingOut);
        tick_in_and_out(&mut quest, 0.4, &mut fx.ctx());
        assert_eq!(quest.spot(), KoshSpot::Outside);
    }

    #[test]
    fn test_early_trips_draw_nothing_from_gameplay_rng() {
        let mut fx = Fixture::new(100, ScriptedRng::new([0.0]));
        let mut quest = InAndOutQuest::new();
        go_out(&mut quest, &mut fx);
        assert!(!quest.food_appeared());
        assert_eq!(fx.rng.remaining(), 1);
        go_back(&mut quest, &mut fx);
        go_out(&mut quest, &mut fx);
        assert!(!quest.food_appeared());
        assert_eq!(fx.rng.remaining(), 1);
    }

    #[test]
    fn test_false_alarm_does_not_shift_food_roll() {
        // Whatever the cosmetic rolls do, the first gameplay draw is trip 3's food roll.
        for seed in 0..8 {
            let mut fx = Fixture::new(100, ScriptedRng::new([0.1]).with_fallback(0.99));
            fx.effects = EffectSystem::seeded(seed);
            let mut quest = InAndOutQuest::new();
            go_out(&mut quest, &mut fx);
            go_back(&mut quest, &mut fx);
            go_out(&mut quest, &mut fx);
            go_back(&mut quest, &mut fx);
            go_out(&mut quest, &mut fx);
            assert!(quest.food_visible(), "seed {seed}");
            assert_eq!(fx.rng.remaining(), 0);
        }
    }

    #[test]
    fn test_food_found_on_third_trip() {
        let mut fx = Fixture::new(100, ScriptedRng::new([0.1]).with_fallback(0.99));
        let mut quest = InAndOutQuest::new();
        go_out(&mut quest, &mut fx);
        go_back(&mut quest, &mut fx);
        go_out(&mut quest, &mut fx);
        go_back(&mut quest, &mut fx);
        go_out(&mut quest, &mut fx);

        assert!(quest.food_visible());
        assert_eq!(quest.message(fx.profile.energy()), "FOOD! There's food! Press ENTER!");
        confirm(&mut quest, &mut fx.ctx());
        let outcome = quest.outcome().expect("eating ends the quest");
        assert!(outcome.is_success());
        assert_eq!(outcome.detail, "SUCCESS! Food appeared after 3 trips! Time to eat!");
        assert_eq!(fx.profile.energy(), 70);
    }

    #[test]
    fn test_food_persists_once_appeared() {
        let mut fx = Fixture::new(100, ScriptedRng::constant(0.99));
        let mut quest = InAndOutQuest::new();
        quest.trips = 4;
        quest.food_appeared = true;

        go_out(&mut quest, &mut fx);
        assert!(quest.food_visible());
        assert_eq!(fx.rng.remaining(), 0);
        assert!(!quest.false_alarm);
    }

    #[test]
    fn test_false_alarm_only_changes_message() {
        let mut fx = Fixture::new(100, ScriptedRng::constant(0.99));
        let mut quest = InAndOutQuest::new();
        go_out(&mut quest, &mut fx);
        quest.false_alarm = true;

        assert!(!quest.food_appeared());
        assert_eq!(
            quest.message(fx.profile.energy()),
            "Wait... is that food? No, just the same empty bowl..."
        );
        go_back(&mut quest, &mut fx);
        assert!(!quest.false_alarm);
        assert!(quest.outcome().is_none());
    }

    #[test]
    fn test_exact_energy_allows_one_trip() {
        let mut fx = Fixture::new(ENERGY_PER_TRIP, ScriptedRng::constant(0.99));
        let mut quest = InAndOutQuest::new();

        assert_eq!(go_out(&mut quest, &mut fx), TripAttempt::Departed);
        go_back(&mut quest, &mut fx);
        assert_eq!(fx.profile.energy(), 0);

        assert_eq!(attempt_trip(&mut quest, &mut fx.ctx()), TripAttempt::OutOfEnergy);
        assert_eq!(quest.trips(), 1);
        let outcome = quest.outcome().expect("forced failure");
        assert!(!outcome.is_success());
        assert!(outcome.detail.starts_with("Ran out of energy after 1 trips!"));
    }

    #[test]
    fn test_trip_cap_forces_failure() {
        let mut fx = Fixture::new(100, ScriptedRng::constant(0.99));
        let mut quest = InAndOutQuest::new();
        quest.trips = IN_AND_OUT_MAX_TRIPS;

        assert_eq!(attempt_trip(&mut quest, &mut fx.ctx()), TripAttempt::TripCapReached);
        assert_eq!(fx.profile.energy(), 100);
        assert!(quest.is_terminal());
    }

    #[test]
    fn test_give_up_needs_a_trip() {
        let mut fx = Fixture::new(100, ScriptedRng::constant(0.99));
        let mut quest = InAndOutQuest::new();
        confirm(&mut quest, &mut fx.ctx());
        assert!(quest.outcome().is_none());

        go_out(&mut quest, &mut fx);
        go_back(&mut quest, &mut fx);
        confirm(&mut quest, &mut fx.ctx());
        let outcome = quest.outcome().expect("gave up");
        assert_eq!(
            outcome.detail,
            "Gave up after 1 trips. Maybe there will be food next time?"
        );
    }

    #[test]
    fn test_terminal_quest_ignores_input() {
        let mut fx = Fixture::new(0, ScriptedRng::constant(0.0));
        let mut quest = InAndOutQuest::new();
        attempt_trip(&mut quest, &mut fx.ctx());
        let before = quest.outcome().cloned();
        quest.on_key_down(Key::Action, &mut fx.ctx());
        quest.on_tick(5.0, &mut fx.ctx());
        assert_eq!(quest.outcome().cloned(), before);
    }
}
