//! In and Out data structures.

use crate::core::constants::{ENERGY_PER_TRIP, KITCHEN_INSIDE_X, KITCHEN_OUTSIDE_X, TRAVEL_SECONDS};
use crate::core::geometry::lerp;
use crate::quests::QuestOutcome;

/// Where Kosh is along the inside/outside loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KoshSpot {
    Inside,
    /// Non-interactive walk to the bowl.
    TravelingOut,
    Outside,
    /// Non-interactive walk back.
    TravelingBack,
}

/// Result of asking for another trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripAttempt {
    /// Energy paid, Kosh is on the way.
    Departed,
    /// Could not pay for the trip; the quest failed.
    OutOfEnergy,
    /// Trip limit reached; the quest failed.
    TripCapReached,
    /// Not inside, or the quest is over.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct InAndOutQuest {
    pub(super) spot: KoshSpot,
    pub(super) travel_timer: f64,
    pub(super) trips: u32,
    pub(super) food_appeared: bool,
    /// Decided once per arrival; only changes the message.
    pub(super) false_alarm: bool,
    pub(super) outcome: Option<QuestOutcome>,
}

impl Default for InAndOutQuest {
    fn default() -> Self {
        Self::new()
    }
}

impl InAndOutQuest {
    pub fn new() -> Self {
        Self {
            spot: KoshSpot::Inside,
            travel_timer: 0.0,
            trips: 0,
            food_appeared: false,
            false_alarm: false,
            outcome: None,
        }
    }

    pub fn spot(&self) -> KoshSpot {
        self.spot
    }

    pub fn trips(&self) -> u32 {
        self.trips
    }

    pub fn food_appeared(&self) -> bool {
        self.food_appeared
    }

    /// Food is drawn in the bowl only while Kosh is there to see it.
    pub fn food_visible(&self) -> bool {
        self.food_appeared && self.spot == KoshSpot::Outside
    }

    /// Kosh's horizontal position in screen space.
    pub fn kosh_x(&self) -> f64 {
        let progress = (self.travel_timer / TRAVEL_SECONDS).clamp(0.0, 1.0);
        match self.spot {
            KoshSpot::Inside => KITCHEN_INSIDE_X,
            KoshSpot::Outside => KITCHEN_OUTSIDE_X,
            KoshSpot::TravelingOut => lerp(KITCHEN_INSIDE_X, KITCHEN_OUTSIDE_X, progress),
            KoshSpot::TravelingBack => lerp(KITCHEN_OUTSIDE_X, KITCHEN_INSIDE_X, progress),
        }
    }

    /// Prompt line for the current spot. `energy` decides the inside hint.
    pub fn message(&self, energy: u32) -> &'static str {
        match self.spot {
            KoshSpot::Inside if self.trips == 0 => "Press SPACE to check the food bowl!",
            KoshSpot::Inside if energy < ENERGY_PER_TRIP => {
                "Not enough energy! You must give up..."
            }
            KoshSpot::Inside => "Press SPACE to check again... or ENTER to give up",
            KoshSpot::Outside if self.food_appeared => "FOOD! There's food! Press ENTER!",
            KoshSpot::Outside if self.false_alarm => {
                "Wait... is that food? No, just the same empty bowl..."
            }
            KoshSpot::Outside => "Empty... Press ENTER to go back inside",
            KoshSpot::TravelingOut | KoshSpot::TravelingBack => "",
        }
    }
}
