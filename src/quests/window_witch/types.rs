//! Window Witch data structures.

use crate::core::constants::{
    DAD_ONE_HEAD, DAD_TWO_HEAD, EGG_ANCHOR, EGG_BOB_AMPLITUDE, EGG_BOB_SPEED, EGG_CLICK_RADIUS,
    EGG_JITTER_X, EGG_JITTER_Y, EGG_SPAWN_CHANCE,
};
use crate::core::geometry::Vec2;
use crate::core::rng::QuestRng;
use crate::quests::{QuestContext, QuestOutcome};

/// A wake-up tactic with a fixed success chance and energy cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tactic {
    Meow,
    PawTap,
    Zoomies,
}

impl Tactic {
    pub const ALL: [Tactic; 3] = [Tactic::Meow, Tactic::PawTap, Tactic::Zoomies];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Tactic::Meow)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Meow => "Meow Loudly",
            Self::PawTap => "Gentle Paw Taps",
            Self::Zoomies => "3 AM Zoomies",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Meow => "Classic approach",
            Self::PawTap => "Soft and persistent",
            Self::Zoomies => "Maximum chaos",
        }
    }

    pub fn success_rate(&self) -> f64 {
        match self {
            Self::Meow => 0.6,
            Self::PawTap => 0.7,
            Self::Zoomies => 0.8,
        }
    }

    pub fn energy_cost(&self) -> u32 {
        match self {
            Self::Meow => 5,
            Self::PawTap => 3,
            Self::Zoomies => 15,
        }
    }
}

/// Which dad the tactics are aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DadTarget {
    One,
    Two,
}

impl DadTarget {
    pub fn index(&self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// Where the Zs float up from while this dad sleeps.
    pub fn head(&self) -> Vec2 {
        match self {
            Self::One => DAD_ONE_HEAD.into(),
            Self::Two => DAD_TWO_HEAD.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::One => "Dad 1",
            Self::Two => "Dad 2",
        }
    }
}

/// Where play resumes once a result dialog is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WitchStep {
    Choose(DadTarget),
    Convince,
}

impl From<WitchStep> for WitchPhase {
    fn from(step: WitchStep) -> Self {
        match step {
            WitchStep::Choose(target) => WitchPhase::ChoosingTactic(target),
            WitchStep::Convince => WitchPhase::ConvinceWindow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WitchPhase {
    /// Picking a tactic against the given dad.
    ChoosingTactic(DadTarget),
    /// Showing the result of the last action until Confirm.
    Resolving { message: String, next: WitchStep },
    /// Both dads awake; asking for the window.
    ConvinceWindow,
    /// Window open, quest over.
    Resolved,
}

/// The bobbing secret egg. Its click target follows the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasterEgg {
    anchor: Vec2,
    bob_phase: f64,
}

impl EasterEgg {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            anchor,
            bob_phase: 0.0,
        }
    }

    /// Current on-screen position including the bob offset.
    pub fn position(&self) -> Vec2 {
        Vec2::new(
            self.anchor.x,
            self.anchor.y + self.bob_phase.sin() * EGG_BOB_AMPLITUDE,
        )
    }

    pub fn advance(&mut self, dt: f64) {
        self.bob_phase += dt * EGG_BOB_SPEED;
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.position().distance(point) < EGG_CLICK_RADIUS
    }
}

/// Main quest state. Fields are private to the quest; renderers use the
/// read-only accessors.
#[derive(Debug, Clone)]
pub struct WindowWitchQuest {
    pub(super) phase: WitchPhase,
    pub(super) selected: usize,
    pub(super) dads_awake: [bool; 2],
    pub(super) window_open: bool,
    pub(super) kosh_action: Option<Tactic>,
    pub(super) egg: Option<EasterEgg>,
    pub(super) secret_found: bool,
    pub(super) outcome: Option<QuestOutcome>,
}

impl WindowWitchQuest {
    /// Start the quest. Rolls once for the egg unless the secret is already
    /// unlocked.
    pub fn new<R: QuestRng>(ctx: &mut QuestContext<'_, R>) -> Self {
        let egg = if !ctx.profile.secret_unlocked() && ctx.rng.chance(EGG_SPAWN_CHANCE) {
            let anchor = Vec2::new(
                EGG_ANCHOR.0 + ctx.rng.draw_range(-EGG_JITTER_X, EGG_JITTER_X),
                EGG_ANCHOR.1 + ctx.rng.draw_range(-EGG_JITTER_Y, EGG_JITTER_Y),
            );
            Some(EasterEgg::new(anchor))
        } else {
            None
        };

        Self::with_egg(egg)
    }

    /// Start with an explicit egg placement (or none).
    pub fn with_egg(egg: Option<EasterEgg>) -> Self {
        Self {
            phase: WitchPhase::ChoosingTactic(DadTarget::One),
            selected: 0,
            dads_awake: [false, false],
            window_open: false,
            kosh_action: None,
            egg,
            secret_found: false,
            outcome: None,
        }
    }

    pub fn phase(&self) -> &WitchPhase {
        &self.phase
    }

    /// The dad currently being targeted, if tactics are still in play.
    pub fn target(&self) -> Option<DadTarget> {
        match &self.phase {
            WitchPhase::ChoosingTactic(target) => Some(*target),
            WitchPhase::Resolving {
                next: WitchStep::Choose(target),
                ..
            } => Some(*target),
            _ => None,
        }
    }

    pub fn selected_tactic(&self) -> Tactic {
        Tactic::from_index(self.selected)
    }

    pub fn is_awake(&self, dad: DadTarget) -> bool {
        self.dads_awake[dad.index()]
    }

    pub fn window_open(&self) -> bool {
        self.window_open
    }

    /// Tactic Kosh is acting out while its result is shown.
    pub fn kosh_action(&self) -> Option<Tactic> {
        self.kosh_action
    }

    pub fn egg(&self) -> Option<&EasterEgg> {
        self.egg.as_ref()
    }

    /// Text of the open result dialog.
    pub fn dialog(&self) -> Option<&str> {
        match &self.phase {
            WitchPhase::Resolving { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Hint line shown when no dialog is open.
    pub fn objective(&self) -> &'static str {
        match self.phase {
            WitchPhase::ChoosingTactic(DadTarget::One) => "Target: Dad 1 - Choose your tactic!",
            WitchPhase::ChoosingTactic(DadTarget::Two) => "Target: Dad 2 - Choose your tactic!",
            WitchPhase::ConvinceWindow => "Both dads are awake! Press ENTER to ask for window!",
            WitchPhase::Resolving { .. } | WitchPhase::Resolved => "",
        }
    }
}
