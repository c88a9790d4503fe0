//! Core engine pieces shared by every quest: profile, RNG, input, host.

pub mod constants;
pub mod geometry;
pub mod host;
pub mod input;
pub mod profile;
pub mod rng;

pub use geometry::Vec2;
pub use host::{HostEvent, QuestHost, StartError};
pub use input::{InputEvent, InputSource, Key, ScriptedInput};
pub use profile::{PlayerProfile, QuestId};
pub use rng::{GameRng, QuestRng, RngService, ScriptedRng};
