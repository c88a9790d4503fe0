//! Kosh - quest mini-game engine library
//!
//! The four quest state machines, the player profile they spend from, the
//! particle effects they spawn and the host that drives them. Rendering and
//! the terminal shell live in the `kosh` binary.

pub mod core;
pub mod effects;
pub mod quests;
pub mod save;

pub use crate::core::{HostEvent, PlayerProfile, QuestHost, QuestId, StartError};
pub use crate::quests::{ActiveQuest, QuestMachine, QuestOutcome, QuestResult};
