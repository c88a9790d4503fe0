//! Da Wire quest.
//!
//! A string toy swings overhead. Each of five rounds Kosh watches it, licks
//! at it when it passes the center, then has to hold on long enough. The
//! swing speeds up every round. Two won rounds clear the quest.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
