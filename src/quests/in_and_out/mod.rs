//! In and Out quest.
//!
//! Kosh keeps checking the food bowl in the next room. Every trip costs
//! energy; after a few trips food may finally appear. Give up, run dry or
//! hit the trip limit and the hunger continues.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
