//! Window Witch quest.
//!
//! Kosh wants the window opened at 3 AM. Both sleeping dads must be woken
//! with energy-costing tactics that succeed on a roll, then convinced to
//! open the window. A hidden easter egg may bob near the window; clicking
//! it unlocks the secret quest.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
