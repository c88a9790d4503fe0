//! Witch in the Wardrobe, the secret quest.
//!
//! A scripted intro walks Kosh into the wardrobe, then ten rounds of
//! peek-a-boo: a raccoon toy pops up at one of five spots and has to be
//! clicked before it hides again. Seven catches win.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
