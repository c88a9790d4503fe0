//! Persistence: the flat profile snapshot and the file it lives in.

pub mod manager;
pub mod snapshot;

pub use manager::{SaveError, SaveManager};
pub use snapshot::{decode, encode, from_json, to_json, SaveSnapshot};
