//! Characters, enemies, skills and the party.

pub mod data;
pub mod types;

pub use data::*;
pub use types::*;
