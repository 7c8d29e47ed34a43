//! Dungeon engine: a linear path of steps with fixed and random events.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
