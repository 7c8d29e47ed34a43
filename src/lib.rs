//! Command RPG - turn-based party combat engine
//!
//! A hero recruits companions in town, then clears the cave boss or works
//! down a twenty-step dungeon of encounters, springs and bosses. All game
//! rules live here as plain data plus functions; rendering is left to the
//! caller. Randomness is always passed in.

pub mod battle;
pub mod core;
pub mod dungeon;
pub mod inventory;
pub mod simulator;
pub mod units;

pub use crate::core::{ActionRejected, GameSession, GameState, Location, Mode};
