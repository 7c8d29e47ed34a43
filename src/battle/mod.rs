//! Battle engine: one battle resolved action by action.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
