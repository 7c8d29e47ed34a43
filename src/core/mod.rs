//! Core game state, constants and the session controller.

pub mod constants;
pub mod error;
pub mod game_state;
pub mod session;

pub use constants::*;
pub use error::ActionRejected;
pub use game_state::*;
pub use session::*;
