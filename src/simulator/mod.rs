//! Headless auto-play simulator.
//!
//! Plays many seeded sessions with a fixed policy to see how often the
//! party clears the dungeon, how deep it gets before falling, and how many
//! actions a run takes. Every run goes through [`GameSession`], so results
//! match real play.
//!
//! [`GameSession`]: crate::core::GameSession

mod config;
mod policy;
mod report;
mod runner;

pub use config::SimConfig;
pub use policy::{AutoPolicy, PlannedAction};
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunOutcome, RunStats};
