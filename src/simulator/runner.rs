//! Simulation runner: drives seeded sessions with the auto-play policy.

use super::config::SimConfig;
use super::policy::{AutoPolicy, PlannedAction};
use super::report::SimReport;
use crate::core::{EventResponse, GameSession, Mode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Cleared,
    GameOver,
    /// Hit the action cap, or the policy got stuck
    TimedOut,
}

/// What one simulated session did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub outcome: RunOutcome,
    pub deepest_step: u32,
    pub actions: u64,
    pub battles_won: u32,
    pub items_collected: u32,
    pub camps: u32,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(run_idx))),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?}, deepest step {}, {} actions, {} battles won",
                run_idx + 1,
                config.num_runs,
                run.outcome,
                run.deepest_step,
                run.actions,
                run.battles_won
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs, config.max_actions_per_run)
}

/// Plays one session from a fresh start until it ends or runs out of actions.
pub fn simulate_single_run<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> RunStats {
    let policy = AutoPolicy::from_config(config);
    let mut session = GameSession::new();
    let mut stats = RunStats {
        outcome: RunOutcome::TimedOut,
        deepest_step: 0,
        actions: 0,
        battles_won: 0,
        items_collected: 0,
        camps: 0,
    };

    while stats.actions < config.max_actions_per_run {
        let Some(action) = policy.next_action(&session) else {
            break;
        };
        let was_fighting = matches!(session.state().mode, Mode::Battle(_));
        let collecting = matches!(action, PlannedAction::Collect);
        let camping = matches!(action, PlannedAction::Respond(EventResponse::Camp));

        if let Err(reason) = action.apply(&mut session, rng) {
            tracing::warn!(%reason, actions = stats.actions, "policy action rejected; ending run");
            break;
        }
        stats.actions += 1;

        if collecting {
            stats.items_collected += 1;
        }
        if camping {
            stats.camps += 1;
        }
        if was_fighting && matches!(session.state().mode, Mode::Field | Mode::Clear) {
            stats.battles_won += 1;
        }
        if let Some(dungeon) = session.state().dungeon() {
            stats.deepest_step = stats.deepest_step.max(dungeon.step);
        }
    }

    stats.outcome = match session.state().mode {
        Mode::Clear => RunOutcome::Cleared,
        Mode::GameOver => RunOutcome::GameOver,
        _ => RunOutcome::TimedOut,
    };
    tracing::debug!(outcome = ?stats.outcome, actions = stats.actions, "run finished");
    stats
}
