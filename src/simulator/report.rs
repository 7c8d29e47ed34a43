//! Simulation report generation.

use super::runner::{RunOutcome, RunStats};
use crate::core::constants::{DUNGEON_MAX_STEP, MIDBOSS_STEP};
use serde::Serialize;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_cleared: u32,
    pub runs_game_over: u32,
    pub runs_timed_out: u32,
    pub max_actions_per_run: u64,

    // Aggregated stats
    pub avg_deepest_step: f64,
    pub avg_actions: f64,
    pub avg_actions_to_clear: f64,
    pub avg_battles_won: f64,
    pub avg_items_collected: f64,
    pub avg_camps: f64,

    /// Runs whose deepest step was at least N, indexed by N
    pub reached_step: Vec<u32>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, max_actions_per_run: u64) -> Self {
        let num_runs = runs.len() as u32;
        let count = |outcome: RunOutcome| runs.iter().filter(|r| r.outcome == outcome).count() as u32;
        let runs_cleared = count(RunOutcome::Cleared);
        let runs_game_over = count(RunOutcome::GameOver);
        let runs_timed_out = count(RunOutcome::TimedOut);

        let average = |value: fn(&RunStats) -> f64| {
            runs.iter().map(value).sum::<f64>() / f64::from(num_runs.max(1))
        };
        let avg_deepest_step = average(|r| f64::from(r.deepest_step));
        let avg_actions = average(|r| r.actions as f64);
        let avg_battles_won = average(|r| f64::from(r.battles_won));
        let avg_items_collected = average(|r| f64::from(r.items_collected));
        let avg_camps = average(|r| f64::from(r.camps));
        let avg_actions_to_clear = runs
            .iter()
            .filter(|r| r.outcome == RunOutcome::Cleared)
            .map(|r| r.actions as f64)
            .sum::<f64>()
            / f64::from(runs_cleared.max(1));

        let reached_step = (0..=DUNGEON_MAX_STEP)
            .map(|step| runs.iter().filter(|r| r.deepest_step >= step).count() as u32)
            .collect();

        Self {
            num_runs,
            runs_cleared,
            runs_game_over,
            runs_timed_out,
            max_actions_per_run,
            avg_deepest_step,
            avg_actions,
            avg_actions_to_clear,
            avg_battles_won,
            avg_items_collected,
            avg_camps,
            reached_step,
            run_stats: runs,
        }
    }

    pub fn clear_rate(&self) -> f64 {
        f64::from(self.runs_cleared) / f64::from(self.num_runs.max(1))
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} cleared, {} game over, {} timed out\n\n",
            self.num_runs, self.runs_cleared, self.runs_game_over, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Deepest Step:    {:.1}\n",
            self.avg_deepest_step
        ));
        report.push_str(&format!("  Avg Actions:         {:.0}\n", self.avg_actions));
        report.push_str(&format!(
            "  Avg Actions to Clear:{:>5.0}\n",
            self.avg_actions_to_clear
        ));
        report.push_str(&format!(
            "  Avg Battles Won:     {:.1}\n",
            self.avg_battles_won
        ));
        report.push_str(&format!(
            "  Avg Items Collected: {:.1}\n",
            self.avg_items_collected
        ));
        report.push_str(&format!("  Avg Camps:           {:.1}\n\n", self.avg_camps));

        report.push_str("── DEPTH REACHED ────────────────────────────────────────────────\n");
        for (step, reached) in self.reached_step.iter().enumerate().step_by(5) {
            let pct = f64::from(*reached) / f64::from(self.num_runs.max(1)) * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Step {:2}: {:>5.1}% {}\n", step, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let clear_pct = self.clear_rate() * 100.0;
        let rating = if clear_pct > 90.0 {
            "TOO EASY - The policy almost always clears"
        } else if clear_pct > 40.0 {
            "GOOD - Challenging but fair"
        } else if clear_pct > 10.0 {
            "HARD - Most parties fall"
        } else {
            "TOO HARD - Clears are rare"
        };
        report.push_str(&format!("  Clear Rate: {:.1}%\n", clear_pct));
        report.push_str(&format!("  Rating:     {}\n", rating));

        let midboss_reached = self
            .reached_step
            .get(MIDBOSS_STEP as usize)
            .copied()
            .unwrap_or(0);
        if self.num_runs > 0 && midboss_reached * 2 < self.num_runs {
            report.push_str("  ⚠️  Most runs end before the midboss - early encounters too hard?\n");
        }
        if self.runs_timed_out > 0 {
            report.push_str(&format!(
                "  ⚠️  {} runs hit the {}-action cap\n",
                self.runs_timed_out, self.max_actions_per_run
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
