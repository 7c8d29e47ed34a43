//! Simulation configuration.

use serde::Deserialize;

/// Configuration for a simulation run. Every field has a default, so a JSON
/// config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum session actions per run before timeout
    pub max_actions_per_run: u64,

    /// Candidate ids hired in town, in order
    pub party: Vec<String>,

    /// Heal a living ally whose hp falls below this percentage of max
    pub heal_threshold_pct: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_actions_per_run: 5_000,
            party: vec!["warrior".into(), "monk".into(), "mage".into()],
            heal_threshold_pct: 40,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a fast balance check
    pub fn quick() -> Self {
        Self {
            num_runs: 100,
            ..Default::default()
        }
    }

    /// Hero alone, no companions
    pub fn solo(num_runs: u32) -> Self {
        Self {
            num_runs,
            party: Vec::new(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"num_runs": 7, "seed": 3}"#).unwrap();
        assert_eq!(config.num_runs, 7);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.party, SimConfig::default().party);
        assert_eq!(config.max_actions_per_run, 5_000);
    }

    #[test]
    fn test_solo_has_no_party() {
        assert!(SimConfig::solo(5).party.is_empty());
    }
}
