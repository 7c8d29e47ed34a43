//! Auto-play simulator CLI.
//!
//! Plays many sessions with the fixed policy and prints how they went.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # Default: 1000 runs
//!   cargo run --bin simulate -- -n 100 --seed 42   # 100 reproducible runs
//!   cargo run --bin simulate -- --config sim.json  # Settings from a file

use anyhow::{Context, Result};
use command_rpg::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return Ok(());
    }

    let base = match config_path(&args) {
        Some(path) => load_config(Path::new(path))?,
        None => SimConfig::default(),
    };
    let config = apply_flags(base, &args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              COMMAND RPG AUTO-PLAY SIMULATOR                  ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Actions:    {}", config.max_actions_per_run);
    println!("  Party:          hero {}", config.party.join(" "));
    println!("  Heal Below:     {}%", config.heal_threshold_pct);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    if config.verbosity >= 1 {
        println!("{}", report.to_text());
    }

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("writing {filename}"))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn config_path(args: &[String]) -> Option<&str> {
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

/// Command-line flags override whatever the config file set.
fn apply_flags(mut config: SimConfig, args: &[String]) -> SimConfig {
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(config.num_runs);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-a" | "--max-actions" => {
                if i + 1 < args.len() {
                    config.max_actions_per_run =
                        args[i + 1].parse().unwrap_or(config.max_actions_per_run);
                    i += 1;
                }
            }
            "--solo" => {
                config.party.clear();
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--config" => {
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    config
}

fn print_help() {
    println!("Command RPG Auto-Play Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>         Number of simulation runs (default: 1000)");
    println!("    -s, --seed <S>         Random seed for reproducibility");
    println!("    -a, --max-actions <A>  Max actions per run (default: 5000)");
    println!("    --config <PATH>        Load settings from a JSON file");
    println!("    --solo                 Hero only, hire nobody");
    println!("    -q, --quiet            Skip the text report");
    println!("    -v, --verbose          Print every run");
    println!("    --json                 Save JSON report");
    println!("    -h, --help             Show this help");
    println!();
    println!("Set RUST_LOG=debug to trace session actions.");
}
