mod evaluate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::warn;

use tank_shared::*;
use tank_sim::{run_episode, Opponent};

#[derive(Parser)]
#[command(name = "tank", about = "Two-tank arena duel CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one episode between two scripted policies
    Run {
        /// Policy for tank 0 (stationary, simple, random, hunter)
        #[arg(long)]
        p0: String,

        /// Policy for tank 1 (stationary, simple, random, hunter)
        #[arg(long)]
        p1: String,

        /// Episode seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output path for replay JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Arena config JSON; missing fields use defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Draw spawn positions from the seed
        #[arg(long)]
        randomize: bool,
    },

    /// Play many seeded episodes and report aggregate statistics
    Evaluate {
        /// Policy being evaluated, driving tank 0
        #[arg(long)]
        agent: String,

        /// Opponent policy, driving tank 1
        #[arg(long)]
        opponent: String,

        /// Number of episodes
        #[arg(long, default_value_t = 100)]
        episodes: u32,

        /// First seed; episode i uses seed + i
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Arena config JSON; missing fields use defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the summary and per-episode results as JSON
        #[arg(long)]
        save_stats: Option<PathBuf>,
    },
}

/// Resolve a scripted policy name, exiting on unknown names.
fn resolve_policy(name: &str) -> Opponent {
    match name.parse() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Load an arena config, or defaults when no path is given. Exits on
/// unreadable or invalid files.
fn load_arena_config(path: Option<&Path>) -> ArenaConfig {
    let Some(path) = path else {
        return ArenaConfig::default();
    };
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read config {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };
    let config: ArenaConfig = match serde_json::from_str(&text) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid config {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    config
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            p0,
            p1,
            seed,
            output,
            config,
            randomize,
        } => {
            let mut arena = load_arena_config(config.as_deref());
            if randomize {
                arena.randomize_positions = true;
            }
            cmd_run(&p0, &p1, seed, arena, output)
        }

        Commands::Evaluate {
            agent,
            opponent,
            episodes,
            seed,
            config,
            save_stats,
        } => {
            let arena = load_arena_config(config.as_deref());
            evaluate::cmd_evaluate(&agent, &opponent, episodes, seed, arena, save_stats)
        }
    }
}

fn cmd_run(p0_name: &str, p1_name: &str, seed: u64, arena: ArenaConfig, output: Option<PathBuf>) {
    let p0 = resolve_policy(p0_name);
    let p1 = resolve_policy(p1_name);

    let config = EpisodeConfig {
        seed,
        p0_name: p0.name().to_string(),
        p1_name: p1.name().to_string(),
        arena,
        frame_interval: FRAME_INTERVAL,
    };

    println!(
        "Running episode: {} vs {} (seed={})",
        config.p0_name, config.p1_name, seed
    );

    let replay = match run_episode(&config, &p0, &p1) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Episode failed: {}", e);
            std::process::exit(1);
        }
    };
    let result = &replay.result;

    println!();
    println!("=== Episode Result ===");
    println!("Winner:     {:?}", result.winner);
    println!("Reason:     {:?}", result.reason);
    println!("Final step: {}", result.final_step);
    println!();
    println!("--- Stats ---");
    for (id, name) in [(TankId::Tank0, &config.p0_name), (TankId::Tank1, &config.p1_name)] {
        let s = result.stats.tank(id);
        println!(
            "  {} ({:?}): HP={}, Shots={}, Hits={}, Misses={}, Return={:.2}",
            name,
            id,
            result.health[id.index()],
            s.shots,
            s.hits,
            s.misses,
            result.returns[id.index()]
        );
    }

    if let Some(path) = output {
        match serde_json::to_string_pretty(&replay) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => println!("\nReplay written to {}", path.display()),
                Err(e) => warn!("failed to write replay to {}: {}", path.display(), e),
            },
            Err(e) => warn!("failed to serialize replay: {}", e),
        }
    }
}
