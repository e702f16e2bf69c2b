use std::path::PathBuf;

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use tank_shared::*;
use tank_sim::{play_episode, summarize, EvaluationSummary, Opponent};

use crate::resolve_policy;

/// Everything `--save-stats` writes.
#[derive(Serialize)]
struct EvaluationReport<'a> {
    agent: &'a str,
    opponent: &'a str,
    first_seed: u64,
    summary: &'a EvaluationSummary,
    episodes: &'a [EpisodeResult],
}

/// Episodes run in parallel, one arena per seed; results come back in seed
/// order so the summary does not depend on scheduling.
pub fn cmd_evaluate(
    agent_name: &str,
    opponent_name: &str,
    episodes: u32,
    seed: u64,
    arena: ArenaConfig,
    save_stats: Option<PathBuf>,
) {
    let agent = resolve_policy(agent_name);
    let opponent = resolve_policy(opponent_name);

    if episodes == 0 {
        eprintln!("Evaluation needs at least one episode.");
        std::process::exit(1);
    }

    println!(
        "Evaluating {} vs {}: {} episodes from seed {}",
        agent.name(),
        opponent.name(),
        episodes,
        seed
    );

    let outcomes: Vec<Result<EpisodeResult, EngineError>> = (0..episodes as u64)
        .into_par_iter()
        .map(|i| run_one(&agent, &opponent, seed.wrapping_add(i), &arena))
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(r) => results.push(r),
            Err(e) => {
                eprintln!("Episode failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    let summary = summarize(&results, TankId::Tank0);
    info!(
        "evaluated {} episodes: win rate {:.3}",
        summary.episodes, summary.win_rate
    );
    print_summary(agent.name(), opponent.name(), &summary);

    if let Some(path) = save_stats {
        let report = EvaluationReport {
            agent: agent.name(),
            opponent: opponent.name(),
            first_seed: seed,
            summary: &summary,
            episodes: &results,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => println!("\nStats written to {}", path.display()),
                Err(e) => warn!("failed to write stats to {}: {}", path.display(), e),
            },
            Err(e) => warn!("failed to serialize stats: {}", e),
        }
    }
}

fn run_one(
    agent: &Opponent,
    opponent: &Opponent,
    seed: u64,
    arena: &ArenaConfig,
) -> Result<EpisodeResult, EngineError> {
    let config = EpisodeConfig {
        seed,
        p0_name: agent.name().to_string(),
        p1_name: opponent.name().to_string(),
        arena: ArenaConfig {
            seed,
            ..arena.clone()
        },
        frame_interval: FRAME_INTERVAL,
    };
    play_episode(&config, agent, opponent)
}

fn print_summary(agent: &str, opponent: &str, s: &EvaluationSummary) {
    println!();
    println!("=== Evaluation: {} vs {} ===", agent, opponent);
    println!("{:<16} {:>10}", "Episodes", s.episodes);
    println!(
        "{:<16} {:>10} ({:.1}%)",
        "Wins",
        s.wins,
        s.win_rate * 100.0
    );
    println!(
        "{:<16} {:>10} ({:.1}%)",
        "Losses",
        s.losses,
        s.loss_rate * 100.0
    );
    println!(
        "{:<16} {:>10} ({:.1}%)",
        "Draws",
        s.draws,
        s.draw_rate * 100.0
    );
    println!("{:<16} {:>10}", "Eliminations", s.eliminations);
    println!(
        "{:<16} {:>10.2} +/- {:.2}",
        "Return", s.mean_return, s.std_return
    );
    println!(
        "{:<16} {:>10.1} +/- {:.1}",
        "Length", s.mean_length, s.std_length
    );
    println!("{:-<16} {:-<10}", "", "");
    println!("{:<16} {:>10}", "Shots", s.shots);
    println!("{:<16} {:>10}", "Hits", s.hits);
    println!("{:<16} {:>10}", "Misses", s.misses);
    println!("{:<16} {:>10}", "Rejected", s.rejected);
    println!("{:<16} {:>9.1}%", "Accuracy", s.accuracy * 100.0);
    println!();
    println!("Grade: {}", s.grade);
}
