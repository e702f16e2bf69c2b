use log::info;
use tank_shared::*;

use crate::arena::Arena;
use crate::policy::{policy_rng, Opponent};

/// Play a full seeded episode between two opponents and record a replay.
pub fn run_episode(
    config: &EpisodeConfig,
    p0: &Opponent,
    p1: &Opponent,
) -> Result<Replay, EngineError> {
    let interval = config.frame_interval.max(1);
    let mut frames = Vec::new();

    let result = drive(config, p0, p1, |arena| {
        let step = arena.step_count();
        if step == 0 || step % interval == 0 || arena.is_done() {
            frames.push(arena.snapshot());
        }
    })?;

    Ok(Replay {
        config: config.clone(),
        frames,
        result,
    })
}

/// Same episode as [`run_episode`] without frame capture; used for bulk
/// evaluation.
pub fn play_episode(
    config: &EpisodeConfig,
    p0: &Opponent,
    p1: &Opponent,
) -> Result<EpisodeResult, EngineError> {
    drive(config, p0, p1, |_| {})
}

/// Shared loop. `on_state` sees the arena after reset and after every step.
fn drive<F: FnMut(&Arena)>(
    config: &EpisodeConfig,
    p0: &Opponent,
    p1: &Opponent,
    mut on_state: F,
) -> Result<EpisodeResult, EngineError> {
    let mut arena = Arena::new(config.arena.clone())?;
    arena.reset(Some(config.seed), None);
    let mut rng0 = policy_rng(config.seed, TankId::Tank0);
    let mut rng1 = policy_rng(config.seed, TankId::Tank1);
    let mut returns = [0.0f32; 2];

    on_state(&arena);

    while !arena.is_done() {
        let a0 = p0.act(&arena, TankId::Tank0, &mut rng0);
        let a1 = p1.act(&arena, TankId::Tank1, &mut rng1);
        let result = arena.step(a0, a1)?;
        returns[0] += result.rewards[0];
        returns[1] += result.rewards[1];
        on_state(&arena);
    }

    // The loop only exits once the arena has decided both.
    let winner = arena.winner().unwrap_or(Winner::Draw);
    let reason = arena.end_reason().unwrap_or(EndReason::Timeout);

    info!(
        "{} vs {} seed={}: {:?} by {:?} at step {}",
        config.p0_name,
        config.p1_name,
        config.seed,
        winner,
        reason,
        arena.step_count()
    );

    Ok(EpisodeResult {
        seed: config.seed,
        winner,
        reason,
        final_step: arena.step_count(),
        health: arena.health(),
        stats: *arena.stats(),
        returns,
    })
}
