use tank_shared::*;

use crate::arena::Arena;
use crate::geometry::{angle_diff, bearing};

/// Reward for one tank after a tick, from that tank's perspective.
///
/// `info` must be the tick's own info: win/loss terms key off `info.winner`,
/// which is only ever set on the terminal tick.
pub fn reward(arena: &Arena, info: &StepInfo, me: TankId) -> f32 {
    let config = arena.config().reward;
    let mut r = sparse_reward(info, me, config.miss_penalty);

    if config.mode == RewardMode::Shaped {
        r += shaping_bonus(arena, me);
    }
    r
}

/// Hit, outcome, miss and step terms.
pub fn sparse_reward(info: &StepInfo, me: TankId, miss_penalty: bool) -> f32 {
    let mut r = REWARD_STEP;

    r += REWARD_HIT * info.hits(me) as f32;

    if miss_penalty {
        r += REWARD_MISS * info.misses(me) as f32;
    }

    match info.winner {
        Some(w) if w.is_won_by(me) => r += REWARD_WIN,
        Some(w) if w.is_won_by(me.opponent()) => r += REWARD_LOSS,
        _ => {}
    }

    r
}

/// Continuous proximity, aiming and survival bonus.
pub fn shaping_bonus(arena: &Arena, me: TankId) -> f32 {
    let mine = arena.tank(me);
    let theirs = arena.tank(me.opponent());
    let mut r = 0.0;

    let normalized_distance = (arena.distance() / arena.config().diagonal()).min(1.0);
    r += REWARD_PROXIMITY * (1.0 - normalized_distance);

    if is_facing(mine, theirs) {
        r += REWARD_FACING;
    }

    if mine.alive {
        r += REWARD_SURVIVAL;
    }

    r
}

/// Whether `from` points at `to` within the facing tolerance.
pub fn is_facing(from: &TankState, to: &TankState) -> bool {
    let target = bearing(from.position, to.position);
    angle_diff(target, from.heading).abs() <= FACING_TOLERANCE_DEG
}
