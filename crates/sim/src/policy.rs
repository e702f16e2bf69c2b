use std::str::FromStr;

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tank_shared::*;

use crate::arena::Arena;
use crate::hunter;

/// Caller-supplied pure mapping from arena state to an action.
pub type PolicyFn = fn(&Arena, TankId) -> Action;

/// Scripted opponents. Every variant is a function of the arena state plus an
/// explicitly seeded generator; none hold hidden state.
#[derive(Debug, Clone, Copy)]
pub enum Opponent {
    /// Sits still and fires now and then.
    Stationary,
    /// Drives forward, occasionally turning or firing.
    Simple,
    /// Uniform over all five actions.
    Random,
    /// Turns toward the opponent and fires when lined up.
    Hunter,
    External(PolicyFn),
}

impl Opponent {
    pub const SCRIPTED: [Opponent; 4] = [
        Opponent::Stationary,
        Opponent::Simple,
        Opponent::Random,
        Opponent::Hunter,
    ];

    pub fn name(&self) -> &str {
        match self {
            Opponent::Stationary => "stationary",
            Opponent::Simple => "simple",
            Opponent::Random => "random",
            Opponent::Hunter => "hunter",
            Opponent::External(_) => "external",
        }
    }

    pub fn act(&self, arena: &Arena, me: TankId, rng: &mut Pcg64) -> Action {
        match self {
            Opponent::Stationary => {
                if rng.gen::<f32>() < 0.05 {
                    Action::Fire
                } else {
                    Action::Noop
                }
            }
            Opponent::Simple => {
                if rng.gen::<f32>() < 0.1 {
                    Action::Fire
                } else if rng.gen::<f32>() < 0.2 {
                    if rng.gen::<bool>() {
                        Action::TurnLeft
                    } else {
                        Action::TurnRight
                    }
                } else {
                    Action::MoveForward
                }
            }
            Opponent::Random => Action::ALL[rng.gen_range(0..ACTION_COUNT)],
            Opponent::Hunter => hunter::act(arena, me),
            Opponent::External(f) => f(arena, me),
        }
    }
}

impl FromStr for Opponent {
    type Err = UnknownPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stationary" => Ok(Opponent::Stationary),
            "simple" => Ok(Opponent::Simple),
            "random" => Ok(Opponent::Random),
            "hunter" => Ok(Opponent::Hunter),
            _ => Err(UnknownPolicyError(s.to_string())),
        }
    }
}

/// Generator for the policy controlling `id` in an episode seeded with `seed`.
/// The two tanks draw from distinct streams so their choices are independent.
pub fn policy_rng(seed: u64, id: TankId) -> Pcg64 {
    const STREAM_SALT: [u64; 2] = [0x9e37_79b9_7f4a_7c15, 0xc2b2_ae3d_27d4_eb4f];
    Pcg64::seed_from_u64(seed ^ STREAM_SALT[id.index()])
}

/// Policy that always idles.
pub fn do_nothing(_arena: &Arena, _me: TankId) -> Action {
    Action::Noop
}
