use log::debug;
use rand_pcg::Pcg64;
use tank_shared::*;

use crate::arena::Arena;
use crate::policy::{policy_rng, Opponent};

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub arena: ArenaConfig,
    pub opponent: Opponent,
    /// Which tank the learner controls; the opponent drives the other.
    pub agent: TankId,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            opponent: Opponent::Simple,
            agent: TankId::Tank0,
        }
    }
}

/// Result of one learner step.
#[derive(Debug, Clone)]
pub struct EnvStep {
    pub observation: Observation,
    pub reward: f32,
    /// Ended by elimination (including mutual destruction).
    pub terminated: bool,
    /// Hit the step limit with both tanks alive.
    pub truncated: bool,
    pub info: StepInfo,
    /// Running sum of the learner's reward this episode.
    pub episode_reward: f32,
}

/// Single-agent wrapper: the caller drives one tank, a scripted opponent
/// drives the other.
///
/// Usage:
///     let mut env = TankEnv::new(EnvConfig::default())?;
///     let (obs, _) = env.reset(Some(42), None);
///     let step = env.step(3)?;
#[derive(Debug, Clone)]
pub struct TankEnv {
    arena: Arena,
    opponent: Opponent,
    agent: TankId,
    rng: Pcg64,
    episode: u64,
    episode_reward: f32,
}

impl TankEnv {
    pub fn new(config: EnvConfig) -> Result<Self, EngineError> {
        let arena = Arena::new(config.arena)?;
        let rng = policy_rng(arena.seed(), config.agent.opponent());
        Ok(Self {
            arena,
            opponent: config.opponent,
            agent: config.agent,
            rng,
            episode: 0,
            episode_reward: 0.0,
        })
    }

    /// Start a new episode. `None` arguments fall back to the arena config.
    pub fn reset(
        &mut self,
        seed: Option<u64>,
        randomize_positions: Option<bool>,
    ) -> (Observation, ResetInfo) {
        let (obs, info) = self.arena.reset(seed, randomize_positions);
        self.rng = policy_rng(info.seed, self.agent.opponent());
        self.episode += 1;
        self.episode_reward = 0.0;
        debug!(
            "env episode {} vs {} (seed {})",
            self.episode,
            self.opponent.name(),
            info.seed
        );
        (obs, info)
    }

    /// Apply the learner's action; the opponent picks its action from the
    /// same pre-step state.
    pub fn step(&mut self, action: i64) -> Result<EnvStep, EngineError> {
        let mine = Action::try_from(action)?;
        let opponent_id = self.agent.opponent();
        let theirs = self.opponent.act(&self.arena, opponent_id, &mut self.rng);

        let result = match self.agent {
            TankId::Tank0 => self.arena.step(mine, theirs)?,
            TankId::Tank1 => self.arena.step(theirs, mine)?,
        };

        let reward = result.reward(self.agent);
        self.episode_reward += reward;

        let (terminated, truncated) = match self.arena.end_reason() {
            Some(EndReason::Elimination) => (true, false),
            Some(EndReason::Timeout) => (false, true),
            None => (false, false),
        };

        Ok(EnvStep {
            observation: result.observation,
            reward,
            terminated,
            truncated,
            info: result.info,
            episode_reward: self.episode_reward,
        })
    }

    pub fn set_opponent(&mut self, opponent: Opponent) {
        self.opponent = opponent;
    }

    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    pub fn agent(&self) -> TankId {
        self.agent
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Episodes started since construction.
    pub fn episodes(&self) -> u64 {
        self.episode
    }
}
