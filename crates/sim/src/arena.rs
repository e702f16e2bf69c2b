use glam::Vec2;
use log::{debug, trace};
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tank_shared::*;

use crate::{bullet, observation, reward, tank};

/// Full simulation state for one two-tank episode.
///
/// The arena is a deterministic function of its config, the `reset` seed and
/// the sequence of action pairs passed to [`Arena::step`].
#[derive(Debug, Clone)]
pub struct Arena {
    config: ArenaConfig,
    tanks: [TankState; 2],
    bullets: Vec<Bullet>,
    step_count: u32,
    done: bool,
    winner: Option<Winner>,
    seed: u64,
    randomized: bool,
    stats: EpisodeStats,
}

impl Default for Arena {
    fn default() -> Self {
        let config = ArenaConfig::default();
        let seed = config.seed;
        let randomized = config.randomize_positions;
        let mut arena = Self {
            tanks: fixed_spawns(&config),
            config,
            bullets: Vec::with_capacity(MAX_BULLETS),
            step_count: 0,
            done: false,
            winner: None,
            seed,
            randomized,
            stats: EpisodeStats::default(),
        };
        arena.reset(Some(seed), Some(randomized));
        arena
    }
}

impl Arena {
    /// Build an arena and reset it with the configured seed.
    pub fn new(config: ArenaConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut arena = Self {
            config,
            ..Self::default()
        };
        arena.reset(None, None);
        Ok(arena)
    }

    /// Start a new episode. `None` arguments fall back to the config.
    pub fn reset(
        &mut self,
        seed: Option<u64>,
        randomize_positions: Option<bool>,
    ) -> (Observation, ResetInfo) {
        let seed = seed.unwrap_or(self.config.seed);
        let randomized = randomize_positions.unwrap_or(self.config.randomize_positions);

        self.tanks = if randomized {
            random_spawns(&self.config, &mut Pcg64::seed_from_u64(seed))
        } else {
            fixed_spawns(&self.config)
        };
        self.bullets.clear();
        self.step_count = 0;
        self.done = false;
        self.winner = None;
        self.seed = seed;
        self.randomized = randomized;
        self.stats = EpisodeStats::default();

        debug!(
            "arena reset: seed={} randomized={} tank0={} tank1={}",
            seed, randomized, self.tanks[0].position, self.tanks[1].position
        );

        let info = ResetInfo {
            seed,
            randomized,
            health: self.health(),
        };
        (self.observe(), info)
    }

    /// Validate integer actions, then step. Nothing changes on error.
    pub fn step_raw(&mut self, action0: i64, action1: i64) -> Result<StepResult, EngineError> {
        let a0 = Action::try_from(action0)?;
        let a1 = Action::try_from(action1)?;
        self.step(a0, a1)
    }

    /// Advance one tick.
    pub fn step(&mut self, action0: Action, action1: Action) -> Result<StepResult, EngineError> {
        if self.done {
            return Err(EngineError::StepAfterTerminal);
        }

        let mut events = Vec::new();

        // Tank0 strictly before tank1 so simultaneous fire is reproducible.
        for (i, action) in [action0, action1].into_iter().enumerate() {
            let t = &mut self.tanks[i];
            tank::apply_action(t, action, &self.config, &mut self.bullets, &mut events);
            tank::tick_cooldown(t);
        }

        bullet::advance(&mut self.bullets, &mut self.tanks, &self.config, &mut events);
        bullet::resolve_collisions(&mut self.bullets, &mut self.tanks, &mut events);
        self.bullets.retain(|b| b.active);

        for t in &mut self.tanks {
            t.alive = t.health > 0;
        }

        self.winner = self.decide_winner();
        self.done = self.winner.is_some();
        self.step_count += 1;

        for event in &events {
            trace!("step {}: {:?}", self.step_count, event);
            self.stats.record(event);
        }
        if let Some(winner) = self.winner {
            debug!(
                "episode over at step {}: {:?} ({:?}), health={:?}",
                self.step_count,
                winner,
                self.end_reason(),
                self.health()
            );
        }

        let info = StepInfo {
            step: self.step_count,
            events,
            winner: self.winner,
            health: self.health(),
        };
        let rewards = [
            reward::reward(self, &info, TankId::Tank0),
            reward::reward(self, &info, TankId::Tank1),
        ];

        Ok(StepResult {
            observation: self.observe(),
            rewards,
            done: self.done,
            info,
        })
    }

    /// Termination check for the tick being completed; runs before
    /// `step_count` is incremented.
    fn decide_winner(&self) -> Option<Winner> {
        match (self.tanks[0].alive, self.tanks[1].alive) {
            (false, false) => Some(Winner::Draw),
            (true, false) => Some(Winner::Tank0),
            (false, true) => Some(Winner::Tank1),
            (true, true) if self.step_count + 1 >= self.config.max_steps => Some(Winner::Draw),
            (true, true) => None,
        }
    }

    pub fn observe(&self) -> Observation {
        observation::encode(self)
    }

    /// Read-only copy of the renderable state.
    pub fn snapshot(&self) -> Frame {
        Frame {
            step: self.step_count,
            tanks: [
                TankSnapshot::from(&self.tanks[0]),
                TankSnapshot::from(&self.tanks[1]),
            ],
            bullets: self.bullets.iter().map(BulletSnapshot::from).collect(),
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn tank(&self, id: TankId) -> &TankState {
        &self.tanks[id.index()]
    }

    pub fn tanks(&self) -> &[TankState; 2] {
        &self.tanks
    }

    /// Active bullets in spawn order.
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn max_steps(&self) -> u32 {
        self.config.max_steps
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Why the episode ended, or `None` while it is still running.
    pub fn end_reason(&self) -> Option<EndReason> {
        if !self.done {
            None
        } else if self.tanks.iter().any(|t| !t.alive) {
            Some(EndReason::Elimination)
        } else {
            Some(EndReason::Timeout)
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn health(&self) -> [u8; 2] {
        [self.tanks[0].health, self.tanks[1].health]
    }

    pub fn distance(&self) -> f32 {
        (self.tanks[0].position - self.tanks[1].position).length()
    }

    /// Place tanks at explicit poses, for scripted scenarios and tests.
    /// Health, ammo, cooldown and bullets are left untouched.
    pub fn place_tank(&mut self, id: TankId, position: Vec2, heading: f32) {
        let t = &mut self.tanks[id.index()];
        t.position = position;
        t.heading = crate::geometry::normalize_heading(heading);
    }

    #[cfg(test)]
    pub(crate) fn tank_mut(&mut self, id: TankId) -> &mut TankState {
        &mut self.tanks[id.index()]
    }
}

fn fixed_spawns(config: &ArenaConfig) -> [TankState; 2] {
    let mid_y = config.height / 2.0;
    [
        TankState::new(
            TankId::Tank0,
            Vec2::new(SPAWN_INSET, mid_y),
            TANK0_SPAWN_HEADING,
        ),
        TankState::new(
            TankId::Tank1,
            Vec2::new(config.width - SPAWN_INSET, mid_y),
            TANK1_SPAWN_HEADING,
        ),
    ]
}

fn random_spawns(config: &ArenaConfig, rng: &mut Pcg64) -> [TankState; 2] {
    let max_x = (config.width - SPAWN_INSET) as i32;
    let max_y = (config.height - SPAWN_INSET) as i32;
    let min = SPAWN_INSET as i32;
    let mut pick = || {
        let x = rng.gen_range(min..max_x) as f32;
        let y = rng.gen_range(min..max_y) as f32;
        Vec2::new(x, y)
    };
    let p0 = pick();
    let p1 = pick();
    [
        TankState::new(TankId::Tank0, p0, TANK0_SPAWN_HEADING),
        TankState::new(TankId::Tank1, p1, TANK1_SPAWN_HEADING),
    ]
}
