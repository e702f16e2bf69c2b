use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Stable identity of one of the two tanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankId {
    Tank0,
    Tank1,
}

impl TankId {
    pub const BOTH: [TankId; 2] = [TankId::Tank0, TankId::Tank1];

    pub fn index(self) -> usize {
        match self {
            TankId::Tank0 => 0,
            TankId::Tank1 => 1,
        }
    }

    pub fn opponent(self) -> TankId {
        match self {
            TankId::Tank0 => TankId::Tank1,
            TankId::Tank1 => TankId::Tank0,
        }
    }
}

/// Discrete per-tick command. The discriminants are the wire values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveForward = 0,
    TurnLeft = 1,
    TurnRight = 2,
    Fire = 3,
    #[default]
    Noop = 4,
}

impl Action {
    pub const ALL: [Action; crate::ACTION_COUNT] = [
        Action::MoveForward,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Fire,
        Action::Noop,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i64> for Action {
    type Error = EngineError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::MoveForward),
            1 => Ok(Action::TurnLeft),
            2 => Ok(Action::TurnRight),
            3 => Ok(Action::Fire),
            4 => Ok(Action::Noop),
            other => Err(EngineError::InvalidAction(other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankState {
    pub id: TankId,
    pub position: Vec2,
    /// Degrees in [0, 360).
    pub heading: f32,
    pub health: u8,
    pub alive: bool,
    pub ammo_in_flight: u8,
    pub cooldown: u32,
}

impl TankState {
    pub fn new(id: TankId, position: Vec2, heading: f32) -> Self {
        Self {
            id,
            position,
            heading,
            health: crate::MAX_HEALTH,
            alive: true,
            ammo_in_flight: 0,
            cooldown: 0,
        }
    }

    /// Unit vector along the current heading.
    pub fn forward(&self) -> Vec2 {
        let rad = self.heading.to_radians();
        Vec2::new(rad.cos(), rad.sin())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub owner: TankId,
    pub age: u32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Tank0,
    Tank1,
    Draw,
}

impl Winner {
    pub fn tank(id: TankId) -> Self {
        match id {
            TankId::Tank0 => Winner::Tank0,
            TankId::Tank1 => Winner::Tank1,
        }
    }

    /// Whether `id` won outright.
    pub fn is_won_by(self, id: TankId) -> bool {
        self == Winner::tank(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Elimination,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissCause {
    Expired,
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    Cooldown,
    AmmoExhausted,
}

/// Per-tick outcome used for reward attribution and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    Fired { tank: TankId },
    FireRejected { tank: TankId, reason: RejectReason },
    Hit { owner: TankId, target: TankId },
    Miss { owner: TankId, cause: MissCause },
}

impl TickEvent {
    pub fn is_hit_by(&self, id: TankId) -> bool {
        matches!(self, TickEvent::Hit { owner, .. } if *owner == id)
    }

    pub fn is_miss_by(&self, id: TankId) -> bool {
        matches!(self, TickEvent::Miss { owner, .. } if *owner == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub data: [f32; crate::OBS_SIZE],
}

impl serde::Serialize for Observation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.as_slice().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Observation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v: Vec<f32> = Vec::deserialize(deserializer)?;
        if v.len() != crate::OBS_SIZE {
            return Err(serde::de::Error::custom(format!(
                "expected {} floats, got {}",
                crate::OBS_SIZE,
                v.len()
            )));
        }
        let mut data = [0.0f32; crate::OBS_SIZE];
        data.copy_from_slice(&v);
        Ok(Observation { data })
    }
}

/// Per-tank counters accumulated over one episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankStats {
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    pub rejected: u32,
}

impl TankStats {
    /// Hits over resolved bullets (hits + misses). Zero when nothing resolved.
    pub fn accuracy(&self) -> f32 {
        let resolved = self.hits + self.misses;
        if resolved == 0 {
            0.0
        } else {
            self.hits as f32 / resolved as f32
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub tanks: [TankStats; 2],
}

impl EpisodeStats {
    pub fn record(&mut self, event: &TickEvent) {
        match *event {
            TickEvent::Fired { tank } => self.tanks[tank.index()].shots += 1,
            TickEvent::FireRejected { tank, .. } => self.tanks[tank.index()].rejected += 1,
            TickEvent::Hit { owner, .. } => self.tanks[owner.index()].hits += 1,
            TickEvent::Miss { owner, .. } => self.tanks[owner.index()].misses += 1,
        }
    }

    pub fn tank(&self, id: TankId) -> &TankStats {
        &self.tanks[id.index()]
    }
}

/// Everything a caller learns from one tick besides observation and reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepInfo {
    pub step: u32,
    pub events: Vec<TickEvent>,
    pub winner: Option<Winner>,
    pub health: [u8; 2],
}

impl StepInfo {
    pub fn hits(&self, id: TankId) -> usize {
        self.events.iter().filter(|e| e.is_hit_by(id)).count()
    }

    pub fn misses(&self, id: TankId) -> usize {
        self.events.iter().filter(|e| e.is_miss_by(id)).count()
    }

    pub fn fire_rejections(&self, id: TankId) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::FireRejected { tank, .. } if *tank == id))
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetInfo {
    pub seed: u64,
    pub randomized: bool,
    pub health: [u8; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    pub rewards: [f32; 2],
    pub done: bool,
    pub info: StepInfo,
}

impl StepResult {
    pub fn reward(&self, id: TankId) -> f32 {
        self.rewards[id.index()]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub step: u32,
    pub tanks: [TankSnapshot; 2],
    pub bullets: Vec<BulletSnapshot>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TankSnapshot {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub health: u8,
    pub alive: bool,
    pub ammo_in_flight: u8,
    pub cooldown: u32,
}

impl From<&TankState> for TankSnapshot {
    fn from(t: &TankState) -> Self {
        Self {
            x: t.position.x,
            y: t.position.y,
            heading: t.heading,
            health: t.health,
            alive: t.alive,
            ammo_in_flight: t.ammo_in_flight,
            cooldown: t.cooldown,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulletSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub owner: TankId,
}

impl From<&Bullet> for BulletSnapshot {
    fn from(b: &Bullet) -> Self {
        Self {
            x: b.position.x,
            y: b.position.y,
            vx: b.velocity.x,
            vy: b.velocity.y,
            owner: b.owner,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeResult {
    pub seed: u64,
    pub winner: Winner,
    pub reason: EndReason,
    pub final_step: u32,
    pub health: [u8; 2],
    pub stats: EpisodeStats,
    /// Summed per-tank rewards over the episode.
    pub returns: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replay {
    pub config: crate::EpisodeConfig,
    pub frames: Vec<Frame>,
    pub result: EpisodeResult,
}
