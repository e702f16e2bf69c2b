use serde::{Deserialize, Serialize};

use crate::{EngineError, ARENA_HEIGHT, ARENA_WIDTH, MAX_STEPS, SPAWN_INSET, WALL_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardMode {
    /// Hit, win/loss, miss and step terms only.
    Sparse,
    /// Sparse terms plus proximity, aiming and survival bonuses.
    Shaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub mode: RewardMode,
    pub miss_penalty: bool,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            mode: RewardMode::Sparse,
            miss_penalty: true,
        }
    }
}

/// Construction-time parameters of an arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub max_steps: u32,
    /// Seed used by `reset` when the caller passes none.
    pub seed: u64,
    pub randomize_positions: bool,
    pub reward: RewardConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            max_steps: MAX_STEPS,
            seed: 0,
            randomize_positions: false,
            reward: RewardConfig::default(),
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(EngineError::InvalidConfig(
                "arena dimensions must be finite".into(),
            ));
        }
        if self.max_steps == 0 {
            return Err(EngineError::InvalidConfig("max_steps must be positive".into()));
        }
        // Spawn range [inset, size - inset) must be non-empty and clear the walls.
        let min_size = 2.0 * SPAWN_INSET.max(WALL_MARGIN) + 1.0;
        if self.width < min_size || self.height < min_size {
            return Err(EngineError::InvalidConfig(format!(
                "arena {}x{} is smaller than the minimum {min_size}x{min_size}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Length of the arena diagonal, the normalizer for tank distance.
    pub fn diagonal(&self) -> f32 {
        (self.width * self.width + self.height * self.height).sqrt()
    }
}

/// Parameters of one recorded episode between two scripted policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    pub seed: u64,
    pub p0_name: String,
    pub p1_name: String,
    pub arena: ArenaConfig,
    /// Record a frame every this many steps.
    pub frame_interval: u32,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            p0_name: "p0".into(),
            p1_name: "p1".into(),
            arena: ArenaConfig::default(),
            frame_interval: crate::FRAME_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ArenaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_max_steps() {
        let config = ArenaConfig {
            max_steps: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_tiny_arena() {
        let config = ArenaConfig {
            width: 150.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ArenaConfig =
            serde_json::from_str(r#"{"max_steps": 250, "reward": {"mode": "shaped"}}"#).unwrap();
        assert_eq!(config.max_steps, 250);
        assert_eq!(config.width, ARENA_WIDTH);
        assert_eq!(config.reward.mode, RewardMode::Shaped);
        assert!(config.reward.miss_penalty);
    }

    #[test]
    fn test_diagonal() {
        assert!((ArenaConfig::default().diagonal() - 1000.0).abs() < 1e-3);
    }
}
