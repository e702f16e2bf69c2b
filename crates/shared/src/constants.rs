// Arena
pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;
pub const MAX_STEPS: u32 = 1000;

// Tank
pub const TANK_SPEED: f32 = 3.0; // units per tick
pub const TURN_RATE_DEG: f32 = 5.0; // degrees per tick
pub const TANK_RADIUS: f32 = 20.0;
pub const WALL_MARGIN: f32 = TANK_RADIUS;
pub const MAX_HEALTH: u8 = 100;

// 3 hits kill (102 >= 100), 2 never do (32 left)
pub const HIT_DAMAGE: u8 = 34;

// Gun
pub const MAX_BULLETS_IN_FLIGHT: u8 = 3;
pub const FIRE_COOLDOWN_TICKS: u32 = 30;
pub const MUZZLE_OFFSET: f32 = 20.0; // half the hull length

// Bullets
pub const BULLET_SPEED: f32 = 10.0;
pub const BULLET_RADIUS: f32 = 3.0;
pub const BULLET_MAX_LIFETIME: u32 = 100;
pub const HIT_RADIUS: f32 = TANK_RADIUS + BULLET_RADIUS;
pub const MAX_BULLETS: usize = 2 * MAX_BULLETS_IN_FLIGHT as usize;

// Spawns
pub const SPAWN_INSET: f32 = 100.0;
pub const TANK0_SPAWN_HEADING: f32 = 0.0;
pub const TANK1_SPAWN_HEADING: f32 = 180.0;

// Observation
pub const TANK_OBS_SIZE: usize = 7;
pub const BULLET_SLOT_SIZE: usize = 2;
pub const BULLET_OBS_SIZE: usize = MAX_BULLETS_IN_FLIGHT as usize * BULLET_SLOT_SIZE;
pub const OBS_SIZE: usize = 2 * TANK_OBS_SIZE + 2 * BULLET_OBS_SIZE; // 26
pub const ACTION_COUNT: usize = 5;

// Sparse reward terms
pub const REWARD_HIT: f32 = 10.0;
pub const REWARD_WIN: f32 = 100.0;
pub const REWARD_LOSS: f32 = -100.0;
pub const REWARD_MISS: f32 = -2.0;
pub const REWARD_STEP: f32 = -0.01;

// Shaped reward terms
pub const REWARD_PROXIMITY: f32 = 0.1;
pub const REWARD_FACING: f32 = 0.05;
pub const REWARD_SURVIVAL: f32 = 0.02;
pub const FACING_TOLERANCE_DEG: f32 = 15.0;

// Replay recording
pub const FRAME_INTERVAL: u32 = 4;
