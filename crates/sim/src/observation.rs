use tank_shared::*;

use crate::arena::Arena;

/// Encode the arena into the fixed 26-float observation.
///
/// Layout (tank0 always first, independent of who is asking):
/// - `[0..7)` tank0: x/W, y/H, heading/360, health/100, alive, ammo/3, cooldown/30
/// - `[7..14)` tank1: same fields
/// - `[14..20)` tank0 bullet slots: (x/W, y/H) x 3, spawn order, zero-filled
/// - `[20..26)` tank1 bullet slots
pub fn encode(arena: &Arena) -> Observation {
    let mut data = [0.0f32; OBS_SIZE];
    let config = arena.config();

    for id in TankId::BOTH {
        let t = arena.tank(id);
        let base = id.index() * TANK_OBS_SIZE;
        data[base] = t.position.x / config.width;
        data[base + 1] = t.position.y / config.height;
        data[base + 2] = t.heading / 360.0;
        data[base + 3] = t.health as f32 / MAX_HEALTH as f32;
        data[base + 4] = if t.alive { 1.0 } else { 0.0 };
        data[base + 5] = t.ammo_in_flight as f32 / MAX_BULLETS_IN_FLIGHT as f32;
        data[base + 6] = t.cooldown as f32 / FIRE_COOLDOWN_TICKS as f32;

        let slots = 2 * TANK_OBS_SIZE + id.index() * BULLET_OBS_SIZE;
        let owned = arena.bullets().iter().filter(|b| b.active && b.owner == id);
        for (slot, b) in owned.take(MAX_BULLETS_IN_FLIGHT as usize).enumerate() {
            let i = slots + slot * BULLET_SLOT_SIZE;
            data[i] = b.position.x / config.width;
            data[i + 1] = b.position.y / config.height;
        }
    }

    Observation { data }
}
