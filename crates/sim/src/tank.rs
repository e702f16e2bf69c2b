use tank_shared::*;

use crate::bullet;
use crate::geometry::{clamp_to_arena, normalize_heading};

/// Apply one action to a tank. Accepted fire pushes a bullet; every fire
/// attempt is recorded as `Fired` or `FireRejected`.
///
/// Dead tanks ignore all actions.
pub fn apply_action(
    tank: &mut TankState,
    action: Action,
    config: &ArenaConfig,
    bullets: &mut Vec<Bullet>,
    events: &mut Vec<TickEvent>,
) {
    if !tank.alive {
        return;
    }

    match action {
        Action::MoveForward => move_forward(tank, config),
        Action::TurnLeft => turn(tank, -TURN_RATE_DEG),
        Action::TurnRight => turn(tank, TURN_RATE_DEG),
        Action::Fire => match try_fire(tank) {
            Ok(b) => {
                bullets.push(b);
                events.push(TickEvent::Fired { tank: tank.id });
            }
            Err(reason) => events.push(TickEvent::FireRejected {
                tank: tank.id,
                reason,
            }),
        },
        Action::Noop => {}
    }
}

/// Advance along the heading, then clamp to the arena. Walls never bounce.
pub fn move_forward(tank: &mut TankState, config: &ArenaConfig) {
    let next = tank.position + tank.forward() * TANK_SPEED;
    tank.position = clamp_to_arena(next, config.width, config.height, WALL_MARGIN);
}

pub fn turn(tank: &mut TankState, delta_deg: f32) {
    tank.heading = normalize_heading(tank.heading + delta_deg);
}

/// Spawn a bullet if the gun is ready and an ammo slot is free.
pub fn try_fire(tank: &mut TankState) -> Result<Bullet, RejectReason> {
    if tank.ammo_in_flight >= MAX_BULLETS_IN_FLIGHT {
        return Err(RejectReason::AmmoExhausted);
    }
    if tank.cooldown > 0 {
        return Err(RejectReason::Cooldown);
    }

    tank.ammo_in_flight += 1;
    tank.cooldown = FIRE_COOLDOWN_TICKS;
    Ok(bullet::spawn(tank))
}

pub fn tick_cooldown(tank: &mut TankState) {
    tank.cooldown = tank.cooldown.saturating_sub(1);
}

pub fn take_damage(tank: &mut TankState) {
    tank.health = tank.health.saturating_sub(HIT_DAMAGE);
}

/// Return an ammo slot after one of this tank's bullets deactivated.
pub fn free_ammo_slot(tank: &mut TankState) {
    tank.ammo_in_flight = tank.ammo_in_flight.saturating_sub(1);
}
