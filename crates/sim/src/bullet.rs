use tank_shared::*;

use crate::geometry::in_bounds;
use crate::tank;

/// Build a bullet at the tank's muzzle, travelling along its heading.
pub fn spawn(owner: &TankState) -> Bullet {
    let forward = owner.forward();
    Bullet {
        position: owner.position + forward * MUZZLE_OFFSET,
        velocity: forward * BULLET_SPEED,
        owner: owner.id,
        age: 0,
        active: true,
    }
}

/// Move every active bullet one tick. Bullets that outlive their lifetime or
/// leave the arena deactivate with a single `Miss` for their owner.
pub fn advance(
    bullets: &mut [Bullet],
    tanks: &mut [TankState; 2],
    config: &ArenaConfig,
    events: &mut Vec<TickEvent>,
) {
    for bullet in bullets.iter_mut().filter(|b| b.active) {
        bullet.position += bullet.velocity;
        bullet.age += 1;

        let cause = if bullet.age > BULLET_MAX_LIFETIME {
            Some(MissCause::Expired)
        } else if !in_bounds(bullet.position, config.width, config.height) {
            Some(MissCause::OutOfBounds)
        } else {
            None
        };

        if let Some(cause) = cause {
            bullet.active = false;
            tank::free_ammo_slot(&mut tanks[bullet.owner.index()]);
            events.push(TickEvent::Miss {
                owner: bullet.owner,
                cause,
            });
        }
    }
}

/// Test every active bullet against the opposing tank in a single pass.
///
/// A target already at zero health is not hit again this tick, so its
/// bullet stays in flight.
pub fn resolve_collisions(
    bullets: &mut [Bullet],
    tanks: &mut [TankState; 2],
    events: &mut Vec<TickEvent>,
) {
    let hit_dist_sq = HIT_RADIUS * HIT_RADIUS;

    for bullet in bullets.iter_mut().filter(|b| b.active) {
        let target_id = bullet.owner.opponent();
        let target = &mut tanks[target_id.index()];
        if target.health == 0 {
            continue;
        }

        if (target.position - bullet.position).length_squared() <= hit_dist_sq {
            tank::take_damage(target);
            bullet.active = false;
            tank::free_ammo_slot(&mut tanks[bullet.owner.index()]);
            events.push(TickEvent::Hit {
                owner: bullet.owner,
                target: target_id,
            });
        }
    }
}
