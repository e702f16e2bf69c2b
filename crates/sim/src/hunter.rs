use tank_shared::*;

use crate::arena::Arena;
use crate::geometry::{angle_diff, bearing};

/// Heading error under which the hunter considers itself lined up. Just over
/// half a turn step, so it is always reachable by turning.
pub const AIM_TOLERANCE_DEG: f32 = TURN_RATE_DEG / 2.0 + 0.5;

/// Close enough that the hunter stops advancing.
pub const STANDOFF_DISTANCE: f32 = 150.0;

/// Deterministic pursuit: rotate toward the opponent, shoot when aligned and
/// the gun is ready, otherwise close the distance.
pub fn act(arena: &Arena, me: TankId) -> Action {
    let mine = arena.tank(me);
    let theirs = arena.tank(me.opponent());
    if !mine.alive || !theirs.alive {
        return Action::Noop;
    }

    let diff = angle_diff(bearing(mine.position, theirs.position), mine.heading);
    if diff.abs() > AIM_TOLERANCE_DEG {
        // heading grows when turning right
        return if diff > 0.0 {
            Action::TurnRight
        } else {
            Action::TurnLeft
        };
    }

    let gun_ready = mine.cooldown == 0 && mine.ammo_in_flight < MAX_BULLETS_IN_FLIGHT;
    if gun_ready {
        Action::Fire
    } else if arena.distance() > STANDOFF_DISTANCE {
        Action::MoveForward
    } else {
        Action::Noop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_fires_when_lined_up() {
        let arena = Arena::default();
        assert_eq!(act(&arena, TankId::Tank0), Action::Fire);
        assert_eq!(act(&arena, TankId::Tank1), Action::Fire);
    }

    #[test]
    fn test_turns_toward_target() {
        let mut arena = Arena::default();
        // target straight below (screen y grows downward): bearing 90
        arena.place_tank(TankId::Tank0, Vec2::new(400.0, 100.0), 0.0);
        arena.place_tank(TankId::Tank1, Vec2::new(400.0, 500.0), 0.0);
        assert_eq!(act(&arena, TankId::Tank0), Action::TurnRight);

        arena.place_tank(TankId::Tank0, Vec2::new(400.0, 100.0), 180.0);
        assert_eq!(act(&arena, TankId::Tank0), Action::TurnLeft);
    }

    #[test]
    fn test_advances_while_reloading() {
        let mut arena = Arena::default();
        arena.step(Action::Fire, Action::Noop).unwrap();
        assert_eq!(act(&arena, TankId::Tank0), Action::MoveForward);
    }
}
