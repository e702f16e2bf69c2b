use glam::Vec2;

/// Wrap a heading in degrees into [0, 360).
pub fn normalize_heading(deg: f32) -> f32 {
    let h = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Shortest signed difference `target - current` in degrees, in (-180, 180].
pub fn angle_diff(target: f32, current: f32) -> f32 {
    let mut diff = (target - current).rem_euclid(360.0);
    if diff > 180.0 {
        diff -= 360.0;
    }
    diff
}

/// Heading in degrees from `from` toward `to`, in [0, 360).
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let rel = to - from;
    normalize_heading(rel.y.atan2(rel.x).to_degrees())
}

/// Inclusive bounds check against the `[0, width] x [0, height]` rectangle.
pub fn in_bounds(p: Vec2, width: f32, height: f32) -> bool {
    p.x >= 0.0 && p.x <= width && p.y >= 0.0 && p.y <= height
}

/// Clamp a position so a body of the given margin stays inside the arena.
pub fn clamp_to_arena(p: Vec2, width: f32, height: f32, margin: f32) -> Vec2 {
    Vec2::new(
        p.x.clamp(margin, width - margin),
        p.y.clamp(margin, height - margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_heading_wraps() {
        assert_eq!(normalize_heading(0.0), 0.0);
        assert_eq!(normalize_heading(360.0), 0.0);
        assert_eq!(normalize_heading(-5.0), 355.0);
        assert_eq!(normalize_heading(365.0), 5.0);
        assert!(normalize_heading(-1e-9) < 360.0);
    }

    #[test]
    fn test_angle_diff_takes_short_way() {
        assert!((angle_diff(10.0, 350.0) - 20.0).abs() < 1e-4);
        assert!((angle_diff(350.0, 10.0) + 20.0).abs() < 1e-4);
        assert!((angle_diff(180.0, 0.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let o = Vec2::new(100.0, 100.0);
        assert!(bearing(o, Vec2::new(200.0, 100.0)).abs() < 1e-4);
        assert!((bearing(o, Vec2::new(100.0, 200.0)) - 90.0).abs() < 1e-4);
        assert!((bearing(o, Vec2::new(0.0, 100.0)) - 180.0).abs() < 1e-4);
        assert!((bearing(o, Vec2::new(100.0, 0.0)) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_to_arena() {
        let p = clamp_to_arena(Vec2::new(-50.0, 900.0), 800.0, 600.0, 20.0);
        assert_eq!(p, Vec2::new(20.0, 580.0));
    }
}
