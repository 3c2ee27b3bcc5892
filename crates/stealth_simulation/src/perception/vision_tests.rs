//! Tests for the vision cone detector.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};
    use crate::geometry::{Obstacle, ObstacleSet};
    use crate::perception::{can_perceive, normalize_angle, VisionCone, VisionConeGeometry};

    fn cone() -> VisionCone {
        VisionCone::default()
    }

    #[test]
    fn test_vision_cone_default() {
        let cone = VisionCone::default();
        assert_eq!(cone.range, 250.0);
        assert!((cone.half_angle - 35.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle_wraparound() {
        assert!((normalize_angle(3.0 * PI / 2.0) - (-FRAC_PI_2)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - FRAC_PI_2).abs() < 1e-5);
        assert!(normalize_angle(2.0 * PI).abs() < 1e-5);
        assert!((normalize_angle(0.3) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_perception_depends_on_facing() {
        let empty = ObstacleSet::default();
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);

        // Оба смотрят в +x: A видит B, B не видит A (A за спиной)
        assert!(can_perceive(a, 0.0, b, &cone(), &empty));
        assert!(!can_perceive(b, 0.0, a, &cone(), &empty));

        // B разворачивается к A
        assert!(can_perceive(b, PI, a, &cone(), &empty));
    }

    #[test]
    fn test_inclusive_range_boundary() {
        let empty = ObstacleSet::default();
        let observer = Vec2::ZERO;

        assert!(can_perceive(observer, 0.0, Vec2::new(250.0, 0.0), &cone(), &empty));
        assert!(!can_perceive(observer, 0.0, Vec2::new(251.0, 0.0), &cone(), &empty));
    }

    #[test]
    fn test_inclusive_angle_boundary_at_max_range() {
        let empty = ObstacleSet::default();
        let cone = cone();
        let observer = Vec2::new(10.0, 20.0);

        // Ровно на range и ровно на half_angle
        let on_edge = observer + Vec2::from_angle(cone.half_angle) * cone.range;
        assert!(can_perceive(observer, 0.0, on_edge, &cone, &empty));

        let mirrored = observer + Vec2::from_angle(-cone.half_angle) * cone.range;
        assert!(can_perceive(observer, 0.0, mirrored, &cone, &empty));

        // Чуть за углом
        let outside = observer + Vec2::from_angle(cone.half_angle + 0.01) * 100.0;
        assert!(!can_perceive(observer, 0.0, outside, &cone, &empty));
    }

    #[test]
    fn test_angle_test_handles_wraparound() {
        let empty = ObstacleSet::default();
        // facing почти 2π, target чуть ниже оси +x (bearing ≈ -0.1)
        let facing = 2.0 * PI - 0.05;
        assert!(can_perceive(Vec2::ZERO, facing, Vec2::new(100.0, -10.0), &cone(), &empty));
    }

    #[test]
    fn test_occlusion_blocks_even_when_range_and_angle_pass() {
        let wall = ObstacleSet::new(vec![Obstacle::new(100.0, 0.0, 20.0, 200.0)]);
        assert!(!can_perceive(Vec2::ZERO, 0.0, Vec2::new(200.0, 0.0), &cone(), &wall));
    }

    #[test]
    fn test_scenario_blocked_then_visible() {
        let obstacles = ObstacleSet::new(vec![Obstacle::new(200.0, 200.0, 100.0, 50.0)]);
        let observer = Vec2::new(100.0, 200.0);

        assert!(!can_perceive(observer, 0.0, Vec2::new(400.0, 200.0), &cone(), &obstacles));

        let target = Vec2::new(100.0, 400.0);
        let facing = FRAC_PI_2; // смотрим на target (+y)
        assert!(can_perceive(observer, facing, target, &cone(), &obstacles));
    }

    #[test]
    fn test_coincident_target_is_perceived() {
        let empty = ObstacleSet::default();
        assert!(can_perceive(Vec2::ONE, PI, Vec2::ONE, &cone(), &empty));
    }

    #[test]
    fn test_cone_geometry_rays_clipped_by_obstacle() {
        let wall = ObstacleSet::new(vec![Obstacle::new(100.0, 0.0, 20.0, 400.0)]);
        let geometry = VisionConeGeometry::compute(Vec2::ZERO, 0.0, &cone(), &wall, 9);

        assert_eq!(geometry.rays.len(), 9);
        for ray in &geometry.rays {
            // Стена начинается на x = 90
            assert!(ray.x <= 90.0 + 1e-3, "ray {:?} passes through wall", ray);
        }

        let open = VisionConeGeometry::compute(Vec2::ZERO, 0.0, &cone(), &ObstacleSet::default(), 9);
        let middle = open.rays[4];
        assert!((middle - Vec2::new(250.0, 0.0)).length() < 1e-3);
    }
}
