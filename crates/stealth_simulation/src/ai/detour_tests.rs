//! Tests for the detour planner.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ai::detour::{compute_detour, DetourParams, DetourPlanner, DetourSide};
    use crate::geometry::{Obstacle, ObstacleSet};

    fn params(obstacles: &ObstacleSet) -> DetourParams<'_> {
        DetourParams {
            lateral_distance: 110.0,
            reach_radius: 24.0,
            timeout_ms: 700.0,
            half_extents: Vec2::splat(10.0),
            obstacles,
            bounds: None,
        }
    }

    #[test]
    fn test_detour_side_helpers() {
        assert_eq!(DetourSide::default(), DetourSide::Left);
        assert_eq!(DetourSide::Left.opposite(), DetourSide::Right);
        assert_eq!(DetourSide::Right.sign(), -1.0);
    }

    #[test]
    fn test_preferred_side_first() {
        let obstacles = ObstacleSet::default();
        let detour = compute_detour(Vec2::ZERO, Vec2::new(200.0, 0.0), DetourSide::Left, &params(&obstacles));

        assert_eq!(detour.side, DetourSide::Left);
        assert!(detour.point.distance(Vec2::new(0.0, 110.0)) < 1e-3);
        assert_eq!(detour.age_ms, 0.0);
    }

    #[test]
    fn test_falls_back_to_opposite_side() {
        // Левая точка (0, 110) внутри препятствия
        let obstacles = ObstacleSet::new(vec![Obstacle::new(0.0, 110.0, 60.0, 60.0)]);
        let detour = compute_detour(Vec2::ZERO, Vec2::new(200.0, 0.0), DetourSide::Left, &params(&obstacles));

        assert_eq!(detour.side, DetourSide::Right);
        assert!(detour.point.distance(Vec2::new(0.0, -110.0)) < 1e-3);
    }

    #[test]
    fn test_both_sides_blocked_short_push() {
        let obstacles = ObstacleSet::new(vec![
            Obstacle::new(0.0, 110.0, 60.0, 60.0),
            Obstacle::new(0.0, -110.0, 60.0, 60.0),
        ]);
        let detour = compute_detour(Vec2::ZERO, Vec2::new(200.0, 0.0), DetourSide::Left, &params(&obstacles));

        assert_eq!(detour.side, DetourSide::Left);
        assert!(detour.point.distance(Vec2::new(0.0, 55.0)) < 1e-3);
    }

    #[test]
    fn test_coincident_target_still_yields_point() {
        let obstacles = ObstacleSet::default();
        let detour = compute_detour(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), DetourSide::Left, &params(&obstacles));

        assert!(detour.point.is_finite());
        assert!(detour.point.distance(Vec2::new(5.0, 115.0)) < 1e-3);
    }

    #[test]
    fn test_planner_point_stable_until_timeout() {
        let obstacles = ObstacleSet::default();
        let params = params(&obstacles);
        let mut planner = DetourPlanner::default();
        let target = Vec2::new(200.0, 0.0);

        let first = planner.steer_point(Vec2::ZERO, target, 100.0, &params);
        for _ in 0..6 {
            assert_eq!(planner.steer_point(Vec2::ZERO, target, 100.0, &params), first);
        }
        assert_eq!(planner.current().map(|detour| detour.age_ms), Some(600.0));

        // age = 700ms → пересчёт (та же геометрия → та же точка, age с нуля)
        let recomputed = planner.steer_point(Vec2::ZERO, target, 100.0, &params);
        assert_eq!(recomputed, first);
        assert_eq!(planner.current().map(|detour| detour.age_ms), Some(0.0));
    }

    #[test]
    fn test_planner_recomputes_when_reached() {
        let obstacles = ObstacleSet::default();
        let params = params(&obstacles);
        let mut planner = DetourPlanner::default();
        let target = Vec2::new(200.0, 0.0);

        let first = planner.steer_point(Vec2::ZERO, target, 16.0, &params);

        // Почти дошли (10px < 24px) → новая точка от текущей позиции
        let near = Vec2::new(0.0, 100.0);
        let next = planner.steer_point(near, target, 16.0, &params);
        assert_ne!(next, first);
        assert!((next.distance(near) - 110.0).abs() < 1e-3);
    }

    #[test]
    fn test_planner_side_is_sticky() {
        let blocked_left = ObstacleSet::new(vec![Obstacle::new(0.0, 110.0, 60.0, 60.0)]);
        let mut planner = DetourPlanner::default();
        let target = Vec2::new(200.0, 0.0);

        planner.steer_point(Vec2::ZERO, target, 16.0, &params(&blocked_left));
        assert_eq!(planner.preferred_side(), DetourSide::Right);

        // Левая сторона снова свободна, но предпочтение осталось справа
        planner.clear();
        let open = ObstacleSet::default();
        let point = planner.steer_point(Vec2::ZERO, target, 16.0, &params(&open));
        assert!(point.distance(Vec2::new(0.0, -110.0)) < 1e-3);
    }

    #[test]
    fn test_same_preferred_side_same_point() {
        let walled = ObstacleSet::new(vec![Obstacle::new(50.0, 0.0, 20.0, 400.0)]);
        let target = Vec2::new(200.0, 0.0);

        let run = |side: DetourSide| {
            let mut planner = DetourPlanner::default();
            planner.set_preferred_side(side);
            let point = planner.steer_point(Vec2::ZERO, target, 16.0, &params(&walled));
            (point, planner.preferred_side())
        };

        assert_eq!(run(DetourSide::Right), run(DetourSide::Right));

        let (point, side) = run(DetourSide::Right);
        assert_eq!(side, DetourSide::Right);
        assert!(point.distance(Vec2::new(0.0, -110.0)) < 1e-3);

        let (point, _) = run(DetourSide::Left);
        assert!(point.distance(Vec2::new(0.0, 110.0)) < 1e-3);
    }
}
