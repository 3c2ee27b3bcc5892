//! Tests for line-of-sight queries.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::geometry::{has_line_of_sight, Obstacle, ObstacleSet};

    #[test]
    fn test_clear_line_without_obstacles() {
        let set = ObstacleSet::default();
        assert!(has_line_of_sight(Vec2::ZERO, Vec2::new(500.0, 300.0), &set, 0.0));
    }

    #[test]
    fn test_blocked_by_spanning_obstacle() {
        let set = ObstacleSet::new(vec![Obstacle::new(200.0, 200.0, 100.0, 50.0)]);
        assert!(!has_line_of_sight(
            Vec2::new(100.0, 200.0),
            Vec2::new(400.0, 200.0),
            &set,
            0.0
        ));
    }

    #[test]
    fn test_zero_length_segment_is_visible() {
        // Даже если точка внутри препятствия
        let set = ObstacleSet::new(vec![Obstacle::new(0.0, 0.0, 100.0, 100.0)]);
        assert!(has_line_of_sight(Vec2::ZERO, Vec2::ZERO, &set, 0.0));
    }

    #[test]
    fn test_result_independent_of_obstacle_order() {
        let a = Obstacle::new(100.0, 0.0, 20.0, 20.0);
        let b = Obstacle::new(300.0, 200.0, 20.0, 20.0);
        let c = Obstacle::new(-50.0, 80.0, 40.0, 10.0);

        let from = Vec2::new(0.0, 0.0);
        let targets = [
            Vec2::new(400.0, 0.0),
            Vec2::new(300.0, 300.0),
            Vec2::new(-100.0, 100.0),
            Vec2::new(0.0, -200.0),
        ];

        let forward = ObstacleSet::new(vec![a, b, c]);
        let backward = ObstacleSet::new(vec![c, b, a]);

        for target in targets {
            assert_eq!(
                has_line_of_sight(from, target, &forward, 2.0),
                has_line_of_sight(from, target, &backward, 2.0),
                "LOS to {:?} depends on obstacle order",
                target
            );
        }
    }

    #[test]
    fn test_inflate_blocks_grazing_segment() {
        let set = ObstacleSet::new(vec![Obstacle::new(100.0, 0.0, 20.0, 20.0)]);
        // Проходит в 2px над верхней гранью (y = -10)
        let from = Vec2::new(0.0, -12.0);
        let to = Vec2::new(200.0, -12.0);

        assert!(has_line_of_sight(from, to, &set, 0.0));
        assert!(!has_line_of_sight(from, to, &set, 4.0));
    }

    #[test]
    fn test_first_hit_returns_nearest_entry() {
        let set = ObstacleSet::new(vec![
            Obstacle::new(300.0, 0.0, 20.0, 20.0), // вход на x = 290
            Obstacle::new(100.0, 0.0, 20.0, 20.0), // вход на x = 90
        ]);

        let hit = set.first_hit(Vec2::ZERO, Vec2::new(400.0, 0.0), 0.0);
        let t = hit.expect("segment crosses both obstacles");
        assert!((t - 90.0 / 400.0).abs() < 1e-5);

        assert!(set.first_hit(Vec2::ZERO, Vec2::new(0.0, 400.0), 0.0).is_none());
    }
}
