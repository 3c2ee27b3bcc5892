//! Tests for obstacle predicates.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::geometry::{segment_intersects_obstacle, Obstacle, ObstacleSet};

    fn crate_box() -> Obstacle {
        // 100×50 с центром в (200, 200): x ∈ [150, 250], y ∈ [175, 225]
        Obstacle::new(200.0, 200.0, 100.0, 50.0)
    }

    #[test]
    fn test_bounds_are_center_anchored() {
        let bounds = crate_box().bounds(0.0);
        assert_eq!(bounds.min, Vec2::new(150.0, 175.0));
        assert_eq!(bounds.max, Vec2::new(250.0, 225.0));

        let inflated = crate_box().bounds(5.0);
        assert_eq!(inflated.min, Vec2::new(145.0, 170.0));
        assert_eq!(inflated.max, Vec2::new(255.0, 230.0));
    }

    #[test]
    fn test_point_inside_with_inflate() {
        let set = ObstacleSet::new(vec![crate_box()]);

        assert!(set.is_point_inside_any_obstacle(Vec2::new(200.0, 200.0), 0.0));
        assert!(set.is_point_inside_any_obstacle(Vec2::new(150.0, 200.0), 0.0)); // граница inclusive
        assert!(!set.is_point_inside_any_obstacle(Vec2::new(147.0, 200.0), 0.0));
        assert!(set.is_point_inside_any_obstacle(Vec2::new(147.0, 200.0), 4.0));
    }

    #[test]
    fn test_segment_crossing_obstacle() {
        let obstacle = crate_box();

        assert!(segment_intersects_obstacle(
            Vec2::new(100.0, 200.0),
            Vec2::new(300.0, 200.0),
            &obstacle,
            0.0
        ));
        // Проходит выше
        assert!(!segment_intersects_obstacle(
            Vec2::new(100.0, 160.0),
            Vec2::new(300.0, 160.0),
            &obstacle,
            0.0
        ));
        // Тот же отрезок задевает inflated bounds
        assert!(segment_intersects_obstacle(
            Vec2::new(100.0, 160.0),
            Vec2::new(300.0, 160.0),
            &obstacle,
            20.0
        ));
    }

    #[test]
    fn test_segment_ending_before_obstacle() {
        let obstacle = crate_box();
        assert!(!segment_intersects_obstacle(
            Vec2::new(0.0, 200.0),
            Vec2::new(140.0, 200.0),
            &obstacle,
            0.0
        ));
    }

    #[test]
    fn test_diagonal_segment_missing_corner() {
        let obstacle = crate_box();
        // Диагональ мимо угла (150, 175)
        assert!(!segment_intersects_obstacle(
            Vec2::new(100.0, 200.0),
            Vec2::new(160.0, 140.0),
            &obstacle,
            0.0
        ));
    }

    #[test]
    fn test_overlaps_box_is_strict() {
        let obstacle = crate_box();

        // Касается левой грани — не overlap
        assert!(!obstacle.overlaps_box(Vec2::new(140.0, 200.0), Vec2::splat(10.0)));
        // Заходит на 1px
        assert!(obstacle.overlaps_box(Vec2::new(141.0, 200.0), Vec2::splat(10.0)));
    }

    #[test]
    fn test_merged_keeps_walls_and_furniture() {
        let walls = [Obstacle::new(0.0, 0.0, 10.0, 10.0)];
        let furniture = [Obstacle::new(50.0, 50.0, 10.0, 10.0), crate_box()];
        let set = ObstacleSet::merged(&walls, &furniture);

        assert_eq!(set.len(), 3);
        assert!(set.is_point_inside_any_obstacle(Vec2::new(50.0, 50.0), 0.0));
        assert!(set.is_point_inside_any_obstacle(Vec2::ZERO, 0.0));
    }
}
