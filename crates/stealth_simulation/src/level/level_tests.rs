//! Tests for level configuration and spawning.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ai::{Helper, Pursuer};
    use crate::components::{Collectible, PhysicsBody, Position, WorldBounds};
    use crate::geometry::{Obstacle, ObstacleSet};
    use crate::level::*;
    use crate::session::SessionState;

    #[test]
    fn test_sample_level_is_valid() {
        let level = LevelConfig::sample();
        assert_eq!(level.validate(), Ok(()));
        assert_eq!(level.obstacle_set().len(), 3);
        assert_eq!(level.bounds().max, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_sample_spawns_clear_of_obstacles() {
        let level = LevelConfig::sample();
        let obstacles = level.obstacle_set();

        assert!(!obstacles.overlaps_box(level.player_spawn, level.player_half_extents));
        for spawn in &level.pursuers {
            assert!(!obstacles.overlaps_box(spawn.position, level.pursuer.body_half_extents));
        }
        for point in &level.collectibles {
            assert!(!obstacles.is_point_inside_any_obstacle(*point, 0.0));
        }
    }

    #[test]
    fn test_invalid_world_size() {
        let level = LevelConfig {
            world_size: Vec2::new(0.0, 600.0),
            ..LevelConfig::sample()
        };
        assert_eq!(level.validate(), Err(LevelError::InvalidWorldSize(0.0, 600.0)));
    }

    #[test]
    fn test_negative_obstacle_size_rejected() {
        let mut level = LevelConfig::sample();
        level.furniture.push(Obstacle::new(10.0, 10.0, -5.0, 5.0));

        match level.validate() {
            Err(LevelError::InvalidObstacle { kind, index, .. }) => {
                assert_eq!(kind, "furniture");
                assert_eq!(index, 1);
            }
            other => panic!("expected InvalidObstacle, got {:?}", other),
        }
    }

    #[test]
    fn test_half_angle_out_of_range_rejected() {
        let mut level = LevelConfig::sample();
        level.pursuer.vision.half_angle = 0.0;

        let error = level.validate().unwrap_err();
        assert!(matches!(error, LevelError::InvalidTunable { name: "vision.half_angle", .. }));
        assert!(error.to_string().contains("vision.half_angle"));
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let mut level = LevelConfig::sample();
        level.helper_spawn = Some(Vec2::new(f32::NAN, 0.0));

        assert_eq!(
            level.validate(),
            Err(LevelError::NonFinitePoint {
                what: "helper spawn".to_string()
            })
        );
    }

    #[test]
    fn test_empty_waypoints_are_not_an_error() {
        let mut level = LevelConfig::sample();
        level.pursuers[0].waypoints.clear();
        assert_eq!(level.validate(), Ok(()));
    }

    #[test]
    fn test_spawn_level_populates_world() {
        let mut world = World::new();
        let level = LevelConfig::sample();

        let entities = spawn_level(&mut world, &level).expect("sample level spawns");

        assert_eq!(entities.pursuers.len(), 1);
        assert_eq!(entities.collectibles.len(), 4);
        assert_eq!(entities.hazards.len(), 1);
        assert!(entities.helper.is_some());

        assert_eq!(world.resource::<ObstacleSet>().len(), 3);
        assert_eq!(world.resource::<WorldBounds>().0, level.bounds());
        assert_eq!(*world.resource::<SessionState>(), SessionState::default());

        let pursuer = entities.pursuers[0];
        assert!(world.get::<Pursuer>(pursuer).is_some());
        assert_eq!(world.get::<Position>(pursuer).map(|p| p.0), Some(level.pursuers[0].position));
        assert_eq!(
            world.get::<PhysicsBody>(pursuer).map(|body| body.half_extents),
            Some(level.pursuer.body_half_extents)
        );

        let helper = entities.helper.unwrap();
        assert!(world.get::<Helper>(helper).is_some_and(|helper| helper.is_alive()));

        let ids: Vec<u64> = entities
            .collectibles
            .iter()
            .filter_map(|&entity| world.get::<Collectible>(entity).map(|item| item.id.0))
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_spawn_level_rejects_invalid_config() {
        let mut world = World::new();
        let level = LevelConfig {
            world_size: Vec2::new(-1.0, 10.0),
            ..LevelConfig::sample()
        };

        assert!(spawn_level(&mut world, &level).is_err());
        assert!(!world.contains_resource::<ObstacleSet>());
        assert_eq!(world.query::<&Position>().iter(&world).count(), 0);
    }
}
