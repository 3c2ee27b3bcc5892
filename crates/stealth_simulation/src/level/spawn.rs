//! Spawn уровня в ECS World

use bevy::prelude::*;

use crate::ai::{Helper, Pursuer};
use crate::components::{Collectible, Hazard, PhysicsBody, Player, Position, WorldBounds};
use crate::level::{LevelConfig, LevelResult};
use crate::session::{SessionConfig, SessionState};

/// Entity созданные `spawn_level` (в порядке из конфигурации)
#[derive(Debug, Clone, PartialEq)]
pub struct LevelEntities {
    pub player: Entity,
    pub pursuers: Vec<Entity>,
    pub helper: Option<Entity>,
    pub collectibles: Vec<Entity>,
    pub hazards: Vec<Entity>,
}

/// Валидирует конфигурацию и спавнит уровень.
///
/// Вставляет ресурсы `ObstacleSet`, `WorldBounds`, `SessionConfig`
/// и сбрасывает `SessionState`.
pub fn spawn_level(world: &mut World, level: &LevelConfig) -> LevelResult<LevelEntities> {
    level.validate()?;

    let obstacles = level.obstacle_set();
    crate::log_info(&format!(
        "🗺️ Level {}×{}: {} obstacles, {} pursuers, {} collectibles",
        level.world_size.x,
        level.world_size.y,
        obstacles.len(),
        level.pursuers.len(),
        level.collectibles.len()
    ));

    world.insert_resource(obstacles);
    world.insert_resource(WorldBounds(level.bounds()));
    world.insert_resource::<SessionConfig>(level.session);
    world.insert_resource(SessionState::default());

    let player = world
        .spawn((
            Player,
            Position(level.player_spawn),
            PhysicsBody::new(level.player_half_extents),
        ))
        .id();

    let pursuers = level
        .pursuers
        .iter()
        .enumerate()
        .map(|(index, spawn)| {
            if spawn.waypoints.is_empty() {
                crate::log_warning(&format!(
                    "Pursuer #{} has no waypoints — it will hold position while patrolling",
                    index
                ));
            }

            world
                .spawn((
                    Pursuer::new(level.pursuer.clone(), spawn.waypoints.clone()).with_facing(spawn.facing),
                    Position(spawn.position),
                    PhysicsBody::new(level.pursuer.body_half_extents),
                ))
                .id()
        })
        .collect();

    let helper = level.helper_spawn.map(|position| {
        world
            .spawn((
                Helper::new(level.helper.clone()),
                Position(position),
                PhysicsBody::new(level.helper.body_half_extents),
            ))
            .id()
    });

    let collectibles = level
        .collectibles
        .iter()
        .enumerate()
        .map(|(index, position)| world.spawn((Collectible::new(index as u64), Position(*position))).id())
        .collect();

    let hazards = level
        .hazards
        .iter()
        .map(|position| world.spawn((Hazard::default(), Position(*position))).id())
        .collect();

    Ok(LevelEntities {
        player,
        pursuers,
        helper,
        collectibles,
        hazards,
    })
}
