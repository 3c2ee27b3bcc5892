//! Level configuration + spawn.
//!
//! `LevelConfig` задаётся один раз при загрузке уровня (serde, Default = sample
//! tunables). Ядро после этого его не перепроверяет.

use bevy::math::Rect;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

pub mod error;
pub mod spawn;

#[cfg(test)]
mod level_tests;

pub use error::{LevelError, LevelResult};
pub use spawn::{spawn_level, LevelEntities};

use crate::ai::{HelperConfig, PursuerConfig};
use crate::geometry::{Obstacle, ObstacleSet};
use crate::session::SessionConfig;

/// Один pursuer на уровне
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PursuerSpawn {
    pub position: Vec2,
    /// Начальное направление взгляда (rad)
    #[serde(default)]
    pub facing: f32,
    /// Циклический маршрут (пустой = стоит на месте)
    pub waypoints: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Размер мира (px), мир = `[0, size]`
    pub world_size: Vec2,
    pub walls: Vec<Obstacle>,
    /// Блокирующая мебель (для ядра неотличима от стен)
    pub furniture: Vec<Obstacle>,
    pub player_spawn: Vec2,
    pub player_half_extents: Vec2,
    pub pursuers: Vec<PursuerSpawn>,
    pub helper_spawn: Option<Vec2>,
    pub collectibles: Vec<Vec2>,
    pub hazards: Vec<Vec2>,
    #[serde(default)]
    pub pursuer: PursuerConfig,
    #[serde(default)]
    pub helper: HelperConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::sample()
    }
}

impl LevelConfig {
    /// Небольшой уровень 800×600: две стены, шкаф, один патруль
    pub fn sample() -> Self {
        Self {
            world_size: Vec2::new(800.0, 600.0),
            walls: vec![
                Obstacle::new(400.0, 150.0, 20.0, 200.0),
                Obstacle::new(200.0, 420.0, 240.0, 20.0),
            ],
            furniture: vec![Obstacle::new(620.0, 420.0, 80.0, 50.0)],
            player_spawn: Vec2::new(80.0, 540.0),
            player_half_extents: Vec2::splat(12.0),
            pursuers: vec![PursuerSpawn {
                position: Vec2::new(600.0, 100.0),
                facing: PI / 2.0,
                waypoints: vec![
                    Vec2::new(600.0, 100.0),
                    Vec2::new(700.0, 300.0),
                    Vec2::new(500.0, 300.0),
                ],
            }],
            helper_spawn: Some(Vec2::new(80.0, 80.0)),
            collectibles: vec![
                Vec2::new(250.0, 80.0),
                Vec2::new(560.0, 200.0),
                Vec2::new(700.0, 520.0),
                Vec2::new(120.0, 300.0),
            ],
            hazards: vec![Vec2::new(300.0, 540.0)],
            pursuer: PursuerConfig::default(),
            helper: HelperConfig::default(),
            session: SessionConfig::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(Vec2::ZERO, self.world_size)
    }

    /// Walls ∪ furniture
    pub fn obstacle_set(&self) -> ObstacleSet {
        ObstacleSet::merged(&self.walls, &self.furniture)
    }

    /// Базовая проверка формы конфигурации
    pub fn validate(&self) -> LevelResult<()> {
        if !(self.world_size.is_finite() && self.world_size.x > 0.0 && self.world_size.y > 0.0) {
            return Err(LevelError::InvalidWorldSize(self.world_size.x, self.world_size.y));
        }

        validate_obstacles("wall", &self.walls)?;
        validate_obstacles("furniture", &self.furniture)?;

        self.validate_pursuer_config()?;
        self.validate_helper_config()?;

        finite_point("player spawn", self.player_spawn)?;
        positive("player", "half_extents.x", self.player_half_extents.x)?;
        positive("player", "half_extents.y", self.player_half_extents.y)?;

        for (index, spawn) in self.pursuers.iter().enumerate() {
            finite_point(&format!("pursuer #{index} position"), spawn.position)?;
            for (waypoint_index, waypoint) in spawn.waypoints.iter().enumerate() {
                finite_point(&format!("pursuer #{index} waypoint #{waypoint_index}"), *waypoint)?;
            }
        }

        if let Some(helper) = self.helper_spawn {
            finite_point("helper spawn", helper)?;
        }
        for (index, point) in self.collectibles.iter().enumerate() {
            finite_point(&format!("collectible #{index}"), *point)?;
        }
        for (index, point) in self.hazards.iter().enumerate() {
            finite_point(&format!("hazard #{index}"), *point)?;
        }

        Ok(())
    }

    fn validate_pursuer_config(&self) -> LevelResult<()> {
        let config = &self.pursuer;
        positive("pursuer", "base_speed", config.base_speed)?;
        positive("pursuer", "chase_speed", config.chase_speed)?;
        positive("pursuer", "stunned_speed", config.stunned_speed)?;
        positive("pursuer", "vision.range", config.vision.range)?;
        positive("pursuer", "stun_duration_ms", config.stun_duration_ms)?;
        positive("pursuer", "search_duration_ms", config.search_duration_ms)?;
        positive("pursuer", "loss_timeout_ms", config.loss_timeout_ms)?;
        positive("pursuer", "waypoint_arrival_radius", config.waypoint_arrival_radius)?;

        let half_angle = config.vision.half_angle;
        if !(half_angle > 0.0 && half_angle <= PI) {
            return Err(LevelError::InvalidTunable {
                owner: "pursuer",
                name: "vision.half_angle",
                value: half_angle,
            });
        }

        Ok(())
    }

    fn validate_helper_config(&self) -> LevelResult<()> {
        let config = &self.helper;
        positive("helper", "speed", config.speed)?;
        positive("helper", "detour_distance", config.detour_distance)?;
        positive("helper", "detour_timeout_ms", config.detour_timeout_ms)?;
        positive("helper", "detour_reach_radius", config.detour_reach_radius)?;
        Ok(())
    }
}

fn validate_obstacles(kind: &'static str, obstacles: &[Obstacle]) -> LevelResult<()> {
    for (index, obstacle) in obstacles.iter().enumerate() {
        let malformed = |detail: String| LevelError::InvalidObstacle { kind, index, detail };

        if !(obstacle.x.is_finite() && obstacle.y.is_finite()) {
            return Err(malformed(format!("center ({}, {}) is not finite", obstacle.x, obstacle.y)));
        }
        if !(obstacle.width >= 0.0 && obstacle.height >= 0.0)
            || !(obstacle.width.is_finite() && obstacle.height.is_finite())
        {
            return Err(malformed(format!("size {}×{}", obstacle.width, obstacle.height)));
        }
    }
    Ok(())
}

fn positive(owner: &'static str, name: &'static str, value: f32) -> LevelResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(LevelError::InvalidTunable { owner, name, value })
    }
}

fn finite_point(what: &str, point: Vec2) -> LevelResult<()> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(LevelError::NonFinitePoint { what: what.to_string() })
    }
}
