//! Position-correction primitive (embedding recovery).

use bevy::math::Rect;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::geometry::ObstacleSet;

/// Параметры bounded spiral search
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct EmbeddingSearch {
    /// Шаг по радиусу (px)
    pub radial_step: f32,
    /// Сколько направлений проверяем на каждом кольце
    pub angular_steps: u32,
    /// Максимальный радиус поиска (px)
    pub max_radius: f32,
}

impl Default for EmbeddingSearch {
    fn default() -> Self {
        Self {
            radial_step: 8.0,
            angular_steps: 16,
            max_radius: 160.0,
        }
    }
}

/// Можно ли поставить collision box в `position`: не пересекает препятствия и целиком внутри bounds
pub fn is_valid_placement(
    position: Vec2,
    half_extents: Vec2,
    obstacles: &ObstacleSet,
    bounds: Option<Rect>,
) -> bool {
    if !position.is_finite() {
        return false;
    }

    let inside_bounds = bounds.is_none_or(|world| {
        position.x - half_extents.x >= world.min.x
            && position.x + half_extents.x <= world.max.x
            && position.y - half_extents.y >= world.min.y
            && position.y + half_extents.y <= world.max.y
    });

    inside_bounds && !obstacles.overlaps_box(position, half_extents)
}

/// Ближайшая валидная позиция вокруг `origin` (кольца с шагом `radial_step`).
///
/// Детерминированно: кольца по возрастанию радиуса, направления от 0 по часовой
/// (в экранных координатах). `None` если до `max_radius` ничего не нашлось.
pub fn spiral_search(
    origin: Vec2,
    half_extents: Vec2,
    obstacles: &ObstacleSet,
    bounds: Option<Rect>,
    search: &EmbeddingSearch,
) -> Option<Vec2> {
    if search.radial_step <= 0.0 || search.angular_steps == 0 {
        return None;
    }

    let angle_step = TAU / search.angular_steps as f32;
    let mut radius = search.radial_step;

    while radius <= search.max_radius {
        for i in 0..search.angular_steps {
            let candidate = origin + Vec2::from_angle(angle_step * i as f32) * radius;
            if is_valid_placement(candidate, half_extents, obstacles, bounds) {
                return Some(candidate);
            }
        }
        radius += search.radial_step;
    }

    None
}

/// Трекает last safe position и вытаскивает агента из препятствий
#[derive(Debug, Clone)]
pub struct PositionCorrector {
    half_extents: Vec2,
    last_safe: Option<Vec2>,
}

impl PositionCorrector {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            half_extents,
            last_safe: None,
        }
    }

    pub fn last_safe(&self) -> Option<Vec2> {
        self.last_safe
    }

    /// Скорректированная позиция, или `None` если коррекция не нужна (или невозможна).
    ///
    /// 1. позиция валидна → запоминаем как last safe
    /// 2. last safe всё ещё валидна → snap туда
    /// 3. иначе spiral search от текущей позиции
    pub fn correct(
        &mut self,
        position: Vec2,
        obstacles: &ObstacleSet,
        bounds: Option<Rect>,
        search: &EmbeddingSearch,
    ) -> Option<Vec2> {
        if is_valid_placement(position, self.half_extents, obstacles, bounds) {
            self.last_safe = Some(position);
            return None;
        }

        if let Some(safe) = self.last_safe {
            if is_valid_placement(safe, self.half_extents, obstacles, bounds) {
                return Some(safe);
            }
        }

        let found = spiral_search(position, self.half_extents, obstacles, bounds, search);
        if found.is_some() {
            self.last_safe = found;
        }
        found
    }
}
