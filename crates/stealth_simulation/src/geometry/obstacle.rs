//! Obstacle rectangles and point/segment/box predicates.

use bevy::math::Rect;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned прямоугольник препятствия (world coordinates).
///
/// `x`/`y` — центр, `width`/`height` — полные размеры.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Границы с равномерным padding'ом `inflate` на каждую сторону
    pub fn bounds(&self, inflate: f32) -> Rect {
        let half = Vec2::new(self.width, self.height) * 0.5 + Vec2::splat(inflate);
        Rect {
            min: self.center() - half,
            max: self.center() + half,
        }
    }

    /// Inclusive: точка на границе считается внутри
    pub fn contains_point(&self, point: Vec2, inflate: f32) -> bool {
        let bounds = self.bounds(inflate);
        point.x >= bounds.min.x
            && point.x <= bounds.max.x
            && point.y >= bounds.min.y
            && point.y <= bounds.max.y
    }

    /// Strict AABB overlap: касание гранями НЕ считается пересечением
    pub fn overlaps_box(&self, center: Vec2, half_extents: Vec2) -> bool {
        let bounds = self.bounds(0.0);
        center.x + half_extents.x > bounds.min.x
            && center.x - half_extents.x < bounds.max.x
            && center.y + half_extents.y > bounds.min.y
            && center.y - half_extents.y < bounds.max.y
    }
}

/// Liang–Barsky clip отрезка `p1 → p2` по прямоугольнику.
///
/// Возвращает параметрический интервал `[t_enter, t_exit]` ⊂ [0, 1] внутри
/// прямоугольника, либо `None` если отрезок его не задевает. Границы inclusive.
pub(crate) fn clip_segment(p1: Vec2, p2: Vec2, bounds: Rect) -> Option<(f32, f32)> {
    let delta = p2 - p1;
    let checks = [
        (-delta.x, p1.x - bounds.min.x),
        (delta.x, bounds.max.x - p1.x),
        (-delta.y, p1.y - bounds.min.y),
        (delta.y, bounds.max.y - p1.y),
    ];

    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;

    for (p, q) in checks {
        if p == 0.0 {
            // Параллельно этой грани: снаружи → пересечения нет
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            if r > t_exit {
                return None;
            }
            t_enter = t_enter.max(r);
        } else {
            if r < t_enter {
                return None;
            }
            t_exit = t_exit.min(r);
        }
    }

    (t_enter <= t_exit).then_some((t_enter, t_exit))
}

/// Пересекает ли отрезок `p1 → p2` препятствие (с padding'ом `inflate`)
pub fn segment_intersects_obstacle(p1: Vec2, p2: Vec2, obstacle: &Obstacle, inflate: f32) -> bool {
    clip_segment(p1, p2, obstacle.bounds(inflate)).is_some()
}

/// Набор препятствий уровня (read-only после загрузки)
#[derive(Resource, Debug, Clone, Default)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Walls + blocking furniture → один список
    pub fn merged(walls: &[Obstacle], furniture: &[Obstacle]) -> Self {
        Self::new(walls.iter().chain(furniture).copied().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn is_point_inside_any_obstacle(&self, point: Vec2, inflate: f32) -> bool {
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.contains_point(point, inflate))
    }

    /// Перекрывает ли collision box (center ± half_extents) хоть одно препятствие
    pub fn overlaps_box(&self, center: Vec2, half_extents: Vec2) -> bool {
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.overlaps_box(center, half_extents))
    }
}
