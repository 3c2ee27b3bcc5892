//! Kinematic интегратор для всех body (pursuer, helper, игрок)
//!
//! Архитектура:
//! - velocity пишут контроллеры / input, здесь только интеграция
//! - axis-separated sweep: сначала X, потом Y (скольжение вдоль стен)
//! - контакт → clamp вплотную к препятствию + флаг заблокированной стороны
//!
//! Препятствия, с которыми body УЖЕ пересекается, игнорируются: иначе embedded
//! агент не смог бы выйти сам (его вытаскивает `PositionCorrector`).

use bevy::math::Rect;
use bevy::prelude::*;

use crate::components::{PhysicsBody, Position, WorldBounds};
use crate::geometry::ObstacleSet;
use crate::recovery::BlockedSides;
use crate::SimulationSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn with(self, v: Vec2, value: f32) -> Vec2 {
        match self {
            Axis::X => Vec2::new(value, v.y),
            Axis::Y => Vec2::new(v.x, value),
        }
    }

    fn unit(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Y => Vec2::Y,
        }
    }
}

/// Сдвиг body на `displacement` с коллизиями.
///
/// Возвращает новую позицию и стороны, в которые body упёрся.
pub fn move_and_slide(
    position: Vec2,
    half_extents: Vec2,
    displacement: Vec2,
    obstacles: &ObstacleSet,
    bounds: Option<Rect>,
) -> (Vec2, BlockedSides) {
    let mut blocked = BlockedSides::default();

    let (position, hit_x) = sweep_axis(position, half_extents, displacement.x, Axis::X, obstacles, bounds);
    if hit_x {
        if displacement.x > 0.0 {
            blocked.right = true;
        } else {
            blocked.left = true;
        }
    }

    let (position, hit_y) = sweep_axis(position, half_extents, displacement.y, Axis::Y, obstacles, bounds);
    if hit_y {
        // Экранные координаты: +y = вниз
        if displacement.y > 0.0 {
            blocked.down = true;
        } else {
            blocked.up = true;
        }
    }

    (position, blocked)
}

fn sweep_axis(
    position: Vec2,
    half_extents: Vec2,
    delta: f32,
    axis: Axis,
    obstacles: &ObstacleSet,
    bounds: Option<Rect>,
) -> (Vec2, bool) {
    if delta == 0.0 || !delta.is_finite() {
        return (position, false);
    }

    let start = axis.component(position);
    let mut end = start + delta;
    let mut hit = false;

    // Swept box: от стартовой позиции до конечной вдоль оси
    let swept_center = position + axis.unit() * (delta * 0.5);
    let swept_half = half_extents + axis.unit() * (delta.abs() * 0.5);
    let half = axis.component(half_extents);

    for obstacle in obstacles.iter() {
        if obstacle.overlaps_box(position, half_extents) || !obstacle.overlaps_box(swept_center, swept_half) {
            continue;
        }

        let rect = obstacle.bounds(0.0);
        if delta > 0.0 {
            end = end.min(axis.component(rect.min) - half);
        } else {
            end = end.max(axis.component(rect.max) + half);
        }
        hit = true;
    }

    if let Some(world) = bounds {
        let low = axis.component(world.min) + half;
        let high = axis.component(world.max) - half;
        if delta > 0.0 && end > high {
            end = high.max(start.min(high));
            hit = true;
        } else if delta < 0.0 && end < low {
            end = low.min(start.max(low));
            hit = true;
        }
    }

    // Уже упёрлись вплотную: не откатываем назад
    if (delta > 0.0 && end < start) || (delta < 0.0 && end > start) {
        end = start;
    }

    (axis.with(position, end), hit)
}

/// Система интеграции velocity → Position
///
/// Работает в FixedUpdate (60Hz) после AI систем.
pub fn integrate_bodies(
    mut query: Query<(&mut Position, &mut PhysicsBody)>,
    obstacles: Res<ObstacleSet>,
    bounds: Option<Res<WorldBounds>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let bounds = bounds.map(|bounds| bounds.0);

    for (mut position, mut body) in query.iter_mut() {
        if !body.enabled {
            continue;
        }

        let (moved, blocked) =
            move_and_slide(position.0, body.half_extents, body.velocity * delta, &obstacles, bounds);
        position.0 = moved;
        body.blocked = blocked;
    }
}

/// Plugin для kinematic интеграции
pub struct KinematicPlugin;

impl Plugin for KinematicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObstacleSet>()
            .add_systems(FixedUpdate, integrate_bodies.in_set(SimulationSet::Physics));
    }
}
