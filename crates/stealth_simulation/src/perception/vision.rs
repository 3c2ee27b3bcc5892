//! Vision cone detector.
//!
//! Порядок проверок (short-circuit на первой неудаче):
//! 1. distance: `dist² ≤ range²`
//! 2. angle: `|normalize(bearing - facing)| ≤ half_angle`
//! 3. occlusion: line-of-sight между observer и target
//!
//! Обе границы inclusive (с допуском `BOUNDARY_TOLERANCE` на float rounding).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::geometry::{has_line_of_sight, ObstacleSet};

/// Допуск для inclusive границ range/half-angle
pub const BOUNDARY_TOLERANCE: f32 = 1e-4;

/// Параметры конуса зрения (level-invariant, но настраиваемые)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct VisionCone {
    /// Дальность зрения (px)
    pub range: f32,
    /// Половина угла конуса (радианы)
    pub half_angle: f32,
}

impl Default for VisionCone {
    fn default() -> Self {
        Self {
            range: 250.0,
            half_angle: 35.0_f32.to_radians(), // 70° total cone
        }
    }
}

/// Нормализует угол в [-π, π]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid может вернуть ровно TAU из-за rounding
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Может ли observer (позиция + facing) увидеть target.
///
/// Target в той же точке, что и observer, считается видимым.
pub fn can_perceive(
    observer: Vec2,
    facing: f32,
    target: Vec2,
    cone: &VisionCone,
    obstacles: &ObstacleSet,
) -> bool {
    let to_target = target - observer;
    let distance_sq = to_target.length_squared();

    if distance_sq > cone.range * cone.range * (1.0 + BOUNDARY_TOLERANCE) {
        return false;
    }

    if distance_sq <= f32::EPSILON {
        return true;
    }

    let bearing = to_target.y.atan2(to_target.x);
    if normalize_angle(bearing - facing).abs() > cone.half_angle + BOUNDARY_TOLERANCE {
        return false;
    }

    has_line_of_sight(observer, target, obstacles, 0.0)
}

/// Геометрия конуса для debug/visual рендера.
///
/// Лучи веером от `facing - half_angle` до `facing + half_angle`, каждый обрезан
/// на первом препятствии.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisionConeGeometry {
    pub origin: Vec2,
    pub facing: f32,
    pub half_angle: f32,
    pub range: f32,
    /// Конечные точки лучей (world coordinates)
    pub rays: Vec<Vec2>,
}

impl VisionConeGeometry {
    pub fn compute(
        origin: Vec2,
        facing: f32,
        cone: &VisionCone,
        obstacles: &ObstacleSet,
        ray_count: usize,
    ) -> Self {
        let ray_count = ray_count.max(2);
        let step = (cone.half_angle * 2.0) / (ray_count - 1) as f32;

        let rays = (0..ray_count)
            .map(|i| {
                let angle = facing - cone.half_angle + step * i as f32;
                let far = origin + Vec2::from_angle(angle) * cone.range;
                match obstacles.first_hit(origin, far, 0.0) {
                    Some(t) => origin.lerp(far, t),
                    None => far,
                }
            })
            .collect();

        Self {
            origin,
            facing,
            half_angle: cone.half_angle,
            range: cone.range,
            rays,
        }
    }
}
