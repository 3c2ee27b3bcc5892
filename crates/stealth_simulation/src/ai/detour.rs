//! Detour planner: perpendicular side-step вокруг препятствия.
//!
//! Когда прямой путь к цели перекрыт, helper идёт к точке, смещённой на
//! `detour_distance` перпендикулярно вектору на цель. Сторона "липкая":
//! сначала пробуем ту, что использовали в прошлый раз.

use bevy::math::Rect;
use bevy::prelude::*;

use crate::geometry::ObstacleSet;
use crate::recovery::is_valid_placement;

/// Сторона обхода относительно направления на цель
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum DetourSide {
    /// Перпендикуляр `(-y, x)`
    #[default]
    Left,
    /// Перпендикуляр `(y, -x)`
    Right,
}

impl DetourSide {
    pub fn sign(&self) -> f32 {
        match self {
            DetourSide::Left => 1.0,
            DetourSide::Right => -1.0,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            DetourSide::Left => DetourSide::Right,
            DetourSide::Right => DetourSide::Left,
        }
    }
}

/// Активная detour точка
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detour {
    pub point: Vec2,
    pub side: DetourSide,
    pub age_ms: f32,
}

/// Параметры обхода (из `HelperConfig`)
#[derive(Debug, Clone, Copy)]
pub struct DetourParams<'a> {
    pub lateral_distance: f32,
    pub reach_radius: f32,
    pub timeout_ms: f32,
    pub half_extents: Vec2,
    pub obstacles: &'a ObstacleSet,
    pub bounds: Option<Rect>,
}

/// Detour точка для обхода к `target`.
///
/// Порядок: preferred side → opposite side → короткий push вдоль перпендикуляра
/// preferred стороны (половина lateral distance) без проверки placement.
pub fn compute_detour(position: Vec2, target: Vec2, preferred: DetourSide, params: &DetourParams) -> Detour {
    let perpendicular = match (target - position).perp().try_normalize() {
        Some(perpendicular) => perpendicular,
        // Цель совпадает с позицией — любой стабильный перпендикуляр
        None => Vec2::Y,
    };

    for side in [preferred, preferred.opposite()] {
        let candidate = position + perpendicular * side.sign() * params.lateral_distance;
        if is_valid_placement(candidate, params.half_extents, params.obstacles, params.bounds) {
            return Detour {
                point: candidate,
                side,
                age_ms: 0.0,
            };
        }
    }

    Detour {
        point: position + perpendicular * preferred.sign() * params.lateral_distance * 0.5,
        side: preferred,
        age_ms: 0.0,
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetourPlanner {
    current: Option<Detour>,
    preferred: DetourSide,
}

impl DetourPlanner {
    pub fn current(&self) -> Option<Detour> {
        self.current
    }

    pub fn preferred_side(&self) -> DetourSide {
        self.preferred
    }

    pub fn set_preferred_side(&mut self, side: DetourSide) {
        self.preferred = side;
    }

    /// Detour больше не нужен (LOS чистый / цели нет)
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Точка, к которой идти на этом tick'е.
    ///
    /// Пересчитывается если detour нет, он достигнут (≤ reach radius) или устарел (≥ timeout).
    pub fn steer_point(&mut self, position: Vec2, target: Vec2, delta_ms: f32, params: &DetourParams) -> Vec2 {
        if let Some(detour) = self.current.as_mut() {
            detour.age_ms += delta_ms;
            let reached = position.distance(detour.point) <= params.reach_radius;
            let stale = detour.age_ms >= params.timeout_ms;
            if !reached && !stale {
                return detour.point;
            }
        }

        let detour = compute_detour(position, target, self.preferred, params);
        if detour.side != self.preferred {
            crate::log(&format!("↪️ Helper detour flips to {:?} side", detour.side));
        }
        self.preferred = detour.side;
        self.current = Some(detour);
        detour.point
    }
}
