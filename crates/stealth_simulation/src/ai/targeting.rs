//! Per-tick выбор перцептивной цели для каждого pursuer.
//!
//! Считается один раз за tick на уровне orchestration (игрок + живой helper
//! как кандидаты), результат передаётся в `PursuerTick::target`.

use bevy::prelude::*;

use crate::geometry::ObstacleSet;
use crate::perception::{can_perceive, VisionCone};

/// Что orchestration знает о pursuer на момент выбора цели
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuerView {
    pub position: Vec2,
    pub facing: f32,
    pub vision: VisionCone,
    /// Last-Seen точка pursuer'а (есть только после контакта)
    pub last_seen: Option<Vec2>,
}

/// Для каждого pursuer: ближайший видимый кандидат.
///
/// Никого не видно → кандидат, ближайший к Last-Seen pursuer'а
/// (живая позиция преследуемого для CHASE grace period). Без Last-Seen → `None`.
/// Порядок результата совпадает с порядком `pursuers`.
pub fn select_pursuer_targets(
    pursuers: &[PursuerView],
    candidates: &[Vec2],
    obstacles: &ObstacleSet,
) -> Vec<Option<Vec2>> {
    pursuers
        .iter()
        .map(|pursuer| {
            let visible = nearest(pursuer.position, candidates.iter().copied().filter(|&candidate| {
                can_perceive(pursuer.position, pursuer.facing, candidate, &pursuer.vision, obstacles)
            }));

            visible.or_else(|| {
                pursuer
                    .last_seen
                    .and_then(|last_seen| nearest(last_seen, candidates.iter().copied()))
            })
        })
        .collect()
}

fn nearest(origin: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    let mut best: Option<(Vec2, f32)> = None;
    for point in points {
        let distance_sq = origin.distance_squared(point);
        match best {
            Some((_, best_sq)) if distance_sq >= best_sq => {}
            _ => best = Some((point, distance_sq)),
        }
    }
    best.map(|(point, _)| point)
}
