//! Line-of-Sight service (segment vs every obstacle).

use bevy::prelude::*;

use super::obstacle::{clip_segment, segment_intersects_obstacle, ObstacleSet};

/// Check line-of-sight between two points.
///
/// Returns:
/// - `true` if the segment `from → to` clears every (inflated) obstacle
/// - `false` on the first obstacle whose bounds clip the segment
///
/// Результат не зависит от порядка obstacles (чистый `any` по набору).
/// Отрезок нулевой длины (`from == to`) всегда видим.
pub fn has_line_of_sight(from: Vec2, to: Vec2, obstacles: &ObstacleSet, inflate: f32) -> bool {
    if from == to {
        return true;
    }

    !obstacles
        .iter()
        .any(|obstacle| segment_intersects_obstacle(from, to, obstacle, inflate))
}

impl ObstacleSet {
    /// Параметр `t ∈ [0, 1]` первой точки входа отрезка в препятствие.
    ///
    /// `None` если отрезок ничего не задевает. Используется для обрезки
    /// лучей vision cone под рендер.
    pub fn first_hit(&self, from: Vec2, to: Vec2, inflate: f32) -> Option<f32> {
        self.iter()
            .filter_map(|obstacle| clip_segment(from, to, obstacle.bounds(inflate)))
            .map(|(t_enter, _)| t_enter)
            .min_by(|a, b| a.total_cmp(b))
    }
}
