//! Helper (autonomous forager) tunables.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::recovery::{EmbeddingSearch, RecoveryConfig};

/// Стратегия выбора цели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum TargetSelection {
    /// Ближайший активный collectible, прямое steering без detour
    Nearest,
    /// Предпочитаем цели с чистым LOS, иначе detour вокруг препятствия
    #[default]
    LineOfSightPreferred,
}

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Скорость (units/s)
    pub speed: f32,
    pub selection: TargetSelection,
    /// Padding для path-clearance LOS проверок (px)
    pub clearance_inflate: f32,
    /// Боковое смещение detour точки (px)
    pub detour_distance: f32,
    /// Detour точка считается достигнутой ближе этого (px)
    pub detour_reach_radius: f32,
    /// Detour точка устаревает через (ms)
    pub detour_timeout_ms: f32,
    /// Половина размера collision box
    pub body_half_extents: Vec2,
    pub recovery: RecoveryConfig,
    pub embedding: EmbeddingSearch,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            speed: 70.0,
            selection: TargetSelection::LineOfSightPreferred,
            clearance_inflate: 4.0,
            detour_distance: 110.0,
            detour_reach_radius: 24.0,
            detour_timeout_ms: 700.0,
            body_half_extents: Vec2::splat(10.0),
            recovery: RecoveryConfig::default(),
            embedding: EmbeddingSearch::default(),
        }
    }
}
