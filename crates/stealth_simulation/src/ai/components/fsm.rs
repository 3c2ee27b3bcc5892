//! Pursuer FSM state + tunables.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::perception::VisionCone;
use crate::recovery::{EmbeddingSearch, RecoveryConfig};

/// Pursuer FSM состояния (ровно одно активно)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
pub enum PursuerState {
    /// Patrol — обход waypoints по кругу (начальное состояние)
    #[default]
    Patrol,

    /// Chase — преследуем цель
    Chase {
        /// Сколько цель непрерывно НЕ видна (ms)
        lost_for_ms: f32,
    },

    /// Search — идём к last-seen и ждём
    Search {
        /// Оставшийся countdown (тикает только после прибытия к last-seen)
        countdown_ms: f32,
    },

    /// Stunned — оглушён, vision выключено
    Stunned {
        /// Оставшееся время stun (ms)
        remaining_ms: f32,
    },
}

impl PursuerState {
    /// Имя состояния для логов / audio cues
    pub fn label(&self) -> &'static str {
        match self {
            PursuerState::Patrol => "PATROL",
            PursuerState::Chase { .. } => "CHASE",
            PursuerState::Search { .. } => "SEARCH",
            PursuerState::Stunned { .. } => "STUNNED",
        }
    }

    /// То же состояние, игнорируя таймеры внутри
    pub fn same_kind(&self, other: &PursuerState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn is_patrol(&self) -> bool {
        matches!(self, PursuerState::Patrol)
    }

    pub fn is_chase(&self) -> bool {
        matches!(self, PursuerState::Chase { .. })
    }

    pub fn is_search(&self) -> bool {
        matches!(self, PursuerState::Search { .. })
    }

    pub fn is_stunned(&self) -> bool {
        matches!(self, PursuerState::Stunned { .. })
    }
}

/// Параметры pursuer (задаются уровнем один раз при загрузке)
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct PursuerConfig {
    /// Скорость patrol/search (units/s)
    pub base_speed: f32,
    /// Скорость chase (> base)
    pub chase_speed: f32,
    /// Скорость в stun (~40% base)
    pub stunned_speed: f32,
    /// Конус зрения
    pub vision: VisionCone,
    /// Длительность stun (ms)
    pub stun_duration_ms: f32,
    /// Countdown в точке last-seen (ms)
    pub search_duration_ms: f32,
    /// Сколько непрерывно не видеть цель до перехода в Search (ms)
    pub loss_timeout_ms: f32,
    /// Радиус прибытия к waypoint (px)
    pub waypoint_arrival_radius: f32,
    /// Радиус прибытия к last-seen (px)
    pub search_arrival_radius: f32,
    /// Половина размера collision box
    pub body_half_extents: Vec2,
    /// Сколько лучей в геометрии конуса для рендера
    pub cone_ray_count: usize,
    pub recovery: RecoveryConfig,
    pub embedding: EmbeddingSearch,
}

impl Default for PursuerConfig {
    fn default() -> Self {
        let base_speed = 80.0;
        Self {
            base_speed,
            chase_speed: base_speed * 1.25,
            stunned_speed: base_speed * 0.4,
            vision: VisionCone::default(),
            stun_duration_ms: 2000.0,
            search_duration_ms: 3000.0,
            loss_timeout_ms: 3000.0,
            waypoint_arrival_radius: 20.0,
            search_arrival_radius: 20.0,
            body_half_extents: Vec2::splat(12.0),
            cone_ray_count: 24,
            recovery: RecoveryConfig::default(),
            embedding: EmbeddingSearch::default(),
        }
    }
}
