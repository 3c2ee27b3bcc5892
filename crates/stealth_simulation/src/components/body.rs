//! Kinematic body компонент

use bevy::prelude::*;

use crate::components::Position;
use crate::recovery::BlockedSides;

/// Kinematic body (axis-aligned box)
///
/// Velocity пишут контроллеры (или внешний input для игрока),
/// `integrate_bodies` двигает `Position` и выставляет `blocked`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Position)]
pub struct PhysicsBody {
    /// Скорость (units/s)
    pub velocity: Vec2,
    pub half_extents: Vec2,
    /// Стороны, упёршиеся в препятствие на последнем шаге интеграции
    pub blocked: BlockedSides,
    /// false → body не двигается и не участвует в контактах (poofed helper)
    pub enabled: bool,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(Vec2::splat(12.0))
    }
}

impl PhysicsBody {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            velocity: Vec2::ZERO,
            half_extents,
            blocked: BlockedSides::default(),
            enabled: true,
        }
    }

    /// Выключить body (zero velocity, без контактов)
    pub fn disable(&mut self) {
        self.velocity = Vec2::ZERO;
        self.blocked = BlockedSides::default();
        self.enabled = false;
    }

    /// AABB контакт двух body (касание считается контактом)
    pub fn touches(&self, position: Vec2, other: &PhysicsBody, other_position: Vec2) -> bool {
        let gap = (position - other_position).abs() - (self.half_extents + other.half_extents);
        gap.x <= 0.0 && gap.y <= 0.0
    }
}
