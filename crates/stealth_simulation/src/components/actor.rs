//! Роли сущностей уровня: Player, Collectible, Hazard, PerceptualTarget

use bevy::prelude::*;

use crate::ai::CollectibleId;
use crate::components::{PhysicsBody, Position};

/// Игрок (управляется снаружи: velocity в `PhysicsBody` пишет input layer)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(PhysicsBody)]
pub struct Player;

/// Предмет для сбора (игроком или helper'ом)
///
/// После сбора остаётся в мире с `active = false`: helper обязан увидеть это
/// на следующем tick'е и сбросить held target.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Position)]
pub struct Collectible {
    /// Stable ID (порядок спавна)
    pub id: CollectibleId,
    pub active: bool,
}

impl Collectible {
    pub fn new(id: u64) -> Self {
        Self {
            id: CollectibleId(id),
            active: true,
        }
    }
}

/// Ловушка, брошенная игроком. Одноразовая: первый коснувшийся pursuer оглушён.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Position)]
pub struct Hazard {
    /// Радиус срабатывания (от центра, px)
    pub radius: f32,
    pub armed: bool,
}

impl Default for Hazard {
    fn default() -> Self {
        Self {
            radius: 16.0,
            armed: true,
        }
    }
}

/// Перцептивная цель pursuer на этот tick (пишет `select_perceptual_targets`)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PerceptualTarget(pub Option<Vec2>);
