//! Session события (для UI / audio слоя)

use bevy::prelude::*;

use crate::ai::CollectibleId;
use crate::session::Collector;

/// Предмет подобран (collectible остаётся в мире с `active = false`)
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemCollected {
    pub collectible: Entity,
    pub id: CollectibleId,
    pub collector: Collector,
}

/// Pursuer коснулся игрока (шлётся один раз за уровень)
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerCaught {
    pub pursuer: Entity,
    pub position: Vec2,
}
