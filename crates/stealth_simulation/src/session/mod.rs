//! Game rules поверх контроллеров: сбор предметов, ловушки, поимка.
//!
//! Выполняется после физики, на уже сдвинутых позициях. Сигналы в AI
//! (StunPursuer, PoofHelper) читаются на следующем tick'е.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod events;
pub mod systems;


pub use events::{ItemCollected, PlayerCaught};
pub use systems::{collect_items, detect_catches, detect_hazard_contact};

use crate::SimulationSet;

/// Радиусы контактов
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Предмет собран, если центр collector'а ближе (px)
    pub collect_radius: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { collect_radius: 20.0 }
    }
}

/// Счёт текущего уровня
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct SessionState {
    pub collected_by_player: u32,
    pub collected_by_helper: u32,
    pub player_caught: bool,
}

/// Кто подобрал предмет
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Collector {
    Player,
    Helper,
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionConfig>()
            .init_resource::<SessionState>()
            .add_event::<ItemCollected>()
            .add_event::<PlayerCaught>()
            .add_systems(
                FixedUpdate,
                (collect_items, detect_hazard_contact, detect_catches)
                    .chain()
                    .in_set(SimulationSet::Rules),
            );
    }
}
