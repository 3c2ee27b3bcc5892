//! AI decision-making module
//!
//! Pursuer FSM (PATROL / CHASE / SEARCH / STUNNED) и автономный helper-forager.
//! Контроллеры — чистые структуры с `update(tick, rng)`; ECS системы в `systems`
//! только собирают snapshot tick'а и применяют результат.

use bevy::prelude::*;

pub mod components;
pub mod detour;
pub mod events;
pub mod helper;
pub mod pursuer;
pub mod systems;
pub mod targeting;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod detour_tests;

// Re-export основных типов
pub use components::*;
pub use detour::{compute_detour, Detour, DetourParams, DetourPlanner, DetourSide};
pub use events::{HelperPoofed, PoofHelper, PursuerStateChanged, StunPursuer};
pub use helper::{CollectibleId, CollectibleView, Helper, HelperOutput, HelperTick};
pub use pursuer::{Pursuer, PursuerOutput, PursuerTick};
pub use targeting::{select_pursuer_targets, PursuerView};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI события и системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. apply_stun_events / apply_poof_events — внешние сигналы прошлого tick'а
/// 2. select_perceptual_targets — одна цель на pursuer
/// 3. update_pursuers → update_helpers — controller tick, velocity в PhysicsBody
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StunPursuer>()
            .add_event::<PoofHelper>()
            .add_event::<PursuerStateChanged>()
            .add_event::<HelperPoofed>()
            .add_systems(
                FixedUpdate,
                (systems::apply_stun_events, systems::apply_poof_events)
                    .chain()
                    .in_set(SimulationSet::Signals),
            )
            .add_systems(
                FixedUpdate,
                systems::select_perceptual_targets.in_set(SimulationSet::Perception),
            )
            .add_systems(
                FixedUpdate,
                (systems::update_pursuers, systems::update_helpers)
                    .chain() // Последовательное выполнение для детерминизма (общий RNG)
                    .in_set(SimulationSet::Agents),
            );
    }
}
