//! AI Events — внешние сигналы в контроллеры и уведомления наружу.
//!
//! Входящие (orchestration → AI): StunPursuer, PoofHelper.
//! Исходящие (AI → audio/render feed): PursuerStateChanged, HelperPoofed.

use bevy::prelude::*;

use crate::ai::components::PursuerState;

/// Stun сигнал (pursuer наступил на hazard)
#[derive(Event, Debug, Clone, Copy)]
pub struct StunPursuer {
    pub pursuer: Entity,
}

/// Poof сигнал (helper пойман pursuer'ом)
#[derive(Event, Debug, Clone, Copy)]
pub struct PoofHelper {
    pub helper: Entity,
}

/// Смена типа состояния FSM (bark cadence, тинт конуса)
#[derive(Event, Debug, Clone, Copy)]
pub struct PursuerStateChanged {
    pub pursuer: Entity,
    pub from: PursuerState,
    pub to: PursuerState,
}

/// Helper исчез (dissolve effect в точке `position`)
#[derive(Event, Debug, Clone, Copy)]
pub struct HelperPoofed {
    pub helper: Entity,
    pub position: Vec2,
}
