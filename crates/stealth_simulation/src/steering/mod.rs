//! Steering primitive: target point → velocity + facing tracking.

use bevy::prelude::*;


/// Ближе этого расстояния цель считается достигнутой (velocity = 0, facing не трогаем)
pub const ARRIVAL_EPSILON: f32 = 1.0;

/// Направление взгляда агента (радианы).
///
/// Сохраняется между тиками: стоящий агент смотрит туда, куда шёл последний раз.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct Facing {
    pub angle: f32,
}

impl Facing {
    pub fn new(angle: f32) -> Self {
        Self { angle }
    }

    /// Unit vector взгляда
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Обновить facing по ненулевому вектору движения
    pub fn update_from_movement(&mut self, movement: Vec2) {
        if movement.length_squared() > f32::EPSILON {
            self.angle = movement.y.atan2(movement.x);
        }
    }
}

/// Velocity к `target` со скоростью `speed`, повёрнутая на `angle_offset`.
///
/// Facing берётся из направления на target БЕЗ offset'а (detour/avoidance
/// манёвры не разворачивают "взгляд"). Ближе `ARRIVAL_EPSILON` или невалидная
/// цель (NaN/inf) → нулевая velocity, facing без изменений.
pub fn steer_toward(
    facing: &mut Facing,
    from: Vec2,
    target: Vec2,
    speed: f32,
    angle_offset: f32,
) -> Vec2 {
    let to_target = target - from;
    let distance = to_target.length();

    if !distance.is_finite() || distance < ARRIVAL_EPSILON {
        return Vec2::ZERO;
    }

    facing.update_from_movement(to_target);

    let direction = to_target / distance;
    Vec2::from_angle(angle_offset).rotate(direction) * speed
}
