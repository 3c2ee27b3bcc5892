//! World positioning компоненты: Position, WorldBounds

use bevy::math::Rect;
use bevy::prelude::*;

/// Позиция центра body в мировых координатах (px, экранная ось y вниз)
///
/// Authoritative: физика и контроллеры пишут сюда, рендер только читает.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Position(pub Vec2);

/// Прямоугольник уровня. Коррекции позиции и интеграция не выпускают body наружу.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds(pub Rect);

