//! Ошибки конфигурации уровня

use thiserror::Error;

/// Единственная fallible поверхность: загрузка уровня.
/// Per-tick логика контроллеров ошибок не возвращает.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    /// Размер мира не положительный / не конечный
    #[error("world size must be positive and finite, got ({0}, {1})")]
    InvalidWorldSize(f32, f32),
    /// Препятствие с отрицательным / не конечным размером или центром
    #[error("{kind} obstacle #{index} is malformed: {detail}")]
    InvalidObstacle {
        kind: &'static str,
        index: usize,
        detail: String,
    },
    /// Tunable вне допустимого диапазона
    #[error("{owner}.{name} out of range: {value}")]
    InvalidTunable {
        owner: &'static str,
        name: &'static str,
        value: f32,
    },
    /// Точка спавна / waypoint не конечна
    #[error("{what} is not a finite point")]
    NonFinitePoint { what: String },
}

/// Result type for level operations.
pub type LevelResult<T> = Result<T, LevelError>;
