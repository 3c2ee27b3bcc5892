//! Stealth Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 для 2D stealth уровня:
//! - geometry / perception: препятствия, line of sight, vision cone
//! - steering / recovery: движение к цели, stuck/unstick, embedding correction
//! - ai: pursuer FSM (PATROL / CHASE / SEARCH / STUNNED) + helper-forager
//! - physics / session / level: тонкий orchestration слой вокруг контроллеров
//!
//! Контроллеры не знают про ECS и рендер: на вход snapshot tick'а, на выход
//! velocity + state. Все таймеры в ms, скорости в units/s.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod components;
pub mod geometry;
pub mod level;
pub mod logger;
pub mod perception;
pub mod physics;
pub mod recovery;
pub mod session;
pub mod steering;

// Re-export базовых типов для удобства
pub use ai::{
    AIPlugin, CollectibleId, Helper, HelperConfig, HelperPoofed, PoofHelper, Pursuer, PursuerConfig,
    PursuerState, PursuerStateChanged, StunPursuer, TargetSelection,
};
pub use components::*;
pub use geometry::{has_line_of_sight, Obstacle, ObstacleSet};
pub use level::{spawn_level, LevelConfig, LevelEntities, LevelError};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, ConsoleLogger, LogLevel, LogPrinter,
};
pub use perception::{can_perceive, VisionCone, VisionConeGeometry};
pub use physics::KinematicPlugin;
pub use session::{ItemCollected, PlayerCaught, SessionConfig, SessionPlugin, SessionState};

/// Фазы simulation tick'а (FixedUpdate, строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Внешние сигналы прошлого tick'а (stun, poof)
    Signals,
    /// Выбор перцептивных целей
    Perception,
    /// Controller tick (pursuers → helpers)
    Agents,
    /// Интеграция velocity → Position
    Physics,
    /// Сбор предметов, ловушки, поимка
    Rules,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Signals,
                    SimulationSet::Perception,
                    SimulationSet::Agents,
                    SimulationSet::Physics,
                    SimulationSet::Rules,
                )
                    .chain(),
            )
            .add_plugins((AIPlugin, KinematicPlugin, SessionPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Единственный источник случайности (recovery nudges).
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную: один `app.update()` = ровно 1/60 s
/// (первый update только инициализирует часы, fixed шагов в нём нет).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
