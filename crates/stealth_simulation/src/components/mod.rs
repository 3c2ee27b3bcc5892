//! ECS Components для orchestration layer
//!
//! Организация по доменам:
//! - world: позиция в мире и границы уровня (Position, WorldBounds)
//! - body: kinematic body (PhysicsBody)
//! - actor: роли сущностей (Player, Collectible, Hazard, PerceptualTarget)
//!
//! Сами контроллеры (`Pursuer`, `Helper`) тоже компоненты, живут в `ai`.

pub mod actor;
pub mod body;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use body::*;
pub use world::*;
