//! Stuck/unstick recovery + position correction.
//!
//! Два независимых механизма (оба rate-limited):
//! - periodic displacement check (`StuckMonitor`) — агент с целью почти не сдвинулся за интервал
//! - immediate collision response (`CollisionResponder`) — body упёрся в стену при ненулевой velocity
//!
//! Плюс единый position-correction primitive (`PositionCorrector`): вытаскивает
//! агента, застрявшего ВНУТРИ препятствия (snap к last safe → spiral search).

pub mod correction;
pub mod stuck;


pub use correction::{is_valid_placement, spiral_search, EmbeddingSearch, PositionCorrector};
pub use stuck::{random_offset, BlockedSides, CollisionResponder, NudgeHold, RecoveryConfig, StuckMonitor};
