//! Static obstacle geometry: axis-aligned rectangles + segment queries.
//!
//! Obstacle set собирается один раз при загрузке уровня (walls ∪ furniture)
//! и дальше только читается всеми контроллерами. Никакой разницы между стеной
//! и мебелью на уровне запросов нет.

pub mod line_of_sight;
pub mod obstacle;

#[cfg(test)]
mod line_of_sight_tests;
#[cfg(test)]
mod obstacle_tests;

pub use line_of_sight::has_line_of_sight;
pub use obstacle::{segment_intersects_obstacle, Obstacle, ObstacleSet};
