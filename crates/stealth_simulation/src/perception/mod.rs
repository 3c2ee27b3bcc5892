//! Perception: vision cone detection + cone geometry для рендера.

pub mod vision;

#[cfg(test)]
mod vision_tests;

pub use vision::{can_perceive, normalize_angle, VisionCone, VisionConeGeometry};
