//! Physics simulation module
//!
//! Kinematic интеграция velocity → Position с AABB коллизиями против
//! статичных препятствий (без physics engine).

pub mod movement;

// Re-export основных типов
pub use movement::{integrate_bodies, move_and_slide, KinematicPlugin};
