//! AI systems (orchestration ↔ controllers)

pub mod helper;
pub mod pursuer;

// Re-export all systems
pub use helper::*;
pub use pursuer::*;

use bevy::prelude::*;

/// Frame delta текущего fixed шага (ms)
pub(crate) fn fixed_delta_ms(time: &Time<Fixed>) -> f32 {
    time.delta_secs() * 1000.0
}
