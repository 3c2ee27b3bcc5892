//! AI components (FSM state, tunables)

pub mod fsm;
pub mod helper;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod fsm_tests;

// Re-export all components
pub use fsm::*;
pub use helper::*;
