//! Tests for FSM AI components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{PursuerConfig, PursuerState};
    use super::super::helper::{HelperConfig, TargetSelection};

    #[test]
    fn test_pursuer_state_default() {
        let state = PursuerState::default();
        assert!(matches!(state, PursuerState::Patrol));
    }

    #[test]
    fn test_pursuer_config_default() {
        let config = PursuerConfig::default();
        assert_eq!(config.base_speed, 80.0);
        assert_eq!(config.chase_speed, 100.0);
        assert!((config.stunned_speed - 32.0).abs() < 1e-4);
        assert_eq!(config.stun_duration_ms, 2000.0);
        assert_eq!(config.search_duration_ms, 3000.0);
        assert_eq!(config.loss_timeout_ms, 3000.0);
        assert_eq!(config.waypoint_arrival_radius, 20.0);
        assert!(config.chase_speed > config.base_speed);
    }

    #[test]
    fn test_helper_config_default() {
        let config = HelperConfig::default();
        assert_eq!(config.selection, TargetSelection::LineOfSightPreferred);
        assert_eq!(config.detour_distance, 110.0);
        assert_eq!(config.detour_reach_radius, 24.0);
        assert_eq!(config.detour_timeout_ms, 700.0);
    }

    #[test]
    fn test_state_kind_ignores_timers() {
        let a = PursuerState::Chase { lost_for_ms: 0.0 };
        let b = PursuerState::Chase { lost_for_ms: 1500.0 };
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&PursuerState::Patrol));
        assert_eq!(b.label(), "CHASE");
        assert_eq!(PursuerState::Stunned { remaining_ms: 1.0 }.label(), "STUNNED");
    }
}
