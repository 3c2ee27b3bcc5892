//! Headless stealth симуляция
//!
//! Запускает sample уровень без рендера: игрок идёт вправо, pursuer патрулирует,
//! helper собирает предметы.

use bevy::prelude::*;
use stealth_simulation::{
    create_headless_app, log_error, log_info, spawn_level, LevelConfig, PhysicsBody, Position, Pursuer,
    SessionState,
};

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting stealth headless simulation (seed: {})", seed));

    let level = LevelConfig::sample();
    let entities = match spawn_level(app.world_mut(), &level) {
        Ok(entities) => entities,
        Err(error) => {
            log_error(&format!("Failed to load level: {}", error));
            std::process::exit(1);
        }
    };

    if let Some(mut body) = app.world_mut().get_mut::<PhysicsBody>(entities.player) {
        body.velocity = Vec2::new(60.0, 0.0);
    }

    // 20 секунд симуляции
    for tick in 0..1200 {
        app.update();

        if tick % 120 == 0 {
            for &pursuer_entity in &entities.pursuers {
                let world = app.world();
                if let (Some(pursuer), Some(position)) = (
                    world.get::<Pursuer>(pursuer_entity),
                    world.get::<Position>(pursuer_entity),
                ) {
                    log_info(&format!(
                        "Tick {}: pursuer {:?} {} at ({:.1}, {:.1})",
                        tick,
                        pursuer_entity,
                        pursuer.state().label(),
                        position.0.x,
                        position.0.y
                    ));
                }
            }
        }

        if app.world().resource::<SessionState>().player_caught {
            log_info(&format!("Player caught at tick {}", tick));
            break;
        }
    }

    let state = app.world().resource::<SessionState>();
    log_info(&format!(
        "Simulation complete: player collected {}, helper collected {}",
        state.collected_by_player, state.collected_by_helper
    ));
}
