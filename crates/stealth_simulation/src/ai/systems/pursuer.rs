//! Pursuer systems: stun events, выбор перцептивных целей, FSM tick.

use bevy::prelude::*;

use crate::ai::events::{PursuerStateChanged, StunPursuer};
use crate::ai::systems::fixed_delta_ms;
use crate::ai::targeting::{select_pursuer_targets, PursuerView};
use crate::ai::{Helper, Pursuer, PursuerTick};
use crate::components::{PerceptualTarget, PhysicsBody, Player, Position, WorldBounds};
use crate::geometry::ObstacleSet;
use crate::DeterministicRng;

/// Система: применение StunPursuer событий
///
/// Повторный stun уже оглушённого pursuer игнорируется контроллером.
pub fn apply_stun_events(
    mut events: EventReader<StunPursuer>,
    mut pursuers: Query<&mut Pursuer>,
    mut state_changed: EventWriter<PursuerStateChanged>,
) {
    for event in events.read() {
        let Ok(mut pursuer) = pursuers.get_mut(event.pursuer) else {
            crate::log_warning(&format!("StunPursuer: entity {:?} is not a pursuer", event.pursuer));
            continue;
        };

        let from = pursuer.state();
        if pursuer.stun() {
            state_changed.write(PursuerStateChanged {
                pursuer: event.pursuer,
                from,
                to: pursuer.state(),
            });
        }
    }
}

/// Система: выбор перцептивной цели для всех pursuer (один раз за tick)
///
/// Кандидаты: игрок и живые helper'ы (позиции прошлого tick'а).
pub fn select_perceptual_targets(
    mut pursuers: Query<(&Pursuer, &Position, &mut PerceptualTarget)>,
    players: Query<(&Position, &PhysicsBody), With<Player>>,
    helpers: Query<(&Helper, &Position)>,
    obstacles: Res<ObstacleSet>,
) {
    let candidates: Vec<Vec2> = players
        .iter()
        .filter(|(_, body)| body.enabled)
        .map(|(position, _)| position.0)
        .chain(
            helpers
                .iter()
                .filter(|(helper, _)| helper.is_alive())
                .map(|(_, position)| position.0),
        )
        .collect();

    let views: Vec<PursuerView> = pursuers
        .iter()
        .map(|(pursuer, position, _)| PursuerView {
            position: position.0,
            facing: pursuer.facing(),
            vision: pursuer.config().vision,
            last_seen: pursuer.last_seen(),
        })
        .collect();

    let targets = select_pursuer_targets(&views, &candidates, &obstacles);

    // Query итерируется в том же порядке, что и при сборе views
    for ((_, _, mut target), chosen) in pursuers.iter_mut().zip(targets) {
        target.0 = chosen;
    }
}

/// Система: FSM tick всех pursuer
///
/// Пишет velocity в PhysicsBody, применяет коррекции позиции,
/// шлёт PursuerStateChanged на каждую смену типа состояния.
pub fn update_pursuers(
    mut pursuers: Query<(Entity, &mut Pursuer, &mut Position, &mut PhysicsBody, &PerceptualTarget)>,
    obstacles: Res<ObstacleSet>,
    bounds: Option<Res<WorldBounds>>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut state_changed: EventWriter<PursuerStateChanged>,
) {
    let delta_ms = fixed_delta_ms(&time);
    let bounds = bounds.map(|bounds| bounds.0);

    for (entity, mut pursuer, mut position, mut body, target) in pursuers.iter_mut() {
        let tick = PursuerTick {
            position: position.0,
            blocked: body.blocked,
            target: target.0,
            obstacles: &obstacles,
            bounds,
            delta_ms,
        };

        let output = pursuer.update(&tick, &mut rng.rng);

        if let Some(corrected) = output.correction {
            position.0 = corrected;
        }
        body.velocity = output.velocity;

        if let Some((from, to)) = output.transition {
            state_changed.write(PursuerStateChanged {
                pursuer: entity,
                from,
                to,
            });
        }
    }
}
