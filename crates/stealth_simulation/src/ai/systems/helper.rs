//! Helper systems: poof events, forager tick.

use bevy::prelude::*;

use crate::ai::events::{HelperPoofed, PoofHelper};
use crate::ai::systems::fixed_delta_ms;
use crate::ai::{CollectibleView, Helper, HelperTick};
use crate::components::{Collectible, PhysicsBody, Position, WorldBounds};
use crate::geometry::ObstacleSet;
use crate::DeterministicRng;

/// Система: применение PoofHelper событий
///
/// Idempotent: второй poof того же helper'а ничего не делает и событие не дублирует.
pub fn apply_poof_events(
    mut events: EventReader<PoofHelper>,
    mut helpers: Query<(&mut Helper, &Position, &mut PhysicsBody)>,
    mut poofed: EventWriter<HelperPoofed>,
) {
    for event in events.read() {
        let Ok((mut helper, position, mut body)) = helpers.get_mut(event.helper) else {
            continue;
        };

        if helper.poof() {
            body.disable();
            poofed.write(HelperPoofed {
                helper: event.helper,
                position: position.0,
            });
        }
    }
}

/// Система: forager tick всех живых helper'ов
pub fn update_helpers(
    mut helpers: Query<(&mut Helper, &mut Position, &mut PhysicsBody)>,
    collectibles: Query<(&Collectible, &Position), Without<Helper>>,
    obstacles: Res<ObstacleSet>,
    bounds: Option<Res<WorldBounds>>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
) {
    let delta_ms = fixed_delta_ms(&time);
    let bounds = bounds.map(|bounds| bounds.0);

    let mut views: Vec<CollectibleView> = collectibles
        .iter()
        .map(|(collectible, position)| CollectibleView {
            id: collectible.id,
            position: position.0,
            active: collectible.active,
        })
        .collect();
    // Порядок спавна → стабильный tie-break при равных расстояниях
    views.sort_by_key(|view| view.id);

    for (mut helper, mut position, mut body) in helpers.iter_mut() {
        if !helper.is_alive() {
            continue;
        }

        let tick = HelperTick {
            position: position.0,
            blocked: body.blocked,
            collectibles: &views,
            obstacles: &obstacles,
            bounds,
            delta_ms,
        };

        let output = helper.update(&tick, &mut rng.rng);

        if let Some(corrected) = output.correction {
            position.0 = corrected;
        }
        body.velocity = output.velocity;
    }
}
