//! Session systems: collect → hazards → catches.

use bevy::prelude::*;

use crate::ai::{Helper, PoofHelper, Pursuer, StunPursuer};
use crate::components::{Collectible, Hazard, PhysicsBody, Player, Position};
use crate::session::{Collector, ItemCollected, PlayerCaught, SessionConfig, SessionState};

/// Система: сбор предметов игроком и живыми helper'ами
///
/// Предмет деактивируется сразу — helper увидит это в следующем tick'е.
/// Игрок имеет приоритет, если оба в радиусе одновременно.
pub fn collect_items(
    mut collectibles: Query<(Entity, &mut Collectible, &Position)>,
    players: Query<(&Position, &PhysicsBody), With<Player>>,
    helpers: Query<(&Helper, &Position)>,
    config: Res<SessionConfig>,
    mut state: ResMut<SessionState>,
    mut collected: EventWriter<ItemCollected>,
) {
    let player_positions: Vec<Vec2> = players
        .iter()
        .filter(|(_, body)| body.enabled)
        .map(|(position, _)| position.0)
        .collect();
    let helper_positions: Vec<Vec2> = helpers
        .iter()
        .filter(|(helper, _)| helper.is_alive())
        .map(|(_, position)| position.0)
        .collect();

    let mut items: Vec<_> = collectibles.iter_mut().filter(|(_, item, _)| item.active).collect();
    items.sort_by_key(|(_, item, _)| item.id);

    for (entity, mut item, position) in items {
        let within = |collector: &Vec2| collector.distance(position.0) <= config.collect_radius;

        let collector = if player_positions.iter().any(within) {
            Collector::Player
        } else if helper_positions.iter().any(within) {
            Collector::Helper
        } else {
            continue;
        };

        item.active = false;
        match collector {
            Collector::Player => state.collected_by_player += 1,
            Collector::Helper => state.collected_by_helper += 1,
        }

        crate::log(&format!("✨ Item {:?} collected by {:?}", item.id, collector));
        collected.write(ItemCollected {
            collectible: entity,
            id: item.id,
            collector,
        });
    }
}

/// Система: pursuer наступил на взведённую ловушку → StunPursuer
///
/// Оглушённый pursuer ловушку не тратит.
pub fn detect_hazard_contact(
    mut hazards: Query<(&mut Hazard, &Position)>,
    pursuers: Query<(Entity, &Pursuer, &Position)>,
    mut stun: EventWriter<StunPursuer>,
) {
    for (mut hazard, hazard_position) in hazards.iter_mut() {
        if !hazard.armed {
            continue;
        }

        let victim = pursuers.iter().find(|(_, pursuer, position)| {
            !pursuer.state().is_stunned() && position.0.distance(hazard_position.0) <= hazard.radius
        });

        if let Some((entity, _, _)) = victim {
            hazard.armed = false;
            crate::log_info(&format!("⚡ Hazard at {:?} triggered by {:?}", hazard_position.0, entity));
            stun.write(StunPursuer { pursuer: entity });
        }
    }
}

/// Система: контакт pursuer с helper'ом (poof) или игроком (caught)
///
/// Оглушённый pursuer никого не ловит.
pub fn detect_catches(
    pursuers: Query<(Entity, &Pursuer, &Position, &PhysicsBody)>,
    helpers: Query<(Entity, &Helper, &Position, &PhysicsBody)>,
    players: Query<(&Position, &PhysicsBody), With<Player>>,
    mut state: ResMut<SessionState>,
    mut poof: EventWriter<PoofHelper>,
    mut caught: EventWriter<PlayerCaught>,
) {
    for (pursuer_entity, pursuer, pursuer_position, pursuer_body) in pursuers.iter() {
        if pursuer.state().is_stunned() {
            continue;
        }

        for (helper_entity, helper, helper_position, helper_body) in helpers.iter() {
            if helper.is_alive() && pursuer_body.touches(pursuer_position.0, helper_body, helper_position.0) {
                poof.write(PoofHelper { helper: helper_entity });
            }
        }

        if state.player_caught {
            continue;
        }

        let touching_player = players.iter().any(|(position, body)| {
            body.enabled && pursuer_body.touches(pursuer_position.0, body, position.0)
        });
        if touching_player {
            state.player_caught = true;
            crate::log_info(&format!("🚨 Player caught by {:?}", pursuer_entity));
            caught.write(PlayerCaught {
                pursuer: pursuer_entity,
                position: pursuer_position.0,
            });
        }
    }
}
