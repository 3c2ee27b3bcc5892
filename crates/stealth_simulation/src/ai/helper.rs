//! Autonomous helper: greedy forager с local avoidance.
//!
//! Vision у helper'а нет — его проблема не "не вижу", а "не могу дойти напрямую".
//! Поэтому LOS здесь = path clearance: прямой путь до цели свободен?
//!
//! Tick:
//! 1. embedding correction (до любой логики выбора цели)
//! 2. held target неактивен → сброс
//! 3. нет target → выбор ближайшего (LOS-aware вариант предпочитает чистый путь)
//! 4. нет кандидатов → стоим
//! 5. LOS чистый → прямо; иначе альтернативная цель с чистым LOS; иначе detour
//! 6. stuck / collision recovery (как у pursuer в CHASE)

use bevy::math::Rect;
use bevy::prelude::*;
use rand::Rng;

use crate::ai::components::{HelperConfig, TargetSelection};
use crate::ai::detour::{DetourParams, DetourPlanner};
use crate::components::{PhysicsBody, Position};
use crate::geometry::{has_line_of_sight, ObstacleSet};
use crate::recovery::{
    is_valid_placement, random_offset, BlockedSides, CollisionResponder, NudgeHold, PositionCorrector,
    StuckMonitor,
};
use crate::steering::{steer_toward, Facing};

/// Stable ID collectible (orchestration маппит свои entity в него)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct CollectibleId(pub u64);

/// Snapshot collectible на этот tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectibleView {
    pub id: CollectibleId,
    pub position: Vec2,
    pub active: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct HelperTick<'a> {
    pub position: Vec2,
    pub blocked: BlockedSides,
    /// Live набор collectibles (неактивные допускаются и игнорируются)
    pub collectibles: &'a [CollectibleView],
    pub obstacles: &'a ObstacleSet,
    pub bounds: Option<Rect>,
    /// Frame delta (ms)
    pub delta_ms: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HelperOutput {
    pub velocity: Vec2,
    /// Новая позиция, если была коррекция (embedding / unstick)
    pub correction: Option<Vec2>,
    /// Удерживаемая цель
    pub target: Option<CollectibleId>,
    /// Куда реально идём на этом tick'е (held, альтернатива с LOS или detour точка)
    pub effective_target: Option<Vec2>,
    /// Активная detour точка
    pub detour: Option<Vec2>,
}

#[derive(Component, Debug, Clone)]
#[require(Position, PhysicsBody)]
pub struct Helper {
    config: HelperConfig,
    alive: bool,
    held: Option<CollectibleId>,
    detour: DetourPlanner,
    facing: Facing,
    velocity: Vec2,
    stuck: StuckMonitor,
    collision: CollisionResponder,
    nudge: NudgeHold,
    corrector: PositionCorrector,
}

impl Helper {
    pub fn new(config: HelperConfig) -> Self {
        let corrector = PositionCorrector::new(config.body_half_extents);
        Self {
            config,
            alive: true,
            held: None,
            detour: DetourPlanner::default(),
            facing: Facing::default(),
            velocity: Vec2::ZERO,
            stuck: StuckMonitor::default(),
            collision: CollisionResponder::default(),
            nudge: NudgeHold::default(),
            corrector,
        }
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    /// Liveness flag: после poof orchestration перестаёт вызывать `update`
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn held_target(&self) -> Option<CollectibleId> {
        self.held
    }

    pub fn detour(&self) -> &DetourPlanner {
        &self.detour
    }

    pub fn facing(&self) -> f32 {
        self.facing.angle
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// One-shot teardown (пойман pursuer'ом). Повторный вызов — no-op.
    ///
    /// Возвращает `true` только при первом вызове.
    pub fn poof(&mut self) -> bool {
        if !self.alive {
            return false;
        }

        self.alive = false;
        self.velocity = Vec2::ZERO;
        self.held = None;
        self.detour.clear();
        self.nudge.cancel();
        crate::log_info("💨 Helper poofed");
        true
    }

    /// Один simulation tick
    pub fn update<R: Rng + ?Sized>(&mut self, tick: &HelperTick, rng: &mut R) -> HelperOutput {
        if !self.alive {
            return HelperOutput::default();
        }

        let delta_ms = tick.delta_ms.max(0.0);
        let mut position = tick.position;
        let mut correction = None;

        // 1. Embedding correction ДО выбора цели
        if let Some(corrected) =
            self.corrector
                .correct(position, tick.obstacles, tick.bounds, &self.config.embedding)
        {
            crate::log_warning(&format!(
                "🧱 Helper embedded at {:?} → corrected to {:?}",
                position, corrected
            ));
            position = corrected;
            correction = Some(corrected);
            self.stuck.reset(corrected);
            self.detour.clear();
        }

        let collided = self
            .collision
            .tick(tick.blocked, self.velocity, delta_ms, &self.config.recovery);
        if collided {
            let pushed = position + tick.blocked.push_away(self.config.recovery.collision_push_distance);
            if is_valid_placement(pushed, self.config.body_half_extents, tick.obstacles, tick.bounds) {
                position = pushed;
                correction = Some(pushed);
            }
        }

        self.nudge.advance(delta_ms);

        // 2. Liveness check удерживаемой цели
        if let Some(held) = self.held {
            if find_active(tick.collectibles, held).is_none() {
                crate::log(&format!("🎯 Helper target {:?} gone", held));
                self.held = None;
                self.detour.clear();
            }
        }

        // 3. Выбор новой цели
        if self.held.is_none() {
            self.held = self.select_target(position, tick.collectibles, tick.obstacles);
            if let Some(held) = self.held {
                crate::log(&format!("🎯 Helper picked target {:?}", held));
            }
        }

        // 4. Нет кандидатов → стоим
        let Some(held_position) = self
            .held
            .and_then(|held| find_active(tick.collectibles, held))
            .map(|view| view.position)
        else {
            self.halt();
            return HelperOutput {
                correction,
                ..default()
            };
        };

        // 5. Эффективная точка steering
        let steer_point = match self.config.selection {
            TargetSelection::Nearest => held_position,
            TargetSelection::LineOfSightPreferred => {
                self.line_of_sight_steer_point(position, held_position, tick, delta_ms)
            }
        };

        let desired = steer_toward(&mut self.facing, position, steer_point, self.config.speed, 0.0);
        let has_goal = desired != Vec2::ZERO;

        // 6. Recovery
        let mut velocity = desired;
        if self.stuck.tick(position, delta_ms, has_goal, &self.config.recovery) {
            let base_angle = (steer_point - position).to_angle();
            let angle = base_angle + random_offset(rng, self.config.recovery.stuck_max_nudge);
            let nudge = Vec2::from_angle(angle) * self.config.speed;
            crate::log(&format!("🔁 Helper stuck at {:?} → nudge {:?}", position, nudge));
            self.nudge.start(nudge, self.config.recovery.nudge_hold_ms);
        }

        if collided && has_goal {
            let offset = random_offset(rng, self.config.recovery.collision_max_offset);
            let mut scratch = self.facing;
            let reapproach = steer_toward(&mut scratch, position, steer_point, self.config.speed, offset);
            self.nudge.start(reapproach, self.config.recovery.nudge_hold_ms);
        }

        if let Some(nudged) = self.nudge.velocity() {
            velocity = nudged;
        }
        self.velocity = velocity;

        HelperOutput {
            velocity,
            correction,
            target: self.held,
            effective_target: Some(steer_point),
            detour: self.detour.current().map(|detour| detour.point),
        }
    }

    /// LOS-aware steering: held → альтернатива с чистым LOS → detour
    fn line_of_sight_steer_point(
        &mut self,
        position: Vec2,
        held_position: Vec2,
        tick: &HelperTick,
        delta_ms: f32,
    ) -> Vec2 {
        let inflate = self.config.clearance_inflate;

        if has_line_of_sight(position, held_position, tick.obstacles, inflate) {
            self.detour.clear();
            return held_position;
        }

        // Альтернатива не коммитится в held — пересматривается каждый tick
        if let Some(alternative) = nearest_active(position, tick.collectibles, |view| {
            has_line_of_sight(position, view.position, tick.obstacles, inflate)
        }) {
            self.detour.clear();
            return alternative.position;
        }

        let params = DetourParams {
            lateral_distance: self.config.detour_distance,
            reach_radius: self.config.detour_reach_radius,
            timeout_ms: self.config.detour_timeout_ms,
            half_extents: self.config.body_half_extents,
            obstacles: tick.obstacles,
            bounds: tick.bounds,
        };
        self.detour.steer_point(position, held_position, delta_ms, &params)
    }

    fn select_target(
        &self,
        position: Vec2,
        collectibles: &[CollectibleView],
        obstacles: &ObstacleSet,
    ) -> Option<CollectibleId> {
        let nearest = || nearest_active(position, collectibles, |_| true);

        let chosen = match self.config.selection {
            TargetSelection::Nearest => nearest(),
            TargetSelection::LineOfSightPreferred => nearest_active(position, collectibles, |view| {
                has_line_of_sight(position, view.position, obstacles, self.config.clearance_inflate)
            })
            .or_else(nearest),
        };

        chosen.map(|view| view.id)
    }

    fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
        self.nudge.cancel();
        self.detour.clear();
    }
}

fn find_active(collectibles: &[CollectibleView], id: CollectibleId) -> Option<&CollectibleView> {
    collectibles.iter().find(|view| view.id == id && view.active)
}

/// Ближайший активный collectible (squared distance), удовлетворяющий `accept`.
///
/// При равных расстояниях побеждает первый в порядке списка.
fn nearest_active<'a>(
    position: Vec2,
    collectibles: &'a [CollectibleView],
    mut accept: impl FnMut(&CollectibleView) -> bool,
) -> Option<&'a CollectibleView> {
    let mut nearest: Option<(&CollectibleView, f32)> = None;

    for view in collectibles.iter().filter(|view| view.active) {
        if !accept(view) {
            continue;
        }

        let distance_sq = position.distance_squared(view.position);
        match nearest {
            Some((_, best)) if distance_sq >= best => {}
            _ => nearest = Some((view, distance_sq)),
        }
    }

    nearest.map(|(view, _)| view)
}
