//! Pursuer finite-state controller.
//!
//! PATROL / CHASE / SEARCH / STUNNED. Один вызов `update` = один tick:
//! 1. position correction (embedding) + immediate collision response
//! 2. vision (кроме STUNNED) → PATROL/SEARCH → CHASE
//! 3. per-state movement goal → steering
//! 4. periodic stuck check (PATROL: следующий waypoint, иначе random nudge)
//! 5. vision cone geometry для рендера (всегда, даже в STUNNED)
//!
//! Контроллер сам позицию не двигает: отдаёт velocity и (опционально)
//! скорректированную позицию, которую применяет orchestration.

use bevy::math::Rect;
use bevy::prelude::*;
use rand::Rng;

use crate::ai::components::{PursuerConfig, PursuerState};
use crate::components::{PerceptualTarget, PhysicsBody, Position};
use crate::geometry::ObstacleSet;
use crate::perception::{can_perceive, VisionConeGeometry};
use crate::recovery::{
    is_valid_placement, random_offset, BlockedSides, CollisionResponder, NudgeHold, PositionCorrector,
    StuckMonitor,
};
use crate::steering::{steer_toward, Facing};

/// Входные данные одного tick'а (snapshot от orchestration)
#[derive(Debug, Clone, Copy)]
pub struct PursuerTick<'a> {
    /// Текущая позиция (центр body)
    pub position: Vec2,
    /// Стороны, на которых physics body упёрся в препятствие в прошлом шаге
    pub blocked: BlockedSides,
    /// Перцептивная цель этого tick'а (выбрана orchestration), если есть
    pub target: Option<Vec2>,
    pub obstacles: &'a ObstacleSet,
    /// Границы мира (для коррекций позиции)
    pub bounds: Option<Rect>,
    /// Frame delta (ms)
    pub delta_ms: f32,
}

/// Результат tick'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuerOutput {
    pub velocity: Vec2,
    /// Новая позиция, если контроллер её скорректировал (unstick / embedding)
    pub correction: Option<Vec2>,
    pub state: PursuerState,
    /// `(from, to)` если за tick сменился тип состояния
    pub transition: Option<(PursuerState, PursuerState)>,
}

/// Цель движения на этот tick
#[derive(Debug, Clone, Copy)]
struct MoveGoal {
    point: Vec2,
    speed: f32,
}

#[derive(Component, Debug, Clone)]
#[require(Position, PhysicsBody, PerceptualTarget)]
pub struct Pursuer {
    config: PursuerConfig,
    state: PursuerState,
    waypoints: Vec<Vec2>,
    waypoint_index: usize,
    last_seen: Option<Vec2>,
    facing: Facing,
    velocity: Vec2,
    cone: VisionConeGeometry,
    stuck: StuckMonitor,
    collision: CollisionResponder,
    nudge: NudgeHold,
    corrector: PositionCorrector,
}

impl Pursuer {
    pub fn new(config: PursuerConfig, waypoints: Vec<Vec2>) -> Self {
        let corrector = PositionCorrector::new(config.body_half_extents);
        Self {
            config,
            state: PursuerState::Patrol,
            waypoints,
            waypoint_index: 0,
            last_seen: None,
            facing: Facing::default(),
            velocity: Vec2::ZERO,
            cone: VisionConeGeometry::default(),
            stuck: StuckMonitor::default(),
            collision: CollisionResponder::default(),
            nudge: NudgeHold::default(),
            corrector,
        }
    }

    pub fn with_facing(mut self, angle: f32) -> Self {
        self.facing = Facing::new(angle);
        self
    }

    pub fn config(&self) -> &PursuerConfig {
        &self.config
    }

    pub fn state(&self) -> PursuerState {
        self.state
    }

    pub fn facing(&self) -> f32 {
        self.facing.angle
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.waypoint_index).copied()
    }

    pub fn last_seen(&self) -> Option<Vec2> {
        self.last_seen
    }

    /// Геометрия конуса последнего tick'а (для debug/visual рендера)
    pub fn vision_cone(&self) -> &VisionConeGeometry {
        &self.cone
    }

    /// Внешний stun сигнал. Игнорируется, если уже STUNNED.
    ///
    /// Возвращает `true`, если stun применён.
    pub fn stun(&mut self) -> bool {
        if self.state.is_stunned() {
            return false;
        }

        crate::log_info(&format!(
            "💫 Pursuer {} → STUNNED ({:.0}ms)",
            self.state.label(),
            self.config.stun_duration_ms
        ));
        self.state = PursuerState::Stunned {
            remaining_ms: self.config.stun_duration_ms,
        };
        self.last_seen = None;
        self.nudge.cancel();
        true
    }

    /// Один simulation tick
    pub fn update<R: Rng + ?Sized>(&mut self, tick: &PursuerTick, rng: &mut R) -> PursuerOutput {
        let previous_state = self.state;
        let delta_ms = tick.delta_ms.max(0.0);
        let mut position = tick.position;
        let mut correction = None;

        // 1. Embedding: body внутри препятствия → snap / spiral search
        if let Some(corrected) =
            self.corrector
                .correct(position, tick.obstacles, tick.bounds, &self.config.embedding)
        {
            crate::log_warning(&format!(
                "🧱 Pursuer embedded at {:?} → corrected to {:?}",
                position, corrected
            ));
            position = corrected;
            correction = Some(corrected);
            self.stuck.reset(corrected);
        }

        // Immediate collision response (по velocity прошлого tick'а)
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

        // 2-3. FSM
        let goal = match self.state {
            PursuerState::Stunned { remaining_ms } => self.tick_stunned(position, remaining_ms - delta_ms),
            _ => self.tick_perceiving(position, tick.target, tick.obstacles, delta_ms),
        };

        let desired = match goal {
            Some(goal) => steer_toward(&mut self.facing, position, goal.point, goal.speed, 0.0),
            None => Vec2::ZERO,
        };
        let has_goal = desired != Vec2::ZERO;

        // 4. Periodic stuck check
        let mut velocity = desired;
        if self.stuck.tick(position, delta_ms, has_goal, &self.config.recovery) {
            velocity = self.recover_from_stuck(position, goal, rng).unwrap_or(desired);
        }

        if collided {
            if let Some(goal) = goal {
                let offset = random_offset(rng, self.config.recovery.collision_max_offset);
                let mut scratch = self.facing;
                let reapproach = steer_toward(&mut scratch, position, goal.point, goal.speed, offset);
                self.nudge.start(reapproach, self.config.recovery.nudge_hold_ms);
            }
        }

        if let Some(nudged) = self.nudge.velocity() {
            velocity = nudged;
        }
        self.velocity = velocity;

        // 5. Vision cone geometry (side effect для рендера)
        self.cone = VisionConeGeometry::compute(
            position,
            self.facing.angle,
            &self.config.vision,
            tick.obstacles,
            self.config.cone_ray_count,
        );

        let transition = (!previous_state.same_kind(&self.state)).then_some((previous_state, self.state));

        PursuerOutput {
            velocity,
            correction,
            state: self.state,
            transition,
        }
    }

    /// STUNNED: медленно к текущему waypoint, vision выключено.
    ///
    /// По истечении таймера сразу PATROL без проверки vision на этом tick'е.
    fn tick_stunned(&mut self, position: Vec2, remaining_ms: f32) -> Option<MoveGoal> {
        if remaining_ms <= 0.0 {
            self.transition_to(PursuerState::Patrol);
            return self.patrol_goal(position);
        }

        self.state = PursuerState::Stunned { remaining_ms };
        self.current_waypoint().map(|point| MoveGoal {
            point,
            speed: self.config.stunned_speed,
        })
    }

    fn tick_perceiving(
        &mut self,
        position: Vec2,
        target: Option<Vec2>,
        obstacles: &ObstacleSet,
        delta_ms: f32,
    ) -> Option<MoveGoal> {
        let seen = target.filter(|&target| {
            can_perceive(position, self.facing.angle, target, &self.config.vision, obstacles)
        });

        if let Some(seen) = seen {
            self.last_seen = Some(seen);
            if self.state.is_chase() {
                self.state = PursuerState::Chase { lost_for_ms: 0.0 };
            } else {
                self.transition_to(PursuerState::Chase { lost_for_ms: 0.0 });
            }
        }

        match self.state {
            PursuerState::Patrol => self.patrol_goal(position),

            PursuerState::Chase { lost_for_ms } => {
                if let Some(seen) = seen {
                    return Some(MoveGoal {
                        point: seen,
                        speed: self.config.chase_speed,
                    });
                }

                let lost_for_ms = lost_for_ms + delta_ms;
                if lost_for_ms >= self.config.loss_timeout_ms {
                    self.transition_to(PursuerState::Search {
                        countdown_ms: self.config.search_duration_ms,
                    });
                    return self.search_goal(position, 0.0);
                }

                self.state = PursuerState::Chase { lost_for_ms };
                target.or(self.last_seen).map(|point| MoveGoal {
                    point,
                    speed: self.config.chase_speed,
                })
            }

            PursuerState::Search { .. } => self.search_goal(position, delta_ms),

            // Обработано в tick_stunned
            PursuerState::Stunned { .. } => None,
        }
    }

    /// PATROL: к текущему waypoint; в радиусе прибытия → следующий (циклически)
    fn patrol_goal(&mut self, position: Vec2) -> Option<MoveGoal> {
        let waypoint = self.current_waypoint()?;
        if position.distance(waypoint) < self.config.waypoint_arrival_radius {
            self.advance_waypoint();
        }

        self.current_waypoint().map(|point| MoveGoal {
            point,
            speed: self.config.base_speed,
        })
    }

    /// SEARCH: к last-seen; на месте стоим и отсчитываем countdown
    fn search_goal(&mut self, position: Vec2, delta_ms: f32) -> Option<MoveGoal> {
        let PursuerState::Search { countdown_ms } = self.state else {
            return None;
        };

        let Some(last_seen) = self.last_seen else {
            self.transition_to(PursuerState::Patrol);
            return self.patrol_goal(position);
        };

        if position.distance(last_seen) > self.config.search_arrival_radius {
            return Some(MoveGoal {
                point: last_seen,
                speed: self.config.base_speed,
            });
        }

        let countdown_ms = countdown_ms - delta_ms;
        if countdown_ms <= 0.0 {
            self.last_seen = None;
            self.transition_to(PursuerState::Patrol);
        } else {
            self.state = PursuerState::Search { countdown_ms };
        }
        None
    }

    /// Stuck recovery. PATROL → следующий waypoint (velocity к нему),
    /// иначе random nudge ±max от facing на скорости состояния.
    fn recover_from_stuck<R: Rng + ?Sized>(
        &mut self,
        position: Vec2,
        goal: Option<MoveGoal>,
        rng: &mut R,
    ) -> Option<Vec2> {
        let goal = goal?;

        if self.state.is_patrol() {
            self.advance_waypoint();
            crate::log(&format!(
                "🔁 Pursuer stuck in PATROL at {:?} → skipping to waypoint #{}",
                position, self.waypoint_index
            ));
            self.nudge.cancel();
            let waypoint = self.current_waypoint()?;
            return Some(steer_toward(&mut self.facing, position, waypoint, goal.speed, 0.0));
        }

        let angle = self.facing.angle + random_offset(rng, self.config.recovery.stuck_max_nudge);
        let nudge = Vec2::from_angle(angle) * goal.speed;
        crate::log(&format!(
            "🔁 Pursuer stuck in {} at {:?} → nudge {:?}",
            self.state.label(),
            position,
            nudge
        ));
        self.nudge.start(nudge, self.config.recovery.nudge_hold_ms);
        Some(nudge)
    }

    fn advance_waypoint(&mut self) {
        if !self.waypoints.is_empty() {
            self.waypoint_index = (self.waypoint_index + 1) % self.waypoints.len();
        }
    }

    fn transition_to(&mut self, next: PursuerState) {
        if !self.state.same_kind(&next) {
            crate::log_info(&format!("👁️ Pursuer {} → {}", self.state.label(), next.label()));
            // Nudge прошлого состояния не переносим в новое
            self.nudge.cancel();
        }
        self.state = next;
    }
}
