//! Stuck detection, collision response and nudge hold timers.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Тюнинг recovery (общий для pursuer и helper)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Интервал periodic displacement check (ms)
    pub stuck_check_interval_ms: f32,
    /// Сдвиг меньше этого за интервал = застрял (px)
    pub stuck_displacement_threshold: f32,
    /// Максимальный random nudge от facing/направления на цель (радианы)
    pub stuck_max_nudge: f32,
    /// Collision response срабатывает только если |velocity| выше (units/s)
    pub collision_speed_threshold: f32,
    /// Cooldown между collision responses (ms)
    pub collision_cooldown_ms: f32,
    /// Насколько отталкиваем от заблокированной стороны (px)
    pub collision_push_distance: f32,
    /// Максимальный random offset при повторном заходе на цель (радианы)
    pub collision_max_offset: f32,
    /// Сколько держим nudge velocity поверх обычного steering (ms)
    pub nudge_hold_ms: f32,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            stuck_check_interval_ms: 450.0,
            stuck_displacement_threshold: 2.0,
            stuck_max_nudge: 90.0_f32.to_radians(),
            collision_speed_threshold: 10.0,
            collision_cooldown_ms: 300.0,
            collision_push_distance: 3.0,
            collision_max_offset: 30.0_f32.to_radians(),
            nudge_hold_ms: 250.0,
        }
    }
}

/// На каких сторонах physics body упирается в препятствие.
///
/// Экранные координаты: `up` = сторона -y, `down` = сторона +y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct BlockedSides {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl BlockedSides {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Смещение на `distance` прочь от всех заблокированных сторон
    pub fn push_away(&self, distance: f32) -> Vec2 {
        let mut push = Vec2::ZERO;
        if self.left {
            push.x += distance;
        }
        if self.right {
            push.x -= distance;
        }
        if self.up {
            push.y += distance;
        }
        if self.down {
            push.y -= distance;
        }
        push
    }
}

/// Periodic displacement sampling
#[derive(Debug, Clone, Default)]
pub struct StuckMonitor {
    elapsed_ms: f32,
    sample: Option<Vec2>,
}

impl StuckMonitor {
    /// Возвращает `true` раз в интервал, если агент с активной целью почти не сдвинулся
    pub fn tick(&mut self, position: Vec2, delta_ms: f32, has_goal: bool, config: &RecoveryConfig) -> bool {
        let sample = *self.sample.get_or_insert(position);
        self.elapsed_ms += delta_ms;

        if self.elapsed_ms < config.stuck_check_interval_ms {
            return false;
        }

        self.elapsed_ms = 0.0;
        self.sample = Some(position);

        has_goal && position.distance(sample) < config.stuck_displacement_threshold
    }

    /// Сбросить sample после телепорта (correction), чтобы не считать его движением
    pub fn reset(&mut self, position: Vec2) {
        self.elapsed_ms = 0.0;
        self.sample = Some(position);
    }
}

/// Immediate collision response с cooldown
#[derive(Debug, Clone, Default)]
pub struct CollisionResponder {
    cooldown_ms: f32,
}

impl CollisionResponder {
    /// `commanded_velocity` — velocity прошлого тика (та, что привела к блокировке)
    pub fn tick(
        &mut self,
        blocked: BlockedSides,
        commanded_velocity: Vec2,
        delta_ms: f32,
        config: &RecoveryConfig,
    ) -> bool {
        self.cooldown_ms = (self.cooldown_ms - delta_ms).max(0.0);

        if !blocked.any()
            || commanded_velocity.length() <= config.collision_speed_threshold
            || self.cooldown_ms > 0.0
        {
            return false;
        }

        self.cooldown_ms = config.collision_cooldown_ms;
        true
    }

    pub fn cooldown_ms(&self) -> f32 {
        self.cooldown_ms
    }
}

/// Recovery velocity, удерживаемая поверх обычного steering некоторое время
#[derive(Debug, Clone, Default)]
pub struct NudgeHold {
    velocity: Vec2,
    remaining_ms: f32,
}

impl NudgeHold {
    pub fn start(&mut self, velocity: Vec2, hold_ms: f32) {
        self.velocity = velocity;
        self.remaining_ms = hold_ms;
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = 0.0;
    }

    /// Отсчитать время прошедшего тика
    pub fn advance(&mut self, delta_ms: f32) {
        self.remaining_ms = (self.remaining_ms - delta_ms).max(0.0);
    }

    /// Активная nudge velocity (если hold ещё не истёк)
    pub fn velocity(&self) -> Option<Vec2> {
        (self.remaining_ms > 0.0).then_some(self.velocity)
    }
}

/// Случайный угол в [-max, max]
pub fn random_offset<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-max..=max)
}
