//! Enemy health — clamp, death (terminal), damageable capability

use bevy::prelude::*;

use super::reactions::{EnemyTuning, HitNumbers};
use crate::timers::EnemyTimers;

/// Capability: entity можно ранить (цель raycast)
///
/// Bullet hit dispatch проверяет capability через query, а не через тип актора.
pub trait Damageable {
    /// Возвращает запрошенный amount (raw pass-through, не реальную дельту HP)
    fn apply_damage(&mut self, amount: f32) -> DamageOutcome;

    fn is_dead(&self) -> bool;
}

/// Результат apply_damage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    /// Запрошенный amount (как есть)
    pub applied: f32,
    /// Этот вызов убил (true максимум один раз за жизнь)
    pub died: bool,
}

/// Marker: враг (hit reactions, health bar, hit numbers)
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(EnemyTimers, HitNumbers)]
pub struct Enemy;

/// Health врага
///
/// Инвариант: 0 ≤ health ≤ max_health. Dead — терминальное состояние.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyHealth {
    pub health: f32,
    pub max_health: f32,
    pub dead: bool,
}

impl EnemyHealth {
    pub fn new(max_health: f32) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            health: max_health,
            max_health,
            dead: false,
        }
    }

    pub fn percent(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

impl Damageable for EnemyHealth {
    fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome {
                applied: amount,
                died: false,
            };
        }

        self.health = (self.health - amount).clamp(0.0, self.max_health);
        let died = self.health <= 0.0;
        if died {
            self.dead = true;
        }

        DamageOutcome { applied: amount, died }
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Marker: враг мёртв (hit reactions / health bar больше не нужны)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Spawn врага с tuned health
///
/// Позицию и меш держит host, ECS знает только entity.
pub fn spawn_enemy(commands: &mut Commands, tuning: EnemyTuning) -> Entity {
    commands.spawn((Enemy, EnemyHealth::new(tuning.max_health), tuning)).id()
}
