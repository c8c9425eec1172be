//! Enemy events
//!
//! Host → ECS: `DamageIntent` (урон не от пуль: взрывы, скрипты)
//! ECS → Host: impact FX, hit reaction montage, health bar, hit numbers, death

use bevy::prelude::*;

/// Generic урон по врагу
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageIntent {
    pub target: Entity,
    pub amount: f32,
    pub instigator: Option<Entity>,
}

/// Impact sound + particles в точке попадания
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BulletImpact {
    pub target: Entity,
    pub point: Vec3,
}

/// Проиграть hit react montage (section)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitReactionRequested {
    pub enemy: Entity,
    pub section: &'static str,
    pub play_rate: f32,
}

/// Показать / скрыть health bar widget
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthBarVisibility {
    pub enemy: Entity,
    pub visible: bool,
}

/// Health врага изменился
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyDamaged {
    pub enemy: Entity,
    /// Запрошенный amount (raw)
    pub amount: f32,
    pub health: f32,
    pub headshot: bool,
}

/// Враг умер (один раз за жизнь)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDied {
    pub enemy: Entity,
    pub killer: Option<Entity>,
}

/// Hit number widget над точкой попадания
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitNumberSpawned {
    pub enemy: Entity,
    pub id: u64,
    pub damage: f32,
    pub location: Vec3,
    pub headshot: bool,
}

/// Hit number истёк, widget убрать
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitNumberExpired {
    pub enemy: Entity,
    pub id: u64,
}
