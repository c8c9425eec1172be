//! Combat events
//!
//! Host → ECS: `FireInput`
//! ECS → Host: `ShotFired` (sound, muzzle flash, beam trail, impact particles, fire montage)
//! ECS → ECS: `BulletHit` (enemy domain решает что делать с попаданием)

use bevy::prelude::*;

/// Montage section hip-fire анимации
pub const HIP_FIRE_SECTION: &str = "StartFire";

/// Fire button pressed / released (Host → ECS)
#[derive(Event, Debug, Clone, Copy)]
pub struct FireInput {
    pub entity: Entity,
    pub pressed: bool,
}

/// Выстрел произведён (ECS → Host)
///
/// `barrel_origin` / `impact_point` = None если у оружия нет `BarrelSocket`
/// или host ещё не поставил ports — звук и анимация всё равно играются.
#[derive(Event, Debug, Clone)]
pub struct ShotFired {
    pub shooter: Entity,
    pub weapon: Entity,
    pub barrel_origin: Option<Vec3>,
    pub impact_point: Option<Vec3>,
    /// Montage section для персонажа
    pub section: &'static str,
}

/// Пуля попала в известную симуляции entity
#[derive(Event, Debug, Clone, PartialEq)]
pub struct BulletHit {
    pub shooter: Entity,
    pub target: Entity,
    pub impact_point: Vec3,
    /// Кость skeletal mesh (для headshot)
    pub bone: Option<String>,
    pub damage: f32,
    pub headshot_damage: f32,
}
