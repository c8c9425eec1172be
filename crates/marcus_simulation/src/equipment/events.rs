//! Equipment events
//!
//! # Architecture
//!
//! **Intents (Host / items domain → ECS):**
//! - `EquipWeaponIntent` → drop-then-equip (None = no-op)
//! - `ReloadIntent` → магазин из AmmoMap
//!
//! **Presentation (ECS → Host):**
//! - `WeaponEquipped` → attach weapon actor к сокету руки
//! - `WeaponDropped` → detach + throw impulse
//! - `WeaponReloaded` → HUD / звук

use bevy::prelude::*;

/// Сокет правой руки на skeletal mesh персонажа
pub const RIGHT_HAND_SOCKET: &str = "RightHandSocket";

/// Equip weapon (drop-then-equip)
///
/// # Flow
/// 1. Drop текущего оружия (если есть): `ItemState::Falling` + `WeaponDropped`
/// 2. Attach нового: `ItemState::Equipped` + `WeaponEquipped`
#[derive(Event, Clone, Copy, Debug)]
pub struct EquipWeaponIntent {
    pub entity: Entity,
    /// None → no-op (не ошибка)
    pub weapon: Option<Entity>,
}

/// Reload оружия в руках
#[derive(Event, Clone, Copy, Debug)]
pub struct ReloadIntent {
    pub entity: Entity,
}

/// Оружие в руках персонажа
#[derive(Event, Clone, Debug, PartialEq)]
pub struct WeaponEquipped {
    pub character: Entity,
    pub weapon: Entity,
    pub socket: &'static str,
}

/// Оружие выброшено
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct WeaponDropped {
    pub character: Entity,
    pub weapon: Entity,
    /// Направление броска (горизонтальный forward камеры, ноль без камеры).
    /// Величину impulse выбирает host.
    pub throw_direction: Vec3,
}

/// Магазин пополнен
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponReloaded {
    pub character: Entity,
    pub weapon: Entity,
    /// Сколько патронов перенесено из запаса
    pub amount: u32,
    /// Патронов в магазине после reload
    pub magazine: u32,
}
