//! Weapon item component + ammo
//!
//! Architecture:
//! - Weapon — отдельная entity (item в мире или в руках персонажа)
//! - Magazine ammo хранится на оружии, запас патронов — в `AmmoMap` персонажа
//! - `BarrelSocket` синхронизирует host (world position сокета ствола)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Тип патронов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub enum AmmoType {
    NineMm,
    AssaultRifle,
}

impl AmmoType {
    pub const ALL: [AmmoType; 2] = [AmmoType::NineMm, AmmoType::AssaultRifle];
}

/// Режим огня
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum FireMode {
    /// Один выстрел на нажатие, следующий — не раньше `fire_interval`
    SemiAuto,
    /// Огонь пока кнопка зажата, один выстрел на `fire_interval`
    Automatic,
}

/// Weapon tuning (designer data)
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct WeaponTuning {
    pub name: String,
    pub ammo_type: AmmoType,
    pub fire_mode: FireMode,
    /// Интервал между выстрелами (секунды)
    pub fire_interval: f32,
    pub magazine_capacity: u32,
    /// Патроны в магазине при spawn
    pub starting_magazine: u32,
    pub damage: f32,
    pub headshot_damage: f32,
}

impl WeaponTuning {
    /// Пистолет 9mm (semi-auto)
    pub fn pistol_9mm() -> Self {
        Self {
            name: "Pistol".into(),
            ammo_type: AmmoType::NineMm,
            fire_mode: FireMode::SemiAuto,
            fire_interval: 0.2,
            magazine_capacity: 15,
            starting_magazine: 15,
            damage: 20.0,
            headshot_damage: 50.0,
        }
    }

    /// Автомат (automatic, 10 выстрелов/сек)
    pub fn assault_rifle() -> Self {
        Self {
            name: "Assault Rifle".into(),
            ammo_type: AmmoType::AssaultRifle,
            fire_mode: FireMode::Automatic,
            fire_interval: 0.1,
            magazine_capacity: 30,
            starting_magazine: 30,
            damage: 25.0,
            headshot_damage: 60.0,
        }
    }
}

/// Weapon component (на weapon entity)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub tuning: WeaponTuning,
    /// Патроны в магазине
    pub ammo: u32,
}

impl Weapon {
    pub fn new(tuning: WeaponTuning) -> Self {
        let ammo = tuning.starting_magazine.min(tuning.magazine_capacity);
        Self { tuning, ammo }
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    /// Списать один патрон. false — магазин пуст (ничего не меняется).
    pub fn consume_ammo(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    pub fn missing_ammo(&self) -> u32 {
        self.tuning.magazine_capacity.saturating_sub(self.ammo)
    }

    /// Перезарядка из запаса. Возвращает сколько патронов перенесено.
    pub fn reload_from(&mut self, ammo_map: &mut AmmoMap) -> u32 {
        let moved = ammo_map.take(self.tuning.ammo_type, self.missing_ammo());
        self.ammo += moved;
        moved
    }
}

/// Позиция сокета ствола (Host → ECS)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BarrelSocket {
    pub position: Vec3,
}

/// Стартовый запас патронов персонажа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingAmmo {
    pub nine_mm: u32,
    pub assault_rifle: u32,
}

impl Default for StartingAmmo {
    fn default() -> Self {
        Self {
            nine_mm: 85,
            assault_rifle: 120,
        }
    }
}

/// Запас патронов персонажа
///
/// Ключи фиксируются при создании (все `AmmoType`), счётчики ≥ 0.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct AmmoMap {
    counts: BTreeMap<AmmoType, u32>,
}

impl Default for AmmoMap {
    fn default() -> Self {
        Self::new(StartingAmmo::default())
    }
}

impl AmmoMap {
    pub fn new(starting: StartingAmmo) -> Self {
        let counts = AmmoType::ALL
            .into_iter()
            .map(|ammo_type| {
                let count = match ammo_type {
                    AmmoType::NineMm => starting.nine_mm,
                    AmmoType::AssaultRifle => starting.assault_rifle,
                };
                (ammo_type, count)
            })
            .collect();

        Self { counts }
    }

    pub fn count(&self, ammo_type: AmmoType) -> u32 {
        self.counts.get(&ammo_type).copied().unwrap_or(0)
    }

    pub fn add(&mut self, ammo_type: AmmoType, amount: u32) {
        if let Some(count) = self.counts.get_mut(&ammo_type) {
            *count = count.saturating_add(amount);
        }
    }

    /// Взять до `amount` патронов. Возвращает сколько реально взято.
    pub fn take(&mut self, ammo_type: AmmoType, amount: u32) -> u32 {
        let Some(count) = self.counts.get_mut(&ammo_type) else {
            return 0;
        };
        let taken = amount.min(*count);
        *count -= taken;
        taken
    }
}
