//! Equipment module — weapon lifecycle
//!
//! # Architecture
//!
//! **Events → Systems flow:**
//! - Host / items domain пишет intent events
//! - Systems меняют WeaponSlot / ItemState / AmmoMap
//! - Presentation events → host (attach к сокету, throw, HUD)
//!
//! **Weapon lifecycle:**
//! - Default weapon → spawn + equip на первом тике
//! - Equip → всегда drop-then-equip, двух оружий в руках не бывает
//! - Reload → min(свободно в магазине, запас)

use bevy::prelude::*;

pub mod events;
pub mod systems;

pub use events::*;
pub use systems::*;

use crate::SimulationSet;

/// Equipment plugin (SimulationSet::Equipment)
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EquipWeaponIntent>()
            .add_event::<ReloadIntent>()
            .add_event::<WeaponEquipped>()
            .add_event::<WeaponDropped>()
            .add_event::<WeaponReloaded>()
            .add_systems(
                FixedUpdate,
                (equip_default_weapon, process_equip_weapon, process_reload)
                    .chain()
                    .in_set(SimulationSet::Equipment),
            );
    }
}
