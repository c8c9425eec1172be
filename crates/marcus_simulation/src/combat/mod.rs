//! Combat module — hit-scan оружие игрока
//!
//! ECS ответственность:
//! - Weapon slot: equip state + fire gating (semi-auto / automatic)
//! - Ammo (magazine на оружии, запас в AmmoMap)
//! - Shot resolution: recoil window + dual raycast → BulletHit
//!
//! Host ответственность:
//! - Raycast / deprojection (ports)
//! - Звук, muzzle flash, beam trail, impact particles, fire montage (`ShotFired`)
//! - Синхронизация `BarrelSocket`

use bevy::prelude::*;

pub mod events;
pub mod slot;
pub mod systems;
pub mod weapon;


pub use events::{BulletHit, FireInput, ShotFired, HIP_FIRE_SECTION};
pub use slot::{EquipTransition, WeaponSlot};
pub use systems::*;
pub use weapon::{AmmoMap, AmmoType, BarrelSocket, FireMode, StartingAmmo, Weapon, WeaponTuning};

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок:
/// 1. tick_player_timers (Timers) — auto-fire, recoil window, semi-auto cooldown
/// 2. process_fire_input (Firing) — fire button → выстрел
///
/// BulletHit читает enemy domain в SimulationSet::Damage.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireInput>()
            .add_event::<ShotFired>()
            .add_event::<BulletHit>();

        app.add_systems(FixedUpdate, tick_player_timers.in_set(SimulationSet::Timers))
            .add_systems(FixedUpdate, process_fire_input.in_set(SimulationSet::Firing));
    }
}
