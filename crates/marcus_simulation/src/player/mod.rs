//! Player character — marker, host-synced state, tuning, spawn
//!
//! Host engine синхронизирует каждый кадр:
//! - `CharacterKinematics` (velocity, airborne) — из character movement
//! - `CameraView` (позиция/направление follow camera) — для item preview
//!
//! Всё остальное (aim, spread, weapon slot, focus, timers) — ECS state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aiming::{AimState, CameraTuning, CrosshairSpread, CrosshairTargeting, CurrentLookRates, LookRates, SpreadTuning, TargetingTuning};
use crate::combat::{AmmoMap, StartingAmmo, WeaponSlot, WeaponTuning};
use crate::equipment::DefaultWeapon;
use crate::items::{FocusTuning, ItemFocus};
use crate::timers::PlayerTimers;

/// Marker component для player-controlled character
///
/// Runtime state добавляется через Required Components, tuned state —
/// через `spawn_player`.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(CrosshairSpread, CurrentLookRates, WeaponSlot, ItemFocus, PlayerTimers, CharacterKinematics)]
pub struct Player;

/// Движение персонажа (Host → ECS, каждый кадр)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterKinematics {
    /// World velocity (Z-up)
    pub velocity: Vec3,
    /// Персонаж в воздухе (прыжок / падение)
    pub is_airborne: bool,
}

/// Follow camera в world space (Host → ECS)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraView {
    pub position: Vec3,
    pub forward: Vec3,
}

/// Полный tuning персонажа
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterTuning {
    pub camera: CameraTuning,
    pub look_rates: LookRates,
    pub spread: SpreadTuning,
    pub targeting: TargetingTuning,
    pub focus: FocusTuning,
    pub starting_ammo: StartingAmmo,
}

/// Spawn player character с tuned компонентами
///
/// `default_weapon` экипируется на первом FixedUpdate тике
/// (`equip_default_weapon`).
pub fn spawn_player(commands: &mut Commands, tuning: CharacterTuning, default_weapon: Option<WeaponTuning>) -> Entity {
    let mut player = commands.spawn((
        Player,
        AimState::new(tuning.camera),
        CurrentLookRates::select(&tuning.look_rates, false),
        CrosshairTargeting::new(tuning.targeting),
        AmmoMap::new(tuning.starting_ammo),
        tuning,
    ));

    if let Some(weapon) = default_weapon {
        player.insert(DefaultWeapon(weapon));
    }

    player.id()
}
