//! Equipment system implementations
//!
//! # Systems
//!
//! - `equip_default_weapon` — spawn + equip стартового оружия
//! - `process_equip_weapon` — drop-then-equip
//! - `process_reload` — магазин из AmmoMap

use bevy::prelude::*;

use super::events::*;
use crate::combat::{AmmoMap, Weapon, WeaponSlot, WeaponTuning};
use crate::items::{Item, ItemFocus, ItemState};
use crate::player::CameraView;
use crate::timers::PlayerTimers;
use crate::{log, log_error};

/// Стартовое оружие персонажа (spawn на первом тике)
#[derive(Component, Debug, Clone)]
pub struct DefaultWeapon(pub WeaponTuning);

/// Spawn weapon item entity (в мире, pickable)
pub fn spawn_weapon(commands: &mut Commands, tuning: WeaponTuning, location: Vec3) -> Entity {
    commands
        .spawn((Item::new(tuning.name.clone(), location), Weapon::new(tuning)))
        .id()
}

/// System: DefaultWeapon → weapon entity + EquipWeaponIntent
///
/// Компонент удаляется после spawn (одноразовый).
pub fn equip_default_weapon(
    mut commands: Commands,
    characters: Query<(Entity, &DefaultWeapon)>,
    mut equip_events: EventWriter<EquipWeaponIntent>,
) {
    for (character, default_weapon) in characters.iter() {
        let weapon = spawn_weapon(&mut commands, default_weapon.0.clone(), Vec3::ZERO);
        commands.entity(character).remove::<DefaultWeapon>();

        equip_events.write(EquipWeaponIntent {
            entity: character,
            weapon: Some(weapon),
        });

        log(&format!("Default weapon '{}' spawned for {:?}", default_weapon.0.name, character));
    }
}

fn throw_direction(camera: Option<&CameraView>) -> Vec3 {
    camera
        .map(|camera| Vec3::new(camera.forward.x, camera.forward.y, 0.0).normalize_or_zero())
        .unwrap_or(Vec3::ZERO)
}

/// System: equip intents
///
/// Новое оружие обязано быть `Weapon` entity (иначе log_error, no-op).
/// Выброшенное оружие снова становится pickable только после host
/// (приземление) — здесь `Falling`.
pub fn process_equip_weapon(
    mut events: EventReader<EquipWeaponIntent>,
    mut characters: Query<(
        &mut WeaponSlot,
        Option<&mut PlayerTimers>,
        Option<&mut ItemFocus>,
        Option<&CameraView>,
    )>,
    mut items: Query<(&mut ItemState, &mut Item), With<Weapon>>,
    mut equipped_events: EventWriter<WeaponEquipped>,
    mut dropped_events: EventWriter<WeaponDropped>,
) {
    for intent in events.read() {
        let Some(new_weapon) = intent.weapon else {
            continue;
        };
        let Ok((mut slot, timers, focus, camera)) = characters.get_mut(intent.entity) else {
            log_error(&format!("EquipWeaponIntent: {:?} has no WeaponSlot", intent.entity));
            continue;
        };
        if !items.contains(new_weapon) {
            log_error(&format!("EquipWeaponIntent: {:?} is not a weapon", new_weapon));
            continue;
        }

        let Some(transition) = slot.equip(Some(new_weapon)) else {
            continue;
        };
        if let Some(mut timers) = timers {
            slot.interrupt_fire(&mut timers);
        }

        // 1. Drop
        if let Some(dropped) = transition.dropped {
            if let Ok((mut state, _)) = items.get_mut(dropped) {
                *state = ItemState::Falling;
            }
            dropped_events.write(WeaponDropped {
                character: intent.entity,
                weapon: dropped,
                throw_direction: throw_direction(camera),
            });
        }

        // 2. Equip
        if let Ok((mut state, mut item)) = items.get_mut(transition.equipped) {
            *state = ItemState::Equipped;
            item.prompt_visible = false;
        }
        if let Some(mut focus) = focus {
            focus.remove_from_range(transition.equipped);
        }

        equipped_events.write(WeaponEquipped {
            character: intent.entity,
            weapon: transition.equipped,
            socket: RIGHT_HAND_SOCKET,
        });

        log(&format!("Equipped weapon {:?} on {:?}", transition.equipped, intent.entity));
    }
}

/// System: reload intents
pub fn process_reload(
    mut events: EventReader<ReloadIntent>,
    mut characters: Query<(&WeaponSlot, &mut AmmoMap)>,
    mut weapons: Query<&mut Weapon>,
    mut reloaded_events: EventWriter<WeaponReloaded>,
) {
    for intent in events.read() {
        let Ok((slot, mut ammo_map)) = characters.get_mut(intent.entity) else {
            continue;
        };
        let Some(weapon_entity) = slot.equipped else {
            continue;
        };
        let Ok(mut weapon) = weapons.get_mut(weapon_entity) else {
            log_error(&format!("Reload: equipped {:?} has no Weapon", weapon_entity));
            continue;
        };

        let amount = weapon.reload_from(&mut ammo_map);
        if amount == 0 {
            continue;
        }

        reloaded_events.write(WeaponReloaded {
            character: intent.entity,
            weapon: weapon_entity,
            amount,
            magazine: weapon.ammo,
        });
    }
}
