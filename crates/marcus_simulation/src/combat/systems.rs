//! Combat systems — fire gating, auto-fire, recoil window, shot resolution
//!
//! Выстрел = списан патрон + recoil window + dual raycast (если есть
//! `BarrelSocket` и ports) → `ShotFired`, и `BulletHit` если blocking hit
//! принадлежит ECS entity.

use bevy::prelude::*;

use super::events::{BulletHit, FireInput, ShotFired, HIP_FIRE_SECTION};
use super::slot::WeaponSlot;
use super::weapon::{BarrelSocket, Weapon};
use crate::aiming::{CrosshairSpread, CrosshairTargeting, SpreadTuning};
use crate::player::{CharacterTuning, Player};
use crate::ports::{HostPorts, ScreenProjection, WorldRaycast};
use crate::timers::{PlayerTimer, PlayerTimers};

/// Resolved выстрел (events ещё не записаны)
#[derive(Debug, Clone)]
pub struct ResolvedShot {
    pub fired: ShotFired,
    pub hit: Option<BulletHit>,
}

/// Стрелок: компоненты игрока, которые меняет выстрел
pub struct Shooter<'a> {
    pub entity: Entity,
    pub spread: &'a mut CrosshairSpread,
    pub timers: &'a mut PlayerTimers,
    pub targeting: &'a mut CrosshairTargeting,
    pub spread_tuning: &'a SpreadTuning,
}

/// Выстрел (патрон уже списан WeaponSlot)
///
/// 1. Recoil window: `is_firing_bullet` + one-shot `ShotRecoil` (restart)
/// 2. Barrel socket + оба порта → dual raycast, иначе без impact point
pub fn resolve_shot(
    shooter: Shooter<'_>,
    weapon_entity: Entity,
    weapon: &Weapon,
    barrel: Option<&BarrelSocket>,
    ports: HostPorts<'_>,
) -> ResolvedShot {
    shooter.spread.is_firing_bullet = true;
    shooter
        .timers
        .start(PlayerTimer::ShotRecoil, shooter.spread_tuning.shot_recoil_duration, false);

    let impact = match (barrel, ports.targeting()) {
        (Some(barrel), Some((projection, raycast))) => {
            Some(shooter.targeting.compute_impact_point(barrel.position, projection, raycast))
        }
        _ => None,
    };

    let hit = impact.as_ref().and_then(|impact| {
        let hit = impact.hit.as_ref()?;
        let target = hit.entity?;
        Some(BulletHit {
            shooter: shooter.entity,
            target,
            impact_point: impact.point,
            bone: hit.bone.clone(),
            damage: weapon.tuning.damage,
            headshot_damage: weapon.tuning.headshot_damage,
        })
    });

    ResolvedShot {
        fired: ShotFired {
            shooter: shooter.entity,
            weapon: weapon_entity,
            barrel_origin: barrel.map(|barrel| barrel.position),
            impact_point: impact.map(|impact| impact.point),
            section: HIP_FIRE_SECTION,
        },
        hit,
    }
}

fn write_shot(shot: ResolvedShot, shot_events: &mut EventWriter<ShotFired>, hit_events: &mut EventWriter<BulletHit>) {
    if let Some(hit) = shot.hit {
        hit_events.write(hit);
    }
    shot_events.write(shot.fired);
}

type PlayerCombatQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut WeaponSlot,
        &'static mut PlayerTimers,
        &'static mut CrosshairSpread,
        &'static mut CrosshairTargeting,
        &'static CharacterTuning,
    ),
    With<Player>,
>;

/// System: player timers (SimulationSet::Timers)
///
/// - `ShotRecoil` → recoil window закрыт
/// - `AutoFire` → очередной выстрел или отмена таймера
/// - `FireCooldown` → просто истёк (semi-auto снова может стрелять)
pub fn tick_player_timers(
    time: Res<Time>,
    mut players: PlayerCombatQuery,
    mut weapons: Query<(&mut Weapon, Option<&BarrelSocket>)>,
    projection: Option<Res<ScreenProjection>>,
    raycast: Option<Res<WorldRaycast>>,
    mut shot_events: EventWriter<ShotFired>,
    mut hit_events: EventWriter<BulletHit>,
) {
    let delta = time.delta_secs();
    let ports = HostPorts::from_resources(projection.as_deref(), raycast.as_deref());

    for (entity, mut slot, mut timers, mut spread, mut targeting, tuning) in players.iter_mut() {
        for purpose in timers.advance(delta) {
            match purpose {
                // Выстрел в этом же tick мог перезапустить окно
                PlayerTimer::ShotRecoil => {
                    if !timers.is_active(PlayerTimer::ShotRecoil) {
                        spread.is_firing_bullet = false;
                    }
                }
                PlayerTimer::FireCooldown => {}
                PlayerTimer::AutoFire => {
                    let equipped = slot.equipped;
                    let mut weapon = equipped.and_then(|weapon_entity| weapons.get_mut(weapon_entity).ok());

                    let fired = slot.auto_fire_tick(weapon.as_mut().map(|(weapon, _)| &mut **weapon), &mut timers);
                    if !fired {
                        continue;
                    }

                    let (Some(weapon_entity), Some((weapon, barrel))) = (equipped, weapon) else {
                        continue;
                    };

                    let shot = resolve_shot(
                        Shooter {
                            entity,
                            spread: &mut spread,
                            timers: &mut timers,
                            targeting: &mut targeting,
                            spread_tuning: &tuning.spread,
                        },
                        weapon_entity,
                        &weapon,
                        barrel,
                        ports,
                    );
                    write_shot(shot, &mut shot_events, &mut hit_events);
                }
            }
        }
    }
}

/// System: fire button (Host → ECS)
///
/// Pressed → WeaponSlot решает можно ли стрелять (патроны, fire mode).
/// Released → только снимает флаг, auto-fire отменится на своём тике.
pub fn process_fire_input(
    mut events: EventReader<FireInput>,
    mut players: PlayerCombatQuery,
    mut weapons: Query<(&mut Weapon, Option<&BarrelSocket>)>,
    projection: Option<Res<ScreenProjection>>,
    raycast: Option<Res<WorldRaycast>>,
    mut shot_events: EventWriter<ShotFired>,
    mut hit_events: EventWriter<BulletHit>,
) {
    let ports = HostPorts::from_resources(projection.as_deref(), raycast.as_deref());

    for input in events.read() {
        let Ok((entity, mut slot, mut timers, mut spread, mut targeting, tuning)) = players.get_mut(input.entity) else {
            continue;
        };

        if !input.pressed {
            slot.release_fire();
            continue;
        }

        let equipped = slot.equipped;
        let mut weapon = equipped.and_then(|weapon_entity| weapons.get_mut(weapon_entity).ok());

        let fired = slot.press_fire(weapon.as_mut().map(|(weapon, _)| &mut **weapon), &mut timers);
        if !fired {
            continue;
        }

        let (Some(weapon_entity), Some((weapon, barrel))) = (equipped, weapon) else {
            continue;
        };

        let shot = resolve_shot(
            Shooter {
                entity,
                spread: &mut spread,
                timers: &mut timers,
                targeting: &mut targeting,
                spread_tuning: &tuning.spread,
            },
            weapon_entity,
            &weapon,
            barrel,
            ports,
        );
        write_shot(shot, &mut shot_events, &mut hit_events);
    }
}
