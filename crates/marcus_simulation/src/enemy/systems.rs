//! Enemy systems — timers, bullet hits, generic damage

use bevy::prelude::*;

use super::events::*;
use super::health::{Damageable, Dead, EnemyHealth};
use super::reactions::{request_hit_reaction, restart_health_bar, EnemyTuning, HitNumbers, HIT_REACT_FRONT};
use crate::combat::BulletHit;
use crate::timers::{EnemyTimer, EnemyTimers};
use crate::{log, DeterministicRng};

type EnemyQuery<'w, 's, F = ()> = Query<
    'w,
    's,
    (
        &'static mut EnemyHealth,
        &'static EnemyTuning,
        &'static mut EnemyTimers,
        &'static mut HitNumbers,
        Has<Dead>,
    ),
    F,
>;

/// Смерть: Dead marker, health bar прячется сразу, EnemyDied
fn report_death(
    commands: &mut Commands,
    enemy: Entity,
    killer: Option<Entity>,
    timers: &mut EnemyTimers,
    bar_events: &mut EventWriter<HealthBarVisibility>,
    died_events: &mut EventWriter<EnemyDied>,
) {
    commands.entity(enemy).insert(Dead);
    timers.cancel(EnemyTimer::HealthBar);
    timers.cancel(EnemyTimer::HitReactCooldown);

    bar_events.write(HealthBarVisibility { enemy, visible: false });
    died_events.write(EnemyDied { enemy, killer });

    log(&format!("Enemy {:?} died (killer: {:?})", enemy, killer));
}

/// System: enemy timers + hit number lifetime (SimulationSet::Timers)
pub fn tick_enemy_timers(
    time: Res<Time>,
    mut enemies: Query<(Entity, &mut EnemyTimers, &mut HitNumbers)>,
    mut bar_events: EventWriter<HealthBarVisibility>,
    mut expired_events: EventWriter<HitNumberExpired>,
) {
    let delta = time.delta_secs();

    for (enemy, mut timers, mut hit_numbers) in enemies.iter_mut() {
        for purpose in timers.advance(delta) {
            match purpose {
                EnemyTimer::HealthBar => {
                    bar_events.write(HealthBarVisibility { enemy, visible: false });
                }
                EnemyTimer::HitReactCooldown => {}
            }
        }

        for number in hit_numbers.advance(delta) {
            expired_events.write(HitNumberExpired { enemy, id: number.id });
        }
    }
}

/// System: попадания пуль (SimulationSet::Damage)
///
/// Capability check: цель без `EnemyHealth` (стена, предмет) игнорируется.
/// Порядок для живого врага: impact FX → hit reaction → health bar → damage → hit number.
/// Мёртвый враг получает только impact FX.
pub fn process_bullet_hits(
    mut commands: Commands,
    mut hits: EventReader<BulletHit>,
    mut enemies: EnemyQuery,
    mut rng: ResMut<DeterministicRng>,
    mut impact_events: EventWriter<BulletImpact>,
    mut reaction_events: EventWriter<HitReactionRequested>,
    mut bar_events: EventWriter<HealthBarVisibility>,
    mut damaged_events: EventWriter<EnemyDamaged>,
    mut died_events: EventWriter<EnemyDied>,
    mut number_events: EventWriter<HitNumberSpawned>,
) {
    for hit in hits.read() {
        let Ok((mut health, tuning, mut timers, mut hit_numbers, dead)) = enemies.get_mut(hit.target) else {
            continue;
        };

        impact_events.write(BulletImpact {
            target: hit.target,
            point: hit.impact_point,
        });

        // Dead ставится через commands: в этом же тике смотрим и на health
        if dead || health.is_dead() {
            continue;
        }

        let reaction = request_hit_reaction(
            hit.target,
            HIT_REACT_FRONT,
            &mut timers,
            &tuning.hit_react_interval,
            &mut rng.rng,
        );
        if let Some(reaction) = reaction {
            reaction_events.write(reaction);
        }

        restart_health_bar(&mut timers, tuning.health_bar_display_time);
        bar_events.write(HealthBarVisibility {
            enemy: hit.target,
            visible: true,
        });

        let headshot = hit.bone.as_deref() == Some(tuning.head_bone.as_str());
        let damage = if headshot { hit.headshot_damage } else { hit.damage };

        let outcome = health.apply_damage(damage);
        damaged_events.write(EnemyDamaged {
            enemy: hit.target,
            amount: outcome.applied,
            health: health.health,
            headshot,
        });

        let number = hit_numbers.store(outcome.applied, hit.impact_point, headshot, tuning.hit_number_lifetime);
        number_events.write(HitNumberSpawned {
            enemy: hit.target,
            id: number.id,
            damage: number.damage,
            location: number.location,
            headshot,
        });

        if outcome.died {
            report_death(
                &mut commands,
                hit.target,
                Some(hit.shooter),
                &mut timers,
                &mut bar_events,
                &mut died_events,
            );
        }
    }
}

/// System: generic урон (SimulationSet::Damage)
///
/// Мёртвые (`Dead`) враги не запрашиваются вовсе.
pub fn process_damage_intents(
    mut commands: Commands,
    mut intents: EventReader<DamageIntent>,
    mut enemies: EnemyQuery<Without<Dead>>,
    mut bar_events: EventWriter<HealthBarVisibility>,
    mut damaged_events: EventWriter<EnemyDamaged>,
    mut died_events: EventWriter<EnemyDied>,
) {
    for intent in intents.read() {
        let Ok((mut health, _, mut timers, _, _)) = enemies.get_mut(intent.target) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }

        let outcome = health.apply_damage(intent.amount);
        damaged_events.write(EnemyDamaged {
            enemy: intent.target,
            amount: outcome.applied,
            health: health.health,
            headshot: false,
        });

        if outcome.died {
            report_death(
                &mut commands,
                intent.target,
                intent.instigator,
                &mut timers,
                &mut bar_events,
                &mut died_events,
            );
        }
    }
}
