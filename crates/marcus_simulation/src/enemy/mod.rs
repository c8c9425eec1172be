//! Enemy domain — health, hit reactions, health bar, hit numbers
//!
//! ECS ответственность:
//! - EnemyHealth (clamp, death — терминальна)
//! - Hit react cooldown, health bar countdown, hit number lifetime
//!
//! Host ответственность:
//! - Impact sound/particles (`BulletImpact`)
//! - Hit react montage, health bar widget, hit number widgets
//! - Death animation / despawn (`EnemyDied`)

use bevy::prelude::*;

pub mod events;
pub mod health;
pub mod reactions;
pub mod systems;

#[cfg(test)]
mod damage_tests;

pub use events::*;
pub use health::{spawn_enemy, DamageOutcome, Damageable, Dead, Enemy, EnemyHealth};
pub use reactions::{request_hit_reaction, HitNumber, HitNumbers, HitReactInterval, EnemyTuning, HIT_REACT_FRONT};
pub use systems::*;

use crate::SimulationSet;

/// Enemy plugin
///
/// Порядок:
/// 1. tick_enemy_timers (Timers) — health bar hide, hit number expiry
/// 2. process_bullet_hits → process_damage_intents (Damage)
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageIntent>()
            .add_event::<BulletImpact>()
            .add_event::<HitReactionRequested>()
            .add_event::<HealthBarVisibility>()
            .add_event::<EnemyDamaged>()
            .add_event::<EnemyDied>()
            .add_event::<HitNumberSpawned>()
            .add_event::<HitNumberExpired>();

        app.add_systems(FixedUpdate, tick_enemy_timers.in_set(SimulationSet::Timers))
            .add_systems(
                FixedUpdate,
                (process_bullet_hits, process_damage_intents)
                    .chain()
                    .in_set(SimulationSet::Damage),
            );
    }
}
