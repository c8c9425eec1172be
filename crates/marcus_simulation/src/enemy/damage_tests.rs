//! Tests for enemy damage.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::events::{DamageIntent, EnemyDied};
    use super::super::health::{spawn_enemy, Damageable, Dead, EnemyHealth};
    use super::super::reactions::EnemyTuning;
    use crate::{create_headless_app, SimulationPlugin};

    fn enemy_app() -> (App, Entity) {
        let mut app = create_headless_app(42);
        app.add_plugins(SimulationPlugin);
        // Первый update — нулевой delta
        app.update();

        let enemy = {
            let mut commands = app.world_mut().commands();
            spawn_enemy(&mut commands, EnemyTuning::default())
        };
        app.world_mut().flush();
        (app, enemy)
    }

    #[test]
    fn test_damage_then_lethal_damage() {
        let mut health = EnemyHealth::new(100.0);

        let outcome = health.apply_damage(30.0);
        assert_eq!(health.health, 70.0);
        assert!(!outcome.died);

        // 70 - 80 = -10 → clamp 0
        let outcome = health.apply_damage(80.0);
        assert_eq!(health.health, 0.0);
        assert!(outcome.died);
        assert_eq!(outcome.applied, 80.0);
    }

    #[test]
    fn test_overkill_never_negative() {
        let mut health = EnemyHealth::new(100.0);

        let outcome = health.apply_damage(health.max_health + 100.0);
        assert_eq!(health.health, 0.0);
        assert!(outcome.died);
    }

    #[test]
    fn test_death_signalled_once() {
        let mut health = EnemyHealth::new(100.0);
        let mut deaths = 0;

        for _ in 0..5 {
            if health.apply_damage(60.0).died {
                deaths += 1;
            }
        }

        assert_eq!(deaths, 1);
        assert_eq!(health.health, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_dead_enemy_not_healed() {
        let mut health = EnemyHealth::new(50.0);
        health.apply_damage(50.0);

        health.apply_damage(-30.0);
        assert_eq!(health.health, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_enemy_tuning_defaults() {
        let tuning = EnemyTuning::default();
        assert_eq!(tuning.max_health, 100.0);
        assert_eq!(tuning.health_bar_display_time, 4.0);
        assert_eq!(tuning.hit_number_lifetime, 1.5);
        assert_eq!(tuning.head_bone, "head");
    }

    #[test]
    fn test_damage_intent_kills_once_and_marks_dead() {
        let (mut app, enemy) = enemy_app();

        let mut deaths = Vec::new();
        for _ in 0..3 {
            app.world_mut().send_event(DamageIntent {
                target: enemy,
                amount: 60.0,
                instigator: None,
            });
            app.update();
            deaths.extend(app.world_mut().resource_mut::<Events<EnemyDied>>().drain());
        }

        assert!(app.world().get::<Dead>(enemy).is_some());
        assert_eq!(app.world().get::<EnemyHealth>(enemy).unwrap().health, 0.0);
        assert_eq!(deaths, vec![EnemyDied { enemy, killer: None }]);
    }

    #[test]
    fn test_dead_marker_blocks_damage_intents() {
        let (mut app, enemy) = enemy_app();
        // Host сам пометил врага мёртвым (скрипт / cutscene)
        app.world_mut().entity_mut(enemy).insert(Dead);

        app.world_mut().send_event(DamageIntent {
            target: enemy,
            amount: 30.0,
            instigator: None,
        });
        app.update();

        assert_eq!(app.world().get::<EnemyHealth>(enemy).unwrap().health, 100.0);
    }
}
