//! Headless симуляция Marcus
//!
//! Игрок с автоматом стреляет в врага, стоящего перед камерой.
//! Raycast / deprojection — заглушки вместо host engine.

use bevy::prelude::*;
use marcus_simulation::combat::{BarrelSocket, FireInput};
use marcus_simulation::enemy::{EnemyDied, HitReactionRequested};
use marcus_simulation::ports::{CollisionChannel, FixedCamera, RaycastHit, RaycastPort, WorldRay};
use marcus_simulation::*;

/// Враг как плоскость x = distance (всё что её пересекает — попадание)
struct EnemyPlane {
    enemy: Entity,
    distance: f32,
}

impl RaycastPort for EnemyPlane {
    fn raycast(&self, start: Vec3, end: Vec3, _channel: CollisionChannel) -> Option<RaycastHit> {
        if start.x >= self.distance || end.x < self.distance {
            return None;
        }
        let t = (self.distance - start.x) / (end.x - start.x);
        Some(RaycastHit {
            point: start + (end - start) * t,
            entity: Some(self.enemy),
            bone: Some("spine_03".into()),
        })
    }
}

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting Marcus headless simulation (seed: {})", seed));
    app.add_plugins(SimulationPlugin);

    let (player, enemy) = {
        let mut commands = app.world_mut().commands();
        let player = spawn_player(&mut commands, CharacterTuning::default(), Some(WeaponTuning::assault_rifle()));
        let enemy = spawn_enemy(&mut commands, EnemyTuning::default());
        (player, enemy)
    };
    app.world_mut().flush();

    app.insert_resource(ScreenProjection::new(FixedCamera {
        viewport: Vec2::new(1920.0, 1080.0),
        ray: WorldRay::new(Vec3::new(0.0, 0.0, 160.0), Vec3::X),
    }))
    .insert_resource(WorldRaycast::new(EnemyPlane {
        enemy,
        distance: 1500.0,
    }));

    // Первый update — нулевой delta, второй — default weapon в руках
    app.update();
    app.update();

    let Some(weapon) = app.world().get::<WeaponSlot>(player).and_then(|slot| slot.equipped) else {
        log_error("Default weapon was not equipped");
        return;
    };
    app.world_mut().entity_mut(weapon).insert(BarrelSocket {
        position: Vec3::new(40.0, 20.0, 150.0),
    });

    app.world_mut().send_event(FireInput {
        entity: player,
        pressed: true,
    });

    let mut shots = 0;
    for tick in 0..600 {
        app.update();

        let world = app.world_mut();
        shots += world.resource_mut::<Events<ShotFired>>().drain().count();
        for reaction in world.resource_mut::<Events<HitReactionRequested>>().drain() {
            log(&format!("Tick {}: hit reaction '{}'", tick, reaction.section));
        }
        for died in world.resource_mut::<Events<EnemyDied>>().drain() {
            log_info(&format!("Tick {}: enemy {:?} died", tick, died.enemy));
        }

        if tick % 60 == 0 {
            let health = world.get::<EnemyHealth>(enemy).map(|health| health.health).unwrap_or(0.0);
            let ammo = world.get::<Weapon>(weapon).map(|weapon| weapon.ammo).unwrap_or(0);
            log_info(&format!("Tick {}: shots {}, ammo {}, enemy health {}", tick, shots, ammo, health));
        }
    }

    log_info("Simulation complete!");
}
