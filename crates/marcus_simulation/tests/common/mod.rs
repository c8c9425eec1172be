//! Общие helpers для integration тестов (headless App + stub ports)

#![allow(dead_code)]

use bevy::prelude::*;
use marcus_simulation::combat::BarrelSocket;
use marcus_simulation::enemy::{BulletImpact, HealthBarVisibility, HitNumberSpawned, HitReactionRequested};
use marcus_simulation::items::{FocusedItemChanged, ItemPreviewStarted, PickupPromptVisibility};
use marcus_simulation::ports::{CollisionChannel, FixedCamera, RaycastHit, RaycastPort, ScreenProjectionPort, WorldRay};
use marcus_simulation::*;

/// Камера в origin, смотрит вдоль +X
pub fn forward_camera() -> FixedCamera {
    FixedCamera {
        viewport: Vec2::new(1920.0, 1080.0),
        ray: WorldRay::new(Vec3::ZERO, Vec3::X),
    }
}

/// Deprojection всегда не удаётся (viewport ещё не создан)
pub struct NoViewport;

impl ScreenProjectionPort for NoViewport {
    fn viewport_size(&self) -> Option<Vec2> {
        None
    }

    fn deproject(&self, _screen_point: Vec2) -> Option<WorldRay> {
        None
    }
}

/// Цель — плоскость x = distance
pub struct TargetPlane {
    pub target: Entity,
    pub distance: f32,
    pub bone: &'static str,
}

impl RaycastPort for TargetPlane {
    fn raycast(&self, start: Vec3, end: Vec3, _channel: CollisionChannel) -> Option<RaycastHit> {
        if start.x >= self.distance || end.x < self.distance {
            return None;
        }
        let t = (self.distance - start.x) / (end.x - start.x);
        Some(RaycastHit {
            point: start + (end - start) * t,
            entity: Some(self.target),
            bone: Some(self.bone.to_string()),
        })
    }
}

/// Events типа E, накопленные с последнего `drain`
///
/// Bevy хранит events только два update, поэтому тесты читают их через
/// собственный reader в `Last`, а не из `Events<E>` напрямую.
#[derive(Resource)]
pub struct Recorded<E: Event>(pub Vec<E>);

fn record_events<E: Event + Clone>(mut events: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(events.read().cloned());
}

pub fn record<E: Event + Clone>(app: &mut App) {
    app.insert_resource(Recorded::<E>(Vec::new()))
        .add_systems(Last, record_events::<E>);
}

/// Headless App с SimulationPlugin
///
/// Первый `update` даёт нулевой delta, поэтому сразу прогоняем его.
pub fn create_game_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    record::<ShotFired>(&mut app);
    record::<BulletHit>(&mut app);
    record::<BulletImpact>(&mut app);
    record::<HitReactionRequested>(&mut app);
    record::<HealthBarVisibility>(&mut app);
    record::<HitNumberSpawned>(&mut app);
    record::<EnemyDied>(&mut app);
    record::<FieldOfViewChanged>(&mut app);
    record::<WeaponEquipped>(&mut app);
    record::<WeaponDropped>(&mut app);
    record::<PickupPromptVisibility>(&mut app);
    record::<FocusedItemChanged>(&mut app);
    record::<ItemPreviewStarted>(&mut app);

    app.update();
    app
}

/// N simulation тиков (один update = один FixedUpdate тик)
pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

/// Забрать все events типа E, записанные с прошлого вызова (тип должен быть в `record`)
pub fn drain<E: Event + Clone>(app: &mut App) -> Vec<E> {
    std::mem::take(&mut app.world_mut().resource_mut::<Recorded<E>>().0)
}

/// Spawn игрока с оружием по умолчанию; оружие экипируется за один тик
///
/// Оружию ставится `BarrelSocket` (если `barrel` задан).
pub fn spawn_armed_player(app: &mut App, weapon: WeaponTuning, barrel: Option<Vec3>) -> (Entity, Entity) {
    spawn_armed_player_with(app, CharacterTuning::default(), weapon, barrel)
}

pub fn spawn_armed_player_with(
    app: &mut App,
    character: CharacterTuning,
    weapon: WeaponTuning,
    barrel: Option<Vec3>,
) -> (Entity, Entity) {
    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player(&mut commands, character, Some(weapon))
    };
    app.world_mut().flush();
    run_ticks(app, 1);

    let weapon = app
        .world()
        .get::<WeaponSlot>(player)
        .and_then(|slot| slot.equipped)
        .expect("default weapon equipped");

    if let Some(position) = barrel {
        app.world_mut().entity_mut(weapon).insert(BarrelSocket { position });
    }

    (player, weapon)
}

pub fn press_fire(app: &mut App, player: Entity, pressed: bool) {
    app.world_mut().send_event(FireInput { entity: player, pressed });
}
