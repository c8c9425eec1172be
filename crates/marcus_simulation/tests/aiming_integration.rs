//! Aiming integration test
//!
//! Aim input → FOV zoom, look rates, crosshair spread от движения

mod common;

use bevy::prelude::*;
use common::*;
use marcus_simulation::*;

fn spawn_unarmed_player(app: &mut App) -> Entity {
    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player(&mut commands, CharacterTuning::default(), None)
    };
    app.world_mut().flush();
    player
}

/// Test: зажатый aim сводит FOV к zoomed монотонно, отпускание возвращает
#[test]
fn test_aim_zoom_round_trip() {
    let mut app = create_game_app(42);
    let player = spawn_unarmed_player(&mut app);

    app.world_mut().send_event(AimInput { entity: player, pressed: true });
    run_ticks(&mut app, 120);

    let changes = drain::<FieldOfViewChanged>(&mut app);
    assert!(!changes.is_empty());
    assert!(changes.windows(2).all(|pair| pair[1].fov < pair[0].fov));

    let aim = *app.world().get::<AimState>(player).unwrap();
    assert!((aim.current_fov - aim.zoomed_fov).abs() < 1e-3);

    // Look rates переключились на aiming
    let rates = app.world().get::<CurrentLookRates>(player).unwrap();
    assert_eq!(rates.mouse_turn, 0.2);

    // Стабильно — событий больше нет
    run_ticks(&mut app, 10);
    assert!(drain::<FieldOfViewChanged>(&mut app).is_empty());

    app.world_mut().send_event(AimInput { entity: player, pressed: false });
    run_ticks(&mut app, 120);

    let aim = *app.world().get::<AimState>(player).unwrap();
    assert!((aim.current_fov - aim.default_fov).abs() < 1e-3);
    assert_eq!(app.world().get::<CurrentLookRates>(player).unwrap().mouse_turn, 1.0);
}

/// Test: стоящий персонаж на земле → spread = baseline
#[test]
fn test_idle_spread_is_baseline() {
    let mut app = create_game_app(42);
    let player = spawn_unarmed_player(&mut app);

    run_ticks(&mut app, 60);

    let spread = app.world().get::<CrosshairSpread>(player).unwrap();
    assert!((spread.total - 0.5).abs() < 1e-4);
}

/// Test: бег + прыжок расширяют crosshair (host синхронизирует kinematics)
#[test]
fn test_movement_widens_spread() {
    let mut app = create_game_app(42);
    let player = spawn_unarmed_player(&mut app);

    app.world_mut().entity_mut(player).insert(CharacterKinematics {
        velocity: Vec3::new(300.0, 0.0, 450.0),
        is_airborne: true,
    });
    run_ticks(&mut app, 180);

    let spread = *app.world().get::<CrosshairSpread>(player).unwrap();
    // Вертикальная скорость не учитывается: 300 / 600
    assert!((spread.velocity_factor - 0.5).abs() < 1e-4);
    assert!(spread.in_air_factor > 2.0);
    assert!(spread.total > 2.5);

    // Приземлился и остановился
    app.world_mut().entity_mut(player).insert(CharacterKinematics::default());
    run_ticks(&mut app, 60);

    let spread = app.world().get::<CrosshairSpread>(player).unwrap();
    assert!((spread.total - 0.5).abs() < 1e-3);
}
