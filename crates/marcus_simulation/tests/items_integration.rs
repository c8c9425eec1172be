//! Items integration test
//!
//! Focus через crosshair ray, pickup prompt, select → preview → swap

mod common;

use bevy::prelude::*;
use common::*;
use marcus_simulation::equipment::RIGHT_HAND_SOCKET;
use marcus_simulation::items::{
    FocusedItemChanged, ItemEnteredRange, ItemLeftRange, ItemPreviewFinished, ItemPreviewStarted, PickupPromptVisibility,
    SelectInput,
};
use marcus_simulation::*;

fn setup() -> (App, Entity, Entity) {
    let mut app = create_game_app(42);
    app.insert_resource(ScreenProjection::new(forward_camera()));

    let (player, rifle) = spawn_armed_player(&mut app, WeaponTuning::assault_rifle(), None);
    drain::<WeaponEquipped>(&mut app);
    (app, player, rifle)
}

fn spawn_pistol(app: &mut App, location: Vec3) -> Entity {
    let pistol = {
        let mut commands = app.world_mut().commands();
        spawn_weapon(&mut commands, WeaponTuning::pistol_9mm(), location)
    };
    app.world_mut().flush();
    pistol
}

fn enter_range(app: &mut App, player: Entity, item: Entity) {
    app.world_mut().send_event(ItemEnteredRange { character: player, item });
}

/// Test: предмет перед камерой → фокус + prompt
#[test]
fn test_item_in_view_gets_focus() {
    let (mut app, player, _) = setup();
    let pistol = spawn_pistol(&mut app, Vec3::new(400.0, 5.0, 0.0));

    enter_range(&mut app, player, pistol);
    run_ticks(&mut app, 1);

    assert_eq!(app.world().get::<ItemFocus>(player).unwrap().focused(), Some(pistol));
    assert!(app.world().get::<Item>(pistol).unwrap().prompt_visible);
    assert_eq!(
        drain::<PickupPromptVisibility>(&mut app),
        vec![PickupPromptVisibility { item: pistol, visible: true }]
    );
    assert_eq!(
        drain::<FocusedItemChanged>(&mut app),
        vec![FocusedItemChanged { character: player, item: Some(pistol) }]
    );
}

/// Test: предмет сбоку в range, но не в фокусе
#[test]
fn test_item_outside_view_not_focused() {
    let (mut app, player, _) = setup();
    let pistol = spawn_pistol(&mut app, Vec3::new(0.0, 300.0, 0.0));

    enter_range(&mut app, player, pistol);
    run_ticks(&mut app, 1);

    let focus = app.world().get::<ItemFocus>(player).unwrap();
    assert!(focus.contains(pistol));
    assert_eq!(focus.focused(), None);
    assert!(!app.world().get::<Item>(pistol).unwrap().prompt_visible);
}

/// Test: уход из range всегда снимает фокус и prompt
#[test]
fn test_leaving_range_clears_focus() {
    let (mut app, player, _) = setup();
    let pistol = spawn_pistol(&mut app, Vec3::new(400.0, 0.0, 0.0));

    enter_range(&mut app, player, pistol);
    run_ticks(&mut app, 1);
    drain::<FocusedItemChanged>(&mut app);

    app.world_mut().send_event(ItemLeftRange { character: player, item: pistol });
    run_ticks(&mut app, 1);

    let focus = app.world().get::<ItemFocus>(player).unwrap();
    assert_eq!(focus.focused(), None);
    assert!(!focus.contains(pistol));
    assert!(!app.world().get::<Item>(pistol).unwrap().prompt_visible);
    assert_eq!(
        drain::<FocusedItemChanged>(&mut app),
        vec![FocusedItemChanged { character: player, item: None }]
    );
}

/// Test: despawned предмет выкидывается из range
#[test]
fn test_despawned_item_pruned() {
    let (mut app, player, _) = setup();
    let pistol = spawn_pistol(&mut app, Vec3::new(400.0, 0.0, 0.0));

    enter_range(&mut app, player, pistol);
    run_ticks(&mut app, 1);

    app.world_mut().despawn(pistol);
    run_ticks(&mut app, 1);

    let focus = app.world().get::<ItemFocus>(player).unwrap();
    assert!(focus.in_range().is_empty());
    assert_eq!(focus.focused(), None);
}

/// Test: deprojection не удалась → фокус сохраняется
#[test]
fn test_deprojection_failure_keeps_focus() {
    let (mut app, player, _) = setup();
    let pistol = spawn_pistol(&mut app, Vec3::new(400.0, 0.0, 0.0));

    enter_range(&mut app, player, pistol);
    run_ticks(&mut app, 1);

    app.insert_resource(ScreenProjection::new(NoViewport));
    run_ticks(&mut app, 5);

    assert_eq!(app.world().get::<ItemFocus>(player).unwrap().focused(), Some(pistol));
    assert!(app.world().get::<Item>(pistol).unwrap().prompt_visible);
}

/// Test: select → preview → swap (drop-then-equip)
#[test]
fn test_pickup_swaps_weapon() {
    let (mut app, player, rifle) = setup();
    app.world_mut().entity_mut(player).insert(CameraView {
        position: Vec3::new(0.0, 0.0, 100.0),
        forward: Vec3::X,
    });
    let pistol = spawn_pistol(&mut app, Vec3::new(400.0, 0.0, 0.0));

    enter_range(&mut app, player, pistol);
    run_ticks(&mut app, 1);

    app.world_mut().send_event(SelectInput { entity: player, pressed: true });
    run_ticks(&mut app, 1);

    assert_eq!(*app.world().get::<ItemState>(pistol).unwrap(), ItemState::EquipInterping);
    assert_eq!(
        drain::<ItemPreviewStarted>(&mut app),
        vec![ItemPreviewStarted {
            character: player,
            item: pistol,
            preview_location: Vec3::new(250.0, 0.0, 165.0),
        }]
    );

    // Host: предмет долетел до камеры
    app.world_mut().send_event(ItemPreviewFinished { character: player, item: pistol });
    run_ticks(&mut app, 1);

    assert_eq!(app.world().get::<WeaponSlot>(player).unwrap().equipped, Some(pistol));
    assert_eq!(*app.world().get::<ItemState>(pistol).unwrap(), ItemState::Equipped);
    assert_eq!(*app.world().get::<ItemState>(rifle).unwrap(), ItemState::Falling);

    let dropped = drain::<WeaponDropped>(&mut app);
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].weapon, rifle);
    assert_eq!(dropped[0].throw_direction, Vec3::X);

    assert_eq!(
        drain::<WeaponEquipped>(&mut app),
        vec![WeaponEquipped {
            character: player,
            weapon: pistol,
            socket: RIGHT_HAND_SOCKET,
        }]
    );

    // Оружие в руках больше не в range
    assert!(!app.world().get::<ItemFocus>(player).unwrap().contains(pistol));
}

/// Test: equip без оружия и повторный equip — no-op
#[test]
fn test_equip_noops() {
    let (mut app, player, rifle) = setup();

    app.world_mut().send_event(EquipWeaponIntent { entity: player, weapon: None });
    app.world_mut().send_event(EquipWeaponIntent {
        entity: player,
        weapon: Some(rifle),
    });
    run_ticks(&mut app, 1);

    assert_eq!(app.world().get::<WeaponSlot>(player).unwrap().equipped, Some(rifle));
    assert!(drain::<WeaponDropped>(&mut app).is_empty());
    assert!(drain::<WeaponEquipped>(&mut app).is_empty());
}

/// Test: reload переносит патроны из запаса
#[test]
fn test_reload_from_ammo_map() {
    let mut app = create_game_app(42);
    let (player, rifle) = spawn_armed_player(
        &mut app,
        WeaponTuning {
            starting_magazine: 10,
            ..WeaponTuning::assault_rifle()
        },
        None,
    );

    app.world_mut().send_event(ReloadIntent { entity: player });
    run_ticks(&mut app, 1);

    assert_eq!(app.world().get::<Weapon>(rifle).unwrap().ammo, 30);
    assert_eq!(app.world().get::<AmmoMap>(player).unwrap().count(AmmoType::AssaultRifle), 100);
}
