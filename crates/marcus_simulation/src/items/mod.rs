//! Items domain — предметы в мире, focus, подбор
//!
//! Pickup flow:
//! 1. Host: overlap → `ItemEnteredRange` / `ItemLeftRange`
//! 2. ECS: crosshair ray → focus + pickup prompt
//! 3. Select → `ItemState::EquipInterping` + `ItemPreviewStarted`
//! 4. Host: предмет долетел → `ItemPreviewFinished`
//! 5. ECS: оружие → `EquipWeaponIntent` (equipment domain)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod focus;
pub mod systems;

pub use components::{FocusTuning, Item, ItemFocus, ItemState};
pub use events::*;
pub use focus::{evaluate_focus, preview_location, FocusUpdate};
pub use systems::*;

use crate::SimulationSet;

/// Items plugin
///
/// - SimulationSet::Focus: landed / range events → focus
/// - SimulationSet::Pickup: select → preview → equip intent
pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ItemEnteredRange>()
            .add_event::<ItemLeftRange>()
            .add_event::<SelectInput>()
            .add_event::<PickupPromptVisibility>()
            .add_event::<FocusedItemChanged>()
            .add_event::<ItemPreviewStarted>()
            .add_event::<ItemPreviewFinished>()
            .add_event::<ItemLanded>();

        app.add_systems(
            FixedUpdate,
            (process_item_landed, process_item_range_events, update_item_focus)
                .chain()
                .in_set(SimulationSet::Focus),
        )
        .add_systems(
            FixedUpdate,
            (process_select_input, process_item_preview_finished)
                .chain()
                .in_set(SimulationSet::Pickup),
        );
    }
}
