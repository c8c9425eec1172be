//! Item systems — range bookkeeping, focus, pickup flow

use bevy::prelude::*;

use super::components::{Item, ItemFocus, ItemState};
use super::events::*;
use super::focus::{evaluate_focus, preview_location};
use crate::aiming::CrosshairTargeting;
use crate::combat::Weapon;
use crate::equipment::EquipWeaponIntent;
use crate::logger;
use crate::player::{CameraView, CharacterTuning};
use crate::ports::ScreenProjection;

fn set_prompt(item_entity: Entity, item: &mut Item, visible: bool, prompt_events: &mut EventWriter<PickupPromptVisibility>) {
    if item.prompt_visible == visible {
        return;
    }
    item.prompt_visible = visible;
    prompt_events.write(PickupPromptVisibility {
        item: item_entity,
        visible,
    });
}

/// System: выброшенные предметы снова можно подобрать
pub fn process_item_landed(mut events: EventReader<ItemLanded>, mut items: Query<&mut ItemState, With<Item>>) {
    for event in events.read() {
        let Ok(mut state) = items.get_mut(event.item) else {
            continue;
        };
        if *state == ItemState::Falling {
            *state = ItemState::Pickup;
        }
    }
}

/// System: overlap begin/end (Host → ECS)
///
/// Left range всегда прячет prompt и снимает фокус, независимо от угла.
pub fn process_item_range_events(
    mut entered_events: EventReader<ItemEnteredRange>,
    mut left_events: EventReader<ItemLeftRange>,
    mut characters: Query<&mut ItemFocus>,
    mut items: Query<&mut Item>,
    mut prompt_events: EventWriter<PickupPromptVisibility>,
    mut focus_events: EventWriter<FocusedItemChanged>,
) {
    for event in entered_events.read() {
        let Ok(mut focus) = characters.get_mut(event.character) else {
            continue;
        };
        if items.get(event.item).is_err() {
            logger::log_warning(&format!("ItemEnteredRange: {:?} is not an item", event.item));
            continue;
        }

        focus.add_in_range(event.item);
    }

    for event in left_events.read() {
        let Ok(mut focus) = characters.get_mut(event.character) else {
            continue;
        };

        let was_focused = focus.focused() == Some(event.item);
        focus.remove_from_range(event.item);

        if let Ok(mut item) = items.get_mut(event.item) {
            set_prompt(event.item, &mut item, false, &mut prompt_events);
        }

        if was_focused {
            focus_events.write(FocusedItemChanged {
                character: event.character,
                item: None,
            });
        }
    }
}

/// System: item focus (что персонаж видит через crosshair)
///
/// - Despawned предметы выкидываются из range
/// - Фокус только на pickable предметах
/// - Нет ScreenProjection или deprojection не удалась → state не меняется
pub fn update_item_focus(
    projection: Option<Res<ScreenProjection>>,
    mut characters: Query<(Entity, &mut ItemFocus, &mut CrosshairTargeting, &CharacterTuning)>,
    mut items: Query<(&mut Item, &ItemState)>,
    mut prompt_events: EventWriter<PickupPromptVisibility>,
    mut focus_events: EventWriter<FocusedItemChanged>,
) {
    for (character, mut focus, mut targeting, tuning) in characters.iter_mut() {
        let previous = focus.focused();

        let removed = focus.retain_alive(|entity| items.contains(entity));
        if !removed.is_empty() {
            logger::log(&format!("Item focus {:?}: pruned despawned items {:?}", character, removed));
        }

        // Не pickable (в руках, летит к камере, падает) → prompt скрыт, фокус недоступен
        let mut pickable = Vec::with_capacity(focus.in_range().len());
        for &entity in focus.in_range() {
            let Ok((mut item, state)) = items.get_mut(entity) else {
                continue;
            };
            if state.is_pickable() {
                pickable.push((entity, item.location));
            } else {
                set_prompt(entity, &mut item, false, &mut prompt_events);
            }
        }

        let update = projection
            .as_deref()
            .filter(|_| !focus.in_range().is_empty())
            .and_then(|projection| {
                let ray = targeting.crosshair_ray(projection.0.as_ref())?;
                let current = focus
                    .focused()
                    .filter(|focused| pickable.iter().any(|(entity, _)| entity == focused));

                Some(evaluate_focus(
                    ray.origin,
                    ray.direction,
                    &pickable,
                    tuning.focus.visibility_threshold,
                    current,
                ))
            });

        if let Some(update) = update {
            for (entity, visible) in update.prompts {
                if let Ok((mut item, _)) = items.get_mut(entity) {
                    set_prompt(entity, &mut item, visible, &mut prompt_events);
                }
            }
            focus.set_focused(update.focused);
        }

        if focus.focused() != previous {
            focus_events.write(FocusedItemChanged {
                character,
                item: focus.focused(),
            });
        }
    }
}

/// System: select button → focused item летит к камере
pub fn process_select_input(
    mut events: EventReader<SelectInput>,
    characters: Query<(&ItemFocus, Option<&CameraView>, &CharacterTuning)>,
    mut items: Query<&mut ItemState, With<Item>>,
    mut preview_events: EventWriter<ItemPreviewStarted>,
) {
    for input in events.read() {
        if !input.pressed {
            continue;
        }
        let Ok((focus, camera, tuning)) = characters.get(input.entity) else {
            continue;
        };
        let Some(item) = focus.focused() else {
            continue;
        };
        let Ok(mut state) = items.get_mut(item) else {
            continue;
        };
        if !state.is_pickable() {
            continue;
        }

        *state = ItemState::EquipInterping;

        let location = preview_location(
            camera.map(|camera| (camera.position, camera.forward)),
            tuning.focus.preview_distance_out,
            tuning.focus.preview_distance_up,
        );
        preview_events.write(ItemPreviewStarted {
            character: input.entity,
            item,
            preview_location: location,
        });
    }
}

/// System: preview завершена → предмет забирается
///
/// Оружие → swap (drop-then-equip). Остальные типы пока не поддерживаются.
pub fn process_item_preview_finished(
    mut events: EventReader<ItemPreviewFinished>,
    items: Query<(&Item, Has<Weapon>)>,
    mut equip_events: EventWriter<EquipWeaponIntent>,
) {
    for event in events.read() {
        let Ok((item, is_weapon)) = items.get(event.item) else {
            logger::log_error(&format!("ItemPreviewFinished: item {:?} not found", event.item));
            continue;
        };

        if !is_weapon {
            logger::log_warning(&format!(
                "ItemPreviewFinished: '{}' ({:?}) is an unsupported item type",
                item.name, event.item
            ));
            continue;
        }

        equip_events.write(EquipWeaponIntent {
            entity: event.character,
            weapon: Some(event.item),
        });
    }
}
