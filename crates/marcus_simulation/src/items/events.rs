//! Item events
//!
//! Host → ECS: overlap (`ItemEnteredRange` / `ItemLeftRange`), `SelectInput`,
//! `ItemPreviewFinished` (предмет долетел до камеры), `ItemLanded`
//! ECS → Host: `PickupPromptVisibility`, `FocusedItemChanged`, `ItemPreviewStarted`

use bevy::prelude::*;

/// Item sphere overlap begin
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemEnteredRange {
    pub character: Entity,
    pub item: Entity,
}

/// Item sphere overlap end
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemLeftRange {
    pub character: Entity,
    pub item: Entity,
}

/// Select button pressed / released
#[derive(Event, Debug, Clone, Copy)]
pub struct SelectInput {
    pub entity: Entity,
    pub pressed: bool,
}

/// Показать / скрыть pickup widget предмета
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PickupPromptVisibility {
    pub item: Entity,
    pub visible: bool,
}

/// Фокус персонажа сменился (None — ни на чём)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FocusedItemChanged {
    pub character: Entity,
    pub item: Option<Entity>,
}

/// Предмет начал лететь к камере
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ItemPreviewStarted {
    pub character: Entity,
    pub item: Entity,
    pub preview_location: Vec3,
}

/// Host: preview interpolation завершена, предмет можно забрать
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemPreviewFinished {
    pub character: Entity,
    pub item: Entity,
}

/// Host: выброшенный предмет упал и лежит (Falling → Pickup)
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemLanded {
    pub item: Entity,
}
