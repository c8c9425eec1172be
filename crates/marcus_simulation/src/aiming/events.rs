//! Aiming events
//!
//! - `AimInput` (Host → ECS): aim button pressed / released
//! - `FieldOfViewChanged` (ECS → Host): применить FOV к follow camera

use bevy::prelude::*;

/// Event: aim button (Host input → ECS)
#[derive(Event, Debug, Clone, Copy)]
pub struct AimInput {
    pub entity: Entity,
    pub pressed: bool,
}

/// Event: новый FOV камеры (ECS → Host)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FieldOfViewChanged {
    pub entity: Entity,
    pub fov: f32,
}
