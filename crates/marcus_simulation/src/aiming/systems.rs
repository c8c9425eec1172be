//! Aiming systems (FixedUpdate, SimulationSet::Aiming)

use bevy::prelude::*;

use super::camera::{AimState, CurrentLookRates};
use super::events::{AimInput, FieldOfViewChanged};
use super::spread::{CrosshairSpread, SpreadInput};
use crate::player::{CharacterKinematics, CharacterTuning};

/// System: aim button → AimState
pub fn process_aim_input(mut events: EventReader<AimInput>, mut aims: Query<&mut AimState>) {
    for input in events.read() {
        let Ok(mut aim) = aims.get_mut(input.entity) else {
            continue;
        };

        aim.set_aiming(input.pressed);
    }
}

/// System: FOV interpolation
///
/// Пишет `FieldOfViewChanged` только когда FOV реально изменился.
pub fn update_camera_zoom(
    time: Res<Time>,
    mut aims: Query<(Entity, &mut AimState)>,
    mut fov_events: EventWriter<FieldOfViewChanged>,
) {
    let delta = time.delta_secs();

    for (entity, mut aim) in aims.iter_mut() {
        if let Some(fov) = aim.tick(delta) {
            fov_events.write(FieldOfViewChanged { entity, fov });
        }
    }
}

/// System: look rates по aim state
pub fn update_look_rates(mut query: Query<(&AimState, &CharacterTuning, &mut CurrentLookRates)>) {
    for (aim, tuning, mut rates) in query.iter_mut() {
        let selected = CurrentLookRates::select(&tuning.look_rates, aim.is_aiming);
        // set_if_neq: не триггерим Changed<CurrentLookRates> каждый тик
        rates.set_if_neq(selected);
    }
}

/// System: crosshair spread
pub fn update_crosshair_spread(
    time: Res<Time>,
    mut query: Query<(&mut CrosshairSpread, &CharacterKinematics, &AimState, &CharacterTuning)>,
) {
    let delta = time.delta_secs();

    for (mut spread, kinematics, aim, tuning) in query.iter_mut() {
        let input = SpreadInput {
            velocity: kinematics.velocity,
            is_airborne: kinematics.is_airborne,
            is_aiming: aim.is_aiming,
            is_firing: spread.is_firing_bullet,
        };
        spread.tick(delta, input, &tuning.spread);
    }
}
