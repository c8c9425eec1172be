//! Aiming domain — камера, crosshair spread, crosshair targeting
//!
//! ECS ответственность:
//! - AimState (zoom FOV), look rates
//! - CrosshairSpread (HUD читает total)
//! - CrosshairTargeting (dual raycast для выстрела и item focus)
//!
//! Host engine ответственность:
//! - Применить FOV к камере (`FieldOfViewChanged`)
//! - Нарисовать crosshair с учётом spread
//! - Raycast / deprojection через ports

use bevy::prelude::*;

pub mod camera;
pub mod events;
pub mod spread;
pub mod systems;
pub mod targeting;

pub use camera::{AimState, CameraTuning, CurrentLookRates, LookRates};
pub use events::{AimInput, FieldOfViewChanged};
pub use spread::{CrosshairSpread, SpreadInput, SpreadTuning};
pub use systems::*;
pub use targeting::{CrosshairTargeting, ImpactPoint, TargetingTuning};

use crate::SimulationSet;

/// Ниже этой дистанции interpolation считается завершённой
pub const INTERP_EPSILON: f32 = 1e-4;

/// Экспоненциальная interpolation к target
///
/// `current + (target - current) × min(1, rate × delta)` — без overshoot.
/// `rate <= 0` → мгновенно target.
pub fn interp_to(current: f32, target: f32, delta: f32, rate: f32) -> f32 {
    if rate <= 0.0 {
        return target;
    }

    let distance = target - current;
    if distance.abs() < INTERP_EPSILON {
        return target;
    }

    let alpha = (rate * delta.max(0.0)).clamp(0.0, 1.0);
    current + distance * alpha
}

/// Aiming plugin
///
/// Порядок (SimulationSet::Aiming):
/// 1. process_aim_input — aim button → AimState
/// 2. update_camera_zoom — FOV interpolation → FieldOfViewChanged
/// 3. update_look_rates — hip / aiming sensitivity
/// 4. update_crosshair_spread — spread factors
pub struct AimingPlugin;

impl Plugin for AimingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AimInput>()
            .add_event::<FieldOfViewChanged>();

        app.add_systems(
            FixedUpdate,
            (
                process_aim_input,
                update_camera_zoom,
                update_look_rates,
                update_crosshair_spread,
            )
                .chain()
                .in_set(SimulationSet::Aiming),
        );
    }
}
