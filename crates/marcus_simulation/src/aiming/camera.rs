//! Aim camera — FOV zoom + look rates
//!
//! Aim button переключает target FOV (zoomed / default). Каждый тик
//! current FOV экспоненциально приближается к target, host получает
//! `FieldOfViewChanged` и применяет значение к follow camera.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{interp_to, INTERP_EPSILON};

/// Camera tuning (designer data)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTuning {
    /// FOV без прицеливания (host может перезаписать значением камеры при spawn)
    pub default_fov: f32,
    /// FOV при прицеливании
    pub zoomed_fov: f32,
    /// Скорость interpolation (1/сек)
    pub zoom_speed: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            default_fov: 90.0,
            zoomed_fov: 35.0,
            zoom_speed: 20.0,
        }
    }
}

/// Состояние прицеливания и текущий FOV
///
/// Инвариант: `current_fov` монотонно приближается к активному target
/// (zoomed если aiming, иначе default). Прыжков нет, кроме инициализации.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AimState {
    pub is_aiming: bool,
    pub default_fov: f32,
    pub zoomed_fov: f32,
    pub current_fov: f32,
    pub zoom_speed: f32,
}

impl Default for AimState {
    fn default() -> Self {
        Self::new(CameraTuning::default())
    }
}

impl AimState {
    pub fn new(tuning: CameraTuning) -> Self {
        Self {
            is_aiming: false,
            default_fov: tuning.default_fov,
            zoomed_fov: tuning.zoomed_fov,
            current_fov: tuning.default_fov,
            zoom_speed: tuning.zoom_speed,
        }
    }

    pub fn target_fov(&self) -> f32 {
        if self.is_aiming {
            self.zoomed_fov
        } else {
            self.default_fov
        }
    }

    pub fn set_aiming(&mut self, aiming: bool) {
        self.is_aiming = aiming;
    }

    /// Продвинуть FOV к target
    ///
    /// Возвращает новый FOV если значение изменилось. Уже на месте → None
    /// (не дёргаем камеру каждый кадр).
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        let target = self.target_fov();
        if (self.current_fov - target).abs() < INTERP_EPSILON {
            return None;
        }

        let next = interp_to(self.current_fov, target, delta, self.zoom_speed);
        if next == self.current_fov {
            return None;
        }

        self.current_fov = next;
        Some(next)
    }
}

/// Чувствительность поворота (градусы/сек для gamepad, множитель для мыши)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookRates {
    pub gamepad_turn_rate: f32,
    pub gamepad_look_up_rate: f32,
    pub gamepad_aiming_turn_rate: f32,
    pub gamepad_aiming_look_up_rate: f32,
    pub mouse_turn_rate: f32,
    pub mouse_look_up_rate: f32,
    pub mouse_aiming_turn_rate: f32,
    pub mouse_aiming_look_up_rate: f32,
}

impl Default for LookRates {
    fn default() -> Self {
        Self {
            gamepad_turn_rate: 90.0,
            gamepad_look_up_rate: 90.0,
            gamepad_aiming_turn_rate: 20.0,
            gamepad_aiming_look_up_rate: 20.0,
            mouse_turn_rate: 1.0,
            mouse_look_up_rate: 1.0,
            mouse_aiming_turn_rate: 0.2,
            mouse_aiming_look_up_rate: 0.2,
        }
    }
}

/// Активные look rates (host читает при обработке look input)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CurrentLookRates {
    pub gamepad_turn: f32,
    pub gamepad_look_up: f32,
    pub mouse_turn: f32,
    pub mouse_look_up: f32,
}

impl Default for CurrentLookRates {
    fn default() -> Self {
        Self::select(&LookRates::default(), false)
    }
}

impl CurrentLookRates {
    pub fn select(rates: &LookRates, is_aiming: bool) -> Self {
        if is_aiming {
            Self {
                gamepad_turn: rates.gamepad_aiming_turn_rate,
                gamepad_look_up: rates.gamepad_aiming_look_up_rate,
                mouse_turn: rates.mouse_aiming_turn_rate,
                mouse_look_up: rates.mouse_aiming_look_up_rate,
            }
        } else {
            Self {
                gamepad_turn: rates.gamepad_turn_rate,
                gamepad_look_up: rates.gamepad_look_up_rate,
                mouse_turn: rates.mouse_turn_rate,
                mouse_look_up: rates.mouse_look_up_rate,
            }
        }
    }
}
