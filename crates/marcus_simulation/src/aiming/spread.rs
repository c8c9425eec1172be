//! Crosshair spread — динамический разброс прицела
//!
//! total = baseline + velocity + in_air + aim + shooting
//!
//! - velocity: линейно от горизонтальной скорости (без interpolation)
//! - in_air: медленно расходится в прыжке, быстро сходится на земле
//! - aim: быстро сужается при прицеливании
//! - shooting: короткий толчок после каждого выстрела (recoil window)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::interp_to;

/// Spread tuning (baseline, targets, interpolation rates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadTuning {
    pub baseline: f32,
    /// Максимальная скорость ходьбы (velocity factor = speed / max)
    pub max_walk_speed: f32,

    pub in_air_target: f32,
    pub in_air_spread_rate: f32,
    pub landed_recover_rate: f32,

    pub aim_target: f32,
    pub aim_rate: f32,

    pub shooting_target: f32,
    pub shooting_rate: f32,

    /// Длительность recoil window после выстрела (секунды)
    pub shot_recoil_duration: f32,
}

impl Default for SpreadTuning {
    fn default() -> Self {
        Self {
            baseline: 0.5,
            max_walk_speed: 600.0,
            in_air_target: 2.25,
            in_air_spread_rate: 2.25,
            landed_recover_rate: 30.0,
            aim_target: -0.6,
            aim_rate: 30.0,
            shooting_target: 0.3,
            shooting_rate: 60.0,
            shot_recoil_duration: 0.05,
        }
    }
}

/// Входные данные одного тика (от kinematics + aim + recoil window)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadInput {
    pub velocity: Vec3,
    pub is_airborne: bool,
    pub is_aiming: bool,
    pub is_firing: bool,
}

/// Crosshair spread state
///
/// Sub-factors (кроме velocity) переносятся между тиками через interpolation.
/// Нижняя граница total = baseline + aim_target (−0.1 по умолчанию).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CrosshairSpread {
    pub velocity_factor: f32,
    pub in_air_factor: f32,
    pub aim_factor: f32,
    pub shooting_factor: f32,
    pub total: f32,

    /// Recoil window активно (ставится выстрелом, снимается `ShotRecoil` таймером)
    pub is_firing_bullet: bool,
}

impl Default for CrosshairSpread {
    fn default() -> Self {
        Self {
            velocity_factor: 0.0,
            in_air_factor: 0.0,
            aim_factor: 0.0,
            shooting_factor: 0.0,
            total: SpreadTuning::default().baseline,
            is_firing_bullet: false,
        }
    }
}

impl CrosshairSpread {
    /// Пересчитать spread. Возвращает total.
    pub fn tick(&mut self, delta: f32, input: SpreadInput, tuning: &SpreadTuning) -> f32 {
        // Только ходьба: вертикальную скорость обнуляем
        let horizontal_speed = Vec3::new(input.velocity.x, input.velocity.y, 0.0).length();
        self.velocity_factor = if tuning.max_walk_speed > 0.0 {
            (horizontal_speed / tuning.max_walk_speed).clamp(0.0, 1.0)
        } else {
            0.0
        };

        self.in_air_factor = if input.is_airborne {
            interp_to(self.in_air_factor, tuning.in_air_target, delta, tuning.in_air_spread_rate)
        } else {
            interp_to(self.in_air_factor, 0.0, delta, tuning.landed_recover_rate)
        };

        let aim_target = if input.is_aiming { tuning.aim_target } else { 0.0 };
        self.aim_factor = interp_to(self.aim_factor, aim_target, delta, tuning.aim_rate);

        let shooting_target = if input.is_firing { tuning.shooting_target } else { 0.0 };
        self.shooting_factor = interp_to(self.shooting_factor, shooting_target, delta, tuning.shooting_rate);

        self.total = tuning.baseline
            + self.velocity_factor
            + self.in_air_factor
            + self.aim_factor
            + self.shooting_factor;

        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> SpreadInput {
        SpreadInput {
            velocity: Vec3::ZERO,
            is_airborne: false,
            is_aiming: false,
            is_firing: false,
        }
    }

    #[test]
    fn test_idle_converges_to_baseline() {
        let tuning = SpreadTuning::default();
        let mut spread = CrosshairSpread {
            in_air_factor: 2.0,
            aim_factor: -0.5,
            shooting_factor: 0.3,
            ..Default::default()
        };

        for _ in 0..600 {
            spread.tick(DT, idle(), &tuning);
        }

        assert_eq!(spread.total, 0.5);
    }

    #[test]
    fn test_velocity_ignores_vertical_component() {
        let tuning = SpreadTuning::default();
        let mut spread = CrosshairSpread::default();

        let input = SpreadInput {
            velocity: Vec3::new(300.0, 0.0, -900.0),
            ..idle()
        };
        spread.tick(DT, input, &tuning);

        assert!((spread.velocity_factor - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_factor_clamped() {
        let tuning = SpreadTuning::default();
        let mut spread = CrosshairSpread::default();

        let input = SpreadInput {
            velocity: Vec3::new(1200.0, 0.0, 0.0),
            ..idle()
        };
        spread.tick(DT, input, &tuning);

        assert_eq!(spread.velocity_factor, 1.0);
    }

    #[test]
    fn test_airborne_spreads_slowly_and_recovers_fast() {
        let tuning = SpreadTuning::default();
        let mut spread = CrosshairSpread::default();
        let airborne = SpreadInput {
            is_airborne: true,
            ..idle()
        };

        spread.tick(DT, airborne, &tuning);
        let after_one_tick = spread.in_air_factor;
        // 2.25 × (2.25/60) ≈ 0.084
        assert!(after_one_tick > 0.0 && after_one_tick < 0.1);

        for _ in 0..60 {
            spread.tick(DT, airborne, &tuning);
        }
        let peak = spread.in_air_factor;
        assert!(peak > 1.0 && peak < 2.25);

        // Приземлились: rate 30 → за 10 тиков почти 0
        for _ in 0..10 {
            spread.tick(DT, idle(), &tuning);
        }
        assert!(spread.in_air_factor < peak * 0.02);
    }

    #[test]
    fn test_aim_lower_bound() {
        let tuning = SpreadTuning::default();
        let mut spread = CrosshairSpread::default();
        let aiming = SpreadInput {
            is_aiming: true,
            ..idle()
        };

        for _ in 0..600 {
            let total = spread.tick(DT, aiming, &tuning);
            assert!(total >= tuning.baseline + tuning.aim_target - 1e-6);
        }

        assert!((spread.total - (-0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_shooting_factor_rises_while_firing() {
        let tuning = SpreadTuning::default();
        let mut spread = CrosshairSpread::default();
        let firing = SpreadInput {
            is_firing: true,
            ..idle()
        };

        for _ in 0..3 {
            spread.tick(DT, firing, &tuning);
        }

        // rate 60 × 1/60 = 1 → target сразу
        assert_eq!(spread.shooting_factor, 0.3);
        assert!((spread.total - 0.8).abs() < 1e-6);
    }
}
