//! Crosshair targeting — dual raycast impact point
//!
//! Камера и ствол смещены друг относительно друга, поэтому:
//! 1. Trace из crosshair (камера) → что видит игрок
//! 2. Trace из barrel к этой точке (+25%) → что реально может поразить оружие
//!
//! Результат никогда не "падает": без hit возвращается точка на max range.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ports::{CollisionChannel, RaycastHit, RaycastPort, ScreenProjectionPort, WorldRay};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetingTuning {
    /// Вертикальный сдвиг crosshair от центра экрана (пиксели, совпадает с HUD)
    pub hud_offset_y: f32,
    /// Дальность crosshair trace
    pub max_trace_range: f32,
    /// Во сколько раз продлеваем barrel trace за candidate point
    pub barrel_trace_extension: f32,
}

impl Default for TargetingTuning {
    fn default() -> Self {
        Self {
            hud_offset_y: 50.0,
            max_trace_range: 50_000.0,
            barrel_trace_extension: 1.25,
        }
    }
}

/// Результат targeting
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactPoint {
    /// Итоговая точка попадания
    pub point: Vec3,
    /// Blocking hit, который дал эту точку (None — max range / fallback)
    pub hit: Option<RaycastHit>,
}

/// Crosshair targeting state
///
/// Хранит последний валидный crosshair ray: если deprojection на этом тике
/// не удалась, используем его направление.
#[derive(Component, Debug, Clone, Default)]
pub struct CrosshairTargeting {
    pub tuning: TargetingTuning,
    pub last_ray: Option<WorldRay>,
}

impl CrosshairTargeting {
    pub fn new(tuning: TargetingTuning) -> Self {
        Self {
            tuning,
            last_ray: None,
        }
    }

    /// Screen-space позиция crosshair
    pub fn crosshair_screen_point(&self, viewport: Vec2) -> Vec2 {
        Vec2::new(viewport.x / 2.0, viewport.y / 2.0 - self.tuning.hud_offset_y)
    }

    /// Crosshair ray в world space (None — viewport/deprojection недоступны)
    ///
    /// Валидный ray запоминается в `last_ray`. Нулевое направление не валидно.
    pub fn crosshair_ray(&mut self, projection: &dyn ScreenProjectionPort) -> Option<WorldRay> {
        let viewport = projection.viewport_size()?;
        let ray = projection.deproject(self.crosshair_screen_point(viewport))?;

        if ray.direction.normalize_or_zero() == Vec3::ZERO {
            return None;
        }

        self.last_ray = Some(ray);
        Some(ray)
    }

    /// Fallback: max range вдоль последнего валидного ray, иначе ноль
    pub fn fallback_point(&self) -> Vec3 {
        self.last_ray
            .map(|ray| ray.point_at(self.tuning.max_trace_range))
            .unwrap_or(Vec3::ZERO)
    }

    /// Итоговая точка попадания пули из `barrel_origin`
    pub fn compute_impact_point(
        &mut self,
        barrel_origin: Vec3,
        projection: &dyn ScreenProjectionPort,
        raycast: &dyn RaycastPort,
    ) -> ImpactPoint {
        let Some(ray) = self.crosshair_ray(projection) else {
            return ImpactPoint {
                point: self.fallback_point(),
                hit: None,
            };
        };

        // 1. Crosshair trace
        let far_end = ray.point_at(self.tuning.max_trace_range);
        let crosshair_hit = raycast.raycast(ray.origin, far_end, CollisionChannel::Visibility);
        let candidate = crosshair_hit.as_ref().map(|hit| hit.point).unwrap_or(far_end);

        // 2. Barrel trace к candidate, продлённый на 25%
        let barrel_end = barrel_origin + (candidate - barrel_origin) * self.tuning.barrel_trace_extension;
        match raycast.raycast(barrel_origin, barrel_end, CollisionChannel::Visibility) {
            Some(hit) => ImpactPoint {
                point: hit.point,
                hit: Some(hit),
            },
            None => ImpactPoint {
                point: candidate,
                hit: crosshair_hit,
            },
        }
    }
}
