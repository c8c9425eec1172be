//! Item focus evaluation (pure logic)
//!
//! Направление к предмету считается от crosshair origin, не от тела
//! персонажа: камера и тело смещены.

use bevy::prelude::*;

/// Результат evaluation для одного тика
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusUpdate {
    /// Видимость pickup prompt для каждого предмета (в порядке обхода)
    pub prompts: Vec<(Entity, bool)>,
    /// Новый фокус
    pub focused: Option<Entity>,
}

/// Проходит предметы в range, решает какой в фокусе
///
/// - dot(look, to_item) ≥ threshold → prompt виден, предмет становится фокусом
///   (побеждает последний подходящий, без tie-break по дистанции)
/// - ниже threshold → prompt скрыт; если это был текущий фокус — фокус снят
/// - нулевые векторы никогда не проходят
pub fn evaluate_focus(
    origin: Vec3,
    look_direction: Vec3,
    candidates: &[(Entity, Vec3)],
    threshold: f32,
    current: Option<Entity>,
) -> FocusUpdate {
    let look = look_direction.normalize_or_zero();
    let mut focused = current;
    let mut prompts = Vec::with_capacity(candidates.len());

    for &(item, location) in candidates {
        let to_item = (location - origin).normalize_or_zero();
        let visible = look != Vec3::ZERO && to_item != Vec3::ZERO && look.dot(to_item) >= threshold;

        if visible {
            focused = Some(item);
        } else if focused == Some(item) {
            focused = None;
        }

        prompts.push((item, visible));
    }

    FocusUpdate { prompts, focused }
}

/// Куда host ведёт предмет при подборе: перед камерой и чуть выше
///
/// Без камеры → ноль.
pub fn preview_location(camera: Option<(Vec3, Vec3)>, distance_out: f32, distance_up: f32) -> Vec3 {
    let Some((position, forward)) = camera else {
        return Vec3::ZERO;
    };

    position + forward * distance_out + Vec3::Z * distance_up
}
