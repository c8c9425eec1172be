//! Item components — world item, lifecycle state, focus bookkeeping

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle предмета в мире
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum ItemState {
    /// Лежит в мире, можно подобрать
    #[default]
    Pickup,
    /// Летит к камере (item preview), host ведёт interpolation
    EquipInterping,
    /// Подобран, не в руках
    PickedUp,
    /// В руках персонажа
    Equipped,
    /// Выброшен, падает (physics на стороне host)
    Falling,
}

impl ItemState {
    /// Можно ли подобрать (фокус / pickup prompt)
    pub fn is_pickable(&self) -> bool {
        matches!(self, ItemState::Pickup)
    }
}

/// Предмет в мире
///
/// `location` синхронизирует host (world position меша).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(ItemState)]
pub struct Item {
    pub name: String,
    pub location: Vec3,
    /// Pickup prompt widget показан
    pub prompt_visible: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, location: Vec3) -> Self {
        Self {
            name: name.into(),
            location,
            prompt_visible: false,
        }
    }
}

/// Item focus tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusTuning {
    /// Минимальный dot(look, to_item) для фокуса
    pub visibility_threshold: f32,
    /// Item preview: дистанция от камеры вперёд
    pub preview_distance_out: f32,
    /// Item preview: подъём над камерой (world up)
    pub preview_distance_up: f32,
}

impl Default for FocusTuning {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.97,
            preview_distance_out: 250.0,
            preview_distance_up: 65.0,
        }
    }
}

/// Предметы в радиусе подбора + текущий фокус
///
/// Инвариант: `focused` либо None, либо член `in_range`.
/// Entity generational — despawned предмет не совпадёт с новым, живость
/// проверяется через query при каждом обращении (`retain_alive`).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ItemFocus {
    in_range: Vec<Entity>,
    focused: Option<Entity>,
}

impl ItemFocus {
    pub fn in_range(&self) -> &[Entity] {
        &self.in_range
    }

    pub fn focused(&self) -> Option<Entity> {
        self.focused
    }

    pub fn contains(&self, item: Entity) -> bool {
        self.in_range.contains(&item)
    }

    /// Item entered range. Повторный вход — no-op (false).
    pub fn add_in_range(&mut self, item: Entity) -> bool {
        if self.contains(item) {
            return false;
        }
        self.in_range.push(item);
        true
    }

    /// Item left range. Снимает фокус если он был на этом предмете.
    ///
    /// Возвращает true если предмет был в range.
    pub fn remove_from_range(&mut self, item: Entity) -> bool {
        let before = self.in_range.len();
        self.in_range.retain(|entity| *entity != item);

        if self.focused == Some(item) {
            self.focused = None;
        }

        before != self.in_range.len()
    }

    /// Убрать предметы, которые больше не существуют / не pickable
    ///
    /// Возвращает удалённые.
    pub fn retain_alive(&mut self, mut is_alive: impl FnMut(Entity) -> bool) -> Vec<Entity> {
        let mut removed = Vec::new();
        self.in_range.retain(|entity| {
            let alive = is_alive(*entity);
            if !alive {
                removed.push(*entity);
            }
            alive
        });

        if let Some(focused) = self.focused {
            if !self.in_range.contains(&focused) {
                self.focused = None;
            }
        }

        removed
    }

    /// Применить результат evaluate_focus
    ///
    /// Фокус вне range игнорируется (инвариант сильнее результата).
    pub fn set_focused(&mut self, focused: Option<Entity>) {
        self.focused = focused.filter(|item| self.in_range.contains(item));
    }
}
