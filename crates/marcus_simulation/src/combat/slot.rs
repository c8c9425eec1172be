//! Weapon slot — equip state machine + fire gating
//!
//! States: Unarmed → Equipped(weapon)
//!
//! - Equip всегда drop-then-equip, двух оружий в руках не бывает
//! - Fire gating через player timers:
//!   - Automatic: выстрел сразу + repeating `AutoFire` (интервал = fire rate).
//!     Каждый tick таймера: кнопка зажата и есть патроны → выстрел,
//!     иначе таймер отменяется (отмена с задержкой в один tick)
//!   - SemiAuto: выстрел только если `FireCooldown` не активен
//! - Смена оружия прерывает огонь: `AutoFire` отменён, кнопку надо нажать заново
//! - Пустой магазин → запрос просто отбрасывается (не ставится в очередь)

use bevy::prelude::*;

use super::weapon::{FireMode, Weapon};
use crate::timers::{PlayerTimer, PlayerTimers};

/// Результат equip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipTransition {
    /// Выброшенное оружие (было в руках)
    pub dropped: Option<Entity>,
    pub equipped: Entity,
}

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct WeaponSlot {
    /// Оружие в руках (None = Unarmed)
    pub equipped: Option<Entity>,
    /// Fire button зажата
    pub fire_button_held: bool,
}

impl WeaponSlot {
    pub fn is_armed(&self) -> bool {
        self.equipped.is_some()
    }

    /// Equip нового оружия (drop-then-equip)
    ///
    /// None или то же самое оружие → no-op.
    pub fn equip(&mut self, new_weapon: Option<Entity>) -> Option<EquipTransition> {
        let new_weapon = new_weapon?;
        if self.equipped == Some(new_weapon) {
            return None;
        }

        let dropped = self.drop_weapon();
        self.equipped = Some(new_weapon);

        Some(EquipTransition {
            dropped,
            equipped: new_weapon,
        })
    }

    /// Выбросить текущее оружие (→ Unarmed)
    pub fn drop_weapon(&mut self) -> Option<Entity> {
        self.equipped.take()
    }

    /// Fire button pressed
    ///
    /// Возвращает true если выстрел разрешён (патрон уже списан).
    pub fn press_fire(&mut self, weapon: Option<&mut Weapon>, timers: &mut PlayerTimers) -> bool {
        self.fire_button_held = true;

        let Some(weapon) = weapon else {
            return false;
        };
        if !weapon.has_ammo() {
            return false;
        }

        let interval = weapon.tuning.fire_interval;
        match weapon.tuning.fire_mode {
            FireMode::SemiAuto => {
                if timers.is_active(PlayerTimer::FireCooldown) {
                    return false;
                }
                weapon.consume_ammo();
                timers.start(PlayerTimer::FireCooldown, interval, false);
            }
            FireMode::Automatic => {
                weapon.consume_ammo();
                timers.start(PlayerTimer::AutoFire, interval, true);
            }
        }

        true
    }

    /// Fire button released — только снимает флаг, таймер решит сам
    pub fn release_fire(&mut self) {
        self.fire_button_held = false;
    }

    /// Прервать огонь (equip / drop)
    pub fn interrupt_fire(&mut self, timers: &mut PlayerTimers) {
        self.fire_button_held = false;
        timers.cancel(PlayerTimer::AutoFire);
    }

    /// Tick repeating `AutoFire` таймера
    ///
    /// true — очередной выстрел (патрон списан). false — таймер отменён.
    pub fn auto_fire_tick(&mut self, weapon: Option<&mut Weapon>, timers: &mut PlayerTimers) -> bool {
        let weapon =
            weapon.filter(|weapon| weapon.tuning.fire_mode == FireMode::Automatic && weapon.has_ammo());

        match weapon {
            Some(weapon) if self.fire_button_held => weapon.consume_ammo(),
            _ => {
                timers.cancel(PlayerTimer::AutoFire);
                false
            }
        }
    }

    pub fn fire_cooldown_active(&self, timers: &PlayerTimers) -> bool {
        timers.is_active(PlayerTimer::FireCooldown)
    }

    pub fn auto_fire_timer_active(&self, timers: &PlayerTimers) -> bool {
        timers.is_active(PlayerTimer::AutoFire)
    }
}
