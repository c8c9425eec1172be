//! Per-owner timer scheduler
//!
//! Замена глобального engine timer manager: каждый актор держит свой
//! `TimerScheduler<P>` компонент, где `P` — enum назначений (purpose).
//!
//! Правила:
//! - Максимум один pending timer на purpose
//! - `start` под тем же purpose заменяет предыдущий (implicit cancel)
//! - Сработавшие purposes возвращаются в порядке объявления enum
//!   (стабильно от запуска к запуску)
//! - `advance` вызывается из того же FixedUpdate тика, что и остальная симуляция
//! - Callback не хранится: `advance` возвращает сработавшие purposes,
//!   владелец (система) сам решает что делать

use bevy::prelude::*;
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::FIXED_TIMESTEP_HZ;

/// Погрешность сравнения remaining ≤ 0 (накопление f32 при 60Hz тиках)
const TIMER_EPSILON: f32 = 1e-4;

/// Минимальный интервал repeating timer: один simulation tick
pub const MIN_REPEAT_INTERVAL: f32 = (1.0 / FIXED_TIMESTEP_HZ) as f32;

/// Назначение таймера (ключ в scheduler)
pub trait TimerPurpose: Copy + Ord + Debug + Send + Sync + 'static {}

/// Таймеры игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayerTimer {
    /// Повторяющийся auto-fire (интервал = fire rate оружия)
    AutoFire,
    /// One-shot gate для semi-auto оружия
    FireCooldown,
    /// Окно recoil (crosshair shooting factor)
    ShotRecoil,
}

impl TimerPurpose for PlayerTimer {}

/// Таймеры врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnemyTimer {
    /// Пока активен — hit reaction не проигрывается повторно
    HitReactCooldown,
    /// Скрыть health bar по истечении
    HealthBar,
}

impl TimerPurpose for EnemyTimer {}

/// Pending timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTimer {
    /// Время до срабатывания (секунды)
    pub remaining: f32,
    /// Some(interval) для повторяющихся таймеров
    pub interval: Option<f32>,
}

#[derive(Component, Debug, Clone)]
pub struct TimerScheduler<P: TimerPurpose> {
    pending: BTreeMap<P, PendingTimer>,
}

pub type PlayerTimers = TimerScheduler<PlayerTimer>;
pub type EnemyTimers = TimerScheduler<EnemyTimer>;

impl<P: TimerPurpose> Default for TimerScheduler<P> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }
}

impl<P: TimerPurpose> TimerScheduler<P> {
    /// Запустить (или перезапустить) таймер
    ///
    /// Repeating timer с нулевым интервалом превращается в one-shot,
    /// положительный интервал не меньше `MIN_REPEAT_INTERVAL`.
    pub fn start(&mut self, purpose: P, delay: f32, repeating: bool) {
        let delay = delay.max(0.0);
        let interval = (repeating && delay > 0.0).then(|| delay.max(MIN_REPEAT_INTERVAL));
        self.pending.insert(
            purpose,
            PendingTimer {
                remaining: delay,
                interval,
            },
        );
    }

    /// Отменить таймер. Возвращает true если он был активен.
    pub fn cancel(&mut self, purpose: P) -> bool {
        self.pending.remove(&purpose).is_some()
    }

    pub fn is_active(&self, purpose: P) -> bool {
        self.pending.contains_key(&purpose)
    }

    pub fn remaining(&self, purpose: P) -> Option<f32> {
        self.pending.get(&purpose).map(|timer| timer.remaining)
    }

    /// Продвинуть все таймеры на `delta` секунд
    ///
    /// Возвращает сработавшие purposes (repeating timer может сработать
    /// несколько раз за длинный тик). One-shot таймеры удаляются.
    pub fn advance(&mut self, delta: f32) -> Vec<P> {
        let mut fired = Vec::new();
        let mut expired = Vec::new();

        for (purpose, timer) in self.pending.iter_mut() {
            timer.remaining -= delta.max(0.0);

            while timer.remaining <= TIMER_EPSILON {
                fired.push(*purpose);

                match timer.interval {
                    Some(interval) => timer.remaining += interval,
                    None => {
                        expired.push(*purpose);
                        break;
                    }
                }
            }
        }

        for purpose in expired {
            self.pending.remove(&purpose);
        }

        fired
    }
}
