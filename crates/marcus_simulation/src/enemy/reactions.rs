//! Enemy reactions — hit react cooldown, health bar, hit numbers

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::HitReactionRequested;
use crate::timers::{EnemyTimer, EnemyTimers};

/// Montage section реакции на попадание спереди
pub const HIT_REACT_FRONT: &str = "HitReact_Front";

/// Сколько ждать перед следующей hit reaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitReactInterval {
    Fixed(f32),
    /// Случайно в [min, max] (seeded DeterministicRng)
    Range { min: f32, max: f32 },
}

impl HitReactInterval {
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        match *self {
            HitReactInterval::Fixed(interval) => interval.max(0.0),
            HitReactInterval::Range { min, max } => {
                let (low, high) = if min <= max { (min, max) } else { (max, min) };
                if high - low <= f32::EPSILON {
                    return low.max(0.0);
                }
                rng.gen_range(low..=high).max(0.0)
            }
        }
    }
}

/// Enemy tuning (designer data)
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub max_health: f32,
    /// Сколько секунд health bar виден после последнего попадания
    pub health_bar_display_time: f32,
    pub hit_react_interval: HitReactInterval,
    pub hit_number_lifetime: f32,
    /// Кость, попадание в которую считается headshot
    pub head_bone: String,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            health_bar_display_time: 4.0,
            hit_react_interval: HitReactInterval::Range { min: 0.25, max: 2.0 },
            hit_number_lifetime: 1.5,
            head_bone: "head".into(),
        }
    }
}

/// Запросить hit reaction (montage `section`)
///
/// Cooldown активен → None (анимация не перезапускается).
/// Иначе стартует one-shot `HitReactCooldown` и возвращает event для host.
pub fn request_hit_reaction(
    enemy: Entity,
    section: &'static str,
    timers: &mut EnemyTimers,
    interval: &HitReactInterval,
    rng: &mut impl Rng,
) -> Option<HitReactionRequested> {
    if timers.is_active(EnemyTimer::HitReactCooldown) {
        return None;
    }

    timers.start(EnemyTimer::HitReactCooldown, interval.sample(rng), false);
    Some(HitReactionRequested {
        enemy,
        section,
        play_rate: 1.0,
    })
}

/// Показать health bar и перезапустить hide countdown (не накапливается)
pub fn restart_health_bar(timers: &mut EnemyTimers, display_time: f32) {
    timers.start(EnemyTimer::HealthBar, display_time, false);
}

/// Hit number над точкой попадания
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitNumber {
    pub id: u64,
    pub damage: f32,
    pub location: Vec3,
    pub headshot: bool,
    pub remaining: f32,
}

/// Активные hit numbers врага
#[derive(Component, Debug, Clone, Default)]
pub struct HitNumbers {
    next_id: u64,
    active: Vec<HitNumber>,
}

impl HitNumbers {
    pub fn active(&self) -> &[HitNumber] {
        &self.active
    }

    /// Сохранить новый hit number (id уникален в пределах врага)
    pub fn store(&mut self, damage: f32, location: Vec3, headshot: bool, lifetime: f32) -> HitNumber {
        let number = HitNumber {
            id: self.next_id,
            damage,
            location,
            headshot,
            remaining: lifetime.max(0.0),
        };
        self.next_id += 1;
        self.active.push(number);
        number
    }

    /// Продвинуть lifetime. Возвращает истёкшие (уже удалены).
    pub fn advance(&mut self, delta: f32) -> Vec<HitNumber> {
        let mut expired = Vec::new();
        self.active.retain_mut(|number| {
            number.remaining -= delta.max(0.0);
            if number.remaining <= 0.0 {
                expired.push(*number);
                false
            } else {
                true
            }
        });
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_hit_reaction_gated_by_cooldown() {
        let enemy = Entity::from_raw(3);
        let mut timers = EnemyTimers::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let interval = HitReactInterval::Fixed(1.0);
        let mut request = |timers: &mut EnemyTimers| {
            request_hit_reaction(enemy, HIT_REACT_FRONT, timers, &interval, &mut rng).is_some()
        };

        assert!(request(&mut timers));
        assert!(!request(&mut timers));

        timers.advance(0.5);
        assert!(!request(&mut timers));

        timers.advance(0.5);
        assert!(request(&mut timers));
    }

    #[test]
    fn test_hit_reaction_carries_requested_section() {
        let enemy = Entity::from_raw(5);
        let mut timers = EnemyTimers::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let reaction = request_hit_reaction(enemy, "HitReact_Back", &mut timers, &HitReactInterval::Fixed(0.5), &mut rng);
        assert_eq!(
            reaction,
            Some(HitReactionRequested {
                enemy,
                section: "HitReact_Back",
                play_rate: 1.0,
            })
        );
    }

    #[test]
    fn test_random_interval_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let interval = HitReactInterval::Range { min: 0.25, max: 2.0 };

        for _ in 0..100 {
            let value = interval.sample(&mut rng);
            assert!((0.25..=2.0).contains(&value), "interval = {}", value);
        }
    }

    #[test]
    fn test_random_interval_deterministic() {
        let interval = HitReactInterval::Range { min: 0.25, max: 2.0 };
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(interval.sample(&mut a), interval.sample(&mut b));
        }
    }

    #[test]
    fn test_health_bar_restart_not_cumulative() {
        let mut timers = EnemyTimers::default();
        restart_health_bar(&mut timers, 4.0);
        timers.advance(3.0);
        restart_health_bar(&mut timers, 4.0);

        assert_eq!(timers.remaining(EnemyTimer::HealthBar), Some(4.0));
    }

    #[test]
    fn test_hit_numbers_expire() {
        let mut numbers = HitNumbers::default();
        let first = numbers.store(25.0, Vec3::ZERO, false, 1.5);
        let second = numbers.store(60.0, Vec3::Z, true, 1.5);
        assert_ne!(first.id, second.id);

        assert!(numbers.advance(1.0).is_empty());
        let expired = numbers.advance(0.5);
        assert_eq!(expired.len(), 2);
        assert!(numbers.active().is_empty());
    }
}
