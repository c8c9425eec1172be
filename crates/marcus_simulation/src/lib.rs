//! Marcus Simulation Core
//!
//! ECS-симуляция third-person shooter на Bevy 0.16 (strategic layer):
//! прицеливание, crosshair spread, hit-scan оружие, подбор предметов, враги.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (game state, combat rules, таймеры)
//! - Host engine = tactical layer (physics world, rendering, анимация, звук, UI)
//!
//! Host → ECS: intent events + синхронизируемые компоненты
//! (`CharacterKinematics`, `CameraView`, `BarrelSocket`, `Item::location`).
//! ECS → Host: presentation events (`ShotFired`, `FieldOfViewChanged`, ...).
//! Raycast и deprojection — через ports (`WorldRaycast`, `ScreenProjection`).
//!
//! Система координат host engine: Z-up.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod aiming;
pub mod combat;
pub mod enemy;
pub mod equipment;
pub mod items;
pub mod logger;
pub mod player;
pub mod ports;
pub mod timers;

// Re-export основных типов для удобства
pub use aiming::{AimInput, AimState, AimingPlugin, CrosshairSpread, CrosshairTargeting, CurrentLookRates, FieldOfViewChanged};
pub use combat::{AmmoMap, AmmoType, BarrelSocket, BulletHit, CombatPlugin, FireInput, FireMode, ShotFired, Weapon, WeaponSlot, WeaponTuning};
pub use enemy::{spawn_enemy, Dead, Enemy, EnemyDied, EnemyHealth, EnemyPlugin, EnemyTuning};
pub use equipment::{spawn_weapon, EquipWeaponIntent, EquipmentPlugin, ReloadIntent, WeaponDropped, WeaponEquipped};
pub use items::{Item, ItemFocus, ItemState, ItemsPlugin};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use player::{spawn_player, CameraView, CharacterKinematics, CharacterTuning, Player};
pub use ports::{ScreenProjection, WorldRaycast};
pub use timers::{EnemyTimers, PlayerTimers};

/// Fixed timestep симуляции (60Hz)
pub const FIXED_TIMESTEP_HZ: f64 = 60.0;

/// Фазы simulation tick (FixedUpdate, строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Per-owner таймеры (auto-fire, recoil, cooldowns, health bar)
    Timers,
    /// Aim input, FOV, look rates, crosshair spread
    Aiming,
    /// Items in range + focus
    Focus,
    /// Select / item preview
    Pickup,
    /// Default weapon, equip, reload
    Equipment,
    /// Fire input
    Firing,
    /// Bullet hits, damage, death
    Damage,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Детерминистичный RNG (seed по умолчанию, если host/test не поставил свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Timers,
                    SimulationSet::Aiming,
                    SimulationSet::Focus,
                    SimulationSet::Pickup,
                    SimulationSet::Equipment,
                    SimulationSet::Firing,
                    SimulationSet::Damage,
                )
                    .chain(),
            )
            // Подсистемы (ECS strategic layer)
            .add_plugins((AimingPlugin, CombatPlugin, ItemsPlugin, EquipmentPlugin, EnemyPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` = ровно один FixedUpdate тик.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / FIXED_TIMESTEP_HZ)));

    app
}
