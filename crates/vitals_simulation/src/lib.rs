//! VITALS Simulation Core
//!
//! ECS-симуляция выживания на Bevy 0.16: hunger (пять nutrient категорий),
//! stamina (exhaustion, coyote-time, idle recovery), nutrition bonus.
//!
//! Host (Godot layer / headless) пишет BodyState/Controls/Surroundings и
//! шлёт events (FoodEaten, Revived, HeldInteraction); симуляция публикует
//! stat слои (hungerrate, staminaAmount, walkspeed, ...) и max health.

use bevy::prelude::*;
use bevy::time::common_conditions::on_timer;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod components;
pub mod config;
pub mod error;
pub mod hunger;
pub mod logger;
pub mod nutrition;
pub mod persistence;
pub mod spawn;
pub mod stamina;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{Calendar, HungerConfig, NutrientWeights, NutritionConfig, RegenWeightSource, StaminaConfig, VitalsProfile, WorldRules};
pub use error::VitalsError;
pub use hunger::{FoodEaten, HungerPlugin, Revived};
pub use nutrition::{derive_bonuses, NutritionBonuses, NutritionPlugin};
pub use persistence::{load_entity, save_entity, VitalsSnapshot};
pub use spawn::{base_stats, survivor_bundle};
pub use stamina::{
    ExhaustionChanged, HeldInteraction, HeldInteractionObserver, HeldItem, InteractionPhase,
    InteractionPrevented, StaminaPlugin, ToolUseStaminaCost,
};

/// Период slow tick (cold check, nutrition bonus)
pub const SLOW_TICK_PERIOD: Duration = Duration::from_millis(5000);

/// Фазы vitals симуляции внутри FixedUpdate
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum VitalsSet {
    /// Кормление, revival, расход saturation
    Hunger,
    /// Drains, recovery, exhaustion
    Stamina,
    /// Раз в 5s: холод, nutrition bonus
    SlowTick,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct VitalsPlugin;

impl Plugin for VitalsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (VitalsSet::Hunger, VitalsSet::Stamina, VitalsSet::SlowTick).chain(),
        )
        .configure_sets(FixedUpdate, VitalsSet::SlowTick.run_if(on_timer(SLOW_TICK_PERIOD)))
        .add_plugins((HungerPlugin, StaminaPlugin, NutritionPlugin));
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

/// Создаёт minimal Bevy App для headless симуляции (real time, 60Hz FixedUpdate)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Headless App с ручным шагом времени: каждый `update()` = ровно один FixedUpdate
///
/// Первый `update()` времени не двигает (старт часов).
pub fn create_stepped_app(seed: u64, step: Duration) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(Time::<Fixed>::from_duration(step))
        .insert_resource(TimeUpdateStrategy::ManualDuration(step));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
