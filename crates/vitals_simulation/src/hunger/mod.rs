//! Hunger domain - расход saturation, кормление, холод
//!
//! Содержит:
//! - FoodEaten / Revived (events от host'а)
//! - consume_saturation (per-tick расход + detox)
//! - update_cold_resistance (slow tick)

use bevy::prelude::*;

pub mod events;
pub mod systems;

pub use events::*;
pub use systems::*;

use crate::config::{Calendar, WorldRules};
use crate::VitalsSet;

/// Hunger Plugin
///
/// Порядок выполнения (FixedUpdate, VitalsSet::Hunger):
/// 1. apply_food_eaten - кормление
/// 2. apply_revival - revival halving
/// 3. consume_saturation - расход по hungerrate
///
/// update_cold_resistance - в VitalsSet::SlowTick.
pub struct HungerPlugin;

impl Plugin for HungerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FoodEaten>()
            .add_event::<Revived>()
            .init_resource::<WorldRules>()
            .init_resource::<Calendar>();

        app.add_systems(
            FixedUpdate,
            (apply_food_eaten, apply_revival, consume_saturation)
                .chain()
                .in_set(VitalsSet::Hunger),
        );

        app.add_systems(FixedUpdate, update_cold_resistance.in_set(VitalsSet::SlowTick));
    }
}
