//! Hunger events (пишет host: еда, revival)

use bevy::prelude::*;

use crate::components::FoodCategory;

/// Event: entity съел еду
///
/// Обрабатывается `apply_food_eaten` → `NutrientPools::receive`.
/// Unknown категория - no-op.
#[derive(Event, Debug, Clone)]
pub struct FoodEaten {
    pub entity: Entity,
    pub amount: f32,
    pub category: FoodCategory,
}

/// Event: entity воскрешён (revival heal)
///
/// Все nutrient категории делятся пополам.
#[derive(Event, Debug, Clone)]
pub struct Revived {
    pub entity: Entity,
}
