//! Nutrition bonus - stateless отображение nutrient ratios → модификаторы
//!
//! Каждый выход - взвешенная сумма пяти ratios (level / cap) с весами из
//! `NutritionConfig`. Публикуется в слой `nutrition` (перезапись, не сложение).

use bevy::prelude::*;

use crate::components::{layers, names, EntityStats, Health, NutrientPools, NutrientRatios, Stamina, Survivor};
use crate::config::{NutritionConfig, VitalsProfile};
use crate::VitalsSet;

/// Ключ модификатора max health
pub const HEALTH_MODIFIER_KEY: &str = "nutrition";

/// Результат одного slow tick derivation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutritionBonuses {
    pub stamina_amount: f32,
    pub stamina_regen: f32,
    pub exertion_cost: f32,
    pub health_max: f32,
    pub move_speed: f32,
}

/// Чистая функция: ratios + конфиг → бонусы
pub fn derive_bonuses(ratios: &NutrientRatios, config: &NutritionConfig) -> NutritionBonuses {
    NutritionBonuses {
        stamina_amount: config.stamina_amount_from.calculate(ratios),
        stamina_regen: config.regen_weights().calculate(ratios),
        exertion_cost: config.exertion_stamina_cost_from.calculate(ratios),
        health_max: config.health_bonus_from.calculate(ratios) * config.health_bonus_amount,
        move_speed: config.move_speed_from.calculate(ratios),
    }
}

/// Пишет бонусы в stat слои `nutrition` и в max health
pub fn publish_bonuses(bonuses: &NutritionBonuses, stats: &mut EntityStats, health: &mut Health) {
    stats.set(names::STAMINA_AMOUNT, layers::NUTRITION, bonuses.stamina_amount, false);
    stats.set(names::STAMINA_REGEN, layers::NUTRITION, bonuses.stamina_regen, false);
    stats.set(names::SPRINT_DRAIN, layers::NUTRITION, bonuses.exertion_cost, false);
    stats.set(names::JUMP_DRAIN, layers::NUTRITION, bonuses.exertion_cost, false);
    stats.set(names::WALK_SPEED, layers::NUTRITION, bonuses.move_speed, false);
    health.set_max_health_modifier(HEALTH_MODIFIER_KEY, bonuses.health_max);
}

/// Система (slow tick): пересчёт nutrition бонусов
///
/// Entity без NutrientPools или Stamina (ещё не инициализированы) пропускаются.
pub fn update_nutrition_bonuses(
    mut query: Query<
        (
            Option<&NutrientPools>,
            Option<&Stamina>,
            &VitalsProfile,
            &mut EntityStats,
            &mut Health,
        ),
        With<Survivor>,
    >,
) {
    for (pools, stamina, profile, mut stats, mut health) in query.iter_mut() {
        let (Some(pools), Some(_stamina)) = (pools, stamina) else {
            continue;
        };

        let bonuses = derive_bonuses(&pools.ratios(), &profile.nutrition);
        publish_bonuses(&bonuses, &mut stats, &mut health);
    }
}

/// Nutrition Plugin - update_nutrition_bonuses в VitalsSet::SlowTick
pub struct NutritionPlugin;

impl Plugin for NutritionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, update_nutrition_bonuses.in_set(VitalsSet::SlowTick));
    }
}
