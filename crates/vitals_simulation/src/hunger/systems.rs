//! Hunger системы: расход saturation, кормление, revival, холод.

use bevy::prelude::*;

use super::events::{FoodEaten, Revived};
use crate::components::{
    layers, names, EntityStats, FoodCategory, GameMode, Intoxication, NutrientPools, Surroundings,
    Survivor,
};
use crate::config::{Calendar, WorldRules};
use crate::logger;

/// Шаг спада опьянения за секунду реального времени
pub const DETOX_STEP: f32 = 0.005;
/// Ниже этой температуры холод ускоряет голод (°C)
pub const COLD_THRESHOLD: f32 = 2.0;
/// Максимальная учитываемая разница температур
pub const MAX_COLD_DIFF: f32 = 10.0;
/// Делитель разницы температур → модификатор hungerrate
pub const COLD_DIVISOR: f32 = 40.0;

/// Сколько saturation тратится за тик
///
/// `hungerrate × (hungerSpeedModifier / 30) × dt × timeMultiplier`
pub fn saturation_used(hunger_rate: f32, hunger_speed_modifier: f32, dt: f32, time_multiplier: f32) -> f32 {
    hunger_rate * (hunger_speed_modifier / 30.0) * dt * time_multiplier
}

/// Спад опьянения: раз в (реальную) секунду минус `DETOX_STEP`, пол 0
pub fn decay_intoxication(intoxication: &mut Intoxication, dt: f32) {
    intoxication.decay_counter += dt;
    if intoxication.decay_counter > 1.0 {
        if intoxication.level > 0.0 {
            intoxication.level = (intoxication.level - DETOX_STEP).max(0.0);
        }
        intoxication.decay_counter = 0.0;
    }
}

/// Модификатор hungerrate от холода
///
/// 0 если harsh winters выключены, тепло (≥ 2°C) или entity в закрытой комнате.
pub fn cold_resistance(harsh_winters: bool, temperature: f32, sheltered: bool) -> f32 {
    if !harsh_winters || temperature >= COLD_THRESHOLD {
        return 0.0;
    }

    let diff = (COLD_THRESHOLD - temperature).clamp(0.0, MAX_COLD_DIFF);
    if sheltered {
        0.0
    } else {
        diff / COLD_DIVISOR
    }
}

/// Система: кормление из FoodEaten events
pub fn apply_food_eaten(mut events: EventReader<FoodEaten>, mut pools: Query<&mut NutrientPools>) {
    for event in events.read() {
        if event.category == FoodCategory::Unknown {
            logger::log(&format!(
                "Food with unknown category ignored for {:?} ({} saturation)",
                event.entity, event.amount
            ));
            continue;
        }

        let Ok(mut pools) = pools.get_mut(event.entity) else {
            continue;
        };

        pools.receive_food(event.amount, event.category);
    }
}

/// Система: revival heal режет все категории пополам
pub fn apply_revival(mut events: EventReader<Revived>, mut pools: Query<&mut NutrientPools>) {
    for event in events.read() {
        if let Ok(mut pools) = pools.get_mut(event.entity) {
            pools.halve_all();
            logger::log_info(&format!(
                "Entity {:?} revived: nutrients halved (saturation {:.1})",
                event.entity,
                pools.saturation()
            ));
        }
    }
}

/// Система: per-tick расход saturation + detox
///
/// Non-survival режимы пропускаются целиком.
pub fn consume_saturation(
    time: Res<Time<Fixed>>,
    rules: Res<WorldRules>,
    calendar: Res<Calendar>,
    mut query: Query<
        (Entity, &mut NutrientPools, &EntityStats, &GameMode, &mut Intoxication),
        With<Survivor>,
    >,
) {
    let dt = time.delta_secs();
    let time_multiplier = calendar.time_multiplier();

    for (entity, mut pools, stats, mode, mut intoxication) in query.iter_mut() {
        if !mode.consumes_nutrition() {
            continue;
        }

        let used = saturation_used(
            stats.blended(names::HUNGER_RATE),
            rules.hunger_speed_modifier,
            dt,
            time_multiplier,
        );
        let was_starving = pools.is_starving();
        pools.deplete(used);
        if !was_starving && pools.is_starving() {
            logger::log_warning(&format!("Entity {:?} is starving (saturation depleted)", entity));
        }

        decay_intoxication(&mut intoxication, dt);
    }
}

/// Система (slow tick): модификатор hungerrate от холода
pub fn update_cold_resistance(
    rules: Res<WorldRules>,
    mut query: Query<(&Surroundings, &GameMode, &mut EntityStats), With<Survivor>>,
) {
    for (surroundings, mode, mut stats) in query.iter_mut() {
        if *mode == GameMode::Creative {
            continue;
        }

        let resistance = cold_resistance(
            rules.harsh_winters,
            surroundings.temperature,
            surroundings.is_sheltered(),
        );
        stats.set(names::HUNGER_RATE, layers::COLD, resistance, true);
    }
}
