//! Save/Load vitals состояния entity
//!
//! Минимальный набор полей: запись `hunger` (cap, derived saturation, пять
//! уровней) и запись `stamina` (current, exhausted). JSON через serde_json.
//! `currentsaturation` при загрузке не читается - пересчитывается из уровней.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{EntityStats, FoodCategory, NutrientPools, Stamina};
use crate::config::VitalsProfile;
use crate::error::VitalsError;
use crate::logger;
use crate::stamina::apply_exhaustion_modifiers;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HungerRecord {
    #[serde(rename = "maxsaturation", default)]
    pub max_saturation: f32,
    #[serde(rename = "currentsaturation", default)]
    pub current_saturation: f32,
    #[serde(rename = "fruitLevel", default)]
    pub fruit_level: f32,
    #[serde(rename = "vegetableLevel", default)]
    pub vegetable_level: f32,
    #[serde(rename = "proteinLevel", default)]
    pub protein_level: f32,
    #[serde(rename = "grainLevel", default)]
    pub grain_level: f32,
    #[serde(rename = "dairyLevel", default)]
    pub dairy_level: f32,
}

impl HungerRecord {
    pub fn capture(pools: &NutrientPools) -> Self {
        Self {
            max_saturation: pools.cap,
            current_saturation: pools.saturation(),
            fruit_level: pools.level(FoodCategory::Fruit),
            vegetable_level: pools.level(FoodCategory::Vegetable),
            protein_level: pools.level(FoodCategory::Protein),
            grain_level: pools.level(FoodCategory::Grain),
            dairy_level: pools.level(FoodCategory::Dairy),
        }
    }

    /// Уровни в порядке `FoodCategory::NUTRIENTS`
    pub fn levels(&self) -> [f32; 5] {
        [
            self.fruit_level,
            self.vegetable_level,
            self.protein_level,
            self.grain_level,
            self.dairy_level,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaminaRecord {
    pub current: f32,
    #[serde(alias = "exausted", default)]
    pub exhausted: bool,
}

/// Snapshot vitals одной entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    pub hunger: HungerRecord,
    pub stamina: StaminaRecord,
}

impl VitalsSnapshot {
    pub fn capture(pools: &NutrientPools, stamina: &Stamina) -> Self {
        Self {
            hunger: HungerRecord::capture(pools),
            stamina: StaminaRecord {
                current: stamina.current,
                exhausted: stamina.exhausted,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, VitalsError> {
        serde_json::to_string(self).map_err(VitalsError::Persistence)
    }

    pub fn from_json(json: &str) -> Result<Self, VitalsError> {
        serde_json::from_str(json).map_err(VitalsError::Persistence)
    }

    /// Применяет snapshot к компонентам
    ///
    /// Cap берётся из текущего профиля (конфиг главнее сохранения),
    /// уровни - из записи. Exhaustion модификаторы публикуются заново.
    pub fn restore(
        &self,
        profile: &VitalsProfile,
        pools: &mut NutrientPools,
        stamina: &mut Stamina,
        stats: &mut EntityStats,
    ) {
        *pools = NutrientPools::with_levels(profile.hunger.max_saturation, self.hunger.levels());

        stamina.current = self.stamina.current.max(0.0);
        stamina.exhausted = self.stamina.exhausted;
        apply_exhaustion_modifiers(stats, stamina.exhausted);
    }
}

/// Снимает snapshot с entity
pub fn save_entity(world: &World, entity: Entity) -> Result<VitalsSnapshot, VitalsError> {
    let pools = world
        .get::<NutrientPools>(entity)
        .ok_or(VitalsError::MissingComponent {
            entity,
            component: "NutrientPools",
        })?;
    let stamina = world
        .get::<Stamina>(entity)
        .ok_or(VitalsError::MissingComponent {
            entity,
            component: "Stamina",
        })?;

    Ok(VitalsSnapshot::capture(pools, stamina))
}

/// Загружает snapshot в entity
pub fn load_entity(world: &mut World, entity: Entity, snapshot: &VitalsSnapshot) -> Result<(), VitalsError> {
    let mut entity_mut = world.get_entity_mut(entity).map_err(|_| VitalsError::MissingComponent {
        entity,
        component: "Entity",
    })?;

    let profile = entity_mut
        .get::<VitalsProfile>()
        .copied()
        .ok_or(VitalsError::MissingComponent {
            entity,
            component: "VitalsProfile",
        })?;

    let Some(mut pools) = entity_mut.get::<NutrientPools>().cloned() else {
        return Err(VitalsError::MissingComponent {
            entity,
            component: "NutrientPools",
        });
    };
    let Some(mut stamina) = entity_mut.get::<Stamina>().cloned() else {
        return Err(VitalsError::MissingComponent {
            entity,
            component: "Stamina",
        });
    };
    let mut stats = entity_mut.get::<EntityStats>().cloned().unwrap_or_default();

    snapshot.restore(&profile, &mut pools, &mut stamina, &mut stats);
    entity_mut.insert((pools, stamina, stats));

    logger::log_info(&format!(
        "Loaded vitals for {:?}: saturation {:.1}, stamina {:.1}{}",
        entity,
        snapshot.hunger.levels().iter().sum::<f32>(),
        snapshot.stamina.current,
        if snapshot.stamina.exhausted { " (exhausted)" } else { "" }
    ));

    Ok(())
}
