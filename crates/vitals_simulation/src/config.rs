//! Конфигурация: per-entity профиль (`VitalsProfile`) и правила мира (`WorldRules`).
//!
//! Все числовые поля по умолчанию 0 при отсутствии в JSON: недостающая
//! конфигурация даёт нулевые cap'ы, а не ошибку загрузки.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::NutrientRatios;
use crate::error::VitalsError;

/// Hunger параметры entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HungerConfig {
    pub max_saturation: f32,
    pub hunger_rate_base: f32,
}

/// Stamina параметры entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaminaConfig {
    pub amount_max_base: f32,
    pub recovery_rate_base: f32,
    /// Множитель regen когда entity сидит на земле и не двигается
    pub recovery_rate_sitting: f32,
    /// Stamina/sec при sprint
    pub sprint_drain_base: f32,
    /// Stamina за один прыжок
    pub jump_drain_base: f32,
}

/// Веса категорий для одного выхода nutrition bonus
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientWeights {
    pub protein: f32,
    pub fruit: f32,
    pub grain: f32,
    pub dairy: f32,
    pub vegetable: f32,
}

impl NutrientWeights {
    /// Взвешенная сумма ratios
    pub fn calculate(&self, ratios: &NutrientRatios) -> f32 {
        ratios.protein * self.protein
            + ratios.fruit * self.fruit
            + ratios.grain * self.grain
            + ratios.dairy * self.dairy
            + ratios.vegetable * self.vegetable
    }
}

/// Откуда брать веса для staminaRegen
///
/// `Amount` воспроизводит старое поведение, где regen считался по весам amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegenWeightSource {
    #[default]
    Own,
    Amount,
}

/// Nutrition bonus параметры entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NutritionConfig {
    pub stamina_amount_from: NutrientWeights,
    pub stamina_recovery_rate_from: NutrientWeights,
    pub regen_weight_source: RegenWeightSource,
    pub exertion_stamina_cost_from: NutrientWeights,
    pub health_bonus_from: NutrientWeights,
    pub health_bonus_amount: f32,
    pub move_speed_from: NutrientWeights,
}

impl NutritionConfig {
    /// Веса, по которым реально считается staminaRegen
    pub fn regen_weights(&self) -> &NutrientWeights {
        match self.regen_weight_source {
            RegenWeightSource::Own => &self.stamina_recovery_rate_from,
            RegenWeightSource::Amount => &self.stamina_amount_from,
        }
    }
}

/// Полный профиль entity (hunger + stamina + nutrition)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsProfile {
    pub hunger: HungerConfig,
    pub stamina: StaminaConfig,
    pub nutrition: NutritionConfig,
}

impl VitalsProfile {
    /// Дефолтный профиль игрока
    pub fn standard() -> Self {
        Self {
            hunger: HungerConfig {
                max_saturation: 1500.0,
                hunger_rate_base: 1.0,
            },
            stamina: StaminaConfig {
                amount_max_base: 100.0,
                recovery_rate_base: 4.0,
                recovery_rate_sitting: 1.5,
                sprint_drain_base: 2.0,
                jump_drain_base: 2.5,
            },
            nutrition: NutritionConfig {
                // protein+dairy → запас stamina
                stamina_amount_from: NutrientWeights {
                    protein: 50.0,
                    dairy: 50.0,
                    ..Default::default()
                },
                // grain+fruit → скорость восстановления
                stamina_recovery_rate_from: NutrientWeights {
                    grain: 2.0,
                    fruit: 2.0,
                    ..Default::default()
                },
                regen_weight_source: RegenWeightSource::Own,
                // сбалансированная диета удешевляет sprint/jump
                exertion_stamina_cost_from: NutrientWeights {
                    grain: -0.5,
                    protein: -0.5,
                    ..Default::default()
                },
                health_bonus_from: NutrientWeights {
                    protein: 1.0,
                    fruit: 1.0,
                    grain: 1.0,
                    dairy: 1.0,
                    vegetable: 1.0,
                },
                health_bonus_amount: 5.0,
                // vegetable+fruit → скорость ходьбы
                move_speed_from: NutrientWeights {
                    vegetable: 0.1,
                    fruit: 0.1,
                    ..Default::default()
                },
            },
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, VitalsError> {
        serde_json::from_str(json).map_err(VitalsError::Config)
    }
}

/// Правила мира (общие для всех entity)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldRules {
    pub harsh_winters: bool,
    pub hunger_speed_modifier: f32,
}

impl Default for WorldRules {
    fn default() -> Self {
        Self {
            harsh_winters: true,
            hunger_speed_modifier: 1.0,
        }
    }
}

impl WorldRules {
    pub fn from_json_str(json: &str) -> Result<Self, VitalsError> {
        serde_json::from_str(json).map_err(VitalsError::Config)
    }
}

/// Скорость игрового календаря
///
/// Hunger масштабируется игровым временем, stamina - нет.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Calendar {
    pub speed_of_time: f32,
    pub calendar_speed_mul: f32,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            speed_of_time: 60.0,
            calendar_speed_mul: 0.5,
        }
    }
}

impl Calendar {
    pub fn time_multiplier(&self) -> f32 {
        self.speed_of_time * self.calendar_speed_mul
    }
}
