//! Базовые компоненты survivor'а: Survivor, Health, GameMode, Intoxication

use bevy::prelude::*;

use super::{BodyState, Controls, EntityStats, NutrientPools, Stamina, Surroundings};
use crate::config::VitalsProfile;

/// Survivor (игрок или NPC с hunger/stamina) - маркер для всех vitals систем
///
/// Автоматически добавляет остальные компоненты через Required Components.
/// Без профиля все cap'ы нулевые - для реального spawn'а используй
/// `survivor_bundle`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    NutrientPools,
    Stamina,
    EntityStats,
    Health,
    VitalsProfile,
    BodyState,
    Controls,
    Surroundings,
    GameMode,
    Intoxication
)]
pub struct Survivor;

/// Режим игры - в non-survival режимах hunger не тратится
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Spectator,
    Guest,
}

impl GameMode {
    pub fn consumes_nutrition(self) -> bool {
        self == GameMode::Survival
    }
}

/// Здоровье с именованными модификаторами max health
///
/// Инвариант: 0 ≤ current ≤ max()
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub base_max: f32,
    max_modifiers: Vec<(String, f32)>,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(15.0)
    }
}

impl Health {
    pub fn new(base_max: f32) -> Self {
        Self {
            current: base_max,
            base_max,
            max_modifiers: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn max(&self) -> f32 {
        self.base_max + self.max_modifiers.iter().map(|(_, v)| v).sum::<f32>()
    }

    pub fn max_modifier(&self, key: &str) -> Option<f32> {
        self.max_modifiers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    /// Перезаписывает модификатор `key`; current обрезается по новому max
    pub fn set_max_health_modifier(&mut self, key: &str, value: f32) {
        match self.max_modifiers.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.max_modifiers.push((key.to_string(), value)),
        }
        self.current = self.current.min(self.max().max(0.0));
    }
}

/// Опьянение; спадает фиксированным шагом раз в секунду реального времени
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Intoxication {
    pub level: f32,
    pub decay_counter: f32,
}
