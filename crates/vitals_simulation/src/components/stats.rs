//! Layered stat blending: именованные слои вкладов в каждый stat.
//!
//! Stat = набор слоёв (`base`, `nutrition`, `lowstamina`, ...). Повторный `set`
//! с тем же именем слоя перезаписывает значение, а не складывает.

use bevy::prelude::*;
use std::collections::HashMap;

/// Имена stat'ов, которые публикует симуляция
pub mod names {
    pub const HUNGER_RATE: &str = "hungerrate";
    pub const STAMINA_AMOUNT: &str = "staminaAmount";
    pub const STAMINA_REGEN: &str = "staminaRegen";
    pub const SPRINT_DRAIN: &str = "sprintDrain";
    pub const JUMP_DRAIN: &str = "jumpDrain";
    pub const WALK_SPEED: &str = "walkspeed";
    pub const JUMP_HEIGHT_MUL: &str = "jumpHeightMul";
}

/// Имена слоёв
pub mod layers {
    pub const BASE: &str = "base";
    pub const NUTRITION: &str = "nutrition";
    pub const EXHAUSTION: &str = "lowstamina";
    pub const COLD: &str = "resistcold";
}

#[derive(Debug, Clone, PartialEq)]
struct StatLayer {
    name: String,
    value: f32,
    percentage: bool,
}

/// Stat'ы одной entity
///
/// `blended = Σ flat + base × Σ percentage`, где base - значение слоя `base`
/// (1.0 если слоя нет). Слои хранятся в порядке добавления, поэтому сумма
/// детерминирована.
#[derive(Component, Debug, Clone, Default)]
pub struct EntityStats {
    stats: HashMap<String, Vec<StatLayer>>,
}

impl EntityStats {
    pub fn set(&mut self, stat: &str, layer: &str, value: f32, percentage: bool) {
        let entries = self.stats.entry(stat.to_string()).or_default();
        match entries.iter_mut().find(|l| l.name == layer) {
            Some(existing) => {
                existing.value = value;
                existing.percentage = percentage;
            }
            None => entries.push(StatLayer {
                name: layer.to_string(),
                value,
                percentage,
            }),
        }
    }

    pub fn layer(&self, stat: &str, layer: &str) -> Option<f32> {
        self.stats
            .get(stat)?
            .iter()
            .find(|l| l.name == layer)
            .map(|l| l.value)
    }

    pub fn blended(&self, stat: &str) -> f32 {
        let Some(entries) = self.stats.get(stat) else {
            return 0.0;
        };

        let base = entries
            .iter()
            .find(|l| l.name == layers::BASE && !l.percentage)
            .map_or(1.0, |l| l.value);

        let (flat, percent) = entries.iter().fold((0.0, 0.0), |(flat, percent), l| {
            if l.percentage {
                (flat, percent + l.value)
            } else {
                (flat + l.value, percent)
            }
        });

        flat + base * percent
    }
}
