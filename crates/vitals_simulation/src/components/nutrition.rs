//! Nutrient pools: пять категорий еды, из которых складывается saturation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Категория еды
///
/// `Unknown` - явная no-op ветка: такая еда ничего не добавляет.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
pub enum FoodCategory {
    Fruit,
    Vegetable,
    Protein,
    Grain,
    Dairy,
    #[default]
    #[serde(other)]
    Unknown,
}

impl FoodCategory {
    /// Все nutrient категории (без Unknown), в порядке хранения
    pub const NUTRIENTS: [FoodCategory; 5] = [
        FoodCategory::Fruit,
        FoodCategory::Vegetable,
        FoodCategory::Protein,
        FoodCategory::Grain,
        FoodCategory::Dairy,
    ];

    /// Индекс в `NutrientPools::levels`
    pub fn index(self) -> Option<usize> {
        match self {
            FoodCategory::Fruit => Some(0),
            FoodCategory::Vegetable => Some(1),
            FoodCategory::Protein => Some(2),
            FoodCategory::Grain => Some(3),
            FoodCategory::Dairy => Some(4),
            FoodCategory::Unknown => None,
        }
    }
}

/// Нормализованные уровни (level / cap) по категориям
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutrientRatios {
    pub fruit: f32,
    pub vegetable: f32,
    pub protein: f32,
    pub grain: f32,
    pub dairy: f32,
}

/// Nutrient pools актора
///
/// Инварианты:
/// - каждый level ≥ 0
/// - один `receive` не поднимает saturation выше `cap`
/// - `deplete` списывает пропорционально составу (состав сохраняется)
#[derive(Component, Debug, Clone, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct NutrientPools {
    /// Максимальная saturation (из конфигурации entity)
    pub cap: f32,
    /// Уровни в порядке `FoodCategory::NUTRIENTS`
    levels: [f32; 5],
}

impl NutrientPools {
    /// Первый spawn: cap делится поровну между пятью категориями
    pub fn new(cap: f32) -> Self {
        let cap = cap.max(0.0);
        Self {
            cap,
            levels: [cap / 5.0; 5],
        }
    }

    /// Восстановление из сохранённых уровней (отрицательные обрезаются в 0)
    pub fn with_levels(cap: f32, levels: [f32; 5]) -> Self {
        Self {
            cap: cap.max(0.0),
            levels: levels.map(|level| level.max(0.0)),
        }
    }

    pub fn level(&self, category: FoodCategory) -> f32 {
        category.index().map_or(0.0, |i| self.levels[i])
    }

    pub fn levels(&self) -> [f32; 5] {
        self.levels
    }

    /// Текущая saturation = сумма всех категорий
    pub fn saturation(&self) -> f32 {
        self.levels.iter().sum()
    }

    pub fn headroom(&self) -> f32 {
        self.cap - self.saturation()
    }

    pub fn is_starving(&self) -> bool {
        self.saturation() <= 0.0
    }

    /// Добавляет еду в категорию, обрезая по свободному месту
    ///
    /// Возвращает реально добавленное количество. При headroom ≤ 0 или
    /// Unknown категории ничего не меняется и возвращается 0.
    pub fn receive(&mut self, category: FoodCategory, amount: f32) -> f32 {
        let Some(index) = category.index() else {
            return 0.0;
        };

        let headroom = self.headroom();
        if headroom <= 0.0 {
            return 0.0;
        }

        let applied = headroom.min(amount.max(0.0));
        self.levels[index] += applied;
        applied
    }

    /// Точка входа для кормления (порядок аргументов как у host API)
    pub fn receive_food(&mut self, amount: f32, category: FoodCategory) -> f32 {
        self.receive(category, amount)
    }

    /// Пропорциональное списание saturation
    ///
    /// Каждая категория теряет `amount * level / saturation`, с полом в 0.
    pub fn deplete(&mut self, amount: f32) {
        let saturation = self.saturation();
        if saturation <= 0.0 || amount <= 0.0 {
            return;
        }

        for level in self.levels.iter_mut() {
            *level = (*level - amount * (*level / saturation)).max(0.0);
        }
    }

    /// Revival heal: все категории делятся пополам, без проверок headroom
    pub fn halve_all(&mut self) {
        for level in self.levels.iter_mut() {
            *level /= 2.0;
        }
    }

    /// level / cap; None при cap ≤ 0 (деление на ноль) или Unknown категории
    pub fn ratio(&self, category: FoodCategory) -> Option<f32> {
        if self.cap <= 0.0 {
            return None;
        }
        category.index().map(|i| self.levels[i] / self.cap)
    }

    /// Все ratios разом; нулевой cap даёт нули
    pub fn ratios(&self) -> NutrientRatios {
        let ratio = |category| self.ratio(category).unwrap_or(0.0);
        NutrientRatios {
            fruit: ratio(FoodCategory::Fruit),
            vegetable: ratio(FoodCategory::Vegetable),
            protein: ratio(FoodCategory::Protein),
            grain: ratio(FoodCategory::Grain),
            dairy: ratio(FoodCategory::Dairy),
        }
    }
}
