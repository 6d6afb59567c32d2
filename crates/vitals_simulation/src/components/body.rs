//! Host-side состояние тела: физические флаги, input, окружение.
//!
//! Пишется host'ом (Godot layer / тесты) каждый frame, симуляция только читает.

use bevy::prelude::*;

/// Физика тела
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct BodyState {
    pub on_ground: bool,
    pub swimming: bool,
    pub floor_sitting: bool,
    /// Knockback от урона (> 0 - сейчас отбрасывает)
    pub knockback: i32,
}

/// Input актора (server-side controls)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Controls {
    pub sprint: bool,
    pub tries_to_move: bool,
    pub jump: bool,
}

/// Климат и комната вокруг актора
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Surroundings {
    /// Температура в точке актора (°C)
    pub temperature: f32,
    /// Выходы из комнаты; None - не в комнате (снаружи)
    pub room_exit_count: Option<u32>,
}

impl Default for Surroundings {
    fn default() -> Self {
        Self {
            temperature: 20.0,
            room_exit_count: None,
        }
    }
}

impl Surroundings {
    /// Полностью закрытая комната (без выходов) защищает от холода
    pub fn is_sheltered(&self) -> bool {
        self.room_exit_count == Some(0)
    }
}
