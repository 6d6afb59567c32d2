//! Stamina events

use bevy::prelude::*;

/// Event: entity вошёл в exhaustion или вышел из него
///
/// Генерируется `stamina_tick` на каждом переходе state machine.
/// Используется для UI/звуков (HUD вне симуляции).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ExhaustionChanged {
    pub entity: Entity,
    pub exhausted: bool,
}
