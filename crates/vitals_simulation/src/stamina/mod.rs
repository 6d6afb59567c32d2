//! Stamina domain
//!
//! - Drain: sprint (per second), jump (per jump), tool use (ticker)
//! - Recovery: после 1s простоя, idle ramp до ×2 за 10s, стоит saturation
//! - Exhaustion: вход ≤ 0.01, выход > 10.0, penalty модификаторы в слое `lowstamina`

use bevy::prelude::*;

pub mod events;
pub mod interaction;
pub mod systems;

#[cfg(test)]
mod stamina_tests;

pub use events::*;
pub use interaction::*;
pub use systems::*;

use crate::VitalsSet;

/// Stamina Plugin
///
/// FixedUpdate (VitalsSet::Stamina): stamina_tick
/// Update: dispatch_held_interactions → fire_tool_use_tickers
pub struct StaminaPlugin;

impl Plugin for StaminaPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ExhaustionChanged>()
            .add_event::<HeldInteraction>()
            .add_event::<InteractionPrevented>();

        app.add_systems(FixedUpdate, stamina_tick.in_set(VitalsSet::Stamina));

        app.add_systems(
            Update,
            (dispatch_held_interactions, fire_tool_use_tickers).chain(),
        );
    }
}
