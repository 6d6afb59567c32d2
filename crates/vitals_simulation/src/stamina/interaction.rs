//! Held tool interactions → stamina costs
//!
//! # Architecture
//!
//! Предмет в руке (`HeldItem`) держит список `HeldInteractionObserver`.
//! Host шлёт `HeldInteraction { phase }`, `dispatch_held_interactions`
//! вызывает observers по порядку. `PreventSubsequent` останавливает цепочку
//! и отменяет действие (`InteractionPrevented`).
//!
//! **Tool use lifecycle:**
//! - Start / BlockBroken → `try_spend(momentary)`, при успехе `set_ticker(held)`
//! - Stop / Cancel → `remove_ticker()`

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::Stamina;

/// Фаза held interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    Start,
    Stop,
    Cancel,
    BlockBroken,
}

/// Event: host сообщает о фазе взаимодействия предметом в руке
#[derive(Event, Debug, Clone)]
pub struct HeldInteraction {
    pub entity: Entity,
    pub phase: InteractionPhase,
}

/// Event: observer запретил действие (не хватило stamina)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct InteractionPrevented {
    pub entity: Entity,
    pub phase: InteractionPhase,
}

/// Решение observer'а
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionHandling {
    PassThrough,
    PreventSubsequent,
}

/// Поведение предмета при использовании
pub trait HeldInteractionObserver: Send + Sync + 'static {
    fn on_interact_start(&self, stamina: &mut Stamina, now_ms: u64) -> InteractionHandling;

    fn on_block_broken(&self, _stamina: &mut Stamina, _now_ms: u64) -> InteractionHandling {
        InteractionHandling::PassThrough
    }

    fn on_interact_stop(&self, stamina: &mut Stamina);

    fn on_interact_cancel(&self, stamina: &mut Stamina);
}

fn default_momentary_cost() -> f32 {
    1.0
}

/// Stamina cost инструмента: разовый при использовании + опциональный per-second пока держим
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUseStaminaCost {
    #[serde(default = "default_momentary_cost", alias = "staminaCostMomentarty")]
    pub stamina_cost_momentary: f32,
    #[serde(default)]
    pub stamina_cost_held: Option<f32>,
}

impl Default for ToolUseStaminaCost {
    fn default() -> Self {
        Self {
            stamina_cost_momentary: default_momentary_cost(),
            stamina_cost_held: None,
        }
    }
}

impl ToolUseStaminaCost {
    fn charge(&self, stamina: &mut Stamina, now_ms: u64) -> InteractionHandling {
        if !stamina.try_spend(self.stamina_cost_momentary, now_ms) {
            return InteractionHandling::PreventSubsequent;
        }

        if let Some(rate) = self.stamina_cost_held {
            stamina.set_ticker(rate);
        }
        InteractionHandling::PassThrough
    }
}

impl HeldInteractionObserver for ToolUseStaminaCost {
    fn on_interact_start(&self, stamina: &mut Stamina, now_ms: u64) -> InteractionHandling {
        self.charge(stamina, now_ms)
    }

    fn on_block_broken(&self, stamina: &mut Stamina, now_ms: u64) -> InteractionHandling {
        self.charge(stamina, now_ms)
    }

    fn on_interact_stop(&self, stamina: &mut Stamina) {
        stamina.remove_ticker();
    }

    fn on_interact_cancel(&self, stamina: &mut Stamina) {
        stamina.remove_ticker();
    }
}

/// Предмет в руке entity с набором observers
#[derive(Component, Default)]
pub struct HeldItem {
    observers: Vec<Box<dyn HeldInteractionObserver>>,
}

impl fmt::Debug for HeldItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeldItem")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl HeldItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: impl HeldInteractionObserver) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Вызывает observers по порядку; PreventSubsequent обрывает цепочку
    pub fn dispatch(&self, phase: InteractionPhase, stamina: &mut Stamina, now_ms: u64) -> InteractionHandling {
        for observer in &self.observers {
            let handling = match phase {
                InteractionPhase::Start => observer.on_interact_start(stamina, now_ms),
                InteractionPhase::BlockBroken => observer.on_block_broken(stamina, now_ms),
                InteractionPhase::Stop => {
                    observer.on_interact_stop(stamina);
                    InteractionHandling::PassThrough
                }
                InteractionPhase::Cancel => {
                    observer.on_interact_cancel(stamina);
                    InteractionHandling::PassThrough
                }
            };

            if handling == InteractionHandling::PreventSubsequent {
                return handling;
            }
        }
        InteractionHandling::PassThrough
    }
}

/// Система: HeldInteraction events → observers предмета в руке
///
/// Entity без HeldItem или Stamina пропускается (действие не блокируется).
pub fn dispatch_held_interactions(
    fixed: Res<Time<Fixed>>,
    mut interactions: EventReader<HeldInteraction>,
    mut prevented: EventWriter<InteractionPrevented>,
    mut holders: Query<(&HeldItem, &mut Stamina)>,
) {
    let now_ms = fixed.elapsed().as_millis() as u64;

    for interaction in interactions.read() {
        let Ok((item, mut stamina)) = holders.get_mut(interaction.entity) else {
            continue;
        };

        if item.dispatch(interaction.phase, &mut stamina, now_ms) == InteractionHandling::PreventSubsequent {
            prevented.write(InteractionPrevented {
                entity: interaction.entity,
                phase: interaction.phase,
            });
        }
    }
}
