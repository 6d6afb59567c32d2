//! Stamina management systems.

use bevy::prelude::*;

use super::events::ExhaustionChanged;
use crate::components::{
    layers, names, BodyState, Controls, EntityStats, ExhaustionTransition, Health, NutrientPools,
    RecoveryInputs, Stamina, Survivor,
};
use crate::config::VitalsProfile;
use crate::logger;

/// Penalty модификаторы при exhaustion (walkspeed, jumpHeightMul, hungerrate)
pub const EXHAUSTED_MODIFIERS: [(&str, f32); 3] = [
    (names::WALK_SPEED, -0.3),
    (names::JUMP_HEIGHT_MUL, 0.0),
    (names::HUNGER_RATE, 1.0),
];

/// Модификаторы в нормальном состоянии
pub const RELAXED_MODIFIERS: [(&str, f32); 3] = [
    (names::WALK_SPEED, 0.0),
    (names::JUMP_HEIGHT_MUL, 0.33),
    (names::HUNGER_RATE, 0.0),
];

/// Публикует exhaustion модификаторы в слой `lowstamina`
///
/// Идемпотентно: слой перезаписывается.
pub fn apply_exhaustion_modifiers(stats: &mut EntityStats, exhausted: bool) {
    let modifiers = if exhausted {
        EXHAUSTED_MODIFIERS
    } else {
        RELAXED_MODIFIERS
    };

    for (stat, value) in modifiers {
        stats.set(stat, layers::EXHAUSTION, value, true);
    }
}

/// Входы одного stamina тика (host state + время)
#[derive(Debug, Clone, Copy)]
pub struct StaminaTick<'a> {
    pub dt: f32,
    /// Monotonic world time (ms)
    pub now_ms: u64,
    pub body: &'a BodyState,
    pub controls: &'a Controls,
    pub alive: bool,
    pub sitting_multiplier: f32,
}

/// Один stamina тик
///
/// 1. clamp к текущему cap (cap может сжаться)
/// 2. grounded с coyote-time
/// 3. sprint/jump drains (только grounded)
/// 4. вход в exhaustion
/// 5. recovery (если current < cap), стоит saturation
/// 6. выход из exhaustion
///
/// Возвращает переходы state machine в порядке возникновения (модификаторы
/// уже опубликованы). За один тик возможны оба: вход и сразу выход.
pub fn step_stamina(
    stamina: &mut Stamina,
    stats: &mut EntityStats,
    mut pools: Option<&mut NutrientPools>,
    tick: &StaminaTick,
) -> Vec<ExhaustionTransition> {
    let mut transitions = Vec::new();

    let cap = stats.blended(names::STAMINA_AMOUNT);
    stamina.clamp_to_cap(cap);

    let grounded = stamina.grounding.update(
        tick.body.on_ground,
        tick.body.swimming,
        tick.body.knockback > 0,
        tick.dt,
    );

    // Exertion - безусловная трата до нуля, иначе exhaustion недостижим
    if grounded && tick.controls.sprint && tick.controls.tries_to_move {
        let drain = stats.blended(names::SPRINT_DRAIN).max(0.0);
        stamina.spend(drain * tick.dt, tick.now_ms);
    }
    if stamina.register_jump(tick.controls.jump && grounded, tick.alive, tick.now_ms) {
        let drain = stats.blended(names::JUMP_DRAIN).max(0.0);
        stamina.spend(drain, tick.now_ms);
    }

    if let Some(entered) = stamina.check_exhaustion_enter() {
        apply_exhaustion_modifiers(stats, true);
        transitions.push(entered);
    }

    if stamina.current < cap {
        let resting = grounded && tick.body.floor_sitting && !tick.controls.tries_to_move;
        let inputs = RecoveryInputs {
            regen_rate: stats.blended(names::STAMINA_REGEN),
            sitting_multiplier: resting.then_some(tick.sitting_multiplier),
            cap,
        };
        stamina.recover(tick.dt, tick.now_ms, inputs, pools.as_deref_mut());
    }

    if let Some(recovered) = stamina.check_exhaustion_exit() {
        apply_exhaustion_modifiers(stats, false);
        transitions.push(recovered);
    }

    transitions
}

/// Система: stamina тик для всех survivor'ов
///
/// Работает в FixedUpdate; время трат - monotonic `Time<Fixed>::elapsed`.
/// Без NutrientPools recovery бесплатный (collaborator отсутствует).
pub fn stamina_tick(
    time: Res<Time<Fixed>>,
    mut exhaustion_events: EventWriter<ExhaustionChanged>,
    mut query: Query<
        (
            Entity,
            &mut Stamina,
            &mut EntityStats,
            Option<&mut NutrientPools>,
            &BodyState,
            &Controls,
            &Health,
            &VitalsProfile,
        ),
        With<Survivor>,
    >,
) {
    let dt = time.delta_secs();
    let now_ms = time.elapsed().as_millis() as u64;

    for (entity, mut stamina, mut stats, mut pools, body, controls, health, profile) in query.iter_mut() {
        let tick = StaminaTick {
            dt,
            now_ms,
            body,
            controls,
            alive: health.is_alive(),
            sitting_multiplier: profile.stamina.recovery_rate_sitting,
        };

        let transitions = step_stamina(&mut stamina, &mut stats, pools.as_deref_mut(), &tick);

        for transition in transitions {
            let exhausted = transition == ExhaustionTransition::Entered;
            if exhausted {
                logger::log_info(&format!("Entity {:?} is now exhausted", entity));
            } else {
                logger::log_info(&format!(
                    "Entity {:?} recovered from exhaustion (stamina: {:.1})",
                    entity, stamina.current
                ));
            }
            exhaustion_events.write(ExhaustionChanged { entity, exhausted });
        }
    }
}

/// Система: tool-use tickers (свой 20ms cadence, независимо от FixedUpdate)
///
/// Работает в Update по virtual time; timestamp трат - monotonic fixed clock.
pub fn fire_tool_use_tickers(
    time: Res<Time>,
    fixed: Res<Time<Fixed>>,
    mut query: Query<&mut Stamina>,
) {
    let delta = time.delta();
    let now_ms = fixed.elapsed().as_millis() as u64;

    for mut stamina in query.iter_mut() {
        if stamina.ticker().is_some() {
            stamina.fire_ticker(delta, now_ms);
        }
    }
}
