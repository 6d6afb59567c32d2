//! Tests for the stamina tick (порядок шагов внутри одного тика).

use super::systems::*;
use crate::components::{
    layers, names, BodyState, Controls, EntityStats, ExhaustionTransition, NutrientPools, Stamina,
};

const DT: f32 = 0.05;

fn stats(amount: f32, regen: f32) -> EntityStats {
    let mut stats = EntityStats::default();
    stats.set(names::STAMINA_AMOUNT, layers::BASE, amount, false);
    stats.set(names::STAMINA_REGEN, layers::BASE, regen, false);
    stats.set(names::SPRINT_DRAIN, layers::BASE, 2.0, false);
    stats.set(names::JUMP_DRAIN, layers::BASE, 2.5, false);
    apply_exhaustion_modifiers(&mut stats, false);
    stats
}

fn grounded() -> BodyState {
    BodyState {
        on_ground: true,
        ..Default::default()
    }
}

fn tick<'a>(now_ms: u64, body: &'a BodyState, controls: &'a Controls) -> StaminaTick<'a> {
    StaminaTick {
        dt: DT,
        now_ms,
        body,
        controls,
        alive: true,
        sitting_multiplier: 1.5,
    }
}

#[test]
fn test_sprint_drains_when_grounded() {
    let mut stamina = Stamina::new(100.0);
    let mut stats = stats(100.0, 4.0);
    let body = grounded();
    let controls = Controls {
        sprint: true,
        tries_to_move: true,
        jump: false,
    };

    step_stamina(&mut stamina, &mut stats, None, &tick(1_000, &body, &controls));

    // 2.0/sec × 0.05
    assert!((stamina.current - 99.9).abs() < 1e-4);
    assert_eq!(stamina.last_spend_ms, 1_000);
}

#[test]
fn test_sprint_in_air_is_free() {
    let mut stamina = Stamina::new(100.0);
    let mut stats = stats(100.0, 4.0);
    let body = BodyState::default();
    let controls = Controls {
        sprint: true,
        tries_to_move: true,
        jump: true,
    };

    step_stamina(&mut stamina, &mut stats, None, &tick(1_000, &body, &controls));

    assert_eq!(stamina.current, 100.0);
}

#[test]
fn test_jump_drains_fixed_amount() {
    let mut stamina = Stamina::new(100.0);
    let mut stats = stats(100.0, 4.0);
    let body = grounded();
    let controls = Controls {
        jump: true,
        ..Default::default()
    };

    step_stamina(&mut stamina, &mut stats, None, &tick(1_000, &body, &controls));
    // Удерживаем прыжок - без повторной траты
    step_stamina(&mut stamina, &mut stats, None, &tick(1_050, &body, &controls));

    assert!((stamina.current - 97.5).abs() < 1e-4);
}

#[test]
fn test_cap_shrink_clamps_current() {
    let mut stamina = Stamina::new(100.0);
    let mut stats = stats(60.0, 4.0);
    let body = BodyState::default();
    let controls = Controls::default();

    step_stamina(&mut stamina, &mut stats, None, &tick(0, &body, &controls));

    assert_eq!(stamina.current, 60.0);
}

#[test]
fn test_exhaustion_publishes_penalties() {
    let mut stamina = Stamina::new(100.0);
    stamina.current = 0.02;
    let mut stats = stats(100.0, 4.0);
    let body = grounded();
    let controls = Controls {
        sprint: true,
        tries_to_move: true,
        jump: false,
    };

    // Sprint добивает остаток до нуля → exhausted
    let transition = step_stamina(&mut stamina, &mut stats, None, &tick(5_000, &body, &controls));

    assert_eq!(transition, vec![ExhaustionTransition::Entered]);
    assert!(stamina.exhausted);
    assert_eq!(stats.layer(names::WALK_SPEED, layers::EXHAUSTION), Some(-0.3));
    assert_eq!(stats.layer(names::JUMP_HEIGHT_MUL, layers::EXHAUSTION), Some(0.0));
    assert_eq!(stats.layer(names::HUNGER_RATE, layers::EXHAUSTION), Some(1.0));
}

#[test]
fn test_recovery_exits_exhaustion_and_relaxes() {
    let mut stamina = Stamina::new(100.0);
    stamina.current = 9.9;
    stamina.exhausted = true;
    stamina.last_spend_ms = 0;
    let mut stats = stats(100.0, 4.0);
    apply_exhaustion_modifiers(&mut stats, true);
    let body = BodyState::default();
    let controls = Controls::default();

    // idle 10s → rate 8.0/sec, за тик +0.4 → 10.3 > 10.0
    let transition = step_stamina(&mut stamina, &mut stats, None, &tick(10_000, &body, &controls));

    assert_eq!(transition, vec![ExhaustionTransition::Recovered]);
    assert!(!stamina.exhausted);
    assert_eq!(stats.layer(names::WALK_SPEED, layers::EXHAUSTION), Some(0.0));
    assert_eq!(stats.layer(names::JUMP_HEIGHT_MUL, layers::EXHAUSTION), Some(0.33));
    assert_eq!(stats.layer(names::HUNGER_RATE, layers::EXHAUSTION), Some(0.0));
}

#[test]
fn test_recovery_draws_from_pools() {
    let mut stamina = Stamina::new(100.0);
    stamina.current = 50.0;
    let mut stats = stats(100.0, 4.0);
    let mut pools = NutrientPools::new(100.0);
    let body = BodyState::default();
    let controls = Controls::default();

    step_stamina(&mut stamina, &mut stats, Some(&mut pools), &tick(10_000, &body, &controls));

    // rate 8.0 × 0.05 × 2 = 0.8 saturation
    assert!((pools.saturation() - 99.2).abs() < 1e-3);
    assert!((stamina.current - 50.4).abs() < 1e-4);
}

#[test]
fn test_full_stamina_does_not_touch_pools() {
    let mut stamina = Stamina::new(100.0);
    let mut stats = stats(100.0, 4.0);
    let mut pools = NutrientPools::new(100.0);
    let body = BodyState::default();
    let controls = Controls::default();

    step_stamina(&mut stamina, &mut stats, Some(&mut pools), &tick(20_000, &body, &controls));

    assert_eq!(pools.saturation(), 100.0);
}

#[test]
fn test_sitting_rest_recovers_faster() {
    let mut standing = Stamina::new(100.0);
    standing.current = 20.0;
    let mut sitting = standing.clone();
    let mut stats_a = stats(100.0, 4.0);
    let mut stats_b = stats(100.0, 4.0);
    let controls = Controls::default();
    let floor = BodyState {
        on_ground: true,
        floor_sitting: true,
        ..Default::default()
    };

    step_stamina(&mut standing, &mut stats_a, None, &tick(10_000, &grounded(), &controls));
    step_stamina(&mut sitting, &mut stats_b, None, &tick(10_000, &floor, &controls));

    assert!((standing.current - 20.4).abs() < 1e-4);
    assert!((sitting.current - 20.6).abs() < 1e-4);
}

#[test]
fn test_enter_and_exit_in_same_tick_reports_both() {
    let mut stamina = Stamina::new(100.0);
    stamina.current = 0.0;
    let mut stats = stats(100.0, 400.0);
    let body = BodyState::default();
    let controls = Controls::default();

    // idle 10s → rate 800/sec, за тик +40 → сразу выше порога выхода
    let transitions = step_stamina(&mut stamina, &mut stats, None, &tick(10_000, &body, &controls));

    assert_eq!(
        transitions,
        vec![ExhaustionTransition::Entered, ExhaustionTransition::Recovered]
    );
    assert!(!stamina.exhausted);
    assert!((stamina.current - 40.0).abs() < 1e-3);
    assert_eq!(stats.layer(names::WALK_SPEED, layers::EXHAUSTION), Some(0.0));
}
