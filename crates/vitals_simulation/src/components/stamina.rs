//! Stamina: текущий запас, exhaustion с гистерезисом, coyote-time grounding,
//! idle-recovery ramp и tool-use ticker.

use bevy::prelude::*;
use std::time::Duration;

use super::NutrientPools;

/// Вход в exhaustion: current ≤ порога
pub const EXHAUSTION_ENTER_THRESHOLD: f32 = 0.01;
/// Выход из exhaustion: current > порога
pub const EXHAUSTION_EXIT_THRESHOLD: f32 = 10.0;

/// Recovery стартует только после паузы в тратах
pub const RECOVERY_DELAY_MS: u64 = 1000;
/// За сколько секунд простоя idle bonus доходит до максимума
pub const SECONDS_TO_MAX_RECOVERY: f32 = 10.0;
pub const MAX_IDLE_RECOVERY_BONUS: f32 = 2.0;
/// Saturation за единицу восстановленной stamina
pub const RECOVERY_SATURATION_COST: f32 = 2.0;

pub const JUMP_COOLDOWN_MS: u64 = 500;

/// Grace window после схода с земли (сек)
pub const COYOTE_TIME: f32 = 0.15;
/// После knockback grace window не открывается (сек)
pub const ANTI_COYOTE_TIME: f32 = 0.16;

/// Частота срабатывания tool-use ticker
pub const TICKER_PERIOD: Duration = Duration::from_millis(20);
/// Задержка перед первым срабатыванием
pub const TICKER_WARMUP: Duration = Duration::from_millis(100);

/// Переход exhaustion state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustionTransition {
    Entered,
    Recovered,
}

/// Coyote-time состояние (короткоживущее, пересчитывается каждый тик)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Grounding {
    pub grounded_this_tick: bool,
    pub coyote_timer: f32,
    pub anti_coyote_timer: f32,
}

impl Grounding {
    /// Пересчитывает grounded для тика
    ///
    /// Grounded = на земле и не плывёт, ИЛИ ещё тикает coyote window.
    /// Knockback при открытом окне закрывает его и открывает anti-coyote.
    pub fn update(&mut self, on_ground: bool, swimming: bool, knockback: bool, dt: f32) -> bool {
        let solid = on_ground && !swimming;

        if solid && self.anti_coyote_timer <= 0.0 {
            self.coyote_timer = COYOTE_TIME;
        }
        if self.coyote_timer > 0.0 && knockback {
            self.coyote_timer = 0.0;
            self.anti_coyote_timer = ANTI_COYOTE_TIME;
        }

        let grounded = solid || self.coyote_timer > 0.0;

        self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        self.anti_coyote_timer = (self.anti_coyote_timer - dt).max(0.0);
        self.grounded_this_tick = grounded;

        grounded
    }
}

/// Периодическое списание stamina пока держится tool interaction
#[derive(Debug, Clone)]
pub struct ToolUseTicker {
    pub rate_per_second: f32,
    warmup: Duration,
    timer: Timer,
}

impl ToolUseTicker {
    pub fn new(rate_per_second: f32) -> Self {
        Self {
            rate_per_second,
            warmup: TICKER_WARMUP,
            timer: Timer::new(TICKER_PERIOD, TimerMode::Repeating),
        }
    }

    /// Продвигает ticker, возвращает число срабатываний за `delta`
    pub fn advance(&mut self, delta: Duration) -> u32 {
        let mut delta = delta;
        if !self.warmup.is_zero() {
            if delta <= self.warmup {
                self.warmup -= delta;
                return 0;
            }
            delta -= self.warmup;
            self.warmup = Duration::ZERO;
        }

        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }

    /// Stamina за одно срабатывание (rate × период)
    pub fn drain_per_firing(&self) -> f32 {
        self.rate_per_second * TICKER_PERIOD.as_secs_f32()
    }
}

/// Параметры одного recovery шага
#[derive(Debug, Clone, Copy)]
pub struct RecoveryInputs {
    /// Blended staminaRegen
    pub regen_rate: f32,
    /// Множитель при сидении (None - не сидит)
    pub sitting_multiplier: Option<f32>,
    pub cap: f32,
}

/// Выносливость
///
/// Инвариант: 0.0 ≤ current ≤ cap (cap = blended staminaAmount, может сжиматься)
/// Exhausted: вход при current ≤ 0.01, выход при current > 10.0
#[derive(Component, Debug, Clone)]
pub struct Stamina {
    pub current: f32,
    pub exhausted: bool,
    /// Monotonic world time последней траты (ms)
    pub last_spend_ms: u64,
    last_jump_ms: Option<u64>,
    jump_held: bool,
    pub grounding: Grounding,
    ticker: Option<ToolUseTicker>,
}

impl Default for Stamina {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Stamina {
    pub fn new(amount: f32) -> Self {
        Self {
            current: amount.max(0.0),
            exhausted: false,
            last_spend_ms: 0,
            last_jump_ms: None,
            jump_held: false,
            grounding: Grounding::default(),
            ticker: None,
        }
    }

    pub fn clamp_to_cap(&mut self, cap: f32) {
        self.current = self.current.clamp(0.0, cap.max(0.0));
    }

    /// Трата только если хватает с запасом: `amount < current`
    ///
    /// Потратить ровно весь остаток нельзя.
    pub fn try_spend(&mut self, amount: f32, now_ms: u64) -> bool {
        if amount >= self.current {
            return false;
        }

        self.spend(amount, now_ms);
        true
    }

    /// Безусловная трата (sprint/jump), с полом в 0
    pub fn spend(&mut self, amount: f32, now_ms: u64) {
        self.current = (self.current - amount.max(0.0)).max(0.0);
        self.last_spend_ms = now_ms;
    }

    /// Прыжок засчитывается по фронту нажатия и не чаще раза в 500ms
    pub fn register_jump(&mut self, jump_pressed: bool, alive: bool, now_ms: u64) -> bool {
        let rising_edge = jump_pressed && !self.jump_held;
        self.jump_held = jump_pressed;

        let cooled_down = self
            .last_jump_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= JUMP_COOLDOWN_MS);

        if rising_edge && cooled_down && alive {
            self.last_jump_ms = Some(now_ms);
            return true;
        }
        false
    }

    /// Idle bonus: линейно 0 → 2.0 за первые 10 секунд простоя
    pub fn idle_bonus(elapsed_ms: u64) -> f32 {
        let t = (elapsed_ms as f32 / (SECONDS_TO_MAX_RECOVERY * 1000.0)).clamp(0.0, 1.0);
        MAX_IDLE_RECOVERY_BONUS * t
    }

    /// Восстановление stamina; возвращает сколько добавлено
    ///
    /// Работает только через ≥1000ms после последней траты. Восстановление
    /// стоит saturation: `rate × dt × 2` списывается из pools (если они есть).
    pub fn recover(
        &mut self,
        dt: f32,
        now_ms: u64,
        inputs: RecoveryInputs,
        pools: Option<&mut NutrientPools>,
    ) -> f32 {
        let elapsed = now_ms.saturating_sub(self.last_spend_ms);
        if elapsed < RECOVERY_DELAY_MS {
            return 0.0;
        }

        let mut rate = inputs.regen_rate * Self::idle_bonus(elapsed);
        if rate <= 0.0 {
            return 0.0;
        }

        if let Some(pools) = pools {
            pools.deplete(rate * dt * RECOVERY_SATURATION_COST);
        }

        if let Some(multiplier) = inputs.sitting_multiplier {
            rate *= multiplier;
        }

        let before = self.current;
        self.current = (self.current + rate * dt).min(inputs.cap.max(0.0));
        (self.current - before).max(0.0)
    }

    /// Normal → Exhausted
    pub fn check_exhaustion_enter(&mut self) -> Option<ExhaustionTransition> {
        if !self.exhausted && self.current <= EXHAUSTION_ENTER_THRESHOLD {
            self.exhausted = true;
            return Some(ExhaustionTransition::Entered);
        }
        None
    }

    /// Exhausted → Normal
    pub fn check_exhaustion_exit(&mut self) -> Option<ExhaustionTransition> {
        if self.exhausted && self.current > EXHAUSTION_EXIT_THRESHOLD {
            self.exhausted = false;
            return Some(ExhaustionTransition::Recovered);
        }
        None
    }

    /// Ставит ticker, заменяя предыдущий (активен максимум один)
    pub fn set_ticker(&mut self, rate_per_second: f32) {
        self.ticker = Some(ToolUseTicker::new(rate_per_second));
    }

    /// Снимает ticker; без ticker'а - no-op
    pub fn remove_ticker(&mut self) {
        self.ticker = None;
    }

    pub fn ticker(&self) -> Option<&ToolUseTicker> {
        self.ticker.as_ref()
    }

    /// Продвигает ticker на `delta`; каждое срабатывание - `try_spend`.
    /// Возвращает суммарно списанное.
    pub fn fire_ticker(&mut self, delta: Duration, now_ms: u64) -> f32 {
        let Some(ticker) = self.ticker.as_mut() else {
            return 0.0;
        };

        let firings = ticker.advance(delta);
        let drain = ticker.drain_per_firing();

        let mut spent = 0.0;
        for _ in 0..firings {
            if self.try_spend(drain, now_ms) {
                spent += drain;
            }
        }
        spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn inputs(regen_rate: f32, cap: f32) -> RecoveryInputs {
        RecoveryInputs {
            regen_rate,
            sitting_multiplier: None,
            cap,
        }
    }

    #[test]
    fn test_try_spend_exact_remaining_fails() {
        let mut stamina = Stamina::new(50.0);

        assert!(!stamina.try_spend(50.0, 100));
        assert_eq!(stamina.current, 50.0);
        assert_eq!(stamina.last_spend_ms, 0);

        assert!(stamina.try_spend(50.0 - 0.0001, 100));
        assert!(stamina.current < 0.001);
        assert_eq!(stamina.last_spend_ms, 100);
    }

    #[test]
    fn test_spend_floors_at_zero() {
        let mut stamina = Stamina::new(1.0);
        stamina.spend(5.0, 10);
        assert_eq!(stamina.current, 0.0);
    }

    #[test]
    fn test_clamp_to_shrinking_cap() {
        let mut stamina = Stamina::new(100.0);
        stamina.clamp_to_cap(60.0);
        assert_eq!(stamina.current, 60.0);
    }

    #[test]
    fn test_idle_bonus_ramp() {
        assert_eq!(Stamina::idle_bonus(0), 0.0);
        assert!((Stamina::idle_bonus(5_000) - 1.0).abs() < EPS);
        assert_eq!(Stamina::idle_bonus(10_000), 2.0);
        assert_eq!(Stamina::idle_bonus(60_000), 2.0);
    }

    #[test]
    fn test_recover_waits_for_delay() {
        let mut stamina = Stamina::new(50.0);
        stamina.spend(30.0, 1_000);

        let gained = stamina.recover(1.0, 1_900, inputs(4.0, 50.0), None);

        assert_eq!(gained, 0.0);
        assert_eq!(stamina.current, 20.0);
    }

    #[test]
    fn test_recover_at_full_idle_bonus() {
        // current=0.02, cap=50, 10s простоя → idleBonus ровно 2.0
        let mut stamina = Stamina::new(50.0);
        stamina.current = 0.02;
        stamina.last_spend_ms = 0;

        let gained = stamina.recover(0.5, 10_000, inputs(4.0, 50.0), None);

        // 4.0 × 2.0 × 0.5
        assert!((gained - 4.0).abs() < EPS);
        assert!((stamina.current - 4.02).abs() < EPS);
    }

    #[test]
    fn test_recover_costs_saturation() {
        let mut stamina = Stamina::new(50.0);
        stamina.current = 10.0;
        let mut pools = NutrientPools::new(100.0);

        stamina.recover(1.0, 10_000, inputs(4.0, 50.0), Some(&mut pools));

        // rate 8.0 × dt 1.0 × 2
        assert!((pools.saturation() - 84.0).abs() < 1e-3);
    }

    #[test]
    fn test_recover_sitting_multiplier() {
        let mut stamina = Stamina::new(50.0);
        stamina.current = 10.0;
        let mut sitting = inputs(4.0, 50.0);
        sitting.sitting_multiplier = Some(1.5);

        let gained = stamina.recover(1.0, 10_000, sitting, None);

        assert!((gained - 12.0).abs() < EPS);
    }

    #[test]
    fn test_recover_clamped_to_cap() {
        let mut stamina = Stamina::new(50.0);
        stamina.current = 49.0;
        stamina.recover(10.0, 20_000, inputs(4.0, 50.0), None);
        assert_eq!(stamina.current, 50.0);
    }

    #[test]
    fn test_exhaustion_hysteresis_no_flapping() {
        let mut stamina = Stamina::new(50.0);
        stamina.current = 0.01;
        assert_eq!(stamina.check_exhaustion_enter(), Some(ExhaustionTransition::Entered));

        // Колебания внутри (0.01, 10.0] не выводят из exhaustion
        for value in [5.0, 0.5, 9.99, 10.0, 3.0] {
            stamina.current = value;
            assert_eq!(stamina.check_exhaustion_exit(), None);
            assert_eq!(stamina.check_exhaustion_enter(), None);
            assert!(stamina.exhausted);
        }

        stamina.current = 10.01;
        assert_eq!(stamina.check_exhaustion_exit(), Some(ExhaustionTransition::Recovered));
        assert!(!stamina.exhausted);

        // И обратно в Normal band без повторного входа
        stamina.current = 5.0;
        assert_eq!(stamina.check_exhaustion_enter(), None);
    }

    #[test]
    fn test_jump_edge_and_cooldown() {
        let mut stamina = Stamina::new(50.0);

        assert!(stamina.register_jump(true, true, 1_000));
        // Удержание - не новый прыжок
        assert!(!stamina.register_jump(true, true, 1_700));
        assert!(!stamina.register_jump(false, true, 1_710));
        // Новый фронт, но cooldown не прошёл
        stamina.last_jump_ms = Some(1_400);
        assert!(!stamina.register_jump(true, true, 1_720));
        assert!(!stamina.register_jump(false, true, 1_900));
        assert!(stamina.register_jump(true, true, 1_950));
        // Мёртвые не прыгают
        assert!(!stamina.register_jump(false, false, 3_000));
        assert!(!stamina.register_jump(true, false, 3_010));
    }

    #[test]
    fn test_grounding_coyote_window() {
        let mut grounding = Grounding::default();
        let dt = 0.1;

        assert!(grounding.update(true, false, false, dt));
        // Сошли с земли: от окна 0.15 осталось 0.05 → ещё один тик grounded
        assert!(grounding.update(false, false, false, dt));
        assert!(!grounding.update(false, false, false, dt));
    }

    #[test]
    fn test_grounding_swimming_is_not_grounded() {
        let mut grounding = Grounding::default();
        assert!(!grounding.update(true, true, false, 0.05));
    }

    #[test]
    fn test_knockback_closes_coyote_and_blocks_reopen() {
        let mut grounding = Grounding::default();
        let dt = 0.1;

        grounding.update(true, false, false, dt);
        // Knockback в воздухе при открытом окне → сразу не grounded
        assert!(!grounding.update(false, false, true, dt));
        assert_eq!(grounding.coyote_timer, 0.0);

        // Приземлились во время anti-coyote: grounded физически, но окно не открывается
        assert!(grounding.update(true, false, false, dt));
        assert_eq!(grounding.coyote_timer, 0.0);
        assert!(!grounding.update(false, false, false, dt));
    }

    #[test]
    fn test_ticker_replacement_only_new_rate_drains() {
        let mut stamina = Stamina::new(100.0);

        stamina.set_ticker(5.0);
        stamina.set_ticker(3.0);

        // 100ms warmup + 1s = 50 срабатываний по 3.0 × 0.02
        let spent = stamina.fire_ticker(Duration::from_millis(1_100), 500);

        assert!((spent - 3.0).abs() < 1e-3, "spent = {}", spent);
        assert!((stamina.current - 97.0).abs() < 1e-3);
        assert_eq!(stamina.last_spend_ms, 500);
    }

    #[test]
    fn test_ticker_warmup() {
        let mut stamina = Stamina::new(100.0);
        stamina.set_ticker(10.0);

        assert_eq!(stamina.fire_ticker(Duration::from_millis(60), 0), 0.0);
        assert_eq!(stamina.fire_ticker(Duration::from_millis(40), 0), 0.0);
        let spent = stamina.fire_ticker(Duration::from_millis(20), 0);
        assert!((spent - 0.2).abs() < EPS);
    }

    #[test]
    fn test_remove_ticker_is_idempotent() {
        let mut stamina = Stamina::new(100.0);
        stamina.remove_ticker();
        stamina.set_ticker(2.0);
        stamina.remove_ticker();
        stamina.remove_ticker();

        assert!(stamina.ticker().is_none());
        assert_eq!(stamina.fire_ticker(Duration::from_secs(2), 0), 0.0);
        assert_eq!(stamina.current, 100.0);
    }

    #[test]
    fn test_ticker_stops_before_emptying() {
        let mut stamina = Stamina::new(0.5);
        stamina.set_ticker(50.0); // 1.0 за срабатывание > остатка

        let spent = stamina.fire_ticker(Duration::from_secs(1), 0);

        assert_eq!(spent, 0.0);
        assert_eq!(stamina.current, 0.5);
    }
}
