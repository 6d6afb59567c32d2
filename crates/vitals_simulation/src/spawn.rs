//! Spawn survivor'а из профиля

use bevy::prelude::*;

use crate::components::{layers, names, EntityStats, Health, NutrientPools, Stamina, Survivor};
use crate::config::VitalsProfile;
use crate::stamina::apply_exhaustion_modifiers;

/// Base слои stat'ов из профиля + нейтральные exhaustion модификаторы
pub fn base_stats(profile: &VitalsProfile) -> EntityStats {
    let mut stats = EntityStats::default();

    stats.set(names::HUNGER_RATE, layers::BASE, profile.hunger.hunger_rate_base, false);
    stats.set(names::STAMINA_AMOUNT, layers::BASE, profile.stamina.amount_max_base, false);
    stats.set(names::STAMINA_REGEN, layers::BASE, profile.stamina.recovery_rate_base, false);
    stats.set(names::SPRINT_DRAIN, layers::BASE, profile.stamina.sprint_drain_base, false);
    stats.set(names::JUMP_DRAIN, layers::BASE, profile.stamina.jump_drain_base, false);
    stats.set(names::WALK_SPEED, layers::BASE, 1.0, false);
    stats.set(names::JUMP_HEIGHT_MUL, layers::BASE, 1.0, false);
    apply_exhaustion_modifiers(&mut stats, false);

    stats
}

/// Полный survivor: pools поровну по категориям, stamina на максимуме
pub fn survivor_bundle(profile: VitalsProfile) -> impl Bundle {
    (
        Survivor,
        NutrientPools::new(profile.hunger.max_saturation),
        Stamina::new(profile.stamina.amount_max_base),
        base_stats(&profile),
        Health::default(),
        profile,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_stats_from_standard_profile() {
        let stats = base_stats(&VitalsProfile::standard());

        assert_eq!(stats.blended(names::STAMINA_AMOUNT), 100.0);
        assert_eq!(stats.blended(names::STAMINA_REGEN), 4.0);
        assert_eq!(stats.blended(names::HUNGER_RATE), 1.0);
        // 1.0 + 1.0 × 0.33 (relaxed jump bonus)
        assert!((stats.blended(names::JUMP_HEIGHT_MUL) - 1.33).abs() < 1e-6);
        assert_eq!(stats.blended(names::WALK_SPEED), 1.0);
    }

    #[test]
    fn test_missing_configuration_gives_zero_caps() {
        let mut world = World::new();
        let entity = world.spawn(survivor_bundle(VitalsProfile::default())).id();

        let pools = world.get::<NutrientPools>(entity).expect("required component");
        assert_eq!(pools.cap, 0.0);
        assert_eq!(pools.saturation(), 0.0);
        assert_eq!(world.get::<Stamina>(entity).map(|s| s.current), Some(0.0));
    }
}
