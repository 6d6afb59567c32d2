//! Headless симуляция VITALS
//!
//! Один survivor 1000 тиков: sprint рывками, случайная еда, без рендера.

use rand::Rng;
use std::time::Duration;
use vitals_simulation::{
    create_stepped_app, logger, survivor_bundle, BodyState, Controls, DeterministicRng, FoodCategory,
    FoodEaten, NutrientPools, Stamina, VitalsPlugin, VitalsProfile,
};

fn main() {
    let seed = 42;
    logger::init_logger();
    logger::log_info(&format!("Starting VITALS headless simulation (seed: {})", seed));

    let mut app = create_stepped_app(seed, Duration::from_millis(50));
    app.add_plugins(VitalsPlugin);

    let survivor = app
        .world_mut()
        .spawn((
            survivor_bundle(VitalsProfile::standard()),
            BodyState {
                on_ground: true,
                ..Default::default()
            },
        ))
        .id();

    for tick in 0..1000 {
        // Спринт 4 секунды из каждых 10
        let sprinting = tick % 200 < 80;
        if let Some(mut controls) = app.world_mut().get_mut::<Controls>(survivor) {
            controls.sprint = sprinting;
            controls.tries_to_move = sprinting;
        }

        let meal = {
            let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
            if rng.rng.gen_bool(0.01) {
                let category = FoodCategory::NUTRIENTS[rng.rng.gen_range(0..FoodCategory::NUTRIENTS.len())];
                Some((category, rng.rng.gen_range(20.0..120.0f32)))
            } else {
                None
            }
        };
        if let Some((category, amount)) = meal {
            app.world_mut().send_event(FoodEaten {
                entity: survivor,
                amount,
                category,
            });
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let saturation = world.get::<NutrientPools>(survivor).map_or(0.0, |p| p.saturation());
            let stamina = world.get::<Stamina>(survivor).map_or(0.0, |s| s.current);
            logger::log_info(&format!(
                "Tick {}: saturation {:.1}, stamina {:.1}",
                tick, saturation, stamina
            ));
        }
    }

    logger::log_info("Simulation complete!");
}
