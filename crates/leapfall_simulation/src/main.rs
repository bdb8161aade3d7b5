//! Headless прогон Leapfall
//!
//! Скриптованная сессия без рендера: menu → level → прыжки → landing → teleport.

use bevy::prelude::*;
use leapfall_simulation::{
    create_headless_app, CameraShake, CurrentSession, GameplayConfig, InteractPressed,
    JumpBudget, JumpCommand, LandingImpact, Locomotion, MenuInput, SimulationPlugin,
    TeleportEligibilityChanged,
};

fn main() {
    println!("Starting Leapfall headless session");

    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);

    // Menu: нет save → сразу Level_1
    app.world_mut().send_event(MenuInput::StartNewGame);
    app.update();

    let level = app.world().resource::<CurrentSession>().0.level_name().to_string();
    println!("Level: {}", level);

    // Player camera
    let camera_config = app.world().resource::<GameplayConfig>().camera.clone();
    let camera = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, 1.6, 0.0),
            CameraShake::new(Vec3::new(0.0, 1.6, 0.0), camera_config),
            Locomotion::new(true, Vec3::new(0.0, 0.0, -4.0)),
        ))
        .id();

    // Три прыжка, потом landing
    for tick in 0..240 {
        if tick % 60 == 0 && tick < 180 {
            app.world_mut().send_event(JumpCommand::Use);
        }
        if tick == 180 {
            app.world_mut().send_event(LandingImpact {
                camera,
                magnitude: 0.3,
            });
        }
        if tick == 200 {
            app.world_mut().send_event(JumpCommand::Replenish);
            app.world_mut()
                .send_event(TeleportEligibilityChanged { eligible: true });
        }
        if tick == 210 {
            app.world_mut().send_event(InteractPressed);
        }

        app.update();

        if tick % 60 == 0 {
            let budget = app.world().resource::<JumpBudget>();
            let y = app
                .world()
                .get::<Transform>(camera)
                .map(|transform| transform.translation.y)
                .unwrap_or_default();
            println!(
                "Tick {}: jumps {}/{}, camera y {:.3}",
                tick,
                budget.remaining(),
                budget.max(),
                y
            );
        }
    }

    println!("Session complete!");
}
